//! Search driver: one negamax call per decision.

pub mod negamax;
pub mod tt;

use tabia_board::{ChessMove, Color, Position};
use tracing::debug;

use crate::eval::LARGE_VALUE;
use crate::eval::phase::game_phase;
use negamax::{SearchContext, negamax};
use tt::TranspositionTable;

/// Result of a completed decision.
#[derive(Debug, Clone, Copy)]
pub struct SearchReport {
    /// Root move attached to the best score, or `None` when the position
    /// has no legal move at all.
    pub best_move: Option<ChessMove>,
    /// Score of the chosen line, from the root side's perspective.
    pub score: i32,
    /// Total nodes visited, quiescence included.
    pub nodes: u64,
}

/// Move selector owning the process-wide transposition table.
///
/// The table lives as long as the searcher and is reused, warm, across
/// decisions; slot aliasing is the only eviction.
pub struct Searcher {
    tt: TranspositionTable,
}

impl Searcher {
    /// Create a searcher with a table of at least `tt_entries` slots.
    pub fn new(tt_entries: usize) -> Self {
        Self {
            tt: TranspositionTable::new(tt_entries),
        }
    }

    /// Drop all cached search results.
    ///
    /// Production play never needs this; tests use it to make reruns
    /// deterministic.
    pub fn clear_tt(&mut self) {
        self.tt.clear();
    }

    /// Run one full search to `max_depth` plies from the current position.
    ///
    /// The position is mutated during the search and restored before
    /// returning. The game phase is computed fresh for this decision.
    pub fn search(&mut self, position: &mut Position, max_depth: u8) -> SearchReport {
        let colour = match position.side_to_move() {
            Color::White => 1,
            Color::Black => -1,
        };
        let mut ctx = SearchContext {
            nodes: 0,
            tt: &mut self.tt,
            phase: game_phase(position),
            root_move: None,
        };

        let score = negamax(
            position,
            max_depth,
            0,
            -LARGE_VALUE,
            LARGE_VALUE,
            colour,
            &mut ctx,
        );

        debug!(
            depth = max_depth,
            score,
            nodes = ctx.nodes,
            best = ?ctx.root_move,
            "search complete"
        );

        SearchReport {
            best_move: ctx.root_move,
            score,
            nodes: ctx.nodes,
        }
    }

    /// Choose a move to play: the search result, or the first legal move
    /// when the search recorded none. Returns `None` only when the game
    /// is over.
    pub fn choose_move(&mut self, position: &mut Position, max_depth: u8) -> Option<ChessMove> {
        let report = self.search(position, max_depth);
        report
            .best_move
            .or_else(|| position.legal_moves(false).into_iter().next())
    }
}

impl std::fmt::Debug for Searcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Searcher").field("tt", &self.tt).finish()
    }
}

#[cfg(test)]
mod tests {
    use tabia_board::Position;

    use super::Searcher;
    use crate::eval::LARGE_VALUE;
    use crate::search::negamax::MATE_THRESHOLD;

    fn searcher() -> Searcher {
        Searcher::new(1 << 16)
    }

    #[test]
    fn startpos_depth_1_returns_a_legal_opening_move() {
        let mut pos = Position::startpos();
        let legal = pos.legal_moves(false);
        assert_eq!(legal.len(), 20);

        let mv = searcher().choose_move(&mut pos, 1).expect("a move exists");
        assert!(legal.contains(&mv));
    }

    #[test]
    fn finds_mate_in_one() {
        // White: Kf6, Qg6. Qg7 is the only mate in one.
        let mut pos = Position::from_fen("7k/8/5KQ1/8/8/8/8/8 w - - 0 1").unwrap();
        let report = searcher().search(&mut pos, 2);
        assert_eq!(report.best_move.unwrap().to_string(), "g6g7");
        assert_eq!(report.score, LARGE_VALUE - 1);
    }

    #[test]
    fn prefers_the_shallow_mate_at_depth_4() {
        // Deeper mates exist in the tree, but mate-distance scoring must
        // keep the immediate one on top.
        let mut pos = Position::from_fen("7k/8/5KQ1/8/8/8/8/8 w - - 0 1").unwrap();
        let report = searcher().search(&mut pos, 4);
        assert_eq!(report.best_move.unwrap().to_string(), "g6g7");
        assert_eq!(report.score, LARGE_VALUE - 1);
    }

    #[test]
    fn finds_back_rank_mate_at_depth_4() {
        let mut pos = Position::from_fen("6k1/5ppp/8/8/8/8/8/R3K3 w - - 0 1").unwrap();
        let mv = searcher().choose_move(&mut pos, 4).expect("a move exists");
        assert_eq!(mv.to_string(), "a1a8");
    }

    #[test]
    fn checkmated_position_yields_no_move() {
        let mut pos = Position::from_fen("7k/6Q1/5K2/8/8/8/8/8 b - - 0 1").unwrap();
        let mut searcher = searcher();

        let report = searcher.search(&mut pos, 3);
        assert!(report.best_move.is_none());
        assert!(report.score < -MATE_THRESHOLD);

        assert!(searcher.choose_move(&mut pos, 3).is_none());
    }

    #[test]
    fn stalemate_scores_zero_and_yields_no_move() {
        let mut pos = Position::from_fen("k7/2K5/1Q6/8/8/8/8/8 b - - 0 1").unwrap();
        let mut searcher = searcher();

        let report = searcher.search(&mut pos, 3);
        assert_eq!(report.score, 0);
        assert!(report.best_move.is_none());
        assert!(searcher.choose_move(&mut pos, 3).is_none());
    }

    #[test]
    fn depth_zero_still_produces_a_playable_move() {
        // The search records nothing at depth 0; the driver falls back to
        // the first enumerated legal move.
        let mut pos = Position::startpos();
        let mv = searcher().choose_move(&mut pos, 0).expect("fallback move");
        assert!(pos.legal_moves(false).contains(&mv));
    }

    /// A warm table changes the node count, not the chosen move.
    #[test]
    fn warm_table_chooses_the_same_move() {
        let mut pos = Position::from_fen("7k/8/5KQ1/8/8/8/8/8 w - - 0 1").unwrap();
        let mut searcher = searcher();

        let cold = searcher.search(&mut pos, 3);
        let warm = searcher.search(&mut pos, 3);

        assert_eq!(cold.best_move, warm.best_move);
        assert_eq!(cold.score, warm.score);
        assert!(warm.nodes <= cold.nodes);
    }

    #[test]
    fn clear_tt_restores_cold_behaviour() {
        let mut pos = Position::startpos();
        let mut searcher = searcher();

        let cold = searcher.search(&mut pos, 3);
        searcher.clear_tt();
        let cleared = searcher.search(&mut pos, 3);

        assert_eq!(cold.best_move, cleared.best_move);
        assert_eq!(cold.score, cleared.score);
        assert_eq!(cold.nodes, cleared.nodes);
    }

    #[test]
    fn search_leaves_the_position_intact() {
        let mut pos = Position::startpos();
        let before = pos.hash();
        searcher().search(&mut pos, 3);
        assert_eq!(pos.hash(), before);
        assert_eq!(pos.legal_moves(false).len(), 20);
    }
}
