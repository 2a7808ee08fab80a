//! Negamax alpha-beta search with a capture-only quiescence extension.

use tabia_board::{ChessMove, Position};

use crate::eval::{LARGE_VALUE, evaluate};
use crate::search::tt::{Bound, TranspositionTable};

/// Scores above this threshold indicate a forced mate.
pub const MATE_THRESHOLD: i32 = LARGE_VALUE - 1_000;

/// Score returned for a repeated position.
///
/// The original tuning used a small penalty rather than a true draw
/// score of 0, so the engine steers away from repetitions even when
/// level. Kept as a tunable constant, not an invariant.
pub const REPETITION_PENALTY: i32 = -5;

/// Search state threaded through the recursion for one decision.
pub(crate) struct SearchContext<'a> {
    /// Total nodes visited.
    pub nodes: u64,
    /// Transposition table, shared across decisions.
    pub tt: &'a mut TranspositionTable,
    /// Game phase, computed once at the root.
    pub phase: i32,
    /// Best root move found so far.
    pub root_move: Option<ChessMove>,
}

/// Negamax alpha-beta search, fail-hard.
///
/// Returns the best score for the side to move in that side's sign
/// convention. `colour` is +1 with White to move and −1 with Black, and
/// flips with every recursion alongside the window swap. At the root
/// (`ply == 0`) the move attached to the best score is recorded in
/// `ctx.root_move` as a side effect.
pub(crate) fn negamax(
    position: &mut Position,
    depth: u8,
    ply: u8,
    mut alpha: i32,
    mut beta: i32,
    colour: i32,
    ctx: &mut SearchContext<'_>,
) -> i32 {
    ctx.nodes += 1;

    // A position we have already been in is not worth expanding again.
    if ply > 0 && position.is_repetition() {
        return REPETITION_PENALTY;
    }

    // Probe before the depth check so cached frontier results are reused.
    // The root never takes a table cutoff: a bare score would leave no
    // move to play.
    let original_alpha = alpha;
    let entry = ctx.tt.probe(position.hash(), ply);
    if ply > 0 && entry.bound != Bound::Empty && entry.depth >= depth {
        match entry.bound {
            Bound::Exact => return entry.score,
            Bound::LowerBound => alpha = alpha.max(entry.score),
            Bound::UpperBound => beta = beta.min(entry.score),
            Bound::Empty => {}
        }
        if alpha >= beta {
            return entry.score;
        }
    }

    // Frontier: resolve hanging tactics before trusting the evaluation.
    if depth == 0 {
        return quiescence(position, ply, alpha, beta, colour, ctx);
    }

    let moves = position.legal_moves(false);

    // No legal moves: the game ended inside the tree.
    if moves.is_empty() {
        return if position.is_checkmate() {
            -(LARGE_VALUE - ply as i32)
        } else {
            0
        };
    }

    let mut best = -LARGE_VALUE;
    for mv in moves {
        position.make_move(mv);
        let score = -negamax(position, depth - 1, ply + 1, -beta, -alpha, -colour, ctx);
        position.undo_move(mv);

        if score > best {
            best = score;
        }
        if score >= beta {
            // Fail hard: the opponent already has a better guarantee, so
            // the exact value of this refutation does not matter.
            ctx.tt
                .store(position.hash(), depth, best, Bound::LowerBound, ply);
            return beta;
        }
        if score > alpha {
            alpha = score;
            if ply == 0 {
                ctx.root_move = Some(mv);
            }
        }
    }

    // Classify against the window at node entry: if alpha never rose the
    // search failed low and `best` is only an upper bound.
    let bound = if best <= original_alpha {
        Bound::UpperBound
    } else {
        Bound::Exact
    };
    ctx.tt.store(position.hash(), depth, best, bound, ply);

    best
}

/// Quiescence search: captures only, no depth counter.
///
/// The stand-pat score is a lower bound because the side to move may
/// always decline to keep capturing. Termination is structural — every
/// recursion removes a piece from a finite board. No transposition
/// caching and no move recording happen here.
pub(crate) fn quiescence(
    position: &mut Position,
    ply: u8,
    mut alpha: i32,
    beta: i32,
    colour: i32,
    ctx: &mut SearchContext<'_>,
) -> i32 {
    ctx.nodes += 1;

    let stand_pat = evaluate(position, ply, colour, ctx.phase);
    if stand_pat >= beta {
        return beta;
    }
    if stand_pat > alpha {
        alpha = stand_pat;
    }

    for mv in position.legal_moves(true) {
        position.make_move(mv);
        let score = -quiescence(position, ply + 1, -beta, -alpha, -colour, ctx);
        position.undo_move(mv);

        if score >= beta {
            return beta;
        }
        if score > alpha {
            alpha = score;
        }
    }

    alpha
}
