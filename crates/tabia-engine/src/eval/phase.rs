//! Game phase calculation based on remaining non-pawn material.

use tabia_board::{ALL_COLORS, Piece, Position};

/// Phase value for a board with no non-pawn, non-king material at all.
///
/// Weights: Knight=1, Bishop=1, Rook=2, Queen=4.
/// Starting totals: 4×1 + 4×1 + 4×2 + 2×4 = 24.
pub const MAX_PHASE: i32 = 24;

const PHASE_WEIGHTS: [(Piece, i32); 4] = [
    (Piece::Knight, 1),
    (Piece::Bishop, 1),
    (Piece::Rook, 2),
    (Piece::Queen, 4),
];

/// Calculate the game phase from non-pawn, non-king material on the board.
///
/// Starts at [`MAX_PHASE`] and subtracts the weight of every such piece
/// still on the board, for both colours: 0 means a full middlegame
/// complement, [`MAX_PHASE`] a pure king-and-pawn ending. The value feeds
/// the tapered evaluation as the endgame weight.
///
/// No lower clamp is applied, so heavy promotion can drive the result
/// negative; the evaluator's arithmetic tolerates that.
pub fn game_phase(position: &Position) -> i32 {
    let mut phase = MAX_PHASE;
    for colour in ALL_COLORS {
        for (piece, weight) in PHASE_WEIGHTS {
            phase -= position.piece_bitboard(piece, colour).popcnt() as i32 * weight;
        }
    }
    phase
}
