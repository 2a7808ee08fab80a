//! Tapered static evaluation.

pub mod phase;
pub mod pst;

use tabia_board::{ALL_COLORS, ALL_PIECES, Color, Position};

use pst::{EG_VALUE, MG_VALUE, pst_bonus, pst_index};

/// Sentinel bounding every legitimate score. Mate scores are derived
/// from it as `LARGE_VALUE - ply`, so the sentinel itself is unreachable
/// by any real line.
pub const LARGE_VALUE: i32 = 50_000;

/// Score the current position from the side to move's perspective.
///
/// `colour` is +1 with White to move and −1 with Black to move; it flips
/// at every ply alongside the board, converting the White-relative
/// material-and-placement sum into the mover's perspective. `phase` is
/// the pre-computed game phase for this decision (0 = full middlegame
/// material), used unscaled against the 256-point taper.
///
/// If the side to move is checkmated, the tapered sum is bypassed and a
/// mate score shaped by `ply` is returned, so shallower mates always
/// compare better than deeper ones.
pub fn evaluate(position: &Position, ply: u8, colour: i32, phase: i32) -> i32 {
    if position.is_checkmate() {
        return -(LARGE_VALUE - ply as i32);
    }

    let mut mg = [0i32; 2];
    let mut eg = [0i32; 2];

    for side in ALL_COLORS {
        let mirror = side == Color::White;
        for (piece_type, piece) in ALL_PIECES.into_iter().enumerate() {
            for square in position.piece_bitboard(piece, side) {
                let psq = pst_index(piece_type, square.to_index(), mirror);
                mg[side.to_index()] += MG_VALUE[piece_type] + pst_bonus(psq);
                eg[side.to_index()] += EG_VALUE[piece_type] + pst_bonus(psq + 64);
            }
        }
    }

    let white = Color::White.to_index();
    let black = Color::Black.to_index();
    let mg_diff = mg[white] - mg[black];
    let eg_diff = eg[white] - eg[black];

    colour * ((mg_diff * (256 - phase) + eg_diff * phase) / 256)
}
