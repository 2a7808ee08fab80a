//! Compressed piece-square tables.
//!
//! The PeSTO middlegame/endgame tables for all six piece types are packed
//! as 6-bit fields inside 64-bit words, ten fields per word. Each piece
//! type owns a block of 128 linear indices: squares 0..64 hold the
//! middlegame bonuses and squares 64..128 the endgame bonuses, stored
//! rank-8-first (index 0 = a8). Decoding is pure arithmetic; the packing
//! is an encoding detail, not a behavioural one.

/// Middlegame material values, indexed by piece type
/// (pawn, knight, bishop, rook, queen, king).
pub const MG_VALUE: [i32; 6] = [82, 337, 365, 477, 1025, 20_000];

/// Endgame material values, indexed by piece type.
pub const EG_VALUE: [i32; 6] = [94, 281, 297, 512, 936, 20_000];

/// Packed piece-square data: 77 words covering 768 six-bit fields.
#[rustfmt::skip]
const PST_PACKED: [u64; 77] = [
    657614902731556116, 420894446315227099, 384592972471695068,
    312245244820264086, 364876803783607569, 366006824779723922,
    366006826859316500, 786039115310605588, 421220596516513823,
    366011295806342421, 366006826859316436, 366006896669578452,
    162218943720801556, 440575073001255824, 657087419459913430,
    402634039558223453, 347425219986941203, 365698755348489557,
    311382605788951956, 147850316371514514, 329107007234708689,
    402598430990222677, 402611905376114006, 329415149680141460,
    257053881053295759, 291134268204721362, 492947507967247313,
    367159395376767958, 384021229732455700, 384307098409076181,
    402035762391246293, 328847661003244824, 365712019230110867,
    366002427738801364, 384307168185238804, 347996828560606484,
    329692156834174227, 365439338182165780, 386018218798040211,
    456959123538409047, 347157285952386452, 365711880701965780,
    365997890021704981, 221896035722130452, 384289231362147538,
    384307167128540502, 366006826859320596, 366006826876093716,
    366002360093332756, 366006824694793492, 347992428333053139,
    457508666683233428, 329723156783776785, 329401687190893908,
    366002356855326100, 366288301819245844, 329978030930875600,
    420621693221156179, 422042614449657239, 384602117564867863,
    419505151144195476, 366274972473194070, 329406075454444949,
    275354286769374224, 366855645423297932, 329991151972070674,
    311105941360174354, 256772197720318995, 365993560693875923,
    258219435335676691, 383730812414424149, 384601907111998612,
    401758895947998613, 420612834953622999, 402607438610388375,
    329978099633296596, 67159620133902,
];

/// Decode the bonus for linear piece-square index `psq`.
///
/// Fields store `value / 8 + 20` in six bits, so the decoded range is
/// `-160..=344` centipawns.
#[inline]
pub fn pst_bonus(psq: usize) -> i32 {
    (((PST_PACKED[psq / 10] >> (6 * (psq % 10))) & 63) as i32 - 20) * 8
}

/// Linear piece-square index for a piece type on a square.
///
/// `square` is an a1-based index (0 = a1, 63 = h8). The tables are stored
/// rank-8-first, so White squares are mirrored vertically; Black squares
/// are used as-is.
#[inline]
pub fn pst_index(piece: usize, square: usize, mirror: bool) -> usize {
    128 * piece + (square ^ if mirror { 56 } else { 0 })
}

#[cfg(test)]
mod tests {
    use super::{EG_VALUE, MG_VALUE, pst_bonus, pst_index};

    #[test]
    fn decoded_values_stay_in_field_range() {
        for psq in 0..768 {
            let bonus = pst_bonus(psq);
            assert!((-160..=344).contains(&bonus), "psq {psq} decoded {bonus}");
            assert_eq!(bonus % 8, 0);
        }
    }

    /// Pawns never stand on the back ranks, so those rows pack to zero.
    #[test]
    fn pawn_back_rank_rows_are_zero() {
        for sq in 0..8 {
            assert_eq!(pst_bonus(sq), 0, "pawn mg rank 8");
            assert_eq!(pst_bonus(sq + 64), 0, "pawn eg rank 8");
            assert_eq!(pst_bonus(sq + 56), 0, "pawn mg rank 1");
            assert_eq!(pst_bonus(sq + 56 + 64), 0, "pawn eg rank 1");
        }
    }

    /// White on e4 and Black on e5 mirror to the same table entry.
    #[test]
    fn white_mirrors_black_vertically() {
        let e4 = 28;
        let e5 = 36;
        assert_eq!(pst_index(0, e4, true), pst_index(0, e5, false));
    }

    #[test]
    fn material_values_rank_pieces_sensibly() {
        // pawn < knight <= bishop < rook < queen < king, in both phases
        for values in [MG_VALUE, EG_VALUE] {
            assert!(values[0] < values[1]);
            assert!(values[1] <= values[2]);
            assert!(values[2] < values[3]);
            assert!(values[3] < values[4]);
            assert!(values[4] < values[5]);
        }
    }
}
