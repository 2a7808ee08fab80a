//! Mutable game position with a strict make/unmake interface.

use std::fmt;
use std::str::FromStr;

use chess::{BitBoard, Board, BoardStatus, ChessMove, Color, MoveGen, Piece};
use tracing::debug;

use crate::error::PositionError;

/// The full mutable game state, owned by the caller and mutated in place
/// by the search through paired [`make_move`](Position::make_move) /
/// [`undo_move`](Position::undo_move) calls.
///
/// Moves must be undone in strict LIFO order: `undo_move` restores the
/// exact prior state (side to move, castling and en passant rights, hash
/// key). A mismatched undo is a contract violation, not a recoverable
/// error, and is caught by a debug assertion.
///
/// The position carries its own history, so repetition detection sees
/// both the game moves played before a search and the moves the search
/// itself makes.
#[derive(Debug, Clone)]
pub struct Position {
    board: Board,
    /// Undo stack: the move made and the board it was made from.
    history: Vec<(ChessMove, Board)>,
    /// Hash keys of every earlier position, oldest first.
    hashes: Vec<u64>,
}

impl Position {
    /// The standard starting position.
    pub fn startpos() -> Self {
        Self::new(Board::default())
    }

    /// Build a position from a FEN string.
    pub fn from_fen(fen: &str) -> Result<Self, PositionError> {
        let board = Board::from_str(fen).map_err(|_| PositionError::InvalidFen {
            fen: fen.to_string(),
        })?;
        debug!(fen, "position set from FEN");
        Ok(Self::new(board))
    }

    fn new(board: Board) -> Self {
        Self {
            board,
            history: Vec::new(),
            hashes: Vec::new(),
        }
    }

    /// The current board state.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// All legal moves for the side to move.
    ///
    /// With `captures_only`, the list is restricted to capturing moves,
    /// including en passant. Enumeration order is stable for a given
    /// position, which keeps searches reproducible.
    pub fn legal_moves(&self, captures_only: bool) -> Vec<ChessMove> {
        let moves = MoveGen::new_legal(&self.board);
        if captures_only {
            moves.filter(|mv| self.is_capture(*mv)).collect()
        } else {
            moves.collect()
        }
    }

    /// Whether `mv` captures a piece.
    ///
    /// A diagonal pawn move to an empty square is an en passant capture.
    fn is_capture(&self, mv: ChessMove) -> bool {
        let enemy = *self.board.color_combined(!self.board.side_to_move());
        if enemy & BitBoard::from_square(mv.get_dest()) != chess::EMPTY {
            return true;
        }
        self.board.piece_on(mv.get_source()) == Some(Piece::Pawn)
            && mv.get_source().get_file() != mv.get_dest().get_file()
    }

    /// Apply a legal move.
    pub fn make_move(&mut self, mv: ChessMove) {
        self.hashes.push(self.board.get_hash());
        self.history.push((mv, self.board));
        self.board = self.board.make_move_new(mv);
    }

    /// Undo the most recent move, restoring the exact prior state.
    ///
    /// `mv` must be the move passed to the matching [`make_move`](Position::make_move).
    pub fn undo_move(&mut self, mv: ChessMove) {
        let (made, previous) = self
            .history
            .pop()
            .expect("undo_move called with no move to undo");
        debug_assert_eq!(made, mv, "undo_move out of LIFO order");
        self.board = previous;
        self.hashes.pop();
    }

    /// Whether the side to move is checkmated.
    pub fn is_checkmate(&self) -> bool {
        self.board.status() == BoardStatus::Checkmate
    }

    /// Whether the side to move is stalemated.
    pub fn is_stalemate(&self) -> bool {
        self.board.status() == BoardStatus::Stalemate
    }

    /// Whether the current position occurred earlier in the history.
    pub fn is_repetition(&self) -> bool {
        self.hashes.contains(&self.board.get_hash())
    }

    /// Occupancy mask for one piece type of one colour.
    pub fn piece_bitboard(&self, piece: Piece, colour: Color) -> BitBoard {
        *self.board.pieces(piece) & *self.board.color_combined(colour)
    }

    /// 64-bit Zobrist fingerprint of the current position.
    ///
    /// Distinct positions may collide; callers that cache by this key
    /// accept that risk.
    pub fn hash(&self) -> u64 {
        self.board.get_hash()
    }

    /// The side to move.
    pub fn side_to_move(&self) -> Color {
        self.board.side_to_move()
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.board)
    }
}
