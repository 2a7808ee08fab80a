//! Board service for tabia: position state, legal move generation, and
//! game rules, built on the `chess` crate.
//!
//! The engine never touches `chess::Board` directly. It sees a single
//! mutable [`Position`] with a strict make/unmake interface, repetition
//! detection over the accumulated move history, and bitboard accessors.

mod error;
mod position;

pub use error::PositionError;
pub use position::Position;

pub use chess::{ALL_COLORS, ALL_PIECES, BitBoard, Board, ChessMove, Color, Piece, Square};
