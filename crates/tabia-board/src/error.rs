//! Error types for position setup.

/// Errors that occur when constructing a [`Position`](crate::Position).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PositionError {
    /// The FEN string could not be parsed into a legal board.
    #[error("invalid FEN: \"{fen}\"")]
    InvalidFen {
        /// The rejected FEN string.
        fen: String,
    },
}
