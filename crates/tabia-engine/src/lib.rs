//! Search and evaluation for tabia.

pub mod eval;
pub mod search;

pub use eval::phase::game_phase;
pub use eval::{LARGE_VALUE, evaluate};
pub use search::tt::TranspositionTable;
pub use search::{SearchReport, Searcher};
