//! Fixed-capacity transposition table.
//!
//! A plain power-of-two array indexed by `hash & mask`. Stores overwrite
//! the slot unconditionally, so distinct positions that alias a slot
//! silently evict each other; probes verify the full key and report a
//! miss on mismatch. The search is single-threaded, so no locking or
//! atomic access is needed.

use crate::search::negamax::MATE_THRESHOLD;

/// Number of entries in the table an engine process runs with.
///
/// 2^23 slots, the mask the original tuning settled on.
pub const DEFAULT_TT_ENTRIES: usize = 1 << 23;

/// Bound classification of a stored score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bound {
    /// Empty slot or key mismatch: nothing usable.
    Empty,
    /// The stored score is the true value of the node.
    Exact,
    /// The node failed high; the true value is at least the score.
    LowerBound,
    /// The node failed low; the true value is at most the score.
    UpperBound,
}

/// One cached search result.
#[derive(Debug, Clone, Copy)]
pub struct TtEntry {
    /// Full position fingerprint, checked on probe.
    pub key: u64,
    /// Score in the stored node's own sign convention.
    pub score: i32,
    /// Plies searched below the node when the entry was produced.
    pub depth: u8,
    /// How to interpret `score`.
    pub bound: Bound,
}

impl TtEntry {
    /// The miss result: never trusted by the search.
    pub const EMPTY: TtEntry = TtEntry {
        key: 0,
        score: 0,
        depth: 0,
        bound: Bound::Empty,
    };
}

/// Convert a search score to its stored form.
///
/// Mate scores are path-dependent (`LARGE_VALUE - ply` varies with the
/// route to the node), so they are stored as distance-from-node rather
/// than distance-from-root.
fn score_to_tt(score: i32, ply: u8) -> i32 {
    if score > MATE_THRESHOLD {
        score + ply as i32
    } else if score < -MATE_THRESHOLD {
        score - ply as i32
    } else {
        score
    }
}

/// Reverse the mate-distance adjustment applied by [`score_to_tt`].
fn score_from_tt(score: i32, ply: u8) -> i32 {
    if score > MATE_THRESHOLD {
        score - ply as i32
    } else if score < -MATE_THRESHOLD {
        score + ply as i32
    } else {
        score
    }
}

/// Fixed-size cache of search results keyed by position hash.
///
/// Allocated once for the lifetime of the agent and reused across
/// decisions. [`clear`](TranspositionTable::clear) exists for callers
/// that need deterministic reruns; normal play never calls it.
pub struct TranspositionTable {
    entries: Box<[TtEntry]>,
    mask: u64,
}

impl TranspositionTable {
    /// Create a table with at least `entries` slots, rounded up to a
    /// power of two.
    pub fn new(entries: usize) -> Self {
        let capacity = entries.next_power_of_two().max(1);
        Self {
            entries: vec![TtEntry::EMPTY; capacity].into_boxed_slice(),
            mask: (capacity - 1) as u64,
        }
    }

    /// Number of slots.
    pub fn capacity(&self) -> usize {
        self.entries.len()
    }

    /// Look up the entry for `key`.
    ///
    /// Never fails: a miss, an empty slot, or a slot holding a different
    /// position all return [`TtEntry::EMPTY`]. On a hit the score is
    /// translated back to the prober's ply.
    pub fn probe(&self, key: u64, ply: u8) -> TtEntry {
        let entry = self.entries[(key & self.mask) as usize];
        if entry.bound == Bound::Empty || entry.key != key {
            return TtEntry::EMPTY;
        }
        TtEntry {
            score: score_from_tt(entry.score, ply),
            ..entry
        }
    }

    /// Record a search result for `key`, overwriting whatever occupied
    /// the slot. Last write wins; there is no replacement policy.
    pub fn store(&mut self, key: u64, depth: u8, score: i32, bound: Bound, ply: u8) {
        self.entries[(key & self.mask) as usize] = TtEntry {
            key,
            score: score_to_tt(score, ply),
            depth,
            bound,
        };
    }

    /// Reset every slot to empty.
    pub fn clear(&mut self) {
        self.entries.fill(TtEntry::EMPTY);
    }
}

impl std::fmt::Debug for TranspositionTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TranspositionTable")
            .field("capacity", &self.entries.len())
            .finish()
    }
}
