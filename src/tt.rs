use std::collections::HashMap;

use chess::ChessMove;

/// `{depth, score, best_move}` keyed by `Position::fingerprint()`.
///
/// This is an exact-score cache: unlike a canonical engine's transposition
/// table, entries carry no upper/lower-bound flag. A value returned from
/// `lookup` may be used unconditionally as the node's score regardless of
/// the window the caller searched with. This is a known unsoundness
/// trade-off carried from the source, preserved so move selection matches,
/// not "fixed" into a fail-soft/fail-hard scheme.
#[derive(Clone, Copy)]
struct CacheEntry {
    depth: u8,
    score: i32,
    best_move: Option<ChessMove>,
}

#[derive(Default)]
pub struct TranspositionTable {
    entries: HashMap<u64, CacheEntry>,
}

impl TranspositionTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-reserves room for `capacity` entries, against a plain hash map
    /// rather than a bucketed arena.
    pub fn with_capacity(capacity: usize) -> Self {
        Self { entries: HashMap::with_capacity(capacity) }
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Returns `(score, best_move)` if a sufficiently deep entry exists;
    /// otherwise `(None, best_move)`. The move hint survives an
    /// insufficient-depth miss.
    pub fn lookup(&self, key: u64, required_depth: u8) -> (Option<i32>, Option<ChessMove>) {
        match self.entries.get(&key) {
            None => (None, None),
            Some(entry) if entry.depth >= required_depth => (Some(entry.score), entry.best_move),
            Some(entry) => (None, entry.best_move),
        }
    }

    /// Writes if no entry exists, or if the existing entry's depth is `<=
    /// depth` (equal-depth overwrite is permitted; strictly shallower
    /// entries are replaced).
    pub fn store(&mut self, key: u64, depth: u8, score: i32, best_move: Option<ChessMove>) {
        if let Some(existing) = self.entries.get(&key) {
            if existing.depth > depth {
                return;
            }
        }
        self.entries.insert(key, CacheEntry { depth, score, best_move });
    }
}
