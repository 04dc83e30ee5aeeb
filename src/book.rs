use std::collections::HashMap;
use std::str::FromStr;

use chess::{ChessMove, Square};
use rand::Rng;

use crate::position::Position;

/// Three fixed opening lines, replayed move-by-move to build a
/// `fingerprint -> candidate moves` table. Coordinate form (from/to
/// squares); none of the book moves in these lines are promotions. Spec §6.
const SVESHNIKOV: &[&str] =
    &["e2e4", "c7c5", "g1f3", "b8c6", "d2d4", "c5d4", "f3d4", "g8f6", "b1c3", "e7e5", "d4b5", "d7d6"];
const NIMZO_INDIAN: &[&str] = &["d2d4", "g8f6", "c2c4", "e7e6", "b1c3", "f8b4", "g1f3", "e8g8"];
const RUY_LOPEZ: &[&str] = &["e2e4", "e7e5", "g1f3", "b8c6", "f1b5", "a7a6"];

fn parse_uci_move(uci: &str) -> ChessMove {
    let bytes = uci.as_bytes();
    let from = Square::from_str(&uci[0..2]).expect("seed line move has a valid from-square");
    let to = Square::from_str(&uci[2..4]).expect("seed line move has a valid to-square");
    debug_assert!(bytes.len() == 4, "seed opening lines carry no promotion suffix");
    ChessMove::new(from, to, None)
}

/// A precomputed `fingerprint -> moves` map built once at construction and
/// never mutated afterward. Looked up before search; a hit shortcuts the
/// whole iterative deepener. Spec §6.
pub struct OpeningBook {
    entries: HashMap<u64, Vec<ChessMove>>,
}

impl OpeningBook {
    pub fn new() -> Self {
        let mut entries: HashMap<u64, Vec<ChessMove>> = HashMap::new();
        for line in [SVESHNIKOV, NIMZO_INDIAN, RUY_LOPEZ] {
            let mut pos = Position::starting();
            for &uci in line {
                let mv = parse_uci_move(uci);
                let key = pos.fingerprint();
                let slot = entries.entry(key).or_default();
                if !slot.contains(&mv) {
                    slot.push(mv);
                }
                pos.push(mv);
            }
        }
        Self { entries }
    }

    /// Returns one candidate move chosen uniformly at random, or `None` on
    /// a miss. The randomness source is injectable so tests can pin it.
    pub fn lookup(&self, key: u64, rng: &mut impl Rng) -> Option<ChessMove> {
        let candidates = self.entries.get(&key)?;
        let idx = rng.gen_range(0..candidates.len());
        Some(candidates[idx])
    }

    #[cfg(test)]
    pub fn candidates(&self, key: u64) -> Option<&[ChessMove]> {
        self.entries.get(&key).map(Vec::as_slice)
    }
}

impl Default for OpeningBook {
    fn default() -> Self {
        Self::new()
    }
}
