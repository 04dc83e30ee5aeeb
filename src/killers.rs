use std::collections::HashMap;

use chess::ChessMove;

const MAX_KILLERS_PER_DEPTH: usize = 2;
const KILLER_BASE_SCORE: i32 = 70_000;
const KILLER_SCORE_STEP: i32 = 1_000;

/// Per-depth memory of quiet moves that caused a beta cutoff. Never holds
/// captures or promotions.
#[derive(Default)]
pub struct KillerTable {
    by_depth: HashMap<i32, Vec<ChessMove>>,
}

impl KillerTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.by_depth.clear();
    }

    /// Insert `mv` at the front of `depth`'s list, truncating to length 2.
    /// A no-op if `mv` is already recorded at this depth.
    pub fn add(&mut self, mv: ChessMove, depth: i32) {
        let slot = self.by_depth.entry(depth).or_default();
        if slot.contains(&mv) {
            return;
        }
        slot.insert(0, mv);
        slot.truncate(MAX_KILLERS_PER_DEPTH);
    }

    /// `70_000 - 1000*i` if `mv` is the i-th killer at `depth`, else 0.
    pub fn score(&self, mv: ChessMove, depth: i32) -> i32 {
        match self.by_depth.get(&depth).and_then(|slot| slot.iter().position(|&m| m == mv)) {
            Some(i) => KILLER_BASE_SCORE - KILLER_SCORE_STEP * i as i32,
            None => 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chess::Square;

    fn mv(from: Square, to: Square) -> ChessMove {
        ChessMove::new(from, to, None)
    }

    #[test]
    fn add_then_score_is_positive_and_bounded() {
        let mut killers = KillerTable::new();
        let m = mv(Square::E2, Square::E4);
        killers.add(m, 3);
        let score = killers.score(m, 3);
        assert!(score > 0 && score <= 70_000);
    }

    #[test]
    fn duplicate_add_is_a_no_op() {
        let mut killers = KillerTable::new();
        let m = mv(Square::E2, Square::E4);
        killers.add(m, 3);
        killers.add(m, 3);
        let other = mv(Square::D2, Square::D4);
        killers.add(other, 3);
        // m should still be first (score unchanged), other second.
        assert_eq!(killers.score(m, 3), 70_000);
        assert_eq!(killers.score(other, 3), 69_000);
    }

    #[test]
    fn truncates_to_two_entries() {
        let mut killers = KillerTable::new();
        killers.add(mv(Square::E2, Square::E4), 1);
        killers.add(mv(Square::D2, Square::D4), 1);
        killers.add(mv(Square::G1, Square::F3), 1);
        // Oldest (e2e4) should have been evicted.
        assert_eq!(killers.score(mv(Square::E2, Square::E4), 1), 0);
        assert_eq!(killers.score(mv(Square::G1, Square::F3), 1), 70_000);
    }

    #[test]
    fn unknown_move_scores_zero() {
        let killers = KillerTable::new();
        assert_eq!(killers.score(mv(Square::E2, Square::E4), 5), 0);
    }
}
