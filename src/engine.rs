use chess::ChessMove;
use log::{debug, info};
use rand::rngs::SmallRng;
use rand::SeedableRng;

use crate::book::OpeningBook;
use crate::position::Position;
use crate::search::{Search, INFINITY, MATE_SCORE};

/// The core's single public entry point: `(position, depth_limit) -> move`.
/// Everything else (Lichess harness, UCI, CLI) is an external collaborator
/// that only consumes this. Spec §1/§6.
pub struct Engine {
    search: Search,
    book: OpeningBook,
    rng: SmallRng,
}

impl Engine {
    pub fn new() -> Self {
        Self { search: Search::new(), book: OpeningBook::new(), rng: SmallRng::from_entropy() }
    }

    /// Deterministic constructor for tests and reproducible harness runs:
    /// same seed, same opening-book roll every time.
    pub fn with_seed(seed: u64) -> Self {
        Self { search: Search::new(), book: OpeningBook::new(), rng: SmallRng::seed_from_u64(seed) }
    }

    /// Exposed for tests.
    pub fn evaluate(&self, pos: &Position) -> i32 {
        self.search.evaluate(pos)
    }

    /// Drives the iterative deepener: depth 1..=max_depth, early exit on a
    /// detected forced mate. Consults the opening book first. Spec §4.7.
    pub fn get_best_move(&mut self, pos: &Position, max_depth: u8) -> ChessMove {
        if let Some(mv) = self.book.lookup(pos.fingerprint(), &mut self.rng) {
            info!("opening book hit for fingerprint {:#x}: playing {mv}", pos.fingerprint());
            return mv;
        }

        self.search.reset();
        let maximizing = pos.side_to_move() == chess::Color::White;

        let mut best_move: Option<ChessMove> = None;
        let mut working = pos.clone();

        for depth in 1..=max_depth {
            self.search.nodes = 0;
            let (score, mv) = self.search.minimax(&mut working, depth as i32, -INFINITY, INFINITY, maximizing);

            if mv.is_some() {
                best_move = mv;
            }

            let pv = self.principal_variation(pos, depth as usize);
            debug!(
                "depth {depth}: {} ({:+.2}) - {} nodes - pv {}",
                best_move.map(|m| m.to_string()).unwrap_or_else(|| "none".to_string()),
                score as f64 / 100.0,
                self.search.nodes,
                pv.iter().map(|m| m.to_string()).collect::<Vec<_>>().join(" "),
            );

            if score.abs() >= MATE_SCORE {
                info!("forced mate found, stopping iterative deepening at depth {depth}");
                break;
            }
        }

        best_move.unwrap_or_else(|| {
            pos.legal_moves().into_iter().next().expect(
                "get_best_move called on a position with no legal moves; caller must check game-over first",
            )
        })
    }

    /// Walks the transposition cache from the root, following `best_move`
    /// while it stays legal, up to `max_len` plies. Read-only. Spec §4.7.
    pub fn principal_variation(&self, pos: &Position, max_len: usize) -> Vec<ChessMove> {
        let mut pv = Vec::with_capacity(max_len);
        let mut walker = pos.clone();

        for _ in 0..max_len {
            let (_, tt_move) = self.search.tt.lookup(walker.fingerprint(), 0);
            let Some(mv) = tt_move else { break };
            if !walker.legal_moves().contains(&mv) {
                break;
            }
            pv.push(mv);
            walker.push(mv);
            if walker.is_checkmate() || walker.is_stalemate() {
                break;
            }
        }

        pv
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn forced_mate_in_one_is_found() {
        let pos = Position::from_fen("6k1/5ppp/8/8/8/8/5PPP/R5K1 w - - 0 1").unwrap();
        let mut engine = Engine::with_seed(1);
        let mv = engine.get_best_move(&pos, 2);
        assert_eq!(mv.to_string(), "a1a8");
    }

    #[test]
    fn opening_book_hit_is_e4_or_d4() {
        let pos = Position::starting();
        let mut engine = Engine::with_seed(42);
        let mv = engine.get_best_move(&pos, 1).to_string();
        assert!(mv == "e2e4" || mv == "d2d4");
    }

    #[test]
    fn checkmated_position_returns_no_search() {
        let pos = Position::from_fen(
            "r1bqkb1r/pppp1Qpp/2n2n2/4p3/2B1P3/8/PPPP1PPP/RNB1K1NR b KQkq - 0 4",
        )
        .unwrap();
        assert!(pos.is_checkmate());
        // The deepener's own terminal check reports the mate score at
        // depth 1 without needing the caller to special-case game-over.
        let mut engine = Engine::with_seed(3);
        let mut search = Search::new();
        let (score, mv) = search.minimax(&mut pos.clone(), 1, -INFINITY, INFINITY, false);
        assert!(score <= -MATE_SCORE || score >= MATE_SCORE);
        assert!(mv.is_none());
        let _ = engine.evaluate(&pos);
    }
}
