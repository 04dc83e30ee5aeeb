use chess::ChessMove;
use log::trace;

use crate::eval::Evaluator;
use crate::killers::KillerTable;
use crate::ordering::order_moves;
use crate::position::Position;
use crate::quiescence::quiescence;
use crate::tt::TranspositionTable;

/// Mate magnitude floor. The exact score for mate at search-ply offset `d`
/// is `±(MATE_SCORE + d)`, so shallower mates are preferred.
pub const MATE_SCORE: i32 = 99_999;
pub const INFINITY: i32 = i32::MAX / 2;

/// Owns the per-root-search state: the transposition cache and killer
/// memory. Both are cleared at the start of every `Engine::get_best_move`
/// call and mutated only by the currently executing search. Concurrent
/// searches must use separate `Search` instances.
pub struct Search {
    pub tt: TranspositionTable,
    pub killers: KillerTable,
    pub nodes: u64,
    eval: Evaluator,
}

impl Search {
    pub fn new() -> Self {
        let tt = match std::env::var("ZUGZWANG_TT_CAPACITY").ok().and_then(|s| s.parse::<usize>().ok()) {
            Some(capacity) => TranspositionTable::with_capacity(capacity),
            None => TranspositionTable::new(),
        };
        Self { tt, killers: KillerTable::new(), nodes: 0, eval: Evaluator }
    }

    pub fn reset(&mut self) {
        self.tt.clear();
        self.killers.clear();
        self.nodes = 0;
    }

    pub fn evaluate(&self, pos: &Position) -> i32 {
        self.eval.evaluate(pos)
    }

    /// Alpha-beta minimax with explicit `maximizing`/`minimizing` sides
    /// (negamax-equivalent but kept in the source's shape; see DESIGN.md).
    /// Returns `(score, best_move)`.
    pub fn minimax(
        &mut self,
        pos: &mut Position,
        depth: i32,
        mut alpha: i32,
        mut beta: i32,
        maximizing: bool,
    ) -> (i32, Option<ChessMove>) {
        self.nodes += 1;
        let key = pos.fingerprint();
        let depth_u8 = depth.max(0) as u8;

        let (cached_score, tt_move) = self.tt.lookup(key, depth_u8);
        if let Some(score) = cached_score {
            return (score, tt_move);
        }

        if pos.is_checkmate() {
            let score = if maximizing { -(MATE_SCORE + depth) } else { MATE_SCORE + depth };
            self.tt.store(key, depth_u8, score, None);
            return (score, None);
        }

        if pos.is_stalemate() || pos.is_insufficient_material() {
            self.tt.store(key, depth_u8, 0, None);
            return (0, None);
        }

        if depth <= 0 {
            return quiescence(pos, &self.eval, alpha, beta, maximizing, 0);
        }

        let moves = pos.legal_moves();
        let ordered = order_moves(pos, &moves, tt_move, &self.killers, depth);

        let mut best_move: Option<ChessMove> = None;
        let mut best_score = if maximizing { -INFINITY } else { INFINITY };

        for mv in ordered {
            pos.push(mv);
            let (score, _) = self.minimax(pos, depth - 1, alpha, beta, !maximizing);
            pos.pop();

            let improved = if maximizing { score > best_score } else { score < best_score };
            if improved {
                best_score = score;
                best_move = Some(mv);
            }

            if maximizing {
                alpha = alpha.max(best_score);
            } else {
                beta = beta.min(best_score);
            }

            if beta <= alpha {
                if !pos.is_capture(mv) && mv.get_promotion().is_none() {
                    self.killers.add(mv, depth);
                }
                trace!("beta cutoff at depth {depth} after move {mv}");
                break;
            }
        }

        self.tt.store(key, depth_u8, best_score, best_move);
        (best_score, best_move)
    }
}

impl Default for Search {
    fn default() -> Self {
        Self::new()
    }
}
