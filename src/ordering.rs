use std::cmp::Reverse;

use chess::ChessMove;

use crate::eval::piece_value;
use crate::killers::KillerTable;
use crate::position::Position;

const TT_MOVE_SCORE: i32 = 1_000_000;
const CAPTURE_BASE_SCORE: i32 = 100_000;
const QUEEN_PROMOTION_SCORE: i32 = 90_000;
const OTHER_PROMOTION_SCORE: i32 = 80_000;

fn value_dec(piece: chess::Piece) -> i32 {
    piece_value(piece) / 100
}

fn move_score(pos: &Position, mv: ChessMove, tt_move: Option<ChessMove>, killers: &KillerTable, depth: i32) -> i32 {
    if Some(mv) == tt_move {
        return TT_MOVE_SCORE;
    }

    if pos.is_capture(mv) {
        // En passant lands on an empty square, so the victim isn't found by
        // piece_at(to). Mirrors the source's quirk of scoring such captures
        // as 0 rather than falling through to another bucket.
        let victim = pos.piece_at(mv.get_dest()).map(|(p, _)| p);
        let attacker = pos.piece_at(mv.get_source()).map(|(p, _)| p);
        return match (victim, attacker) {
            (Some(v), Some(a)) => CAPTURE_BASE_SCORE + 10 * value_dec(v) - value_dec(a),
            _ => 0,
        };
    }

    match mv.get_promotion() {
        Some(chess::Piece::Queen) => QUEEN_PROMOTION_SCORE,
        Some(_) => OTHER_PROMOTION_SCORE,
        None => killers.score(mv, depth),
    }
}

/// Orders `moves` descending by the §4.4 scoring table. Ties keep their
/// original enumeration order (stable sort).
pub fn order_moves(
    pos: &Position,
    moves: &[ChessMove],
    tt_move: Option<ChessMove>,
    killers: &KillerTable,
    depth: i32,
) -> Vec<ChessMove> {
    let mut scored: Vec<(i32, ChessMove)> =
        moves.iter().map(|&mv| (move_score(pos, mv, tt_move, killers, depth), mv)).collect();
    scored.sort_by_key(|&(score, _)| Reverse(score));
    scored.into_iter().map(|(_, mv)| mv).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tt_move_sorts_first() {
        let pos = Position::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").unwrap();
        let moves = pos.legal_moves();
        let tt_move = moves[moves.len() / 2];
        let killers = KillerTable::new();
        let ordered = order_moves(&pos, &moves, Some(tt_move), &killers, 1);
        assert_eq!(ordered[0], tt_move);
    }

    #[test]
    fn captures_outrank_quiet_non_killers() {
        let pos = Position::from_fen("4k3/8/8/3p4/4P3/8/8/4K3 w - - 0 1").unwrap();
        let moves = pos.legal_moves();
        let killers = KillerTable::new();
        let ordered = order_moves(&pos, &moves, None, &killers, 1);
        let capture = ordered.iter().find(|&&m| pos.is_capture(m)).copied();
        assert!(capture.is_some());
        let capture_idx = ordered.iter().position(|&m| Some(m) == capture).unwrap();
        let quiet_idx = ordered.iter().position(|&m| !pos.is_capture(m)).unwrap();
        assert!(capture_idx < quiet_idx);
    }

    #[test]
    fn killer_move_scores_above_plain_quiets() {
        let pos = Position::from_fen("4k3/8/8/8/8/8/8/4K2R w K - 0 1").unwrap();
        let moves = pos.legal_moves();
        let mut killers = KillerTable::new();
        let quiet_killer = *moves.iter().find(|&&m| !pos.is_capture(m)).unwrap();
        killers.add(quiet_killer, 4);
        let ordered = order_moves(&pos, &moves, None, &killers, 4);
        let killer_idx = ordered.iter().position(|&m| m == quiet_killer).unwrap();
        let other_quiet_idx = ordered
            .iter()
            .position(|&m| m != quiet_killer && !pos.is_capture(m))
            .unwrap();
        assert!(killer_idx < other_quiet_idx);
    }
}
