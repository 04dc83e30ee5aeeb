use chess::{Color, Piece};

use crate::position::Position;

/// Piece values in centipawns. Kings are never captured and score 0.
pub const PAWN_VALUE: i32 = 100;
pub const KNIGHT_VALUE: i32 = 300;
pub const BISHOP_VALUE: i32 = 320;
pub const ROOK_VALUE: i32 = 500;
pub const QUEEN_VALUE: i32 = 900;
pub const KING_VALUE: i32 = 0;

#[inline]
pub fn piece_value(piece: Piece) -> i32 {
    match piece {
        Piece::Pawn => PAWN_VALUE,
        Piece::Knight => KNIGHT_VALUE,
        Piece::Bishop => BISHOP_VALUE,
        Piece::Rook => ROOK_VALUE,
        Piece::Queen => QUEEN_VALUE,
        Piece::King => KING_VALUE,
    }
}

// Piece-square tables, rank 8 first, a-file to h-file (square 0 = a1 ... 63
// = h8).
#[rustfmt::skip]
pub const PAWN_TABLE: [i32; 64] = [
     0,  0,  0,  0,  0,  0,  0,  0,
    50, 50, 50, 50, 50, 50, 50, 50,
    10, 10, 20, 30, 30, 20, 10, 10,
     5,  5, 10, 25, 25, 10,  5,  5,
     0,  0,  0, 20, 20,  0,  0,  0,
     5, -5,-10,  0,  0,-10, -5,  5,
     5, 10, 10,-20,-20, 10, 10,  5,
     0,  0,  0,  0,  0,  0,  0,  0,
];

#[rustfmt::skip]
pub const KNIGHT_TABLE: [i32; 64] = [
    -50,-40,-30,-30,-30,-30,-40,-50,
    -40,-20,  0,  0,  0,  0,-20,-40,
    -30,  0, 10, 15, 15, 10,  0,-30,
    -30,  5, 15, 20, 20, 15,  5,-30,
    -30,  0, 15, 20, 20, 15,  0,-30,
    -30,  5, 10, 15, 15, 10,  5,-30,
    -40,-20,  0,  5,  5,  0,-20,-40,
    -50,-40,-30,-30,-30,-30,-40,-50,
];

#[rustfmt::skip]
pub const BISHOP_TABLE: [i32; 64] = [
    -20,-10,-10,-10,-10,-10,-10,-20,
    -10,  0,  0,  0,  0,  0,  0,-10,
    -10,  0,  5, 10, 10,  5,  0,-10,
    -10,  5,  5, 10, 10,  5,  5,-10,
    -10,  0, 10, 10, 10, 10,  0,-10,
    -10, 10, 10, 10, 10, 10, 10,-10,
    -10,  5,  0,  0,  0,  0,  5,-10,
    -20,-10,-10,-10,-10,-10,-10,-20,
];

#[rustfmt::skip]
pub const ROOK_TABLE: [i32; 64] = [
     0,  0,  0,  0,  0,  0,  0,  0,
     5, 10, 10, 10, 10, 10, 10,  5,
    -5,  0,  0,  0,  0,  0,  0, -5,
    -5,  0,  0,  0,  0,  0,  0, -5,
    -5,  0,  0,  0,  0,  0,  0, -5,
    -5,  0,  0,  0,  0,  0,  0, -5,
    -5,  0,  0,  0,  0,  0,  0, -5,
     0,  0,  0,  5,  5,  0,  0,  0,
];

#[rustfmt::skip]
pub const QUEEN_TABLE: [i32; 64] = [
    -20,-10,-10, -5, -5,-10,-10,-20,
    -10,  0,  0,  0,  0,  0,  0,-10,
    -10,  0,  5,  5,  5,  5,  0,-10,
     -5,  0,  5,  5,  5,  5,  0, -5,
      0,  0,  5,  5,  5,  5,  0, -5,
    -10,  5,  5,  5,  5,  5,  0,-10,
    -10,  0,  5,  0,  0,  0,  0,-10,
    -20,-10,-10, -5, -5,-10,-10,-20,
];

#[rustfmt::skip]
pub const KING_TABLE: [i32; 64] = [
    -30,-40,-40,-50,-50,-40,-40,-30,
    -30,-40,-40,-50,-50,-40,-40,-30,
    -30,-40,-40,-50,-50,-40,-40,-30,
    -30,-40,-40,-50,-50,-40,-40,-30,
    -20,-30,-30,-40,-40,-30,-30,-20,
    -10,-20,-20,-20,-20,-20,-20,-10,
     20, 20,  0,  0,  0,  0, 20, 20,
     20, 30, 10,  0,  0, 10, 30, 20,
];

#[inline]
fn pst(piece: Piece, square_index: usize) -> i32 {
    match piece {
        Piece::Pawn => PAWN_TABLE[square_index],
        Piece::Knight => KNIGHT_TABLE[square_index],
        Piece::Bishop => BISHOP_TABLE[square_index],
        Piece::Rook => ROOK_TABLE[square_index],
        Piece::Queen => QUEEN_TABLE[square_index],
        Piece::King => KING_TABLE[square_index],
    }
}

const DOUBLED_PAWN_PENALTY: i32 = 15;
const PASSED_PAWN_BASE: i32 = 15;
const PASSED_PAWN_PER_RANK: i32 = 5;
const KING_SAFETY_ENDGAME_GATE: u32 = 12;
const CASTLE_KINGSIDE_BONUS: i32 = 15;
const CASTLE_QUEENSIDE_BONUS: i32 = 10;
const SHELTER_OWN_FILE_BONUS: i32 = 12;
const SHELTER_ADJACENT_FILE_BONUS: i32 = 8;
const EXPOSURE_PENALTY_PER_RANK: i32 = 8;
const CENTRAL_FILE_PENALTY: i32 = 10;

/// Pure evaluator, centipawns from White's perspective.
pub struct Evaluator;

impl Evaluator {
    pub fn evaluate(&self, pos: &Position) -> i32 {
        material_and_pst(pos) + pawn_structure(pos) + king_safety(pos)
    }
}

fn material_and_pst(pos: &Position) -> i32 {
    let mut score = 0;
    for sq in chess::ALL_SQUARES {
        let Some((piece, color)) = pos.piece_at(sq) else { continue };
        let material = piece_value(piece);
        let idx = sq.to_index();
        let pst_value = if color == Color::White { pst(piece, idx ^ 56) } else { pst(piece, idx) };
        if color == Color::White {
            score += material + pst_value;
        } else {
            score -= material + pst_value;
        }
    }
    score
}

fn file_of(square_index: usize) -> usize {
    square_index & 7
}

fn rank_of(square_index: usize) -> usize {
    square_index >> 3
}

fn pawn_structure(pos: &Position) -> i32 {
    let white_pawns = pos.pieces(Piece::Pawn, Color::White);
    let black_pawns = pos.pieces(Piece::Pawn, Color::Black);
    let mut score = 0;

    let mut white_file_counts = [0i32; 8];
    for sq in white_pawns {
        white_file_counts[file_of(sq.to_index())] += 1;
    }
    for &count in &white_file_counts {
        if count > 1 {
            score -= DOUBLED_PAWN_PENALTY * (count - 1);
        }
    }
    for sq in white_pawns {
        let (file, rank) = (file_of(sq.to_index()), rank_of(sq.to_index()));
        let passed = !black_pawns.into_iter().any(|enemy| {
            let (e_file, e_rank) = (file_of(enemy.to_index()), rank_of(enemy.to_index()));
            (e_file as i32 - file as i32).abs() <= 1 && e_rank > rank
        });
        if passed {
            score += PASSED_PAWN_BASE + (7 - rank as i32) * PASSED_PAWN_PER_RANK;
        }
    }

    let mut black_file_counts = [0i32; 8];
    for sq in black_pawns {
        black_file_counts[file_of(sq.to_index())] += 1;
    }
    for &count in &black_file_counts {
        if count > 1 {
            score += DOUBLED_PAWN_PENALTY * (count - 1);
        }
    }
    for sq in black_pawns {
        let (file, rank) = (file_of(sq.to_index()), rank_of(sq.to_index()));
        let passed = !white_pawns.into_iter().any(|enemy| {
            let (e_file, e_rank) = (file_of(enemy.to_index()), rank_of(enemy.to_index()));
            (e_file as i32 - file as i32).abs() <= 1 && (e_rank as i32) < rank as i32
        });
        if passed {
            score -= PASSED_PAWN_BASE + rank as i32 * PASSED_PAWN_PER_RANK;
        }
    }

    score
}

fn king_safety(pos: &Position) -> i32 {
    if pos.total_piece_count() <= KING_SAFETY_ENDGAME_GATE {
        return 0;
    }

    let mut score = 0;
    for (color, multiplier) in [(Color::White, 1), (Color::Black, -1)] {
        let king_sq = pos.king_square(color);
        let king_idx = king_sq.to_index();
        let (king_file, king_rank) = (file_of(king_idx) as i32, rank_of(king_idx) as i32);
        let pawns = pos.pieces(Piece::Pawn, color);

        if pos.has_kingside_castling_rights(color) {
            score += multiplier * CASTLE_KINGSIDE_BONUS;
        }
        if pos.has_queenside_castling_rights(color) {
            score += multiplier * CASTLE_QUEENSIDE_BONUS;
        }

        for check_file in (king_file - 1)..=(king_file + 1) {
            if !(0..=7).contains(&check_file) {
                continue;
            }
            let sheltered = pawns.into_iter().any(|p| {
                let (p_file, p_rank) = (file_of(p.to_index()) as i32, rank_of(p.to_index()) as i32);
                p_file == check_file
                    && match color {
                        Color::White => (1..=2).contains(&p_rank),
                        Color::Black => (5..=6).contains(&p_rank),
                    }
            });
            if sheltered {
                let bonus =
                    if check_file == king_file { SHELTER_OWN_FILE_BONUS } else { SHELTER_ADJACENT_FILE_BONUS };
                score += multiplier * bonus;
            }
        }

        match color {
            Color::White if king_rank > 2 => score -= multiplier * (king_rank - 2) * EXPOSURE_PENALTY_PER_RANK,
            Color::Black if king_rank < 5 => score -= multiplier * (5 - king_rank) * EXPOSURE_PENALTY_PER_RANK,
            _ => {}
        }

        if (2..=5).contains(&king_file) {
            score -= multiplier * CENTRAL_FILE_PENALTY;
        }
    }

    score
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starting_position_is_balanced() {
        let pos = Position::starting();
        assert_eq!(Evaluator.evaluate(&pos), 0);
    }

    #[test]
    fn evaluate_is_pure() {
        let pos = Position::starting();
        assert_eq!(Evaluator.evaluate(&pos), Evaluator.evaluate(&pos));
    }

    #[test]
    fn up_a_queen_scores_positive_for_white() {
        let pos = Position::from_fen("4k3/8/8/8/8/8/8/4KQ2 w - - 0 1").unwrap();
        assert!(Evaluator.evaluate(&pos) > QUEEN_VALUE - 100);
    }

    #[test]
    fn mirroring_the_board_and_side_negates_the_score() {
        let pos = Position::from_fen("4k3/8/8/8/3P4/8/8/4K3 w - - 0 1").unwrap();
        let mirrored = Position::from_fen("4k3/8/8/3p4/8/8/8/4K3 b - - 0 1").unwrap();
        assert_eq!(Evaluator.evaluate(&pos), -Evaluator.evaluate(&mirrored));
    }

    #[test]
    fn doubled_pawns_are_penalized() {
        let doubled = Position::from_fen("4k3/8/8/8/8/4P3/4P3/4K3 w - - 0 1").unwrap();
        let single = Position::from_fen("4k3/8/8/8/8/8/4P3/4K3 w - - 0 1").unwrap();
        // Two pawns minus the doubled-pawn penalty should score below a
        // simple 2x extrapolation of the single-pawn case.
        assert!(Evaluator.evaluate(&doubled) < 2 * Evaluator.evaluate(&single));
    }
}
