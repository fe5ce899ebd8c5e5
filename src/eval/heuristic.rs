//! Heuristic evaluation function for Gomoku board positions
//!
//! This module provides the leaf evaluation for the minimax search.
//! It evaluates board positions based on:
//! - Pattern scoring (fives, fours, threes, twos) of every maximal run
//! - Positional bonuses (center control)

use crate::board::{Board, Pos, Stone, DIRECTIONS};

use super::patterns::{LineEnd, LinePattern, HEURISTIC_CAP};

/// Weight per distance unit from center
const POSITION_WEIGHT: i32 = 3;

/// Evaluate the board from the perspective of the given color.
///
/// Returns a score where:
/// - Positive values indicate advantage for `color`
/// - Negative values indicate disadvantage for `color`
///
/// The result is antisymmetric (`evaluate(b, Black) == -evaluate(b, White)`)
/// and clamped to `±HEURISTIC_CAP`, so terminal scores always dominate.
#[must_use]
pub fn evaluate(board: &Board, color: Stone) -> i32 {
    let opponent = color.opponent();

    let pattern_score = evaluate_patterns(board, color) - evaluate_patterns(board, opponent);
    let position_score = evaluate_positions(board, color) - evaluate_positions(board, opponent);

    pattern_score.saturating_add(position_score).clamp(-HEURISTIC_CAP, HEURISTIC_CAP)
}

/// Evaluate pattern-based score for a color.
///
/// Each maximal run is counted exactly once, from its first stone.
fn evaluate_patterns(board: &Board, color: Stone) -> i32 {
    let mut score: i32 = 0;
    for pos in board.stones(color) {
        for &(dr, dc) in &DIRECTIONS {
            if let Some(run) = run_from(board, pos, dr, dc, color) {
                score = score.saturating_add(run.score());
            }
        }
    }
    score
}

/// The run starting at `pos` along `(dr, dc)`, or `None` when `pos` is not
/// the first stone of its run in that direction.
fn run_from(board: &Board, pos: Pos, dr: i32, dc: i32, color: Stone) -> Option<LinePattern> {
    let size = board.size();
    let before = pos.offset(-dr, -dc, 1, size);
    if before.is_some_and(|p| board.get(p) == color) {
        return None;
    }

    let mut length = 1;
    while pos
        .offset(dr, dc, length, size)
        .is_some_and(|p| board.get(p) == color)
    {
        length += 1;
    }
    let after = pos.offset(dr, dc, length, size);

    let end = |cell: Option<Pos>| match cell {
        Some(p) if board.is_empty(p) => LineEnd::Open,
        _ => LineEnd::Blocked,
    };
    Some(LinePattern {
        length: length.min(u8::MAX as i32) as u8,
        ends: [end(before), end(after)],
    })
}

/// Evaluate positional bonuses for a color.
///
/// Stones closer to the center are worth more as they have more
/// potential for creating patterns in multiple directions.
fn evaluate_positions(board: &Board, color: Stone) -> i32 {
    let center = board.center();
    let max_dist = i32::from(center.row) * 2;
    board
        .stones(color)
        .map(|pos| (max_dist - i32::from(pos.manhattan(center))) * POSITION_WEIGHT)
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::eval::PatternScore;

    #[test]
    fn test_evaluate_empty_board() {
        let board = Board::new(15);
        assert_eq!(evaluate(&board, Stone::Black), 0, "Empty board should have score 0");
    }

    #[test]
    fn test_evaluate_center_bonus() {
        let mut board = Board::new(15);
        board.place_stone(Pos::new(7, 7), Stone::Black);

        let score = evaluate(&board, Stone::Black);
        assert!(score > 0, "Center position should be valuable, got {}", score);
    }

    #[test]
    fn test_evaluate_corner_less_valuable() {
        let mut board_center = Board::new(15);
        board_center.place_stone(Pos::new(7, 7), Stone::Black);

        let mut board_corner = Board::new(15);
        board_corner.place_stone(Pos::new(0, 0), Stone::Black);

        let center_score = evaluate(&board_center, Stone::Black);
        let corner_score = evaluate(&board_corner, Stone::Black);
        assert!(
            center_score > corner_score,
            "Center ({}) should be more valuable than corner ({})",
            center_score,
            corner_score
        );
    }

    #[test]
    fn test_evaluate_five_is_large_but_capped() {
        let mut board = Board::new(15);
        for i in 0..5 {
            board.place_stone(Pos::new(7, i), Stone::Black);
        }
        let score = evaluate(&board, Stone::Black);
        assert!(score >= PatternScore::FIVE);
        assert!(score <= HEURISTIC_CAP);
    }

    #[test]
    fn test_evaluate_open_four_beats_closed_four() {
        let mut open = Board::new(15);
        for i in 3..7 {
            open.place_stone(Pos::new(7, i), Stone::Black);
        }

        let mut closed = Board::new(15);
        closed.place_stone(Pos::new(7, 2), Stone::White);
        for i in 3..7 {
            closed.place_stone(Pos::new(7, i), Stone::Black);
        }

        let open_score = evaluate(&open, Stone::Black);
        let closed_score = evaluate(&closed, Stone::Black);
        assert!(open_score > closed_score, "open={open_score} closed={closed_score}");
    }

    #[test]
    fn test_evaluate_negamax_symmetry() {
        let mut board = Board::new(15);
        board.place_stone(Pos::new(7, 5), Stone::Black);
        board.place_stone(Pos::new(7, 6), Stone::Black);
        board.place_stone(Pos::new(7, 7), Stone::Black);
        board.place_stone(Pos::new(3, 3), Stone::White);
        board.place_stone(Pos::new(3, 4), Stone::White);

        let black_score = evaluate(&board, Stone::Black);
        let white_score = evaluate(&board, Stone::White);
        assert_eq!(
            black_score, -white_score,
            "Negamax symmetry violated: eval(Black)={}, eval(White)={}",
            black_score, white_score
        );
    }

    #[test]
    fn test_evaluate_perspective_correct() {
        let mut board1 = Board::new(15);
        let mut board2 = Board::new(15);
        for i in 1..4 {
            board1.place_stone(Pos::new(9, i), Stone::Black);
            board2.place_stone(Pos::new(9, i), Stone::White);
        }

        assert!(evaluate(&board1, Stone::Black) > 0);
        assert!(evaluate(&board2, Stone::Black) < 0);
    }

    #[test]
    fn test_run_counted_once() {
        let mut board = Board::new(15);
        board.place_stone(Pos::new(7, 7), Stone::Black);
        board.place_stone(Pos::new(7, 8), Stone::Black);
        let horizontal = (0..2)
            .filter_map(|c| run_from(&board, Pos::new(7, 7 + c), 0, 1, Stone::Black))
            .count();
        assert_eq!(horizontal, 1);
    }

    #[test]
    fn test_evaluate_diagonal_pattern() {
        let mut board = Board::new(15);
        for i in 0..3 {
            board.place_stone(Pos::new(5 + i, 5 + i), Stone::Black);
        }
        assert!(evaluate(&board, Stone::Black) > PatternScore::OPEN_THREE);
    }
}
