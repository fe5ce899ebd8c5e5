//! Win condition checking
//!
//! A player wins by placing five or more stones in an unbroken line
//! (horizontal, vertical or diagonal). Overlines count as wins.

use crate::board::{Board, Pos, Stone, DIRECTIONS};

/// Count consecutive `color` stones starting one step away from `pos`
/// along `(dr, dc)`, stopping after `limit` cells.
#[inline]
pub(crate) fn count_direction(
    board: &Board,
    pos: Pos,
    dr: i32,
    dc: i32,
    color: Stone,
    limit: i32,
) -> i32 {
    let mut count = 0;
    for step in 1..=limit {
        match pos.offset(dr, dc, step, board.size()) {
            Some(p) if board.get(p) == color => count += 1,
            _ => break,
        }
    }
    count
}

/// Fast five-in-a-row check at a specific position.
///
/// Only checks the 4 axes through `pos`. No allocation.
#[inline]
pub fn has_five_at_pos(board: &Board, pos: Pos, color: Stone) -> bool {
    DIRECTIONS.iter().any(|&(dr, dc)| {
        1 + count_direction(board, pos, dr, dc, color, 4) + count_direction(board, pos, -dr, -dc, color, 4) >= 5
    })
}

/// Whether placing `color` on the empty cell `pos` would complete five.
/// Does not touch the board.
#[inline]
pub fn completes_five(board: &Board, pos: Pos, color: Stone) -> bool {
    color != Stone::Empty && board.is_empty(pos) && has_five_at_pos(board, pos, color)
}

/// Positions of the winning line through `pos`, if the stone there is part of one
pub fn find_five_line_at_pos(board: &Board, pos: Pos) -> Option<Vec<Pos>> {
    let color = board.get(pos);
    if color == Stone::Empty {
        return None;
    }
    let size = board.size() as i32;
    for &(dr, dc) in &DIRECTIONS {
        let back = count_direction(board, pos, -dr, -dc, color, size);
        let forward = count_direction(board, pos, dr, dc, color, size);
        if 1 + back + forward >= 5 {
            let line = (-back..=forward)
                .filter_map(|step| pos.offset(dr, dc, step, board.size()))
                .collect();
            return Some(line);
        }
    }
    None
}

/// Find the positions of a 5-in-a-row if one exists
///
/// Returns at least 5 positions ordered along the line, or None.
pub fn find_five_positions(board: &Board, stone: Stone) -> Option<Vec<Pos>> {
    board
        .stones(stone)
        .find(|&pos| has_five_at_pos(board, pos, stone))
        .and_then(|pos| find_five_line_at_pos(board, pos))
}

/// Check if there's 5+ in a row for the given color
pub fn has_five_in_row(board: &Board, stone: Stone) -> bool {
    find_five_positions(board, stone).is_some()
}
