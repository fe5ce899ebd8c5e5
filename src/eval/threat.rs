//! Placement scoring: how much a single move is worth
//!
//! For each axis through an empty cell, the cell is treated as holding the
//! mover's stone and the run through it is classified. The same walk done for
//! the opponent gives the defensive value of occupying the cell first.

use crate::board::{Board, Pos, Stone, DIRECTIONS};
use crate::rules::win::count_direction;

use super::patterns::{LineEnd, LinePattern};

/// Cells examined on each side of the placement
const WALK_LIMIT: i32 = 4;

/// Offense weight in [`PlacementScore::combined`] (tenths)
pub const ATTACK_WEIGHT: i32 = 10;
/// Defense weight in [`PlacementScore::combined`] (tenths)
pub const DEFENSE_WEIGHT: i32 = 9;

/// Value of one placement for the player making it
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlacementScore {
    /// Pattern weight gained by the mover, summed over the 4 axes
    pub attack: i32,
    /// Pattern weight denied to the opponent, summed over the 4 axes
    pub defense: i32,
    /// Placing here completes five for the mover
    pub wins: bool,
    /// The opponent would complete five here
    pub blocks_win: bool,
}

impl PlacementScore {
    /// Weighted offense + defense. Blocking an opponent five (defense of at
    /// least `FIVE`) outweighs every non-winning attack.
    #[inline]
    pub fn combined(&self) -> i32 {
        self.attack * ATTACK_WEIGHT + self.defense * DEFENSE_WEIGHT
    }
}

/// Classify the run through `pos` along `dir` as if `stone` stood on `pos`.
pub fn line_through(board: &Board, pos: Pos, dir: (i32, i32), stone: Stone) -> LinePattern {
    let (dr, dc) = dir;
    let forward = count_direction(board, pos, dr, dc, stone, WALK_LIMIT);
    let backward = count_direction(board, pos, -dr, -dc, stone, WALK_LIMIT);

    let end_at = |dr: i32, dc: i32, run: i32| match pos.offset(dr, dc, run + 1, board.size()) {
        Some(p) if board.is_empty(p) => LineEnd::Open,
        _ => LineEnd::Blocked,
    };

    LinePattern {
        length: (1 + forward + backward) as u8,
        ends: [end_at(-dr, -dc, backward), end_at(dr, dc, forward)],
    }
}

/// Score placing `player`'s stone on the empty cell `pos`.
///
/// Pure function of the snapshot; occupied cells score zero.
pub fn score_placement(board: &Board, pos: Pos, player: Stone) -> PlacementScore {
    let opponent = player.opponent();
    let mut score = PlacementScore::default();
    if !board.is_empty(pos) || player == Stone::Empty {
        return score;
    }

    for &dir in &DIRECTIONS {
        let mine = line_through(board, pos, dir, player);
        let theirs = line_through(board, pos, dir, opponent);

        score.attack += mine.score();
        score.defense += theirs.score();
        score.wins |= mine.is_winning();
        score.blocks_win |= theirs.is_winning();
    }
    score
}
