//! Candidate move generation and deterministic ranking
//!
//! Only empty cells near existing stones are ever considered. The radius is
//! part of each difficulty's behavior, not just a speed-up.

use crate::board::{Board, Pos};

/// Default Chebyshev radius around stones
pub const DEFAULT_RADIUS: u8 = 2;

/// Empty cells within `radius` (Chebyshev) of any stone, in row-major order.
///
/// An empty board yields only its center; a full board yields nothing.
pub fn generate_candidates(board: &Board, radius: u8) -> Vec<Pos> {
    if board.is_board_empty() {
        return vec![board.center()];
    }

    let size = board.size();
    let radius = i32::from(radius);
    let mut near = vec![false; size * size];

    for pos in board.occupied() {
        for dr in -radius..=radius {
            for dc in -radius..=radius {
                if let Some(p) = pos.offset(dr, dc, 1, size) {
                    near[p.to_index(size)] = true;
                }
            }
        }
    }

    near.iter()
        .enumerate()
        .filter(|&(_, &flag)| flag)
        .map(|(idx, _)| Pos::from_index(idx, size))
        .filter(|&p| board.is_empty(p))
        .collect()
}

/// Sort scored moves best-first: higher score, then closer to the center
/// (Manhattan), then row-major.
pub fn rank_moves<S: Ord + Copy>(board: &Board, moves: &mut [(Pos, S)]) {
    let center = board.center();
    moves.sort_by(|a, b| {
        b.1.cmp(&a.1)
            .then_with(|| a.0.manhattan(center).cmp(&b.0.manhattan(center)))
            .then_with(|| a.0.cmp(&b.0))
    });
}

/// The move `rank_moves` would put first
pub fn best_ranked<S: Ord + Copy>(board: &Board, moves: impl IntoIterator<Item = (Pos, S)>) -> Option<(Pos, S)> {
    let mut moves: Vec<(Pos, S)> = moves.into_iter().collect();
    rank_moves(board, &mut moves);
    moves.first().copied()
}
