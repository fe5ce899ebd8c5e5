//! Fixed-depth negamax with alpha-beta pruning
//!
//! The hard tier's lookahead. Each node expands only its top-K candidates,
//! ordered by the same placement score the medium tier uses, and leaves are
//! scored with the whole-board heuristic.
//!
//! # Example
//!
//! ```
//! use gomoku::board::{Board, Pos, Stone};
//! use gomoku::search::Searcher;
//!
//! let mut searcher = Searcher::new(3, 10, 2);
//! let mut board = Board::new(15);
//! board.place_stone(Pos::new(7, 7), Stone::Black);
//!
//! let result = searcher.search(&board, Stone::White);
//! assert!(result.best_move.is_some());
//! ```

use crate::board::{Board, Pos, Stone};
use crate::eval::{evaluate, score_placement, WIN_SCORE};

use super::candidates::{generate_candidates, rank_moves};

/// Infinity score for alpha-beta bounds
const INF: i32 = WIN_SCORE + 1;

/// Search statistics for diagnostics and tuning.
#[derive(Debug, Clone, Default)]
pub struct SearchStats {
    /// Total beta cutoffs (fail-high)
    pub beta_cutoffs: u64,
    /// Beta cutoffs on the first move tried (measures move ordering quality)
    pub first_move_cutoffs: u64,
    /// Leaves scored with the static evaluator
    pub leaf_evals: u64,
    /// Nodes that ended on a completed five
    pub terminal_wins: u64,
}

impl SearchStats {
    /// Percentage of cutoffs produced by the first ordered move
    pub fn first_move_rate(&self) -> f64 {
        if self.beta_cutoffs == 0 {
            0.0
        } else {
            self.first_move_cutoffs as f64 / self.beta_cutoffs as f64 * 100.0
        }
    }
}

/// Search result containing the best move found and associated statistics.
#[derive(Debug, Clone)]
pub struct SearchResult {
    /// Best move found, if any
    pub best_move: Option<Pos>,
    /// Negamax value of the best move for the side to move
    pub score: i32,
    /// Depth searched
    pub depth: u8,
    /// Total nodes visited
    pub nodes: u64,
    /// Search diagnostics
    pub stats: SearchStats,
}

/// Depth-limited negamax searcher.
///
/// Fully deterministic: the same board, player and parameters always give
/// the same result, which keeps the hard tier reproducible.
#[derive(Debug, Clone)]
pub struct Searcher {
    depth: u8,
    top_k: usize,
    radius: u8,
    nodes: u64,
    stats: SearchStats,
}

impl Searcher {
    /// Create a searcher.
    ///
    /// # Arguments
    ///
    /// * `depth` - Plies searched, including the root move (at least 1)
    /// * `top_k` - Candidates expanded per node
    /// * `radius` - Chebyshev radius for candidate generation (at least 1)
    #[must_use]
    pub fn new(depth: u8, top_k: usize, radius: u8) -> Self {
        Self {
            depth: depth.max(1),
            top_k: top_k.max(1),
            radius: radius.max(1),
            nodes: 0,
            stats: SearchStats::default(),
        }
    }

    pub fn depth(&self) -> u8 {
        self.depth
    }

    pub fn top_k(&self) -> usize {
        self.top_k
    }

    /// Search for the best move for `color`. The caller's board is never
    /// touched; all exploration happens on a private copy.
    #[must_use]
    pub fn search(&mut self, board: &Board, color: Stone) -> SearchResult {
        self.nodes = 0;
        self.stats = SearchStats::default();

        let mut work = board.clone();
        let (best_move, score) = self.search_root(&mut work, color);

        SearchResult {
            best_move,
            score: if best_move.is_some() { score } else { 0 },
            depth: self.depth,
            nodes: self.nodes,
            stats: self.stats.clone(),
        }
    }

    /// Exact negamax value of playing `pos` for `color`, searched to the
    /// same depth as [`search`](Self::search). `None` if `pos` is occupied
    /// or off the board.
    pub fn score_root_move(&mut self, board: &Board, color: Stone, pos: Pos) -> Option<i32> {
        let mut work = board.clone();
        if !work.place_stone(pos, color) {
            return None;
        }
        Some(-self.negamax(&mut work, color.opponent(), self.depth - 1, 1, -INF, INF))
    }

    /// Root-level search with full alpha-beta window.
    ///
    /// The first move is searched with the full window, so its value is
    /// exact; later moves only replace it when they are provably better.
    fn search_root(&mut self, board: &mut Board, color: Stone) -> (Option<Pos>, i32) {
        let mut best_move = None;
        let mut best_score = -INF;
        let mut alpha = -INF;

        for (mov, _) in self.ordered_moves(board, color) {
            if !board.place_stone(mov, color) {
                continue;
            }
            let score = -self.negamax(board, color.opponent(), self.depth - 1, 1, -INF, -alpha);
            board.undo();

            if score > best_score {
                best_score = score;
                best_move = Some(mov);
            }
            alpha = alpha.max(score);
        }

        (best_move, best_score)
    }

    /// Negamax from the perspective of `color`, the side to move.
    fn negamax(
        &mut self,
        board: &mut Board,
        color: Stone,
        depth: u8,
        ply: i32,
        mut alpha: i32,
        beta: i32,
    ) -> i32 {
        self.nodes += 1;

        // The previous mover may have just completed five
        if let Some(last) = board.last_move() {
            if board.check_win(last) {
                self.stats.terminal_wins += 1;
                return -(WIN_SCORE - ply);
            }
        }
        if board.is_full() {
            return 0;
        }
        if depth == 0 {
            self.stats.leaf_evals += 1;
            return evaluate(board, color);
        }

        let moves = self.ordered_moves(board, color);
        if moves.is_empty() {
            return 0;
        }

        let mut best = -INF;
        for (i, (mov, _)) in moves.into_iter().enumerate() {
            if !board.place_stone(mov, color) {
                continue;
            }
            let score = -self.negamax(board, color.opponent(), depth - 1, ply + 1, -beta, -alpha);
            board.undo();

            best = best.max(score);
            alpha = alpha.max(score);
            if alpha >= beta {
                self.stats.beta_cutoffs += 1;
                if i == 0 {
                    self.stats.first_move_cutoffs += 1;
                }
                break;
            }
        }
        best
    }

    /// Candidates ranked by combined placement score, truncated to top-K.
    fn ordered_moves(&self, board: &Board, color: Stone) -> Vec<(Pos, i32)> {
        let mut moves: Vec<(Pos, i32)> = generate_candidates(board, self.radius)
            .into_iter()
            .map(|pos| (pos, score_placement(board, pos, color).combined()))
            .collect();
        rank_moves(board, &mut moves);
        moves.truncate(self.top_k);
        moves
    }
}
