//! Move selection for the three difficulty tiers
//!
//! Every tier follows the same priority before its own policy:
//!
//! 1. **Immediate win**: complete five if possible
//! 2. **Defense**: block a cell where the opponent would complete five
//! 3. **Tier policy**:
//!    - Easy: best local attack score
//!    - Medium: best combined attack + defense score
//!    - Hard: negamax with alpha-beta over the top-K medium candidates
//!
//! Ties are broken by score, then Manhattan distance to the center, then
//! row-major order, so every tier is deterministic.
//!
//! # Example
//!
//! ```
//! use gomoku::{AIEngine, Board, Difficulty, Pos, Stone};
//!
//! let mut engine = AIEngine::new(15, Difficulty::Hard);
//! let mut board = Board::new(15);
//! board.place_stone(Pos::new(7, 7), Stone::Black);
//!
//! let result = engine.select_move_with_stats(&board, Stone::White);
//! println!("Best move: {:?}", result.best_move);
//! println!("Search type: {:?}", result.search_type);
//! println!("Time: {}ms", result.time_ms);
//! ```

use std::fmt;
use std::str::FromStr;
use std::time::Instant;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::board::{Board, Pos, Stone};
use crate::config::{EngineConfig, SearchConfig};
use crate::eval::{score_placement, PlacementScore, WIN_SCORE};
use crate::search::{best_ranked, generate_candidates, SearchResult, SearchStats, Searcher};

/// Move-selection policy preset
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    pub fn as_str(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown difficulty '{0}' (expected easy, medium or hard)")]
pub struct ParseDifficultyError(String);

impl FromStr for Difficulty {
    type Err = ParseDifficultyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            _ => Err(ParseDifficultyError(s.to_string())),
        }
    }
}

/// Type of search that produced the result.
///
/// This indicates which phase of the selection priority found the move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchType {
    /// Completes five for the mover
    ImmediateWin,
    /// Blocks a cell where the opponent would complete five
    Defense,
    /// Easy tier: best attack score
    Attack,
    /// Medium tier: best combined placement score
    Scored,
    /// Hard tier: alpha-beta search result
    AlphaBeta,
}

/// Result of a move search with detailed statistics.
#[derive(Debug, Clone)]
pub struct MoveResult {
    /// Best move found, if any
    pub best_move: Option<Pos>,
    /// Placement score, or negamax value for the hard tier
    pub score: i32,
    /// Phase that chose the move
    pub search_type: SearchType,
    /// Time taken in milliseconds
    pub time_ms: u64,
    /// Number of nodes searched (candidates scored for the shallow tiers)
    pub nodes: u64,
    /// Alpha-beta diagnostics, present only when the search ran
    pub stats: Option<SearchStats>,
}

impl MoveResult {
    #[inline]
    fn immediate_win(pos: Pos, time_ms: u64, nodes: u64) -> Self {
        Self {
            best_move: Some(pos),
            score: WIN_SCORE,
            search_type: SearchType::ImmediateWin,
            time_ms,
            nodes,
            stats: None,
        }
    }

    #[inline]
    fn defense(pos: Pos, score: i32, time_ms: u64, nodes: u64) -> Self {
        Self {
            best_move: Some(pos),
            score,
            search_type: SearchType::Defense,
            time_ms,
            nodes,
            stats: None,
        }
    }

    #[inline]
    fn from_alphabeta(result: SearchResult, time_ms: u64) -> Self {
        Self {
            best_move: result.best_move,
            score: result.score,
            search_type: SearchType::AlphaBeta,
            time_ms,
            nodes: result.nodes,
            stats: Some(result.stats),
        }
    }

    #[inline]
    fn no_move(search_type: SearchType, time_ms: u64) -> Self {
        Self {
            best_move: None,
            score: 0,
            search_type,
            time_ms,
            nodes: 0,
            stats: None,
        }
    }
}

/// Move-selection engine for one board size and tier.
///
/// Reads the board it is given and never mutates it; the caller applies the
/// returned move.
#[derive(Debug, Clone)]
pub struct AIEngine {
    board_size: usize,
    difficulty: Difficulty,
    radius: u8,
    searcher: Searcher,
}

impl AIEngine {
    /// Engine with default search parameters (depth 3, top-K 10, radius 2).
    #[must_use]
    pub fn new(board_size: usize, difficulty: Difficulty) -> Self {
        Self::with_search(board_size, difficulty, SearchConfig::default())
    }

    /// Engine with explicit search parameters. Depth, top-K and radius are
    /// raised to at least 1; use [`EngineConfig::validate`] to reject them
    /// instead.
    #[must_use]
    pub fn with_search(board_size: usize, difficulty: Difficulty, search: SearchConfig) -> Self {
        Self {
            board_size,
            difficulty,
            radius: search.candidate_radius.max(1),
            searcher: Searcher::new(search.depth, search.top_k, search.candidate_radius),
        }
    }

    #[must_use]
    pub fn from_config(config: &EngineConfig) -> Self {
        Self::with_search(config.board_size, config.difficulty, config.search)
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn board_size(&self) -> usize {
        self.board_size
    }

    pub fn radius(&self) -> u8 {
        self.radius
    }

    /// Best move for `player`, or `None` when the board has no empty cell.
    #[must_use]
    pub fn select_move(&mut self, board: &Board, player: Stone) -> Option<Pos> {
        self.select_move_with_stats(board, player).best_move
    }

    /// Best move with the phase that chose it and search statistics.
    ///
    /// # Panics
    ///
    /// Panics if the board size differs from the engine's, or if `player`
    /// is [`Stone::Empty`].
    #[must_use]
    pub fn select_move_with_stats(&mut self, board: &Board, player: Stone) -> MoveResult {
        assert_eq!(
            board.size(),
            self.board_size,
            "board is {0}x{0} but the engine plays {1}x{1}",
            board.size(),
            self.board_size
        );
        assert_ne!(player, Stone::Empty, "no player to move");

        let start = Instant::now();
        let result = self.choose(board, player, start);

        debug!(
            tier = %self.difficulty,
            ?player,
            best_move = ?result.best_move,
            score = result.score,
            search_type = ?result.search_type,
            nodes = result.nodes,
            cutoffs = result.stats.as_ref().map_or(0, |s| s.beta_cutoffs),
            time_ms = result.time_ms,
            "engine selected move"
        );
        result
    }

    fn choose(&mut self, board: &Board, player: Stone, start: Instant) -> MoveResult {
        let elapsed = || start.elapsed().as_millis() as u64;

        let scored: Vec<(Pos, PlacementScore)> = generate_candidates(board, self.radius)
            .into_iter()
            .map(|pos| (pos, score_placement(board, pos, player)))
            .collect();
        let nodes = scored.len() as u64;

        if scored.is_empty() {
            return MoveResult::no_move(self.search_type(), elapsed());
        }

        // 1. Own five beats everything
        if let Some((pos, _)) = find_immediate_win(board, &scored) {
            return MoveResult::immediate_win(pos, elapsed(), nodes);
        }

        // 2. Opponent five next turn must be blocked
        if let Some((pos, score)) = find_must_block(board, &scored) {
            return MoveResult::defense(pos, score, elapsed(), nodes);
        }

        // 3. Tier policy
        let pick = |key: fn(&PlacementScore) -> i32, search_type: SearchType| {
            best_ranked(board, scored.iter().map(|(pos, s)| (*pos, key(s))))
                .map(|(pos, score)| MoveResult {
                    best_move: Some(pos),
                    score,
                    search_type,
                    time_ms: elapsed(),
                    nodes,
                    stats: None,
                })
                .unwrap_or_else(|| MoveResult::no_move(search_type, elapsed()))
        };

        match self.difficulty {
            Difficulty::Easy => pick(|s: &PlacementScore| s.attack, SearchType::Attack),
            Difficulty::Medium => pick(PlacementScore::combined, SearchType::Scored),
            Difficulty::Hard => {
                let result = self.searcher.search(board, player);
                MoveResult::from_alphabeta(result, elapsed())
            }
        }
    }

    fn search_type(&self) -> SearchType {
        match self.difficulty {
            Difficulty::Easy => SearchType::Attack,
            Difficulty::Medium => SearchType::Scored,
            Difficulty::Hard => SearchType::AlphaBeta,
        }
    }
}

impl Default for AIEngine {
    fn default() -> Self {
        Self::from_config(&EngineConfig::default())
    }
}

/// A candidate that completes five for the mover.
///
/// Fives only arise next to existing stones, so the candidate pool (radius
/// of at least 1) always contains every winning cell.
fn find_immediate_win(board: &Board, scored: &[(Pos, PlacementScore)]) -> Option<(Pos, i32)> {
    best_ranked(
        board,
        scored
            .iter()
            .filter(|(_, s)| s.wins)
            .map(|(pos, s)| (*pos, s.combined())),
    )
}

/// The best-scoring cell among those where the opponent would complete five.
fn find_must_block(board: &Board, scored: &[(Pos, PlacementScore)]) -> Option<(Pos, i32)> {
    best_ranked(
        board,
        scored
            .iter()
            .filter(|(_, s)| s.blocks_win)
            .map(|(pos, s)| (*pos, s.combined())),
    )
}
