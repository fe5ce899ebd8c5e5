//! Gomoku decision engine
//!
//! Move selection for freestyle Gomoku on a square board (5x5 up to 25x25,
//! 15x15 by default). Black moves first and five or more in a row wins.
//!
//! # Architecture
//!
//! The engine is organized into several modules:
//! - [`board`]: Board representation with bitboards and move history
//! - [`rules`]: Five-in-a-row detection
//! - [`eval`]: Pattern weights, placement scoring and whole-board evaluation
//! - [`search`]: Candidate generation and alpha-beta search
//! - [`engine`]: The easy, medium and hard move-selection tiers
//! - [`game`]: A game session with turn order, outcome and advisor fallback
//! - [`advisor`]: Traits for external move and chat providers
//! - [`config`]: JSON configuration
//!
//! # Quick Start
//!
//! ```
//! use gomoku::{AIEngine, Board, Difficulty, Pos, Stone};
//!
//! let mut board = Board::new(15);
//! let mut engine = AIEngine::new(15, Difficulty::Medium);
//!
//! board.place_stone(Pos::new(7, 7), Stone::Black);
//!
//! // Engine responds as White
//! if let Some(pos) = engine.select_move(&board, Stone::White) {
//!     board.place_stone(pos, Stone::White);
//!     println!("Engine plays at ({}, {})", pos.row, pos.col);
//! }
//! ```
//!
//! # Selection Priority
//!
//! Every tier:
//! 1. Completes its own five when it can
//! 2. Blocks the opponent's five otherwise
//! 3. Applies its own policy (attack score, combined score, or search)

pub mod advisor;
pub mod board;
pub mod config;
pub mod engine;
pub mod eval;
pub mod game;
pub mod rules;
pub mod search;

// Re-export commonly used types for convenience
pub use advisor::{
    AdvisorError, ChatAdvisor, ChatHistory, ChatMessage, ChatRole, EngineAdvisor, MoveAdvisor,
    MoveRequest, Proposal,
};
pub use board::{Board, Pos, Stone, DEFAULT_BOARD_SIZE};
pub use config::{ConfigError, EngineConfig, SearchConfig};
pub use engine::{AIEngine, Difficulty, MoveResult, SearchType};
pub use game::{GameSession, GameStatus, MoveSource, PlayError, TurnReport};
