//! Engine configuration
//!
//! Loaded from JSON; every field has a default so a partial file (or `{}`)
//! is valid.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::board::{DEFAULT_BOARD_SIZE, MAX_BOARD_SIZE, MIN_BOARD_SIZE};
use crate::engine::Difficulty;
use crate::search::DEFAULT_RADIUS;

pub const MAX_SEARCH_DEPTH: u8 = 6;
pub const MAX_CANDIDATE_RADIUS: u8 = 4;

/// Configuration loading errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Invalid value for {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Root configuration: board size, tier and search knobs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct EngineConfig {
    /// Side length of the square board.
    #[serde(default = "default_board_size")]
    pub board_size: usize,
    #[serde(default)]
    pub difficulty: Difficulty,
    #[serde(default)]
    pub search: SearchConfig,
}

/// Hard-tier search and candidate-generation settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct SearchConfig {
    /// Plies searched by the hard tier, root move included.
    #[serde(default = "default_depth")]
    pub depth: u8,
    /// Candidates expanded per search node.
    #[serde(default = "default_top_k")]
    pub top_k: usize,
    /// Chebyshev radius around stones for candidate moves (all tiers).
    #[serde(default = "default_candidate_radius")]
    pub candidate_radius: u8,
}

fn default_board_size() -> usize {
    DEFAULT_BOARD_SIZE
}

fn default_depth() -> u8 {
    3
}

fn default_top_k() -> usize {
    10
}

fn default_candidate_radius() -> u8 {
    DEFAULT_RADIUS
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            depth: default_depth(),
            top_k: default_top_k(),
            candidate_radius: default_candidate_radius(),
        }
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            board_size: default_board_size(),
            difficulty: Difficulty::default(),
            search: SearchConfig::default(),
        }
    }
}

impl EngineConfig {
    /// Load and validate configuration from a JSON file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json(&contents)
    }

    /// Parse and validate configuration from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: EngineConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(MIN_BOARD_SIZE..=MAX_BOARD_SIZE).contains(&self.board_size) {
            return Err(ConfigError::Invalid {
                field: "board_size",
                reason: format!(
                    "{} is outside {MIN_BOARD_SIZE}..={MAX_BOARD_SIZE}",
                    self.board_size
                ),
            });
        }
        self.search.validate()
    }
}

impl SearchConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=MAX_SEARCH_DEPTH).contains(&self.depth) {
            return Err(ConfigError::Invalid {
                field: "search.depth",
                reason: format!("{} is outside 1..={MAX_SEARCH_DEPTH}", self.depth),
            });
        }
        if self.top_k == 0 {
            return Err(ConfigError::Invalid {
                field: "search.top_k",
                reason: "must be at least 1".to_string(),
            });
        }
        if !(1..=MAX_CANDIDATE_RADIUS).contains(&self.candidate_radius) {
            return Err(ConfigError::Invalid {
                field: "search.candidate_radius",
                reason: format!(
                    "{} is outside 1..={MAX_CANDIDATE_RADIUS}",
                    self.candidate_radius
                ),
            });
        }
        Ok(())
    }
}
