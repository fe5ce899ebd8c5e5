//! Evaluation module for Gomoku positions
//!
//! This module provides pattern recognition and scoring:
//! - Line patterns (twos, threes, fours, fives) and their weights
//! - Single-placement scoring with offense and defense
//! - Whole-board evaluation for search leaves

pub mod heuristic;
pub mod patterns;
pub mod threat;

pub use heuristic::evaluate;
pub use patterns::{LineEnd, LinePattern, PatternScore, HEURISTIC_CAP, WIN_SCORE};
pub use threat::{line_through, score_placement, PlacementScore};
