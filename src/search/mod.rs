//! Search module for Gomoku AI
//!
//! Contains:
//! - Candidate generation near existing stones, with deterministic ranking
//! - Fixed-depth negamax with alpha-beta pruning

pub mod alphabeta;
pub mod candidates;

pub use alphabeta::{SearchResult, SearchStats, Searcher};
pub use candidates::{best_ranked, generate_candidates, rank_moves, DEFAULT_RADIUS};
