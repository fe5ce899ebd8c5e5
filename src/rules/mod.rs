//! Game rules for standard Gomoku
//!
//! Free-style rules: any line of five or more wins, no forbidden moves.

pub mod win;

// Re-exports for convenient access
pub use win::{
    completes_five, find_five_line_at_pos, find_five_positions, has_five_at_pos, has_five_in_row,
};
