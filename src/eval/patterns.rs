//! Pattern scores for Gomoku evaluation
//!
//! These constants define the scoring weights for line patterns and the
//! classification of a run of stones along one axis.

/// Pattern scores for evaluation.
/// Strictly monotonic: a better shape always outweighs a worse one.
pub struct PatternScore;

impl PatternScore {
    /// Five in a row - immediate win
    pub const FIVE: i32 = 1_000_000;

    /// Open four: _OOOO_ (two completion points, cannot be stopped)
    pub const OPEN_FOUR: i32 = 100_000;
    /// Closed four: XOOOO_ or _OOOOX (one way to extend, forces a reply)
    pub const CLOSED_FOUR: i32 = 12_000;

    /// Open three: _OOO_ (becomes open four if not blocked)
    pub const OPEN_THREE: i32 = 10_000;
    /// Closed three: XOOO_ or _OOOX
    pub const CLOSED_THREE: i32 = 1_500;

    /// Open two: _OO_ (potential to grow)
    pub const OPEN_TWO: i32 = 1_000;
    /// Closed two: XOO_ or _OOX
    pub const CLOSED_TWO: i32 = 200;

    /// Lone stone with room on both sides
    pub const OPEN_ONE: i32 = 10;
}

/// Terminal score for a decided game. Search results within `MAX_PLY` of this
/// value are wins/losses; heuristic sums are clamped below it.
pub const WIN_SCORE: i32 = 100_000_000;

/// Upper bound on the magnitude of any heuristic (non-terminal) score
pub const HEURISTIC_CAP: i32 = WIN_SCORE / 2;

/// How a run ends on one side
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineEnd {
    /// Next cell is on the board and empty
    Open,
    /// Opponent stone or board edge
    Blocked,
}

/// The maximal run of one player's stones through a point along one axis
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinePattern {
    pub length: u8,
    pub ends: [LineEnd; 2],
}

impl LinePattern {
    #[inline]
    pub fn open_ends(&self) -> u8 {
        self.ends.iter().filter(|&&e| e == LineEnd::Open).count() as u8
    }

    /// Five or longer: the run has already won, ends are irrelevant
    #[inline]
    pub fn is_winning(&self) -> bool {
        self.length >= 5
    }

    /// Weight from the pattern table. Runs with no open end cannot grow to
    /// five and are worth nothing.
    pub fn score(&self) -> i32 {
        if self.is_winning() {
            return PatternScore::FIVE;
        }
        match (self.length, self.open_ends()) {
            (4, 2) => PatternScore::OPEN_FOUR,
            (4, 1) => PatternScore::CLOSED_FOUR,
            (3, 2) => PatternScore::OPEN_THREE,
            (3, 1) => PatternScore::CLOSED_THREE,
            (2, 2) => PatternScore::OPEN_TWO,
            (2, 1) => PatternScore::CLOSED_TWO,
            (1, 2) => PatternScore::OPEN_ONE,
            _ => 0,
        }
    }
}
