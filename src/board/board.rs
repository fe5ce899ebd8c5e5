//! Board structure with move history

use std::fmt;

use super::bitboard::Bitboard;
use super::{Pos, Stone, MAX_BOARD_SIZE, MIN_BOARD_SIZE};
use crate::rules::{find_five_positions, has_five_at_pos};

/// Game board for one session.
///
/// The board size is fixed at construction. Every successful placement adds
/// exactly one stone and one history entry; cells only revert on `reset`
/// (or on the search engine's private clones through `undo`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    size: usize,
    /// Black stones bitboard
    black: Bitboard,
    /// White stones bitboard
    white: Bitboard,
    history: Vec<MoveRecord>,
    last_move: Option<Pos>,
}

/// One placed stone, in play order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveRecord {
    pub pos: Pos,
    pub stone: Stone,
}

impl Board {
    /// Create an empty `size` x `size` board.
    ///
    /// # Panics
    ///
    /// Panics if `size` is outside `MIN_BOARD_SIZE..=MAX_BOARD_SIZE`.
    pub fn new(size: usize) -> Self {
        assert!(
            (MIN_BOARD_SIZE..=MAX_BOARD_SIZE).contains(&size),
            "board size {size} outside {MIN_BOARD_SIZE}..={MAX_BOARD_SIZE}"
        );
        Self {
            size,
            black: Bitboard::new(),
            white: Bitboard::new(),
            history: Vec::with_capacity(size * size),
            last_move: None,
        }
    }

    /// Build a position from text rows: `X` black, `O` white, anything else empty.
    /// Stones are recorded in row-major order.
    ///
    /// # Panics
    ///
    /// Panics if the rows do not form a square of a supported size.
    pub fn from_rows(rows: &[&str]) -> Self {
        let mut board = Board::new(rows.len());
        for (r, line) in rows.iter().enumerate() {
            let cells: Vec<char> = line.chars().filter(|c| !c.is_whitespace()).collect();
            assert_eq!(cells.len(), rows.len(), "row {r} is not {} cells wide", rows.len());
            for (c, ch) in cells.into_iter().enumerate() {
                let stone = match ch {
                    'X' | 'x' => Stone::Black,
                    'O' | 'o' => Stone::White,
                    _ => continue,
                };
                board.place(r, c, stone);
            }
        }
        board
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Centre cell (lower-right of the middle four on even sizes)
    #[inline]
    pub fn center(&self) -> Pos {
        let mid = (self.size / 2) as u8;
        Pos::new(mid, mid)
    }

    /// Whether `(row, col)` lies on the board
    #[inline]
    pub fn contains(&self, row: usize, col: usize) -> bool {
        row < self.size && col < self.size
    }

    /// Get stone at position
    #[inline]
    pub fn get(&self, pos: Pos) -> Stone {
        let idx = pos.to_index(self.size);
        if self.black.get(idx) {
            Stone::Black
        } else if self.white.get(idx) {
            Stone::White
        } else {
            Stone::Empty
        }
    }

    /// Check if position is empty
    #[inline]
    pub fn is_empty(&self, pos: Pos) -> bool {
        let idx = pos.to_index(self.size);
        !self.black.get(idx) && !self.white.get(idx)
    }

    /// Place a stone at raw coordinates.
    ///
    /// Returns `false` and leaves the board untouched when the cell is off the
    /// board, already occupied, or `stone` is `Empty`.
    pub fn place(&mut self, row: usize, col: usize, stone: Stone) -> bool {
        if !self.contains(row, col) {
            return false;
        }
        self.place_stone(Pos::new(row as u8, col as u8), stone)
    }

    /// Place a stone at `pos`; same contract as [`Board::place`].
    pub fn place_stone(&mut self, pos: Pos, stone: Stone) -> bool {
        if !self.contains(pos.row as usize, pos.col as usize) || !self.is_empty(pos) {
            return false;
        }
        let idx = pos.to_index(self.size);
        match stone {
            Stone::Black => self.black.set(idx),
            Stone::White => self.white.set(idx),
            Stone::Empty => return false,
        }
        self.history.push(MoveRecord { pos, stone });
        self.last_move = Some(pos);
        true
    }

    /// Take back the most recent placement. Only the search engine's private
    /// copies are rolled back; the live board only ever moves forward.
    pub(crate) fn undo(&mut self) -> Option<MoveRecord> {
        let record = self.history.pop()?;
        let idx = record.pos.to_index(self.size);
        self.black.clear(idx);
        self.white.clear(idx);
        self.last_move = self.history.last().map(|m| m.pos);
        Some(record)
    }

    /// Whether the stone at `pos` is part of five or more in a row.
    /// Call right after the placement at `pos`.
    pub fn check_win(&self, pos: Pos) -> bool {
        if !self.contains(pos.row as usize, pos.col as usize) {
            return false;
        }
        match self.get(pos) {
            Stone::Empty => false,
            stone => has_five_at_pos(self, pos, stone),
        }
    }

    /// Scan the whole board for a five; returns the owner
    pub fn winner(&self) -> Option<Stone> {
        [Stone::Black, Stone::White]
            .into_iter()
            .find(|&stone| find_five_positions(self, stone).is_some())
    }

    /// True when no empty cell remains
    #[inline]
    pub fn is_full(&self) -> bool {
        self.history.len() == self.size * self.size
    }

    /// Clear all stones and the move history
    pub fn reset(&mut self) {
        self.black.clear_all();
        self.white.clear_all();
        self.history.clear();
        self.last_move = None;
    }

    /// Positions of all stones of one color, row-major
    pub fn stones(&self, stone: Stone) -> impl Iterator<Item = Pos> + '_ {
        let bits = match stone {
            Stone::Black => Some(self.black.iter_ones()),
            Stone::White => Some(self.white.iter_ones()),
            Stone::Empty => None,
        };
        let size = self.size;
        bits.into_iter().flatten().map(move |idx| Pos::from_index(idx, size))
    }

    /// Positions of every stone on the board, row-major within each color
    pub fn occupied(&self) -> impl Iterator<Item = Pos> + '_ {
        self.stones(Stone::Black).chain(self.stones(Stone::White))
    }

    /// Total stones on board
    #[inline]
    pub fn stone_count(&self) -> usize {
        self.history.len()
    }

    /// Check if board is empty
    #[inline]
    pub fn is_board_empty(&self) -> bool {
        self.history.is_empty()
    }

    #[inline]
    pub fn history(&self) -> &[MoveRecord] {
        &self.history
    }

    #[inline]
    pub fn last_move(&self) -> Option<Pos> {
        self.last_move
    }

    /// Color due to move next, assuming Black started and turns alternated
    pub fn side_to_move(&self) -> Stone {
        match self.history.last() {
            Some(m) => m.stone.opponent(),
            None => Stone::Black,
        }
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new(super::DEFAULT_BOARD_SIZE)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "   ")?;
        for c in 0..self.size {
            write!(f, "{c:>3}")?;
        }
        writeln!(f)?;
        for r in 0..self.size {
            write!(f, "{r:>3}")?;
            for c in 0..self.size {
                let pos = Pos::new(r as u8, c as u8);
                let mark = if self.last_move == Some(pos) { '*' } else { ' ' };
                write!(f, " {}{}", self.get(pos).symbol(), mark)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
