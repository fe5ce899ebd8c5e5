//! Bitboard storage for one stone color

use super::MAX_CELLS;

const WORDS: usize = MAX_CELLS.div_ceil(64); // 10 words = 640 bits >= 625

/// One bit per cell, indexed row-major for the owning board's size.
/// Sized for the largest supported board so clones stay a flat copy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Bitboard {
    bits: [u64; WORDS],
}

impl Bitboard {
    /// Create empty bitboard
    pub const fn new() -> Self {
        Self { bits: [0; WORDS] }
    }

    #[inline]
    pub fn set(&mut self, idx: usize) {
        self.bits[idx / 64] |= 1u64 << (idx % 64);
    }

    #[inline]
    pub fn clear(&mut self, idx: usize) {
        self.bits[idx / 64] &= !(1u64 << (idx % 64));
    }

    #[inline]
    pub fn get(&self, idx: usize) -> bool {
        (self.bits[idx / 64] >> (idx % 64)) & 1 == 1
    }

    /// Count total set bits (popcount)
    #[inline]
    pub fn count(&self) -> u32 {
        self.bits.iter().map(|b| b.count_ones()).sum()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bits.iter().all(|&b| b == 0)
    }

    pub fn clear_all(&mut self) {
        self.bits = [0; WORDS];
    }

    /// Iterate over set cell indices in ascending (row-major) order
    pub fn iter_ones(&self) -> BitboardIter {
        BitboardIter {
            bits: self.bits,
            word_idx: 0,
            current_word: self.bits[0],
        }
    }
}

/// Iterator over set bits in a Bitboard
pub struct BitboardIter {
    bits: [u64; WORDS],
    word_idx: usize,
    current_word: u64,
}

impl Iterator for BitboardIter {
    type Item = usize;

    fn next(&mut self) -> Option<Self::Item> {
        while self.current_word == 0 {
            self.word_idx += 1;
            if self.word_idx >= WORDS {
                return None;
            }
            self.current_word = self.bits[self.word_idx];
        }

        let idx = self.word_idx * 64 + self.current_word.trailing_zeros() as usize;
        // Clear the lowest set bit
        self.current_word &= self.current_word - 1;
        Some(idx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_get_clear() {
        let mut bb = Bitboard::new();
        assert!(bb.is_empty());
        bb.set(0);
        bb.set(64);
        bb.set(624);
        assert!(bb.get(0) && bb.get(64) && bb.get(624));
        assert!(!bb.get(1));
        assert_eq!(bb.count(), 3);

        bb.clear(64);
        assert!(!bb.get(64));
        assert_eq!(bb.count(), 2);
    }

    #[test]
    fn test_iter_ones_ascending() {
        let mut bb = Bitboard::new();
        for idx in [500, 3, 130, 64, 63] {
            bb.set(idx);
        }
        let ones: Vec<usize> = bb.iter_ones().collect();
        assert_eq!(ones, vec![3, 63, 64, 130, 500]);
    }

    #[test]
    fn test_clear_all() {
        let mut bb = Bitboard::new();
        bb.set(10);
        bb.set(300);
        bb.clear_all();
        assert!(bb.is_empty());
        assert_eq!(bb.iter_ones().count(), 0);
    }
}
