/// ROM frame bitmap: 128 words of 12 readout lanes
use bitflags::bitflags;
use constants::memory::{DEPTH, WORD_WIDTH};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

bitflags! {
    /// One ROM word. Lane `n` (0 = MSB, leftmost in the MIF text) sits at bit `11 - n`.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct LaneWord: u16 {
        const A_SEG0_EVEN = 1 << 11;
        const A_SEG0_ODD  = 1 << 10;
        const A_SEG1_EVEN = 1 << 9;
        const A_SEG1_ODD  = 1 << 8;
        const B_SEG0_EVEN = 1 << 7;
        const B_SEG0_ODD  = 1 << 6;
        const B_SEG1_EVEN = 1 << 5;
        const B_SEG1_ODD  = 1 << 4;
        const C_SEG0_EVEN = 1 << 3;
        const C_SEG0_ODD  = 1 << 2;
        const C_SEG1_EVEN = 1 << 1;
        const C_SEG1_ODD  = 1 << 0;
    }
}

impl LaneWord {
    /// Flag for lane `n`, or `None` past the word width.
    pub fn lane(n: usize) -> Option<Self> {
        if n < WORD_WIDTH {
            Some(Self::from_bits_retain(1 << (WORD_WIDTH - 1 - n)))
        } else {
            None
        }
    }
}

impl fmt::Display for LaneWord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:0width$b}", self.bits(), width = WORD_WIDTH)
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LaneWordParseError {
    #[error("expected {expected} binary digits, found {found}")]
    Length { expected: usize, found: usize },
    #[error("invalid binary digit {0:?}")]
    Digit(char),
}

impl FromStr for LaneWord {
    type Err = LaneWordParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let found = s.chars().count();
        if found != WORD_WIDTH {
            return Err(LaneWordParseError::Length {
                expected: WORD_WIDTH,
                found,
            });
        }

        let mut word = LaneWord::empty();
        for (c, flag) in s.chars().zip((0..WORD_WIDTH).filter_map(Self::lane)) {
            match c {
                '0' => {}
                '1' => word |= flag,
                other => return Err(LaneWordParseError::Digit(other)),
            }
        }
        Ok(word)
    }
}

/// Both frames of the ROM image. Bits are only ever set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameBitmap {
    rows: [LaneWord; DEPTH],
}

impl Default for FrameBitmap {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameBitmap {
    pub fn new() -> Self {
        Self {
            rows: [LaneWord::empty(); DEPTH],
        }
    }

    /// Set lane `lane` of `row`. Returns false when the address is outside the ROM.
    pub fn set_lane(&mut self, row: usize, lane: usize) -> bool {
        match (self.rows.get_mut(row), LaneWord::lane(lane)) {
            (Some(word), Some(flag)) => {
                word.insert(flag);
                true
            }
            _ => false,
        }
    }

    pub fn row(&self, address: usize) -> Option<LaneWord> {
        self.rows.get(address).copied()
    }

    /// Overwrite a whole word, used when rebuilding from a listing.
    pub(crate) fn put_row(&mut self, address: usize, word: LaneWord) -> bool {
        match self.rows.get_mut(address) {
            Some(slot) => {
                *slot = word;
                true
            }
            None => false,
        }
    }

    pub fn rows(&self) -> &[LaneWord] {
        &self.rows
    }

    pub fn is_zero_row(&self, address: usize) -> bool {
        self.row(address).is_some_and(|word| word.is_empty())
    }

    /// Set bits in `range` of rows.
    pub fn bits_set_in(&self, range: std::ops::Range<usize>) -> u32 {
        self.rows[range]
            .iter()
            .map(|word| word.bits().count_ones())
            .sum()
    }

    pub fn non_zero_rows_in(&self, range: std::ops::Range<usize>) -> usize {
        self.rows[range].iter().filter(|w| !w.is_empty()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test_log::test]
    fn lane_zero_is_the_leftmost_character() {
        let word = LaneWord::lane(0).unwrap();
        assert_eq!(word, LaneWord::A_SEG0_EVEN);
        assert_eq!(word.to_string(), "100000000000");
        assert_eq!(
            LaneWord::lane(11).unwrap().to_string(),
            "000000000001"
        );
        assert!(LaneWord::lane(12).is_none());
    }

    #[test_log::test]
    fn empty_word_renders_as_twelve_zeros() {
        assert_eq!(LaneWord::empty().to_string(), "000000000000");
    }

    #[test_log::test]
    fn parse_accepts_rendered_words() {
        let word = LaneWord::B_SEG0_ODD | LaneWord::C_SEG1_EVEN;
        assert_eq!(word.to_string().parse::<LaneWord>(), Ok(word));
    }

    #[test_log::test]
    fn parse_places_each_digit_on_its_lane() {
        let second: LaneWord = "010000000000".parse().unwrap();
        let last: LaneWord = "000000000001".parse().unwrap();
        assert_eq!(second, LaneWord::A_SEG0_ODD);
        assert_eq!(last, LaneWord::C_SEG1_ODD);
        for n in 0..WORD_WIDTH {
            let mut digits = ["0"; WORD_WIDTH];
            digits[n] = "1";
            let parsed: Option<LaneWord> = digits.concat().parse().ok();
            assert_eq!(parsed, LaneWord::lane(n));
        }
    }

    #[test_log::test]
    fn parse_rejects_bad_input() {
        assert_eq!(
            "0101".parse::<LaneWord>(),
            Err(LaneWordParseError::Length {
                expected: 12,
                found: 4,
            })
        );
        assert_eq!(
            "00000000000x".parse::<LaneWord>(),
            Err(LaneWordParseError::Digit('x'))
        );
    }

    #[test_log::test]
    fn new_bitmap_is_all_zero() {
        let bitmap = FrameBitmap::new();
        assert_eq!(bitmap.rows().len(), 128);
        assert!((0..128).all(|row| bitmap.is_zero_row(row)));
    }

    #[test_log::test]
    fn set_lane_is_idempotent() {
        let mut bitmap = FrameBitmap::new();
        assert!(bitmap.set_lane(50, 1));
        let once = bitmap.clone();
        assert!(bitmap.set_lane(50, 1));
        assert_eq!(bitmap, once);
        assert_eq!(bitmap.row(50), LaneWord::lane(1));
        assert_eq!(bitmap.bits_set_in(0..128), 1);
    }

    #[test_log::test]
    fn set_lane_refuses_addresses_outside_the_rom() {
        let mut bitmap = FrameBitmap::new();
        assert!(!bitmap.set_lane(128, 0));
        assert!(!bitmap.set_lane(0, 12));
        assert_eq!(bitmap, FrameBitmap::new());
    }

    #[test_log::test]
    fn row_counts_are_split_by_range() {
        let mut bitmap = FrameBitmap::new();
        bitmap.set_lane(3, 0);
        bitmap.set_lane(3, 1);
        bitmap.set_lane(70, 5);
        assert_eq!(bitmap.non_zero_rows_in(0..64), 1);
        assert_eq!(bitmap.bits_set_in(0..64), 2);
        assert_eq!(bitmap.non_zero_rows_in(64..128), 1);
    }
}
