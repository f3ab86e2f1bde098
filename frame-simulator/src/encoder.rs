/// Run-length listing of a frame bitmap for the MIF content block
use crate::bitmap::{FrameBitmap, LaneWord};
use constants::memory::{DEPTH, FRAME_BOUNDARY_ADDRESS};
use std::fmt;
use thiserror::Error;

/// One line of the content block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListingEntry {
    /// One address with its literal word
    Single { address: usize, word: LaneWord },
    /// Inclusive address range, every word zero
    ZeroRun { start: usize, end: usize },
}

impl ListingEntry {
    pub fn start(&self) -> usize {
        match *self {
            ListingEntry::Single { address, .. } => address,
            ListingEntry::ZeroRun { start, .. } => start,
        }
    }

    /// Last covered address (inclusive).
    pub fn end(&self) -> usize {
        match *self {
            ListingEntry::Single { address, .. } => address,
            ListingEntry::ZeroRun { end, .. } => end,
        }
    }
}

impl fmt::Display for ListingEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ListingEntry::Single { address, word } => write!(f, "{} : {};", address, word),
            ListingEntry::ZeroRun { start, end } => {
                write!(f, "[{}..{}] : {};", start, end, LaneWord::empty())
            }
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ListingError {
    #[error("addresses {expected}..{found} are not covered")]
    Gap { expected: usize, found: usize },
    #[error("address {found} is covered twice (next free address was {expected})")]
    Overlap { expected: usize, found: usize },
    #[error("range [{start}..{end}] is empty")]
    EmptyRange { start: usize, end: usize },
    #[error("address {0} is past the end of the ROM")]
    OutOfRange(usize),
    #[error("listing stops at address {0}")]
    Incomplete(usize),
}

/// Ordered entries covering every ROM address exactly once.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Listing {
    entries: Vec<ListingEntry>,
}

impl Listing {
    /// Wrap entries produced elsewhere. Coverage is checked by `expand`.
    pub fn from_entries(entries: Vec<ListingEntry>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[ListingEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn zero_runs(&self) -> usize {
        self.entries
            .iter()
            .filter(|e| matches!(e, ListingEntry::ZeroRun { .. }))
            .count()
    }

    /// Rebuild the bitmap the listing describes, checking that addresses
    /// `0..DEPTH` are each covered once and in order.
    pub fn expand(&self) -> Result<FrameBitmap, ListingError> {
        let mut bitmap = FrameBitmap::new();
        let mut next = 0;

        for entry in &self.entries {
            let (start, end) = (entry.start(), entry.end());
            if start > next {
                return Err(ListingError::Gap {
                    expected: next,
                    found: start,
                });
            }
            if start < next {
                return Err(ListingError::Overlap {
                    expected: next,
                    found: start,
                });
            }
            if end < start {
                return Err(ListingError::EmptyRange { start, end });
            }
            if end >= DEPTH {
                return Err(ListingError::OutOfRange(end));
            }

            // Zero runs need no write: the bitmap starts cleared.
            if let ListingEntry::Single { address, word } = *entry {
                bitmap.put_row(address, word);
            }
            next = end + 1;
        }

        if next != DEPTH {
            return Err(ListingError::Incomplete(next));
        }
        Ok(bitmap)
    }
}

/// Walk the bitmap once, collapsing runs of zero words. The frame boundary address
/// always gets its own entry so frame 1 starts on a line of its own.
pub fn encode(bitmap: &FrameBitmap) -> Listing {
    let mut entries = Vec::new();
    let mut address = 0;

    while address < DEPTH {
        if !bitmap.is_zero_row(address) || address == FRAME_BOUNDARY_ADDRESS {
            entries.push(ListingEntry::Single {
                address,
                word: bitmap.row(address).unwrap_or_default(),
            });
            address += 1;
            continue;
        }

        let start = address;
        while address < DEPTH && bitmap.is_zero_row(address) && address != FRAME_BOUNDARY_ADDRESS {
            address += 1;
        }

        if address - start == 1 {
            entries.push(ListingEntry::Single {
                address: start,
                word: LaneWord::empty(),
            });
        } else {
            entries.push(ListingEntry::ZeroRun {
                start,
                end: address - 1,
            });
        }
    }

    Listing { entries }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rendered(listing: &Listing) -> Vec<String> {
        listing.entries().iter().map(ToString::to_string).collect()
    }

    fn assert_partitions_rom(listing: &Listing) {
        let mut next = 0;
        for entry in listing.entries() {
            assert_eq!(entry.start(), next);
            assert!(entry.end() >= entry.start());
            next = entry.end() + 1;
        }
        assert_eq!(next, DEPTH);
    }

    #[test_log::test]
    fn all_zero_bitmap_splits_at_the_frame_boundary() {
        let listing = encode(&FrameBitmap::new());
        assert_eq!(
            rendered(&listing),
            vec![
                "[0..63] : 000000000000;",
                "64 : 000000000000;",
                "[65..127] : 000000000000;",
            ]
        );
        assert_eq!(listing.zero_runs(), 2);
    }

    #[test_log::test]
    fn non_zero_rows_are_listed_literally() {
        let mut bitmap = FrameBitmap::new();
        bitmap.set_lane(0, 0);
        bitmap.set_lane(2, 11);
        bitmap.set_lane(127, 5);

        assert_eq!(
            rendered(&encode(&bitmap)),
            vec![
                "0 : 100000000000;",
                "1 : 000000000000;",
                "2 : 000000000001;",
                "[3..63] : 000000000000;",
                "64 : 000000000000;",
                "[65..126] : 000000000000;",
                "127 : 000001000000;",
            ]
        );
    }

    #[test_log::test]
    fn set_frame_boundary_row_is_still_single() {
        let mut bitmap = FrameBitmap::new();
        bitmap.set_lane(64, 3);
        bitmap.set_lane(66, 3);

        let listing = encode(&bitmap);
        assert_eq!(
            rendered(&listing)[1..4],
            [
                "64 : 000100000000;",
                "65 : 000000000000;",
                "66 : 000100000000;",
            ]
        );
        assert_partitions_rom(&listing);
    }

    #[test_log::test]
    fn run_ending_at_the_boundary_stops_before_it() {
        let mut bitmap = FrameBitmap::new();
        bitmap.set_lane(62, 0);

        assert_eq!(
            rendered(&encode(&bitmap))[..4],
            [
                "[0..61] : 000000000000;",
                "62 : 100000000000;",
                "63 : 000000000000;",
                "64 : 000000000000;",
            ]
        );
    }

    #[test_log::test]
    fn listing_expands_back_to_the_bitmap() {
        let mut bitmap = FrameBitmap::new();
        for (row, lane) in [(0, 1), (10, 4), (11, 4), (63, 9), (64, 0), (127, 11)] {
            bitmap.set_lane(row, lane);
        }

        let listing = encode(&bitmap);
        assert_partitions_rom(&listing);
        assert_eq!(listing.expand(), Ok(bitmap));
    }

    #[test_log::test]
    fn every_listing_keeps_the_boundary_entry() {
        for row in [0, 63, 64, 65, 127] {
            let mut bitmap = FrameBitmap::new();
            bitmap.set_lane(row, 0);
            let listing = encode(&bitmap);
            let boundary = listing.entries().iter().find(|e| e.start() == 64);
            assert!(matches!(boundary, Some(ListingEntry::Single { .. })));
            assert_partitions_rom(&listing);
        }
    }

    #[test_log::test]
    fn expand_detects_broken_coverage() {
        let gap = Listing::from_entries(vec![ListingEntry::ZeroRun { start: 1, end: 127 }]);
        assert_eq!(
            gap.expand(),
            Err(ListingError::Gap {
                expected: 0,
                found: 1,
            })
        );

        let overlap = Listing::from_entries(vec![
            ListingEntry::ZeroRun { start: 0, end: 10 },
            ListingEntry::ZeroRun {
                start: 10,
                end: 127,
            },
        ]);
        assert_eq!(
            overlap.expand(),
            Err(ListingError::Overlap {
                expected: 11,
                found: 10,
            })
        );

        let short = Listing::from_entries(vec![ListingEntry::ZeroRun { start: 0, end: 100 }]);
        assert_eq!(short.expand(), Err(ListingError::Incomplete(101)));

        let long = Listing::from_entries(vec![ListingEntry::ZeroRun { start: 0, end: 128 }]);
        assert_eq!(long.expand(), Err(ListingError::OutOfRange(128)));

        let backwards = Listing::from_entries(vec![
            ListingEntry::ZeroRun { start: 0, end: 4 },
            ListingEntry::ZeroRun { start: 5, end: 3 },
        ]);
        assert_eq!(
            backwards.expand(),
            Err(ListingError::EmptyRange { start: 5, end: 3 })
        );
    }
}
