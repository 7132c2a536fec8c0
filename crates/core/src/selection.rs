//! Selection engine - single-row, contiguous column range selection.
//!
//! A selection is built one click at a time with a single toggle action:
//!
//! - clicking a removed cell does nothing;
//! - clicking on a different row starts over on that row;
//! - clicking inside the current range cancels it;
//! - clicking outside the range extends it to the new extreme.
//!
//! Only the two endpoints are stored. The range may straddle cells that are
//! already gone.

use crate::board::Board;

/// Inclusive column span `[lo, hi]` with `lo <= hi`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ColumnRange {
    lo: u8,
    hi: u8,
}

impl ColumnRange {
    /// Build a range from two columns in any order.
    pub fn new(a: u8, b: u8) -> Self {
        Self {
            lo: a.min(b),
            hi: a.max(b),
        }
    }

    pub fn lo(&self) -> u8 {
        self.lo
    }

    pub fn hi(&self) -> u8 {
        self.hi
    }

    pub fn contains(&self, col: u8) -> bool {
        col >= self.lo && col <= self.hi
    }

    /// Grow to include `col`. Same as inserting into the working set and
    /// keeping only min and max.
    fn extend(self, col: u8) -> Self {
        Self {
            lo: self.lo.min(col),
            hi: self.hi.max(col),
        }
    }
}

/// Result of a toggle, for callers that want to log or test it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleOutcome {
    /// Target cell was already removed; nothing changed.
    Ignored,
    /// A new range `[col, col]` was started.
    Started,
    /// The existing range grew.
    Extended,
    /// An interior click cleared the range.
    Cancelled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Selection {
    /// Row the selection applies to. `None` is the "no row" sentinel.
    row: Option<u8>,
    range: Option<ColumnRange>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn row(&self) -> Option<u8> {
        self.row
    }

    pub fn range(&self) -> Option<ColumnRange> {
        self.range
    }

    pub fn is_empty(&self) -> bool {
        self.range.is_none()
    }

    /// Whether (row, col) falls inside the active selection.
    pub fn contains(&self, row: u8, col: u8) -> bool {
        self.row == Some(row) && self.range.is_some_and(|r| r.contains(col))
    }

    /// Marked row and range together, if a range is active.
    pub fn marked(&self) -> Option<(u8, ColumnRange)> {
        match (self.row, self.range) {
            (Some(row), Some(range)) => Some((row, range)),
            _ => None,
        }
    }

    /// Drop the selection entirely and reset the row to the sentinel.
    pub fn clear(&mut self) {
        self.row = None;
        self.range = None;
    }

    /// Toggle the cell at (row, col).
    pub fn toggle(&mut self, board: &Board, row: u8, col: u8) -> ToggleOutcome {
        if !board.is_present(row, col) {
            return ToggleOutcome::Ignored;
        }

        if self.row != Some(row) {
            self.range = None;
        }
        self.row = Some(row);

        match self.range {
            Some(range) if range.contains(col) => {
                self.range = None;
                ToggleOutcome::Cancelled
            }
            Some(range) => {
                self.range = Some(range.extend(col));
                ToggleOutcome::Extended
            }
            None => {
                self.range = Some(ColumnRange::new(col, col));
                ToggleOutcome::Started
            }
        }
    }
}
