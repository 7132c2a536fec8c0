//! Board module - the triangular pile of removable cells
//!
//! The board is a 4x7 grid where each cell is either present or removed.
//! Only the pyramid cells start out present: row `y` covers columns
//! `3 - y ..= 3 + y`. Uses a flat array for cache locality and zero allocation.
//! Coordinates: (row, col) where row ranges 0..3 (top to bottom), col ranges 0..6.

use crate::types::{BOARD_COLS, BOARD_ROWS};

/// Total number of grid slots on the board
const BOARD_SIZE: usize = (BOARD_ROWS as usize) * (BOARD_COLS as usize);

/// The game board - 4 rows x 7 columns using flat array storage
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    /// Flat array of presence flags, row-major order (row * COLS + col)
    cells: [bool; BOARD_SIZE],
}

impl Board {
    /// Create a fresh board with the full pyramid present
    pub fn new() -> Self {
        let mut cells = [false; BOARD_SIZE];
        let mid = (BOARD_COLS / 2) as usize;
        for row in 0..BOARD_ROWS as usize {
            for col in (mid - row)..=(mid + row) {
                cells[row * BOARD_COLS as usize + col] = true;
            }
        }
        Self { cells }
    }

    /// Calculate flat index from (row, col) coordinates
    #[inline(always)]
    fn index(row: u8, col: u8) -> Option<usize> {
        if row >= BOARD_ROWS || col >= BOARD_COLS {
            return None;
        }
        Some((row as usize) * (BOARD_COLS as usize) + (col as usize))
    }

    pub fn rows(&self) -> u8 {
        BOARD_ROWS
    }

    pub fn cols(&self) -> u8 {
        BOARD_COLS
    }

    /// Whether the cell at (row, col) is still on the board.
    /// Out-of-bounds coordinates are never present.
    pub fn is_present(&self, row: u8, col: u8) -> bool {
        Self::index(row, col).is_some_and(|idx| self.cells[idx])
    }

    /// Number of present cells across all rows
    pub fn available_count(&self) -> usize {
        self.cells.iter().filter(|&&c| c).count()
    }

    /// Number of present cells in a single row
    pub fn row_count(&self, row: u8) -> usize {
        if row >= BOARD_ROWS {
            return 0;
        }
        let start = row as usize * BOARD_COLS as usize;
        self.cells[start..start + BOARD_COLS as usize]
            .iter()
            .filter(|&&c| c)
            .count()
    }

    /// A row is exhausted once every one of its cells has been removed
    pub fn is_row_exhausted(&self, row: u8) -> bool {
        self.row_count(row) == 0
    }

    /// Count present cells that are NOT inside `[lo, hi]` of `row`.
    ///
    /// This is what would be left on the board if that span were cleared.
    pub fn available_outside(&self, row: u8, lo: u8, hi: u8) -> usize {
        let mut n = 0;
        for r in 0..BOARD_ROWS {
            for c in 0..BOARD_COLS {
                if !self.is_present(r, c) {
                    continue;
                }
                if r == row && c >= lo && c <= hi {
                    continue;
                }
                n += 1;
            }
        }
        n
    }

    /// Remove every cell in `[lo, hi]` of `row`.
    ///
    /// Cells that are already gone stay gone; columns past the edge are
    /// ignored. Returns the number of cells actually removed.
    pub fn clear_range(&mut self, row: u8, lo: u8, hi: u8) -> usize {
        if row >= BOARD_ROWS || lo > hi {
            return 0;
        }
        let hi = hi.min(BOARD_COLS - 1);
        let mut removed = 0;
        for col in lo..=hi {
            if let Some(idx) = Self::index(row, col) {
                if self.cells[idx] {
                    self.cells[idx] = false;
                    removed += 1;
                }
            }
        }
        removed
    }

    /// Build a board from explicit rows (for tests and benches).
    ///
    /// Removal is monotonic during play, so this is the only way to get a
    /// cell "back". Slots outside the given rows are absent.
    pub fn from_rows(rows: &[[bool; BOARD_COLS as usize]]) -> Self {
        let mut cells = [false; BOARD_SIZE];
        for (r, row) in rows.iter().take(BOARD_ROWS as usize).enumerate() {
            for (c, &present) in row.iter().enumerate() {
                cells[r * BOARD_COLS as usize + c] = present;
            }
        }
        Self { cells }
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_board_index_calculation() {
        assert_eq!(Board::index(0, 0), Some(0));
        assert_eq!(Board::index(0, 6), Some(6));
        assert_eq!(Board::index(1, 0), Some(7));
        assert_eq!(Board::index(3, 6), Some(27));
        assert_eq!(Board::index(4, 0), None);
        assert_eq!(Board::index(0, 7), None);
    }

    #[test]
    fn fresh_board_is_a_centered_pyramid() {
        let board = Board::new();
        assert_eq!(board.available_count(), 16);

        assert!(board.is_present(0, 3));
        assert!(!board.is_present(0, 2));
        assert!(!board.is_present(0, 4));

        for c in 2..=4 {
            assert!(board.is_present(1, c));
        }
        assert!(!board.is_present(1, 1));
        assert!(!board.is_present(2, 0));
        assert!(!board.is_present(2, 6));
        for c in 0..7 {
            assert!(board.is_present(3, c));
        }

        assert_eq!(board.row_count(0), 1);
        assert_eq!(board.row_count(1), 3);
        assert_eq!(board.row_count(2), 5);
        assert_eq!(board.row_count(3), 7);
    }

    #[test]
    fn clear_range_is_idempotent() {
        let mut board = Board::new();
        assert_eq!(board.clear_range(3, 1, 3), 3);
        assert_eq!(board.clear_range(3, 0, 4), 2);
        assert_eq!(board.clear_range(3, 0, 4), 0);
        assert_eq!(board.row_count(3), 2);
        assert_eq!(board.available_count(), 11);
    }

    #[test]
    fn clear_range_touches_only_the_addressed_row() {
        let mut board = Board::new();
        board.clear_range(2, 0, 6);
        assert!(board.is_row_exhausted(2));
        assert_eq!(board.row_count(1), 3);
        assert_eq!(board.row_count(3), 7);
    }

    #[test]
    fn clear_range_clamps_out_of_bounds() {
        let mut board = Board::new();
        assert_eq!(board.clear_range(3, 5, 200), 2);
        assert_eq!(board.clear_range(9, 0, 6), 0);
        assert_eq!(board.clear_range(3, 4, 2), 0);
    }

    #[test]
    fn out_of_bounds_is_never_present() {
        let board = Board::new();
        assert!(!board.is_present(4, 3));
        assert!(!board.is_present(0, 7));
    }

    #[test]
    fn available_outside_skips_the_span() {
        let board = Board::new();
        assert_eq!(board.available_outside(3, 0, 2), 13);
        assert_eq!(board.available_outside(0, 3, 3), 15);
        // Span over absent slots removes nothing from the count.
        assert_eq!(board.available_outside(0, 0, 2), 16);
    }

    #[test]
    fn from_rows_roundtrip() {
        let mut rows = [[false; 7]; 4];
        rows[3][6] = true;
        rows[1][2] = true;
        let board = Board::from_rows(&rows);
        assert_eq!(board.available_count(), 2);
        assert!(board.is_present(3, 6));
        assert!(board.is_present(1, 2));
    }
}
