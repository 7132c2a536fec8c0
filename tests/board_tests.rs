//! Board tests: pyramid shape and range removal

use tui_nimm::core::Board;
use tui_nimm::types::{BOARD_COLS, BOARD_ROWS, INITIAL_CELLS};

#[test]
fn test_board_new_is_centered_pyramid() {
    let board = Board::new();
    assert_eq!(board.rows(), BOARD_ROWS);
    assert_eq!(board.cols(), BOARD_COLS);
    assert_eq!(board.available_count(), INITIAL_CELLS);

    for row in 0..BOARD_ROWS {
        let center = 3i16;
        for col in 0..BOARD_COLS {
            let expected = (col as i16 - center).abs() <= row as i16;
            assert_eq!(
                board.is_present(row, col),
                expected,
                "Cell ({}, {}) presence",
                row,
                col
            );
        }
        assert_eq!(board.row_count(row), 2 * row as usize + 1);
    }
}

#[test]
fn test_board_out_of_bounds_is_absent() {
    let board = Board::new();
    assert!(!board.is_present(BOARD_ROWS, 3));
    assert!(!board.is_present(0, BOARD_COLS));
    assert_eq!(board.row_count(BOARD_ROWS), 0);
}

#[test]
fn test_clear_range_counts_only_present_cells() {
    let mut board = Board::new();

    // Row 1 covers columns 2..=4; 0..=6 spans absent cells on both sides.
    assert_eq!(board.clear_range(1, 0, 6), 3);
    assert!(board.is_row_exhausted(1));
    assert_eq!(board.available_count(), 13);

    // Clearing again removes nothing.
    assert_eq!(board.clear_range(1, 0, 6), 0);
    assert_eq!(board.available_count(), 13);
}

#[test]
fn test_available_outside_excludes_range() {
    let board = Board::new();
    assert_eq!(board.available_outside(3, 0, 6), 9);
    assert_eq!(board.available_outside(3, 2, 4), 13);
    assert_eq!(board.available_outside(0, 3, 3), 15);
}

#[test]
fn test_from_rows_round_trips_presence() {
    let mut rows = [[false; 7]; 4];
    rows[2][1] = true;
    rows[3][6] = true;
    let board = Board::from_rows(&rows);

    assert_eq!(board.available_count(), 2);
    assert!(board.is_present(2, 1));
    assert!(board.is_present(3, 6));
    assert!(!board.is_present(0, 3));
}
