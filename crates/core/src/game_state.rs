//! Game state module - cursor, selection, turns and the end condition
//!
//! This module ties together the board and the selection engine. It owns the
//! rules for moving the cursor, committing a selection as a move and deciding
//! whose turn it is.
//!
//! There is no stored game-over flag. The game is lost for the player to move
//! once exactly one cell remains; from then on every submit is rejected
//! because it would empty the board, which freezes the game in place.

use crate::board::Board;
use crate::selection::{Selection, ToggleOutcome};
use crate::types::{Direction, Player, BOARD_COLS, BOARD_ROWS};

/// Cursor position on the grid. Always within bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Cursor {
    pub row: u8,
    pub col: u8,
}

/// Result of committing the current selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Nothing was selected.
    NoSelection,
    /// The move would have removed the last cell on the board.
    Rejected,
    /// Cells were removed and the turn passed.
    Applied { removed: usize },
}

/// Complete game state for one session
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GameState {
    board: Board,
    cursor: Cursor,
    selection: Selection,
    player: Player,
}

impl GameState {
    /// Create a fresh game with player 1 to move
    pub fn new() -> Self {
        Self::with_board(Board::new())
    }

    /// Start from an arbitrary board (used by tests and benches)
    pub fn with_board(board: Board) -> Self {
        Self {
            board,
            cursor: Cursor::default(),
            selection: Selection::new(),
            player: Player::One,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn player(&self) -> Player {
        self.player
    }

    pub fn available_count(&self) -> usize {
        self.board.available_count()
    }

    /// The player to move has lost: one cell remains and nobody may take it.
    pub fn is_lost(&self) -> bool {
        self.board.available_count() == 1
    }

    /// Move the cursor one cell, clamped to the grid. Selection is untouched.
    pub fn move_cursor(&mut self, dir: Direction) {
        let (dr, dc) = dir.delta();
        self.cursor.row = step_clamped(self.cursor.row, dr, BOARD_ROWS);
        self.cursor.col = step_clamped(self.cursor.col, dc, BOARD_COLS);
    }

    /// Put the cursor at an explicit position, clamped to the grid.
    pub fn set_cursor(&mut self, row: u8, col: u8) {
        self.cursor.row = row.min(BOARD_ROWS - 1);
        self.cursor.col = col.min(BOARD_COLS - 1);
    }

    /// Toggle the cell under the cursor into/out of the selection.
    pub fn toggle_at_cursor(&mut self) -> ToggleOutcome {
        let Cursor { row, col } = self.cursor;
        self.selection.toggle(&self.board, row, col)
    }

    /// Commit the selection as a move.
    ///
    /// A move that would leave zero cells on the board is illegal and is
    /// rejected without touching anything.
    pub fn submit(&mut self) -> SubmitOutcome {
        let Some((row, range)) = self.selection.marked() else {
            return SubmitOutcome::NoSelection;
        };

        if self.board.available_outside(row, range.lo(), range.hi()) == 0 {
            return SubmitOutcome::Rejected;
        }

        let removed = self.board.clear_range(row, range.lo(), range.hi());
        self.cursor = Cursor::default();
        self.selection.clear();
        self.player = self.player.next();
        SubmitOutcome::Applied { removed }
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

fn step_clamped(v: u8, delta: i8, len: u8) -> u8 {
    let next = v as i16 + delta as i16;
    next.clamp(0, len as i16 - 1) as u8
}
