//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the application.
//! All types are pure data structures with no external dependencies, making them
//! usable in any context (core logic, rendering, transport).
//!
//! # Board Dimensions
//!
//! The board is a pyramid of 4 rows inside a 7 column grid:
//!
//! ```text
//! row 0:          X
//! row 1:       X  X  X
//! row 2:    X  X  X  X  X
//! row 3: X  X  X  X  X  X  X
//! ```
//!
//! Row `i` holds `2*i + 1` cells, centered on column 3.
//!
//! # Timing
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TICK_MS` | 1000 | Clock tick interval per session |
//! | `SHUTDOWN_GRACE_SECS` | 30 | Time sessions get to close on shutdown |
//!
//! # Examples
//!
//! ```
//! use tui_nimm_types::{Direction, Key, NimAction, BOARD_COLS, BOARD_ROWS};
//!
//! assert_eq!(BOARD_ROWS, 4);
//! assert_eq!(BOARD_COLS, 7);
//!
//! let action = NimAction::Move(Direction::Up);
//! assert_eq!(action.as_str(), "moveUp");
//! assert_eq!(Key::Char('k'), Key::Char('k'));
//! ```

use std::time::SystemTime;

/// Number of rows on the board (4)
pub const BOARD_ROWS: u8 = 4;

/// Number of columns shared by all rows (7)
pub const BOARD_COLS: u8 = 7;

/// Total number of cells present on a fresh board (1 + 3 + 5 + 7)
pub const INITIAL_CELLS: usize = 16;

/// Session clock tick interval in milliseconds
pub const TICK_MS: u64 = 1000;

/// Grace period for in-flight sessions on shutdown
pub const SHUTDOWN_GRACE_SECS: u64 = 30;

/// Terminal size used until a client reports its own.
pub const DEFAULT_TERM_WIDTH: u16 = 80;
pub const DEFAULT_TERM_HEIGHT: u16 = 24;

/// Cursor movement direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Row/column delta for this direction.
    pub fn delta(&self) -> (i8, i8) {
        match self {
            Direction::Up => (-1, 0),
            Direction::Down => (1, 0),
            Direction::Left => (0, -1),
            Direction::Right => (0, 1),
        }
    }
}

/// A decoded key press.
///
/// This is transport-agnostic: both the crossterm mapping (local play) and the
/// raw byte decoder (remote play) produce it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    Enter,
    Esc,
    /// Ctrl+C
    Interrupt,
    Char(char),
}

/// Player-facing actions a key can trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NimAction {
    /// Move the cursor one cell
    Move(Direction),
    /// Toggle the cell under the cursor into/out of the selection
    Select,
    /// Commit the current selection as a move
    Submit,
    /// Show or hide the expanded help
    ToggleHelp,
    /// End the session
    Quit,
}

impl NimAction {
    /// Convert to camelCase string (used in logs)
    pub fn as_str(&self) -> &'static str {
        match self {
            NimAction::Move(Direction::Up) => "moveUp",
            NimAction::Move(Direction::Down) => "moveDown",
            NimAction::Move(Direction::Left) => "moveLeft",
            NimAction::Move(Direction::Right) => "moveRight",
            NimAction::Select => "select",
            NimAction::Submit => "submit",
            NimAction::ToggleHelp => "toggleHelp",
            NimAction::Quit => "quit",
        }
    }
}

/// An event delivered to a session's event loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    Key(Key),
    Resize { width: u16, height: u16 },
    Tick(SystemTime),
}

/// The player whose turn it is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Player {
    One,
    Two,
}

impl Player {
    /// The other player.
    pub fn next(&self) -> Self {
        match self {
            Player::One => Player::Two,
            Player::Two => Player::One,
        }
    }

    /// 1 or 2, as shown to the players.
    pub fn number(&self) -> u8 {
        match self {
            Player::One => 1,
            Player::Two => 2,
        }
    }
}
