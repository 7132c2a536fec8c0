//! Core game logic module - pure, deterministic, and testable
//!
//! This module contains all the game rules and state management.
//! It has **zero dependencies** on UI, networking, or I/O, making it:
//!
//! - **Deterministic**: The same inputs always produce the same board
//! - **Testable**: Unit tests cover every rule and edge case
//! - **Portable**: Runs the same behind a socket, a local terminal or a test
//!
//! # Module Structure
//!
//! - [`board`]: 4x7 pyramid of removable cells
//! - [`selection`]: single-row contiguous range selection
//! - [`game_state`]: cursor, turn alternation, move validation
//!
//! # Game Rules
//!
//! - Players alternate removing any number of adjacent cells from one row
//! - A move may never take the last cell on the board
//! - The player left facing the single last cell has lost
//!
//! # Example
//!
//! ```
//! use tui_nimm_core::{GameState, SubmitOutcome};
//! use tui_nimm_types::Player;
//!
//! let mut game = GameState::new();
//!
//! // Take the three leftmost cells of the bottom row.
//! game.set_cursor(3, 0);
//! game.toggle_at_cursor();
//! game.set_cursor(3, 2);
//! game.toggle_at_cursor();
//!
//! assert_eq!(game.submit(), SubmitOutcome::Applied { removed: 3 });
//! assert_eq!(game.player(), Player::Two);
//! assert_eq!(game.available_count(), 13);
//! ```

pub mod board;
pub mod game_state;
pub mod selection;

pub use tui_nimm_types as types;

pub use board::Board;
pub use game_state::{Cursor, GameState, SubmitOutcome};
pub use selection::{ColumnRange, Selection, ToggleOutcome};
