//! Terminal rendering for the Nim screen.
//!
//! The game view lays the screen out as a [`Frame`] of styled lines; the
//! renderer encodes a frame as ANSI bytes through crossterm. Nothing here
//! holds game state, so a frame is a pure function of the state, the view
//! options and the viewport.

pub mod frame;
pub mod game_view;
pub mod help;
pub mod renderer;
pub mod text;

pub use tui_nimm_core as core;
pub use tui_nimm_input as input;
pub use tui_nimm_types as types;

pub use frame::{Color, Frame, Line, Rgb, Span, Style};
pub use game_view::{status_text, GameView, ViewState, Viewport};
pub use renderer::{encode_enter_into, encode_exit_into, encode_full_into, TerminalRenderer};
