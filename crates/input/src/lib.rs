//! Terminal input module (engine-facing).
//!
//! This module is intentionally independent of any session or transport. It
//! maps `crossterm` key events (local play) and raw terminal bytes (remote
//! play) into [`crate::types::Key`]s, and keys into
//! [`crate::types::NimAction`]s via the key map.

pub mod decode;
pub mod map;

pub use tui_nimm_types as types;

pub use decode::{ByteDecoder, TermTypeReply};
pub use map::{action_for_key, key_from_event, Binding};
