//! TUI Nimm (workspace facade crate).
//!
//! Re-exports the member crates as `tui_nimm::{core,adapter,term,input,engine,types}` so the
//! binary, integration tests and benches share one import path.

pub use tui_nimm_adapter as adapter;
pub use tui_nimm_core as core;
pub use tui_nimm_engine as engine;
pub use tui_nimm_input as input;
pub use tui_nimm_term as term;
pub use tui_nimm_types as types;
