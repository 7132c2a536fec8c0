//! Session runtime.
//!
//! A [`Session`] is the whole per-connection state: the game, the help panel,
//! the terminal size and a clock. [`run_session`] feeds it events from a
//! single queue and writes a full frame after each one. A [`Ticker`] puts a
//! clock tick on that queue every second for as long as the loop runs.
//!
//! Nothing here knows about sockets; the sink is any `AsyncWrite`.

pub mod event_loop;
pub mod session;
pub mod ticker;

pub use tui_nimm_core as core;
pub use tui_nimm_input as input;
pub use tui_nimm_term as term;
pub use tui_nimm_types as types;

pub use event_loop::{event_queue, run_session, EVENT_QUEUE_CAPACITY};
pub use session::{Flow, Session};
pub use ticker::Ticker;
