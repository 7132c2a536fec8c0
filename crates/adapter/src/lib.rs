//! Remote play over TCP.
//!
//! The listener speaks just enough telnet for line-at-a-time clients to
//! switch to character mode:
//!
//! 1. **Connect**: the server sends `IAC WILL ECHO`, `IAC WILL SGA`,
//!    `IAC DO NAWS` and asks for the terminal type. It waits briefly for the
//!    answer, then switches the client to the alternate screen.
//! 2. **Play**: every key press is decoded and fed to the session. Window
//!    size reports (NAWS) become resize events.
//! 3. **Leave**: `q`, `esc` or `ctrl+c` restores the screen and closes the
//!    connection.
//!
//! # Environment Variables
//!
//! - `NIMM_HOST`: Bind address (default: "127.0.0.1")
//! - `NIMM_PORT`: Port number (default: 2222)
//! - `NIMM_SHUTDOWN_GRACE_SECS`: Grace period for open sessions (default: 30)
//! - `NIMM_DEFAULT_WIDTH` / `NIMM_DEFAULT_HEIGHT`: Size before NAWS arrives
//! - `NIMM_TERM`: Terminal type for clients that do not report one
//!   (default: "xterm-256color")
//!
//! # Testing
//!
//! ```bash
//! telnet 127.0.0.1 2222
//! ```

pub mod config;
pub mod error;
pub mod server;

pub use tui_nimm_engine as engine;
pub use tui_nimm_input as input;
pub use tui_nimm_term as term;
pub use tui_nimm_types as types;

pub use config::ServerConfig;
pub use error::ServerError;
pub use server::{handle_connection, run_server};
