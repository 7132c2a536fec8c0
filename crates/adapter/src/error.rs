use std::io;
use std::net::SocketAddr;

use thiserror::Error;

/// Failures that stop the listener. Per-session errors never surface here.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("invalid listen address {0:?}")]
    InvalidAddress(String),

    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: io::Error,
    },

    #[error(transparent)]
    Io(#[from] io::Error),
}
