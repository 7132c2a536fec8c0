//! TCP listener for remote play.
//!
//! Every connection gets its own session task: telnet negotiation, an input
//! reader, a ticker and the event loop. On shutdown the listener stops
//! accepting and waits for open sessions up to the grace period. Sessions
//! still open after that are told to close, which restores the client's
//! screen, and whatever ignores that is aborted.

use std::future::Future;
use std::io;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tokio::io::{AsyncRead, AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::{mpsc, oneshot, watch};
use tokio::task::JoinSet;
use tokio::time::{self, Instant};
use tracing::{debug, info, info_span, warn, Instrument};

use crate::config::ServerConfig;
use crate::engine::{event_queue, run_session, Session, Ticker};
use crate::error::ServerError;
use crate::input::decode::TELNET_HANDSHAKE;
use crate::input::{ByteDecoder, TermTypeReply};
use crate::term::{encode_enter_into, encode_exit_into};
use crate::types::{InputEvent, TICK_MS};

const READ_BUF_SIZE: usize = 1024;

/// How long a trailing ESC waits for the rest of an escape sequence.
pub const ESC_TIMEOUT: Duration = Duration::from_millis(50);

/// How long a new connection waits for the TERMINAL-TYPE reply.
pub const NEGOTIATION_WINDOW: Duration = Duration::from_millis(250);

/// Time sessions get to restore the client's screen once told to close.
pub const CLOSE_TIMEOUT: Duration = Duration::from_secs(2);

/// Pause after a failed accept, so errors like EMFILE do not spin the loop.
pub const ACCEPT_BACKOFF: Duration = Duration::from_millis(100);

/// Start the TCP server and run it until `shutdown` resolves.
///
/// The bound address is sent on `ready_tx` once the listener is up, which is
/// how callers learn the port when binding to port 0.
pub async fn run_server<F>(
    config: ServerConfig,
    shutdown: F,
    ready_tx: Option<oneshot::Sender<SocketAddr>>,
) -> Result<(), ServerError>
where
    F: Future<Output = ()>,
{
    let addr = config.socket_addr()?;
    let listener = TcpListener::bind(addr)
        .await
        .map_err(|source| ServerError::Bind { addr, source })?;
    let bound = listener.local_addr()?;
    info!(%bound, "listening");
    if let Some(tx) = ready_tx {
        let _ = tx.send(bound);
    }

    let config = Arc::new(config);
    let (close_tx, close_rx) = watch::channel(false);
    let mut sessions: JoinSet<()> = JoinSet::new();
    let mut next_id = 0u64;

    tokio::pin!(shutdown);
    loop {
        tokio::select! {
            _ = &mut shutdown => break,
            accepted = listener.accept() => {
                let (socket, peer) = match accepted {
                    Ok(pair) => pair,
                    Err(e) => {
                        accept_backoff(&e).await;
                        continue;
                    }
                };
                next_id += 1;
                let config = Arc::clone(&config);
                let closing = close_rx.clone();
                let span = info_span!("session", id = next_id, %peer);
                sessions.spawn(
                    async move {
                        info!("connected");
                        match handle_connection(socket, &config, closing).await {
                            Ok(()) => info!("disconnected"),
                            Err(e) => warn!(error = %e, "session ended with error"),
                        }
                    }
                    .instrument(span),
                );
            }
            Some(_) = sessions.join_next(), if !sessions.is_empty() => {}
        }
    }

    drop(listener);
    info!(open = sessions.len(), "shutting down");
    drain_sessions(&mut sessions, &close_tx, config.shutdown_grace).await;
    info!("shutdown complete");
    Ok(())
}

async fn accept_backoff(err: &io::Error) {
    warn!(error = %err, "accept failed");
    time::sleep(ACCEPT_BACKOFF).await;
}

/// Wait for sessions to finish on their own, then ask the rest to close and
/// abort whatever is still running after [`CLOSE_TIMEOUT`].
async fn drain_sessions(sessions: &mut JoinSet<()>, close_tx: &watch::Sender<bool>, grace: Duration) {
    if join_all_within(sessions, grace).await {
        return;
    }

    warn!(remaining = sessions.len(), "grace period elapsed, closing sessions");
    close_tx.send_replace(true);
    if join_all_within(sessions, CLOSE_TIMEOUT).await {
        return;
    }

    warn!(remaining = sessions.len(), "sessions did not close, aborting");
    sessions.abort_all();
    while sessions.join_next().await.is_some() {}
}

/// True if every session finished within `limit`.
async fn join_all_within(sessions: &mut JoinSet<()>, limit: Duration) -> bool {
    time::timeout(limit, async {
        while sessions.join_next().await.is_some() {}
    })
    .await
    .is_ok()
}

/// Run one remote session on `socket` until the player quits, hangs up or
/// `closing` flips to true.
pub async fn handle_connection(
    socket: TcpStream,
    config: &ServerConfig,
    mut closing: watch::Receiver<bool>,
) -> anyhow::Result<()> {
    socket.set_nodelay(true)?;
    let (mut reader, mut writer) = socket.into_split();
    writer.write_all(&TELNET_HANDSHAKE).await?;

    let mut decoder = ByteDecoder::new();
    let mut early: Vec<InputEvent> = Vec::with_capacity(16);
    negotiate(&mut reader, &mut decoder, &mut early).await?;
    let term = match decoder.term_type() {
        TermTypeReply::Reported(name) => name.clone(),
        TermTypeReply::Pending | TermTypeReply::Refused => config.term.clone(),
    };
    debug!(%term, "terminal type");

    let mut enter: Vec<u8> = Vec::with_capacity(32);
    encode_enter_into(&mut enter)?;
    writer.write_all(&enter).await?;

    let (tx, rx) = event_queue();
    let ticker = Ticker::spawn(&tx, Duration::from_millis(TICK_MS));
    let session = Session::new(term, config.default_width, config.default_height);

    // Any branch finishing ends the session. All of them run in this task, so
    // an abort from the listener tears down the reader and the ticker as well.
    let result = tokio::select! {
        r = run_session(session, rx, ticker, &mut writer) => r.map(|_| ()),
        r = pump_input(reader, decoder, early, tx) => r,
        _ = closing.changed() => {
            info!("closing for shutdown");
            Ok(())
        }
    };

    let mut tail: Vec<u8> = Vec::with_capacity(32);
    encode_exit_into(&mut tail)?;
    // The peer may already be gone.
    let _ = writer.write_all(&tail).await;
    let _ = writer.shutdown().await;
    result
}

/// Read until the client answers the TERMINAL-TYPE request, hangs up or
/// [`NEGOTIATION_WINDOW`] runs out. Keys typed meanwhile land in `events`.
async fn negotiate<R>(
    reader: &mut R,
    decoder: &mut ByteDecoder,
    events: &mut Vec<InputEvent>,
) -> anyhow::Result<()>
where
    R: AsyncRead + Unpin,
{
    let deadline = Instant::now() + NEGOTIATION_WINDOW;
    let mut buf = [0u8; READ_BUF_SIZE];

    while *decoder.term_type() == TermTypeReply::Pending {
        let n = match time::timeout_at(deadline, reader.read(&mut buf)).await {
            Ok(read) => read?,
            Err(_) => {
                debug!("no terminal type reported");
                break;
            }
        };
        if n == 0 {
            break;
        }
        decoder.feed(&buf[..n], events);
    }
    Ok(())
}

/// Decode raw bytes from the client and queue them as events, starting with
/// the ones already decoded in `events`.
///
/// A trailing ESC is held for [`ESC_TIMEOUT`]; if nothing follows it is sent
/// as the Esc key. Returns on EOF or once the event loop has gone away.
async fn pump_input<R>(
    mut reader: R,
    mut decoder: ByteDecoder,
    mut events: Vec<InputEvent>,
    tx: mpsc::Sender<InputEvent>,
) -> anyhow::Result<()>
where
    R: AsyncRead + Unpin,
{
    let mut buf = [0u8; READ_BUF_SIZE];

    loop {
        for event in events.drain(..) {
            if tx.send(event).await.is_err() {
                return Ok(());
            }
        }

        let n = if decoder.has_pending() {
            match time::timeout(ESC_TIMEOUT, reader.read(&mut buf)).await {
                Ok(read) => read?,
                Err(_) => {
                    decoder.flush_pending(&mut events);
                    continue;
                }
            }
        } else {
            reader.read(&mut buf).await?
        };
        if n == 0 {
            debug!("peer closed input");
            return Ok(());
        }
        decoder.feed(&buf[..n], &mut events);
    }
}
