//! Nimm server (default binary).
//!
//! Serves the game to remote terminals over TCP, or with `--local` plays one
//! session in the invoking terminal.

use std::time::{Duration, Instant, SystemTime};

use anyhow::Result;
use clap::Parser;
use crossterm::event::{self, Event, KeyEventKind};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use tui_nimm::adapter::{run_server, ServerConfig};
use tui_nimm::engine::{Flow, Session};
use tui_nimm::input::key_from_event;
use tui_nimm::term::TerminalRenderer;
use tui_nimm::types::{InputEvent, TICK_MS};

/// Two-player Nim on a triangular board.
#[derive(Debug, Parser)]
#[command(name = "tui-nimm", version)]
struct Cli {
    /// Address to listen on.
    #[arg(long, env = "NIMM_HOST")]
    host: Option<String>,

    /// TCP port to listen on.
    #[arg(long, env = "NIMM_PORT")]
    port: Option<u16>,

    /// Seconds open sessions may keep running after SIGINT/SIGTERM.
    #[arg(long, env = "NIMM_SHUTDOWN_GRACE_SECS")]
    grace_secs: Option<u64>,

    /// Play in this terminal instead of serving remote players.
    #[arg(long)]
    local: bool,
}

impl Cli {
    fn into_config(self) -> ServerConfig {
        let mut config = ServerConfig::from_env();
        if let Some(host) = self.host {
            config.host = host;
        }
        if let Some(port) = self.port {
            config.port = port;
        }
        if let Some(secs) = self.grace_secs {
            config.shutdown_grace = Duration::from_secs(secs);
        }
        config
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let local = cli.local;

    // The alternate screen hides stderr, so local play stays quiet by default.
    let default_level = if local { "warn" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = cli.into_config();
    if local {
        return run_local(&config);
    }

    let rt = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;
    if let Err(e) = rt.block_on(run_server(config, shutdown_signal(), None)) {
        error!(error = %e, "server failed");
        std::process::exit(1);
    }
    Ok(())
}

/// Resolves on SIGINT, or SIGTERM on unix.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "cannot listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "cannot listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }
    info!("shutdown requested");
}

fn run_local(config: &ServerConfig) -> Result<()> {
    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = play_local(&mut term, config);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

fn play_local(term: &mut TerminalRenderer, config: &ServerConfig) -> Result<()> {
    let (w, h) = crossterm::terminal::size()
        .unwrap_or((config.default_width, config.default_height));
    let term_name = std::env::var("TERM").unwrap_or_else(|_| config.term.clone());
    let mut session = Session::new(term_name, w, h);

    let tick = Duration::from_millis(TICK_MS);
    let mut last_tick = Instant::now();

    loop {
        term.draw(&session.render())?;

        // Input with timeout until next tick.
        let timeout = tick.saturating_sub(last_tick.elapsed());
        let input = if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    key_from_event(key).map(InputEvent::Key)
                }
                Event::Resize(width, height) => Some(InputEvent::Resize { width, height }),
                _ => None,
            }
        } else {
            None
        };

        if let Some(ev) = input {
            if session.handle_event(ev) == Flow::Quit {
                return Ok(());
            }
        }

        if last_tick.elapsed() >= tick {
            last_tick = Instant::now();
            session.handle_event(InputEvent::Tick(SystemTime::now()));
        }
    }
}
