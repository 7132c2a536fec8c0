//! The per-session event loop.
//!
//! Events are processed strictly in arrival order. Each one is applied to the
//! session synchronously and followed by a full redraw to the sink.

use anyhow::Result;
use tokio::io::{AsyncWrite, AsyncWriteExt};
use tokio::sync::mpsc;

use crate::session::{Flow, Session};
use crate::term::encode_full_into;
use crate::ticker::Ticker;
use crate::types::InputEvent;

/// Queue depth between the input reader, the ticker and the loop.
pub const EVENT_QUEUE_CAPACITY: usize = 64;

/// Create a session's event queue.
pub fn event_queue() -> (mpsc::Sender<InputEvent>, mpsc::Receiver<InputEvent>) {
    mpsc::channel(EVENT_QUEUE_CAPACITY)
}

/// Drive `session` until a quit key arrives or every sender is gone.
///
/// The initial frame is drawn before the first event. The loop owns the
/// ticker, so any exit (including the task being aborted) stops it.
pub async fn run_session<W>(
    mut session: Session,
    mut rx: mpsc::Receiver<InputEvent>,
    ticker: Ticker,
    sink: &mut W,
) -> Result<Session>
where
    W: AsyncWrite + Unpin,
{
    let _ticker = ticker;
    let mut buf: Vec<u8> = Vec::with_capacity(16 * 1024);

    draw(&session, &mut buf, sink).await?;

    while let Some(event) = rx.recv().await {
        if session.handle_event(event) == Flow::Quit {
            break;
        }
        draw(&session, &mut buf, sink).await?;
    }
    Ok(session)
}

async fn draw<W>(session: &Session, buf: &mut Vec<u8>, sink: &mut W) -> Result<()>
where
    W: AsyncWrite + Unpin,
{
    buf.clear();
    encode_full_into(&session.render(), buf)?;
    sink.write_all(buf).await?;
    sink.flush().await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use crate::types::Key;

    #[tokio::test]
    async fn draws_initial_frame_and_one_per_event() {
        let (tx, rx) = event_queue();
        let ticker = Ticker::spawn(&tx, Duration::from_secs(3600));
        let session = Session::new("xterm", 80, 30);

        tx.send(InputEvent::Key(Key::Char('j'))).await.unwrap();
        tx.send(InputEvent::Key(Key::Char('q'))).await.unwrap();

        let mut out: Vec<u8> = Vec::new();
        let session = run_session(session, rx, ticker, &mut out).await.unwrap();

        let text = String::from_utf8(out).unwrap();
        // Initial frame plus the frame after `j`; quit does not redraw.
        assert_eq!(text.matches("\x1b[2J").count(), 2);
        assert!(text.contains("Player 1's turn"));
        assert_eq!(session.game().cursor().row, 1);
    }

    #[tokio::test]
    async fn ends_when_senders_are_dropped() {
        let (tx, rx) = event_queue();
        let ticker = Ticker::spawn(&tx, Duration::from_secs(3600));
        drop(tx);

        let mut out: Vec<u8> = Vec::new();
        let res = tokio::time::timeout(
            Duration::from_secs(2),
            run_session(Session::new("xterm", 80, 24), rx, ticker, &mut out),
        )
        .await;
        assert!(res.is_ok());
        assert_eq!(String::from_utf8(out).unwrap().matches("\x1b[2J").count(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn ticks_redraw_without_changing_the_game() {
        let (tx, rx) = event_queue();
        let ticker = Ticker::spawn(&tx, Duration::from_secs(1));
        let session = Session::new("xterm", 80, 24);

        let quitter = tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(2500)).await;
            tx.send(InputEvent::Key(Key::Esc)).await.unwrap();
        });

        let mut out: Vec<u8> = Vec::new();
        let session = run_session(session, rx, ticker, &mut out).await.unwrap();
        quitter.await.unwrap();

        // Initial frame plus two ticks.
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.matches("\x1b[2J").count(), 3);
        assert_eq!(session.game().available_count(), 16);
    }
}
