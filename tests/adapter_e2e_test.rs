use std::net::SocketAddr;
use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

use tui_nimm::adapter::{run_server, ServerConfig, ServerError};
use tui_nimm::input::decode::TELNET_HANDSHAKE;

fn test_config(grace: Duration) -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        shutdown_grace: grace,
        default_width: 80,
        default_height: 30,
        term: "xterm-256color".to_string(),
    }
}

async fn start(
    grace: Duration,
) -> (
    SocketAddr,
    oneshot::Sender<()>,
    JoinHandle<Result<(), ServerError>>,
) {
    let (ready_tx, ready_rx) = oneshot::channel();
    let (stop_tx, stop_rx) = oneshot::channel::<()>();

    let server = tokio::spawn(run_server(
        test_config(grace),
        async move {
            let _ = stop_rx.await;
        },
        Some(ready_tx),
    ));

    let addr = tokio::time::timeout(Duration::from_secs(2), ready_rx)
        .await
        .expect("server did not signal ready")
        .expect("ready channel dropped");
    (addr, stop_tx, server)
}

/// Drop CSI sequences so assertions can look at the visible text.
fn strip_ansi(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars();
    while let Some(c) = chars.next() {
        if c != '\x1b' {
            out.push(c);
            continue;
        }
        if chars.next() == Some('[') {
            for f in chars.by_ref() {
                if ('@'..='~').contains(&f) {
                    break;
                }
            }
        }
    }
    out
}

fn visible(acc: &[u8]) -> String {
    strip_ansi(&String::from_utf8_lossy(acc))
}

/// Read until `needle` shows up in the visible output.
async fn read_until(stream: &mut TcpStream, acc: &mut Vec<u8>, needle: &str) {
    let mut buf = [0u8; 4096];
    tokio::time::timeout(Duration::from_secs(2), async {
        while !visible(acc).contains(needle) {
            let n = stream.read(&mut buf).await.expect("read failed");
            assert!(n > 0, "connection closed before {needle:?}");
            acc.extend_from_slice(&buf[..n]);
        }
    })
    .await
    .unwrap_or_else(|_| panic!("timed out waiting for {needle:?}"));
}

/// Read until the server closes the connection.
async fn read_to_close(stream: &mut TcpStream) -> Vec<u8> {
    let mut rest = Vec::new();
    tokio::time::timeout(Duration::from_secs(2), stream.read_to_end(&mut rest))
        .await
        .expect("connection was not closed")
        .expect("read failed");
    rest
}

#[tokio::test]
async fn session_draws_board_and_closes_on_quit() {
    let (addr, stop_tx, server) = start(Duration::from_secs(5)).await;

    let mut stream = TcpStream::connect(addr).await.expect("connect failed");
    let mut acc = Vec::new();
    read_until(&mut stream, &mut acc, "Player 1's turn").await;

    assert!(acc.starts_with(&TELNET_HANDSHAKE));
    assert!(visible(&acc).contains("== Nimm =="));

    // Take the top cell: right three, select, submit.
    stream.write_all(b"lll \r").await.unwrap();
    read_until(&mut stream, &mut acc, "Player 2's turn").await;

    stream.write_all(b"q").await.unwrap();
    let rest = read_to_close(&mut stream).await;
    // Alternate screen is left before the socket closes.
    assert!(String::from_utf8_lossy(&rest).contains("\x1b[?1049l"));

    stop_tx.send(()).unwrap();
    let res = tokio::time::timeout(Duration::from_secs(2), server)
        .await
        .expect("server did not stop");
    assert!(res.unwrap().is_ok());
}

#[tokio::test]
async fn naws_resize_recenters_the_title() {
    let (addr, stop_tx, _server) = start(Duration::from_secs(5)).await;

    let mut stream = TcpStream::connect(addr).await.unwrap();
    let mut acc = Vec::new();
    read_until(&mut stream, &mut acc, "== Nimm ==").await;

    // IAC SB NAWS 0 40 0 30 IAC SE
    stream
        .write_all(&[255, 250, 31, 0, 40, 0, 30, 255, 240])
        .await
        .unwrap();
    // margin 2 + (40 - 11) / 2
    let centered = format!("\r\n{}== Nimm ==", " ".repeat(16));
    acc.clear();
    read_until(&mut stream, &mut acc, &centered).await;

    stream.write_all(b"q").await.unwrap();
    read_to_close(&mut stream).await;
    let _ = stop_tx.send(());
}

#[tokio::test]
async fn sessions_are_independent() {
    let (addr, stop_tx, _server) = start(Duration::from_secs(5)).await;

    let mut a = TcpStream::connect(addr).await.unwrap();
    let mut b = TcpStream::connect(addr).await.unwrap();
    let mut acc_a = Vec::new();
    let mut acc_b = Vec::new();
    read_until(&mut a, &mut acc_a, "Player 1's turn").await;
    read_until(&mut b, &mut acc_b, "Player 1's turn").await;

    a.write_all(b"lll \r").await.unwrap();
    read_until(&mut a, &mut acc_a, "Player 2's turn").await;

    // B gets a fresh frame on help toggle, still on player 1.
    acc_b.clear();
    b.write_all(b"?").await.unwrap();
    read_until(&mut b, &mut acc_b, "SPACE select").await;
    let text = visible(&acc_b);
    assert!(text.contains("Player 1's turn"));
    assert!(!text.contains("Player 2's turn"));

    a.write_all(b"q").await.unwrap();
    b.write_all(b"q").await.unwrap();
    read_to_close(&mut a).await;
    read_to_close(&mut b).await;
    let _ = stop_tx.send(());
}

#[tokio::test]
async fn shutdown_closes_idle_sessions_after_grace() {
    let (addr, stop_tx, server) = start(Duration::from_millis(200)).await;

    let mut stream = TcpStream::connect(addr).await.unwrap();
    let mut acc = Vec::new();
    read_until(&mut stream, &mut acc, "Player 1's turn").await;

    stop_tx.send(()).unwrap();
    let res = tokio::time::timeout(Duration::from_secs(4), server)
        .await
        .expect("shutdown exceeded grace period");
    assert!(res.unwrap().is_ok());

    // The session restores the screen before dropping its socket.
    let rest = read_to_close(&mut stream).await;
    let rest = String::from_utf8_lossy(&rest);
    assert!(rest.contains("\x1b[?1049l"), "{rest:?}");
    assert!(rest.contains("\x1b[?25h"), "{rest:?}");

    // And the listener is gone.
    assert!(TcpStream::connect(addr).await.is_err());
}

#[tokio::test]
async fn arrow_split_across_packets_moves_instead_of_quitting() {
    let (addr, stop_tx, _server) = start(Duration::from_secs(5)).await;

    let mut stream = TcpStream::connect(addr).await.unwrap();
    stream.set_nodelay(true).unwrap();
    let mut acc = Vec::new();
    read_until(&mut stream, &mut acc, "Player 1's turn").await;

    // Right three times, the last arrow split after its ESC.
    stream.write_all(b"\x1b[C\x1b[C\x1b").await.unwrap();
    stream.flush().await.unwrap();
    tokio::time::sleep(Duration::from_millis(10)).await;
    stream.write_all(b"[C \r").await.unwrap();
    read_until(&mut stream, &mut acc, "Player 2's turn").await;

    stream.write_all(b"q").await.unwrap();
    read_to_close(&mut stream).await;
    let _ = stop_tx.send(());
}
