// Connection manager: accept loop, per-connection decode, shared counter

use std::net::SocketAddr;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::net::{TcpListener, TcpSocket, TcpStream};
use tokio::sync::{mpsc, oneshot};

use crate::config::{ServerConfig, TransportConfig};
use crate::display::DisplayEvent;
use crate::error::RelayError;
use crate::models::decode_sample;

/// Pending-connection backlog. One is enough: concurrent clients are handed
/// off to their own tasks immediately after accept.
const ACCEPT_BACKLOG: u32 = 1;

/// Decrements the active-connection count on drop (accept = +1, drop = -1).
struct ConnGuard(Arc<AtomicUsize>);

impl Drop for ConnGuard {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::Relaxed);
    }
}

/// Channels and shared state for the accept loop.
pub struct ServerDeps {
    pub display_tx: mpsc::Sender<DisplayEvent>,
    pub active_connections: Arc<AtomicUsize>,
    pub shutdown_rx: oneshot::Receiver<()>,
}

/// Binds the relay listener with `SO_REUSEADDR` set. Failure is fatal to
/// server startup.
pub fn bind(config: &ServerConfig) -> Result<TcpListener, RelayError> {
    let addr = format!("{}:{}", config.host, config.port);
    let bind_err = |source: std::io::Error| RelayError::Bind {
        addr: addr.clone(),
        source,
    };
    let parsed: SocketAddr = addr.parse().map_err(|e: std::net::AddrParseError| {
        bind_err(std::io::Error::new(std::io::ErrorKind::InvalidInput, e))
    })?;
    let socket = if parsed.is_ipv4() {
        TcpSocket::new_v4()
    } else {
        TcpSocket::new_v6()
    }
    .map_err(bind_err)?;
    socket.set_reuseaddr(true).map_err(bind_err)?;
    socket.bind(parsed).map_err(bind_err)?;
    socket.listen(ACCEPT_BACKLOG).map_err(bind_err)
}

/// Spawns the accept loop: one handler task per accepted connection, running
/// until the shutdown signal fires.
pub fn spawn(
    listener: TcpListener,
    deps: ServerDeps,
    transport: TransportConfig,
) -> tokio::task::JoinHandle<()> {
    let ServerDeps {
        display_tx,
        active_connections,
        mut shutdown_rx,
    } = deps;
    tokio::spawn(async move {
        loop {
            tokio::select! {
                result = listener.accept() => {
                    match result {
                        Ok((stream, peer)) => {
                            active_connections.fetch_add(1, Ordering::Relaxed);
                            let guard = ConnGuard(active_connections.clone());
                            if display_tx.send(DisplayEvent::ConnectionActive(true)).await.is_err() {
                                break;
                            }
                            tracing::info!(%peer, "Connection accepted");
                            let display_tx = display_tx.clone();
                            let max_frame_bytes = transport.max_frame_bytes;
                            tokio::spawn(async move {
                                let _guard = guard;
                                handle_connection(stream, peer, display_tx, max_frame_bytes).await;
                            });
                        }
                        Err(e) => {
                            tracing::warn!(error = %e, "accept failed");
                        }
                    }
                }
                _ = &mut shutdown_rx => {
                    tracing::debug!("Accept loop shutting down");
                    break;
                }
            }
        }
    })
}

/// Reads newline-framed messages until EOF or a transport error. Decode and
/// parse failures discard that message only; the connection stays open.
async fn handle_connection(
    stream: TcpStream,
    peer: SocketAddr,
    display_tx: mpsc::Sender<DisplayEvent>,
    max_frame_bytes: usize,
) {
    let mut lines = BufReader::new(stream).lines();
    loop {
        match lines.next_line().await {
            Ok(Some(line)) => {
                if line.is_empty() {
                    continue;
                }
                if line.len() > max_frame_bytes {
                    let err = RelayError::Decode {
                        reason: format!(
                            "frame of {} bytes exceeds cap of {max_frame_bytes}",
                            line.len()
                        ),
                    };
                    tracing::warn!(%peer, error = %err, "message discarded");
                    continue;
                }
                match decode_sample(&line) {
                    Ok(sample) => {
                        // Single renderer task: last writer wins across connections.
                        if display_tx.send(DisplayEvent::Sample(sample)).await.is_err() {
                            break;
                        }
                    }
                    Err(e) => {
                        tracing::warn!(%peer, error = %e, "message discarded");
                    }
                }
            }
            Ok(None) => {
                tracing::debug!(%peer, "peer closed");
                break;
            }
            Err(e) => {
                tracing::warn!(%peer, error = %RelayError::Transport(e), "connection torn down");
                break;
            }
        }
    }
    let _ = display_tx.send(DisplayEvent::ConnectionActive(false)).await;
    tracing::info!(%peer, "Disconnected");
}
