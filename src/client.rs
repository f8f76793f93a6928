// Collector loop: bounded periodic push over one connection

use tokio::io::AsyncWriteExt;
use tokio::net::TcpStream;
use tokio::time::{Duration, sleep};

use crate::config::ClientConfig;
use crate::error::RelayError;
use crate::metrics::MetricSource;

/// Opens the outbound relay connection.
pub async fn connect(config: &ClientConfig) -> Result<TcpStream, RelayError> {
    let addr = format!("{}:{}", config.host, config.port);
    TcpStream::connect(&addr)
        .await
        .map_err(|source| RelayError::Connect { addr, source })
}

/// Pushes `iterations` samples at `interval` cadence, one JSON line per
/// write. Returns on the first transport failure; the caller owns teardown
/// and the final Disconnected status. No reconnect: once the bounded run
/// ends, the client is done.
pub async fn run<S: MetricSource>(
    stream: &mut TcpStream,
    source: &S,
    iterations: u32,
    interval: Duration,
) -> Result<(), RelayError> {
    for round in 0..iterations {
        let wire = source.sample().await;
        let mut frame = serde_json::to_vec(&wire).map_err(|e| RelayError::Decode {
            reason: e.to_string(),
        })?;
        frame.push(b'\n');
        if let Err(e) = stream.write_all(&frame).await {
            tracing::warn!(round, error = %e, "send failed");
            return Err(RelayError::Transport(e));
        }
        tracing::debug!(round, "sample sent");
        sleep(interval).await;
    }
    Ok(())
}
