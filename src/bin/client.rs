use anyhow::Result;
use pirelay::display::{ConnectionStatus, DisplayEvent};
use pirelay::*;
use tokio::io::AsyncWriteExt;
use tokio::time::Duration;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::time::FormatTime;

struct LocalTimer;

impl FormatTime for LocalTimer {
    fn format_time(&self, w: &mut tracing_subscriber::fmt::format::Writer<'_>) -> std::fmt::Result {
        write!(
            w,
            "{}",
            chrono::Local::now().format("%Y-%m-%dT%H:%M:%S%.3f%:z")
        )
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_timer(LocalTimer)
        .with_env_filter(filter)
        .init();

    let app_config = config::AppConfig::load()?;
    let client_config = app_config.client;

    let (display_tx, display_rx) = display::channel();
    let display_handle = display::spawn(display_rx);

    let mut stream = match client::connect(&client_config).await {
        Ok(s) => s,
        Err(e) => {
            tracing::error!(error = %e, "connect failed");
            let _ = display_tx
                .send(DisplayEvent::Status(ConnectionStatus::ConnectionError))
                .await;
            // Leave the message on screen briefly before exiting.
            tokio::time::sleep(Duration::from_secs(client_config.connect_error_delay_secs)).await;
            drop(display_tx);
            let _ = display_handle.await;
            return Err(e.into());
        }
    };
    let _ = display_tx
        .send(DisplayEvent::Status(ConnectionStatus::Connected))
        .await;
    tracing::info!(
        "{} v{} connected to {}:{}",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION"),
        client_config.host,
        client_config.port
    );

    let source = metrics::Vcgencmd;
    let result = client::run(
        &mut stream,
        &source,
        client_config.iterations,
        Duration::from_secs(client_config.send_interval_secs),
    )
    .await;
    if let Err(e) = &result {
        tracing::warn!(error = %e, "send loop ended early");
    }

    let _ = stream.shutdown().await;
    let _ = display_tx
        .send(DisplayEvent::Status(ConnectionStatus::Disconnected))
        .await;
    drop(display_tx);
    let _ = display_handle.await;

    Ok(())
}
