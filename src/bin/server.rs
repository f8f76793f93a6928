use anyhow::Result;
use pirelay::*;
use std::sync::Arc;
use std::sync::atomic::AtomicUsize;
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

    let (display_tx, display_rx) = display::channel();
    let display_handle = display::spawn(display_rx);

    let active_connections = Arc::new(AtomicUsize::new(0));
    let (accept_shutdown_tx, accept_shutdown_rx) = tokio::sync::oneshot::channel();
    let (liveness_shutdown_tx, liveness_shutdown_rx) = tokio::sync::oneshot::channel();

    let listener = server::bind(&app_config.server)?;
    tracing::info!(
        "{} v{} listening on {}:{}",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION"),
        app_config.server.host,
        app_config.server.port
    );

    let liveness_handle = liveness::spawn(
        active_connections.clone(),
        display_tx.clone(),
        std::time::Duration::from_secs(app_config.liveness.toggle_interval_secs),
        liveness_shutdown_rx,
    );
    let server_handle = server::spawn(
        listener,
        server::ServerDeps {
            display_tx: display_tx.clone(),
            active_connections,
            shutdown_rx: accept_shutdown_rx,
        },
        app_config.transport.clone(),
    );

    shutdown_signal().await;
    tracing::info!("Received shutdown signal");
    let _ = accept_shutdown_tx.send(());
    let _ = liveness_shutdown_tx.send(());
    let _ = server_handle.await;
    let _ = liveness_handle.await;
    drop(display_tx);
    let _ = display_handle.await;

    Ok(())
}

async fn shutdown_signal() {
    #[cfg(unix)]
    {
        let mut sigterm = match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
        {
            Ok(s) => s,
            Err(_) => {
                let _ = tokio::signal::ctrl_c().await;
                return;
            }
        };
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {}
            _ = sigterm.recv() => {}
        }
    }
    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
}
