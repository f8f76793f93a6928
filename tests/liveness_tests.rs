// Liveness driver tests: toggles only while connections are active

use pirelay::display::DisplayEvent;
use pirelay::liveness;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::{mpsc, oneshot};
use tokio::time::Duration;

#[tokio::test(start_paused = true)]
async fn test_led_toggles_once_per_tick_while_active() {
    let active = Arc::new(AtomicUsize::new(1));
    let (tx, mut rx) = mpsc::channel(16);
    let (shutdown_tx, shutdown_rx) = oneshot::channel();
    let handle = liveness::spawn(active, tx, Duration::from_secs(1), shutdown_rx);

    for expected in [true, false, true] {
        match rx.recv().await {
            Some(DisplayEvent::Liveness(state)) => assert_eq!(state, expected),
            other => panic!("expected Liveness, got {other:?}"),
        }
    }

    let _ = shutdown_tx.send(());
    handle.await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn test_led_never_toggles_at_zero_connections() {
    let active = Arc::new(AtomicUsize::new(0));
    let (tx, mut rx) = mpsc::channel(16);
    let (shutdown_tx, shutdown_rx) = oneshot::channel();
    let handle = liveness::spawn(active, tx, Duration::from_secs(1), shutdown_rx);

    tokio::time::sleep(Duration::from_secs(10)).await;
    let _ = shutdown_tx.send(());
    handle.await.unwrap();
    assert!(rx.try_recv().is_err(), "no toggle expected while idle");
}

#[tokio::test(start_paused = true)]
async fn test_led_freezes_when_last_connection_closes() {
    let active = Arc::new(AtomicUsize::new(1));
    let (tx, mut rx) = mpsc::channel(16);
    let (shutdown_tx, shutdown_rx) = oneshot::channel();
    let handle = liveness::spawn(active.clone(), tx, Duration::from_secs(1), shutdown_rx);

    match rx.recv().await {
        Some(DisplayEvent::Liveness(true)) => {}
        other => panic!("expected Liveness(true), got {other:?}"),
    }

    // The LED keeps its last phase once the count drops to zero.
    active.store(0, Ordering::Relaxed);
    tokio::time::sleep(Duration::from_secs(10)).await;
    assert!(rx.try_recv().is_err(), "LED must hold its phase at zero");

    let _ = shutdown_tx.send(());
    handle.await.unwrap();
}
