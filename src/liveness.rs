// Liveness LED driver

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use tokio::sync::{mpsc, oneshot};
use tokio::time::{Duration, MissedTickBehavior, interval};

use crate::display::DisplayEvent;

/// Spawns the periodic LED task: while `active_connections > 0` the LED
/// flips once per tick; at zero it keeps whatever phase it last settled in.
/// A visual "data is flowing" heartbeat, not a per-connection health check.
pub fn spawn(
    active_connections: Arc<AtomicUsize>,
    display_tx: mpsc::Sender<DisplayEvent>,
    toggle_interval: Duration,
    mut shutdown_rx: oneshot::Receiver<()>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let mut tick = interval(toggle_interval);
        tick.set_missed_tick_behavior(MissedTickBehavior::Skip);
        let mut led_on = false;
        loop {
            tokio::select! {
                _ = tick.tick() => {
                    if active_connections.load(Ordering::Relaxed) > 0 {
                        led_on = !led_on;
                        if display_tx.send(DisplayEvent::Liveness(led_on)).await.is_err() {
                            break;
                        }
                    }
                }
                _ = &mut shutdown_rx => {
                    tracing::debug!("Liveness driver shutting down");
                    break;
                }
            }
        }
    })
}
