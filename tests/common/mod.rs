// Shared test helpers

#![allow(dead_code)]

use pirelay::config::{ClientConfig, ServerConfig, TransportConfig};
use pirelay::display::DisplayEvent;
use pirelay::models::WireSample;
use tokio::sync::mpsc;
use tokio::time::{Duration, timeout};

/// Port 0: the OS picks a free port; tests read it back from the listener.
pub fn loopback_server_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".into(),
        port: 0,
    }
}

pub fn test_transport() -> TransportConfig {
    TransportConfig {
        max_frame_bytes: 1024,
    }
}

pub fn test_client_config(port: u16) -> ClientConfig {
    ClientConfig {
        host: "127.0.0.1".into(),
        port,
        send_interval_secs: 2,
        iterations: 5,
        connect_error_delay_secs: 3,
    }
}

pub fn well_formed_wire_sample() -> WireSample {
    WireSample {
        temp: "53.2".into(),
        volt: "1.2500".into(),
        clock_speed: "600.0 MHz".into(),
        hdmi_clock_speed: "594.0 MHz".into(),
        gpu_mem_freq: "499.8 MHz".into(),
    }
}

pub async fn recv_event(rx: &mut mpsc::Receiver<DisplayEvent>) -> DisplayEvent {
    timeout(Duration::from_secs(3), rx.recv())
        .await
        .expect("timed out waiting for display event")
        .expect("display channel closed")
}
