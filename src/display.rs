// Terminal display sink: a single renderer task fed over a channel

use tokio::sync::mpsc;

use crate::models::MetricSample;

const LED_ON: &str = "●";
const LED_OFF: &str = "○";

/// Capacity of the display channel; the renderer drains far faster than
/// samples arrive.
pub const CHANNEL_CAPACITY: usize = 64;

/// Connection status row text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionStatus {
    Connected,
    Disconnected,
    ConnectionError,
}

impl ConnectionStatus {
    pub fn text(self) -> &'static str {
        match self {
            Self::Connected => "Connected",
            Self::Disconnected => "Disconnected",
            Self::ConnectionError => "Connection Error",
        }
    }
}

/// Everything the rendering surface can be told. Network tasks never write
/// to the display directly; they send these instead.
#[derive(Debug, Clone)]
pub enum DisplayEvent {
    /// A freshly decoded sample; replaces all five metric rows.
    Sample(MetricSample),
    /// A connection was accepted (true) or torn down (false).
    ConnectionActive(bool),
    /// The periodic liveness LED flipped.
    Liveness(bool),
    /// Client-side status row.
    Status(ConnectionStatus),
}

pub fn channel() -> (mpsc::Sender<DisplayEvent>, mpsc::Receiver<DisplayEvent>) {
    mpsc::channel(CHANNEL_CAPACITY)
}

pub fn led_glyph(on: bool) -> &'static str {
    if on { LED_ON } else { LED_OFF }
}

/// The five labeled metric rows, matching the display layout.
pub fn format_sample(sample: &MetricSample) -> [String; 5] {
    [
        format!("Temperature: {:.1}°C", sample.temperature),
        format!("Voltage: {:.1}V", sample.voltage),
        format!("Clock Speed: {:.1}MHz", sample.clock_speed),
        format!("HDMI Clock Speed: {:.1}MHz", sample.hdmi_clock_speed),
        format!("GPU Memory Frequency: {:.1}MHz", sample.gpu_mem_freq),
    ]
}

/// Spawns the renderer; the single owner of terminal output. Exits when all
/// senders are gone.
pub fn spawn(mut rx: mpsc::Receiver<DisplayEvent>) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(event) = rx.recv().await {
            match event {
                DisplayEvent::Sample(sample) => {
                    for row in format_sample(&sample) {
                        println!("{row}");
                    }
                }
                DisplayEvent::ConnectionActive(active) => {
                    println!("{}", led_glyph(active));
                }
                DisplayEvent::Liveness(on) => {
                    println!("{}", led_glyph(on));
                }
                DisplayEvent::Status(status) => {
                    println!("{}", status.text());
                }
            }
        }
        tracing::debug!("Display renderer shutting down");
    })
}
