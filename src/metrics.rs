// Hardware metric source: the vcgencmd external command (client side)

use async_trait::async_trait;
use tokio::process::Command;

use crate::models::WireSample;

/// Sentinel sent when a metric cannot be read. The sample still goes out;
/// the server rejects it as unparseable.
pub const UNAVAILABLE: &str = "N/A";

const VCGENCMD: &str = "vcgencmd";

/// Gathers one wire sample per collection round.
#[async_trait]
pub trait MetricSource: Send + Sync {
    async fn sample(&self) -> WireSample;
}

/// Reads temperature, voltage and the three clocks through `vcgencmd`.
/// Every failure mode (spawn error, non-zero exit, unparseable output)
/// degrades to [`UNAVAILABLE`] for that field, never a crash.
#[derive(Debug, Default)]
pub struct Vcgencmd;

impl Vcgencmd {
    async fn exec(args: &[&str]) -> Option<String> {
        let output = Command::new(VCGENCMD).args(args).output().await.ok()?;
        if !output.status.success() {
            return None;
        }
        let text = String::from_utf8(output.stdout).ok()?;
        Some(text.trim().to_string())
    }

    async fn measure(args: &[&str], parse: fn(&str) -> Option<String>) -> String {
        Self::exec(args)
            .await
            .as_deref()
            .and_then(parse)
            .unwrap_or_else(|| UNAVAILABLE.to_string())
    }
}

#[async_trait]
impl MetricSource for Vcgencmd {
    async fn sample(&self) -> WireSample {
        WireSample {
            temp: Self::measure(&["measure_temp"], strip_label).await,
            volt: Self::measure(&["measure_volts"], strip_label).await,
            clock_speed: Self::measure(&["measure_clock", "arm"], clock_mhz).await,
            hdmi_clock_speed: Self::measure(&["measure_clock", "hdmi"], clock_mhz).await,
            gpu_mem_freq: Self::measure(&["measure_clock", "v3d"], clock_mhz).await,
        }
    }
}

/// `key=value<unit>` -> the numeric value text (`temp=53.2'C` -> `53.2`).
pub fn strip_label(output: &str) -> Option<String> {
    let value = output.split('=').nth(1)?;
    let end = value
        .find(|c: char| !(c.is_ascii_digit() || c == '.' || c == '-'))
        .unwrap_or(value.len());
    if end == 0 {
        return None;
    }
    Some(value[..end].to_string())
}

/// `frequency(48)=600000000` -> `600.0 MHz` (Hz to MHz, one decimal).
pub fn clock_mhz(output: &str) -> Option<String> {
    let hz: f64 = output.split('=').nth(1)?.trim().parse().ok()?;
    Some(format!("{:.1} MHz", hz / 1e6))
}
