// Wire and display models for one metric sample

use serde::{Deserialize, Serialize};

use crate::error::RelayError;

/// Wire-format sample: five mandatory string fields, each carrying a leading
/// numeric token (`"53.2"`, `"600.0 MHz"`, `"1.25V"`). Field names are the
/// wire keys; a missing key fails the whole message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WireSample {
    pub temp: String,
    pub volt: String,
    pub clock_speed: String,
    pub hdmi_clock_speed: String,
    pub gpu_mem_freq: String,
}

/// One decoded reading of the five hardware metrics, each rounded to one
/// decimal digit. Built all-or-nothing: no instance exists unless every
/// field parsed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MetricSample {
    pub temperature: f64,
    pub voltage: f64,
    pub clock_speed: f64,
    pub hdmi_clock_speed: f64,
    pub gpu_mem_freq: f64,
}

impl TryFrom<&WireSample> for MetricSample {
    type Error = RelayError;

    fn try_from(wire: &WireSample) -> Result<Self, RelayError> {
        Ok(Self {
            temperature: field("temp", &wire.temp)?,
            voltage: field("volt", &wire.volt)?,
            clock_speed: field("clock_speed", &wire.clock_speed)?,
            hdmi_clock_speed: field("hdmi_clock_speed", &wire.hdmi_clock_speed)?,
            gpu_mem_freq: field("gpu_mem_freq", &wire.gpu_mem_freq)?,
        })
    }
}

/// Decode one newline-framed message into a complete sample.
pub fn decode_sample(line: &str) -> Result<MetricSample, RelayError> {
    let wire: WireSample = serde_json::from_str(line).map_err(|e| RelayError::Decode {
        reason: e.to_string(),
    })?;
    MetricSample::try_from(&wire)
}

fn field(name: &'static str, value: &str) -> Result<f64, RelayError> {
    leading_number(value)
        .map(round1)
        .ok_or_else(|| RelayError::Parse {
            field: name,
            value: value.to_string(),
        })
}

/// Numeric prefix of the first whitespace-delimited token, so both
/// `"594.0 MHz"` and `"1.25V"` yield their number.
pub fn leading_number(text: &str) -> Option<f64> {
    let token = text.split_whitespace().next()?;
    let end = token
        .find(|c: char| !(c.is_ascii_digit() || c == '.' || c == '-' || c == '+'))
        .unwrap_or(token.len());
    token[..end].parse().ok()
}

/// Round to one decimal digit, half away from zero (1.25 -> 1.3).
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
