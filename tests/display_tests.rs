// Display formatting tests

use pirelay::display::{ConnectionStatus, format_sample, led_glyph};
use pirelay::models::MetricSample;

#[test]
fn test_format_sample_rows() {
    let sample = MetricSample {
        temperature: 42.4,
        voltage: 1.3,
        clock_speed: 600.0,
        hdmi_clock_speed: 594.0,
        gpu_mem_freq: 499.8,
    };
    let rows = format_sample(&sample);
    assert_eq!(rows[0], "Temperature: 42.4°C");
    assert_eq!(rows[1], "Voltage: 1.3V");
    assert_eq!(rows[2], "Clock Speed: 600.0MHz");
    assert_eq!(rows[3], "HDMI Clock Speed: 594.0MHz");
    assert_eq!(rows[4], "GPU Memory Frequency: 499.8MHz");
}

#[test]
fn test_led_glyphs() {
    assert_eq!(led_glyph(true), "●");
    assert_eq!(led_glyph(false), "○");
}

#[test]
fn test_status_text() {
    assert_eq!(ConnectionStatus::Connected.text(), "Connected");
    assert_eq!(ConnectionStatus::Disconnected.text(), "Disconnected");
    assert_eq!(ConnectionStatus::ConnectionError.text(), "Connection Error");
}
