// Relay error taxonomy

use thiserror::Error;

/// Errors surfaced by the relay. `Decode`, `Parse` and `Transport` are
/// connection-local and never affect other connections; `Bind` and `Connect`
/// are fatal to the process that hit them.
#[derive(Debug, Error)]
pub enum RelayError {
    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to connect to {addr}: {source}")]
    Connect {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    /// Malformed JSON, a missing field, or a frame over the length cap.
    /// The message is discarded; the connection stays open.
    #[error("malformed message: {reason}")]
    Decode { reason: String },

    /// A field carried no leading numeric token (e.g. the "N/A" sentinel).
    /// The whole message is discarded; the connection stays open.
    #[error("field {field}: no numeric value in {value:?}")]
    Parse { field: &'static str, value: String },

    /// Read or write failure on an open socket; tears the connection down.
    #[error("transport: {0}")]
    Transport(#[from] std::io::Error),
}
