//! # Error Types
//!
//! This module defines error types used throughout the recibo bridge.

use thiserror::Error;

/// Main error type for bridge operations
#[derive(Debug, Error)]
pub enum BridgeError {
    /// An element's JSON shape does not match its tag, or the tag is unknown
    #[error("malformed element: {0}")]
    MalformedElement(String),

    /// Bitmap width is not byte-aligned, or a dimension is zero
    #[error("invalid bitmap dimensions {width}x{height}: {reason}")]
    InvalidBitmapDimensions {
        width: u32,
        height: u32,
        reason: &'static str,
    },

    /// Packed pixel data does not match the declared dimensions
    #[error("bitmap data length mismatch: expected {expected} bytes, got {actual}")]
    BitmapDataLength { expected: usize, actual: usize },

    /// Degenerate QR payload (empty string)
    #[error("invalid QR payload: {0}")]
    InvalidPayload(String),

    /// Device-level I/O failure surfaced by the sink
    #[error("device I/O error: {0}")]
    DeviceIo(String),

    /// Transport-level errors (bind, listen, queue shutdown)
    #[error("transport error: {0}")]
    Transport(String),

    /// Payload could not be parsed as JSON at all
    #[error("invalid JSON payload: {0}")]
    Json(#[from] serde_json::Error),

    /// Invalid configuration value
    #[error("configuration error: {0}")]
    Config(String),

    /// I/O error wrapper
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
