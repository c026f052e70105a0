//! Error types for stompwire-client.

use thiserror::Error;

/// Main error type for all stompwire operations.
#[derive(Debug, Error)]
pub enum StompError {
    /// I/O error while writing to or flushing the transport.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Header list has an odd number of elements (keys and values must pair up).
    #[error("header list has odd length: {0}")]
    HeaderListOdd(usize),

    /// Protocol version token is not one of the supported versions.
    #[error("unsupported protocol version: {0}")]
    UnsupportedProtocol(String),

    /// The writer task is gone; no further frames can be sent.
    #[error("connection closed")]
    ConnectionClosed,
}

/// Result type alias using StompError.
pub type Result<T> = std::result::Result<T, StompError>;
