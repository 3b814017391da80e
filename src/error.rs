//! Error types for monoview.

use std::io;

/// Errors produced by the fetch-and-layout pipeline.
///
/// Every variant is terminal: the transport never retries, never falls back
/// to another scheme or port, and never renders a partially failed fetch.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("unsupported scheme: {0}")]
    UnsupportedScheme(String),

    #[error("invalid port: {0}")]
    InvalidPort(String),

    #[error("connection failed: {0}")]
    Connection(#[source] io::Error),

    #[error("TLS error: {0}")]
    Tls(String),

    #[error("HTTP status {status}: {reason}")]
    HttpStatus { status: String, reason: String },

    #[error("malformed response: {0}")]
    MalformedResponse(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Convenience alias.
pub type Result<T> = std::result::Result<T, Error>;
