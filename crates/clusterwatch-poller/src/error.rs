//! Error types for verification fetches.

use thiserror::Error;

/// Result type alias for fetches.
pub type FetchResult<T> = Result<T, FetchError>;

/// Every way a verification fetch can fail.
///
/// The poller treats all variants alike; they only differ in the log line.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("invalid verification url {url:?}: {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("connection failed: {0}")]
    Connect(String),

    #[error("http handshake failed: {0}")]
    Handshake(String),

    #[error("request failed: {0}")]
    Request(String),

    #[error("unexpected status {0}")]
    Status(http::StatusCode),

    #[error("failed to read body: {0}")]
    Body(String),

    #[error("failed to decode report: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("request timed out after {0:?}")]
    Timeout(std::time::Duration),
}
