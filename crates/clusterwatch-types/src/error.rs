//! Error types for report assembly.

use thiserror::Error;

/// Result type alias for report assembly.
pub type ReportResult<T> = Result<T, ReportError>;

/// Errors that can occur while assembling a verification report.
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("invalid timestamp {value:?}: {reason}")]
    InvalidTimestamp { value: String, reason: String },
}
