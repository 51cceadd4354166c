//! Error types for dashboard rendering.

use thiserror::Error;

/// Result type alias for rendering.
pub type ViewResult<T> = Result<T, ViewError>;

#[derive(Debug, Error)]
pub enum ViewError {
    #[error("template render failed: {0}")]
    Render(#[from] askama::Error),
}
