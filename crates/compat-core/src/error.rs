//! Unified error model for dataset loading
use thiserror::Error;

/// Result type for compat data operations
pub type Result<T> = std::result::Result<T, CompatError>;

#[derive(Error, Debug)]
pub enum CompatError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid feature path: {0:?}")]
    InvalidPath(String),
}
