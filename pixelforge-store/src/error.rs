//! Error types for the stores

use pixelforge_client::ClientError;
use thiserror::Error;

/// Result type alias for store operations
pub type Result<T> = std::result::Result<T, StoreError>;

/// Errors surfaced by store operations that do not swallow failures
#[derive(Debug, Error)]
pub enum StoreError {
    /// Backend command failed
    #[error(transparent)]
    Client(#[from] ClientError),

    /// API key rejected before reaching the backend
    #[error("API key must start with 'AI'")]
    InvalidApiKey,

    /// Form has nothing to submit
    #[error("Nothing to submit: {0}")]
    EmptyForm(&'static str),

    /// Too many images staged on one form
    #[error("Too many files: at most {max} images per job")]
    TooManyFiles { max: usize },

    /// Poll interval must be positive
    #[error("Poll interval must be greater than 0")]
    InvalidPollInterval,

    /// Settings file could not be read or written
    #[error("Settings I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// Settings file is not valid JSON
    #[error("Settings file is malformed: {0}")]
    Json(#[from] serde_json::Error),
}
