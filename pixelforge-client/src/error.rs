//! Errors raised while invoking backend commands

use thiserror::Error;

/// Result type alias for client operations
pub type Result<T> = std::result::Result<T, ClientError>;

/// Failure of one backend command
#[derive(Debug, Error)]
pub enum ClientError {
    /// Transport failure; the backend was not reached
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    /// Backend rejected the command
    #[error("API error (status {status}): {message}")]
    ApiError {
        /// HTTP status code
        status: u16,
        /// Error message from the backend
        message: String,
    },

    /// Response body did not match the expected payload
    #[error("Failed to parse response: {0}")]
    ParseError(String),

    /// Job id unknown to the backend
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// Rejected before sending, e.g. an empty prompt list
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl ClientError {
    pub fn api_error(status: u16, message: impl Into<String>) -> Self {
        Self::ApiError {
            status,
            message: message.into(),
        }
    }

    /// Whether the backend does not know the requested job
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }

    /// HTTP status the backend answered with, if it answered at all
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::ApiError { status, .. } => Some(*status),
            Self::NotFound(_) => Some(404),
            _ => None,
        }
    }
}
