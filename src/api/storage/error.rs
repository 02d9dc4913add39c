//! Error types for backend and session operations.

use reqwest::StatusCode;
use thiserror::Error;

/// Failure of a backend call or of a local catalog/session operation.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ClientError {
    /// Missing, invalid or expired credentials. The stored token has been
    /// cleared by the time this is returned.
    #[error("Not authenticated: please log in")]
    Unauthorized,
    /// The backend refused the request; `detail` is its message, unchanged.
    #[error("{detail}")]
    Rejected { status: u16, detail: String },
    /// Network or transport failure; the request may be retried.
    #[error("Request failed: {0}")]
    Transport(String),
    /// The backend answered with a body that could not be decoded.
    #[error("Unexpected response: {0}")]
    Decode(String),
    /// Local input rejected before anything was sent.
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Entity not found: {entity_type} with id {entity_id}")]
    NotFound {
        entity_type: String,
        entity_id: String,
    },
    #[error("Another form is already being edited")]
    EditInProgress,
    #[error("No form is being edited")]
    NoActiveEdit,
    /// Reading or writing the local state file failed.
    #[error("Storage error: {0}")]
    Io(String),
}

impl ClientError {
    pub fn rejected(status: StatusCode, detail: impl Into<String>) -> Self {
        ClientError::Rejected {
            status: status.as_u16(),
            detail: detail.into(),
        }
    }

    pub fn is_retryable(&self) -> bool {
        matches!(self, ClientError::Transport(_))
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ClientError::Unauthorized)
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ClientError::Decode(err.to_string())
        } else {
            ClientError::Transport(err.to_string())
        }
    }
}

impl From<std::io::Error> for ClientError {
    fn from(err: std::io::Error) -> Self {
        ClientError::Io(err.to_string())
    }
}
