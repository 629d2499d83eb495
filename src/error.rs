//! Error types for the console pipeline.

use thiserror::Error;

/// Errors produced while talking to the backend or validating operator input.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConsoleError {
    /// The operator entered something that is not a dotted-quad IPv4 address.
    #[error("invalid IP address: {0}")]
    InvalidIp(String),

    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    Http(String),

    /// Could not reach the backend.
    #[error("connection failed: {0}")]
    Connection(String),

    /// Backend answered with a non-2xx status.
    #[error("backend returned status {0}")]
    Status(u16),

    /// Failed to parse response body.
    #[error("failed to parse response: {0}")]
    Parse(String),

    /// The backend answered but did not accept the submitted event.
    #[error("event not accepted by backend (status: {0})")]
    Rejected(String),
}

impl From<reqwest::Error> for ConsoleError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_connect() {
            ConsoleError::Connection(err.to_string())
        } else if err.is_decode() {
            ConsoleError::Parse(err.to_string())
        } else if let Some(status) = err.status() {
            ConsoleError::Status(status.as_u16())
        } else {
            ConsoleError::Http(err.to_string())
        }
    }
}

impl From<serde_json::Error> for ConsoleError {
    fn from(err: serde_json::Error) -> Self {
        ConsoleError::Parse(err.to_string())
    }
}
