//! Error types for venue lookups.

use thiserror::Error;

/// Errors that can occur talking to the quote venue or rate API.
#[derive(Debug, Error)]
pub enum VenueError {
    #[error("request failed: {0}")]
    ConnectionFailed(String),

    #[error("venue returned HTTP {0}")]
    Status(u16),

    #[error("failed to parse response: {0}")]
    Parse(String),

    #[error("request timed out")]
    Timeout,
}

impl From<reqwest::Error> for VenueError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            VenueError::Timeout
        } else {
            VenueError::ConnectionFailed(err.to_string())
        }
    }
}

impl From<serde_json::Error> for VenueError {
    fn from(err: serde_json::Error) -> Self {
        VenueError::Parse(err.to_string())
    }
}

impl VenueError {
    /// Returns true if this error is transient and likely to succeed on a
    /// later cycle.
    pub fn is_transient(&self) -> bool {
        match self {
            VenueError::ConnectionFailed(_) | VenueError::Timeout => true,
            VenueError::Status(code) => *code == 429 || *code >= 500,
            VenueError::Parse(_) => false,
        }
    }
}
