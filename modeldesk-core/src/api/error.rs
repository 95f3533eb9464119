//! Errors returned by backend calls.

use thiserror::Error;

/// Message shown for failures that carry no server-provided text.
pub const GENERIC_FAILURE_MESSAGE: &str = "Request failed, please try again later";

/// Errors that can occur while talking to the backend.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Connection, timeout or non-2xx transport failure.
    #[error("HTTP error: {0}")]
    Http(String),
    /// The backend answered with a non-success `code`.
    #[error("{msg}")]
    Rejected { code: i64, msg: String },
    /// The response body didn't match the expected shape.
    #[error("Invalid response: {0}")]
    Decode(String),
    /// Writing an exported file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ApiError {
    /// Text suitable for a user-facing message.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Rejected { msg, .. } if !msg.trim().is_empty() => msg.clone(),
            _ => GENERIC_FAILURE_MESSAGE.to_string(),
        }
    }

    /// Whether this is an unexpected failure rather than a server rejection.
    pub fn is_unexpected(&self) -> bool {
        !matches!(self, ApiError::Rejected { .. })
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            ApiError::Decode(e.to_string())
        } else {
            ApiError::Http(e.to_string())
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(e: serde_json::Error) -> Self {
        ApiError::Decode(e.to_string())
    }
}
