// src/error.rs

use std::fmt;

/// Global client error enum.
/// Centralizes failure reporting across the attempt, progress and API layers.
#[derive(Debug)]
pub enum ClientError {
    // Checked before any network call (attempt limit reached, quiz unpublished)
    Precondition(String),

    // Operation called in a state that does not permit it
    InvalidState(String),

    // Malformed input or request rejected by the server as invalid
    BadRequest(String),

    // Missing or rejected credentials
    AuthError(String),

    // Unknown quiz, question, attempt or lesson
    NotFound(String),

    // Network failure or server-side error
    Remote(String),
}

impl fmt::Display for ClientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClientError::Precondition(msg) => write!(f, "precondition failed: {}", msg),
            ClientError::InvalidState(msg) => write!(f, "invalid state: {}", msg),
            ClientError::BadRequest(msg) => write!(f, "bad request: {}", msg),
            ClientError::AuthError(msg) => write!(f, "authentication error: {}", msg),
            ClientError::NotFound(msg) => write!(f, "not found: {}", msg),
            ClientError::Remote(msg) => write!(f, "remote error: {}", msg),
        }
    }
}

impl std::error::Error for ClientError {}

/// Converts `reqwest::Error` into `ClientError::Remote`.
/// Allows using the `?` operator on HTTP calls.
impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        ClientError::Remote(err.to_string())
    }
}

impl From<url::ParseError> for ClientError {
    fn from(err: url::ParseError) -> Self {
        ClientError::BadRequest(err.to_string())
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        ClientError::BadRequest(err.to_string())
    }
}
