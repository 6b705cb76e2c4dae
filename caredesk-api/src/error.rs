//! Error types for the API boundary.

use thiserror::Error;

/// Result type for API operations.
pub type ApiResult<T> = Result<T, ApiError>;

/// Errors that can occur while talking to the clinic API.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request never produced a response (DNS, connect, timeout, TLS).
    #[error("request failed: {0}")]
    Transport(String),

    /// The server answered with a non-success status.
    #[error("server returned {status}: {body}")]
    Status { status: u16, body: String },

    /// The response body was not the JSON shape we expected.
    #[error("decode error: {0}")]
    Decode(#[from] serde_json::Error),

    /// The response was syntactically valid but semantically unusable.
    #[error("unexpected payload: {0}")]
    UnexpectedPayload(String),
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        ApiError::Transport(err.to_string())
    }
}
