//! Client error types

use thiserror::Error;

/// Client error type
#[derive(Debug, Error)]
pub enum ClientError {
    /// Transport-level failure (connect, timeout, TLS, body read)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-2xx response; `detail` carries the server's own wording
    /// when the body was a `{"detail": ...}` object
    #[error("{detail}")]
    Api { status: u16, detail: String },

    /// 401: missing or expired credential
    #[error("Authentication required")]
    Unauthorized,

    /// 2xx response whose body did not decode as the expected shape
    #[error("Invalid response: {0}")]
    InvalidResponse(#[from] serde_json::Error),
}

impl ClientError {
    /// Server-supplied detail text, when the error carries one
    pub fn detail(&self) -> Option<&str> {
        match self {
            ClientError::Api { detail, .. } => Some(detail),
            _ => None,
        }
    }
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;
