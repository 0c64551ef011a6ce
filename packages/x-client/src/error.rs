//! Error types for the X API client.

use thiserror::Error;

/// Result type for X API client operations.
pub type Result<T> = std::result::Result<T, XError>;

#[derive(Debug, Error)]
pub enum XError {
    /// Transport failure or an undecodable response body
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-2xx response from the API
    #[error("X API error: HTTP {status} -> {message}")]
    Api { status: u16, message: String },
}

impl XError {
    /// True when the response arrived but its body could not be decoded.
    pub fn is_decode(&self) -> bool {
        matches!(self, XError::Http(e) if e.is_decode())
    }
}
