//! Error types for OpenAI client.

use thiserror::Error;

/// Result type for OpenAI client operations.
pub type Result<T> = std::result::Result<T, OpenAIError>;

/// OpenAI client errors.
#[derive(Debug, Error)]
pub enum OpenAIError {
    /// Missing API key or invalid settings
    #[error("Configuration error: {0}")]
    Config(String),

    /// Connection failed before a response arrived
    #[error("Network error: {0}")]
    Network(String),

    /// Non-2xx response
    #[error("{endpoint} error: HTTP {status} -> {message}")]
    Api {
        endpoint: &'static str,
        status: u16,
        message: String,
    },

    /// Response arrived but did not have the expected shape
    #[error("Parse error: {0}")]
    Parse(String),
}
