//! Errors surfaced by the digest pipeline.
//!
//! The display text of every variant is the message shown to API clients,
//! so variants carry the final human-readable string.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use openai_client::OpenAIError;
use thiserror::Error;
use x_client::XError;

pub type DigestResult<T> = std::result::Result<T, DigestError>;

#[derive(Debug, Error)]
pub enum DigestError {
    /// Missing upstream credentials. Raised before the pipeline starts.
    #[error("{0}")]
    Configuration(String),

    /// Bad request input, e.g. a blank topic. Raised before any network call.
    #[error("{0}")]
    Validation(String),

    /// Non-success response from the search provider, the language model or
    /// the safety classifier.
    #[error("{0}")]
    Upstream(String),

    /// Upstream payload was missing expected fields or could not be decoded.
    #[error("{0}")]
    Parse(String),
}

impl DigestError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            DigestError::Configuration(_) | DigestError::Validation(_) => StatusCode::BAD_REQUEST,
            DigestError::Upstream(_) | DigestError::Parse(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn missing_credential(name: &str) -> Self {
        DigestError::Configuration(format!("Missing {}", name))
    }

    pub fn topic_required() -> Self {
        DigestError::Validation("Topic is required".to_string())
    }
}

impl From<XError> for DigestError {
    fn from(err: XError) -> Self {
        if err.is_decode() {
            DigestError::Parse(format!("X API response could not be parsed: {}", err))
        } else {
            DigestError::Upstream(err.to_string())
        }
    }
}

impl From<OpenAIError> for DigestError {
    fn from(err: OpenAIError) -> Self {
        match err {
            OpenAIError::Config(msg) => DigestError::Configuration(msg),
            OpenAIError::Parse(msg) => DigestError::Parse(msg),
            other => DigestError::Upstream(other.to_string()),
        }
    }
}

impl IntoResponse for DigestError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(serde_json::json!({ "error": self.to_string() }));
        (status, body).into_response()
    }
}
