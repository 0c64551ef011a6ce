//! Pure OpenAI REST API client
//!
//! A small client for the two OpenAI endpoints the digest service relies on:
//! schema-constrained chat completions and content moderation.
//!
//! # Example
//!
//! ```rust,ignore
//! use openai_client::{ModerationRequest, OpenAIClient, StructuredRequest};
//!
//! let client = OpenAIClient::from_env()?;
//!
//! let json = client
//!     .structured_output(StructuredRequest::new("gpt-4o-mini", "answer", system, user, schema))
//!     .await?;
//!
//! let verdict = client
//!     .moderate(ModerationRequest::new("omni-moderation-latest", "some text"))
//!     .await?;
//! ```

pub mod error;
pub mod types;

pub use error::{OpenAIError, Result};
pub use types::*;

use reqwest::Client;
use tracing::{debug, warn};

const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Pure OpenAI API client.
#[derive(Clone)]
pub struct OpenAIClient {
    http_client: Client,
    api_key: String,
    base_url: String,
}

impl OpenAIClient {
    /// Create a new OpenAI client with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            http_client: Client::new(),
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Create from environment variable `OPENAI_API_KEY`.
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("OPENAI_API_KEY")
            .map_err(|_| OpenAIError::Config("OPENAI_API_KEY not set".into()))?;
        Ok(Self::new(api_key))
    }

    /// Set a custom base URL (for Azure, proxies, etc.).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Structured output with JSON schema.
    ///
    /// Returns the raw JSON text of the first choice; callers deserialize it.
    pub async fn structured_output(&self, request: StructuredRequest) -> Result<String> {
        let start = std::time::Instant::now();

        let response = self
            .http_client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "OpenAI request failed");
                OpenAIError::Network(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            warn!(status = %status, error = %error_text, "OpenAI API error");
            return Err(OpenAIError::Api {
                endpoint: "OpenAI API",
                status: status.as_u16(),
                message: error_text,
            });
        }

        let chat_response: types::ChatResponseRaw = response
            .json()
            .await
            .map_err(|e| OpenAIError::Parse(e.to_string()))?;

        if let Some(usage) = &chat_response.usage {
            debug!(
                model = %request.model,
                total_tokens = usage.total_tokens,
                duration_ms = start.elapsed().as_millis(),
                "OpenAI structured output"
            );
        }

        chat_response
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .filter(|content| !content.trim().is_empty())
            .ok_or_else(|| OpenAIError::Parse("OpenAI API response missing output text.".into()))
    }

    /// Classify a single input with the moderation endpoint.
    ///
    /// A response with no results is reported as not flagged.
    pub async fn moderate(&self, request: ModerationRequest) -> Result<ModerationOutcome> {
        let response = self
            .http_client
            .post(format!("{}/moderations", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "OpenAI moderation request failed");
                OpenAIError::Network(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            warn!(status = %status, error = %error_text, "OpenAI moderation error");
            return Err(OpenAIError::Api {
                endpoint: "OpenAI Moderation API",
                status: status.as_u16(),
                message: error_text,
            });
        }

        let raw: types::ModerationResponseRaw = response
            .json()
            .await
            .map_err(|e| OpenAIError::Parse(e.to_string()))?;

        let outcome = raw.results.into_iter().next().unwrap_or_default();
        debug!(model = %request.model, flagged = outcome.flagged, "OpenAI moderation");
        Ok(outcome)
    }
}
