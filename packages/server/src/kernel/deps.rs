//! Server dependencies (using traits for testability)
//!
//! This module provides the central dependency container used by the digest
//! pipeline. All external services sit behind trait abstractions so tests can
//! swap in the mocks from `test_dependencies`.

use async_trait::async_trait;
use openai_client::{strip_code_blocks, ModerationRequest, OpenAIClient, StructuredRequest};
use std::sync::Arc;
use x_client::{SearchRecentParams, XClient};

use crate::config::Config;
use crate::domains::digest::cache::ResponseCache;
use crate::domains::digest::models::{DigestResponse, ModerationResult, Post, SummaryBackend};
use crate::error::{DigestError, DigestResult};
use crate::kernel::{BaseAI, BaseSafetyClassifier, BaseSearchProvider, SearchPage};

/// Number of unique authors a digest is built from.
pub const TARGET_UNIQUE_AUTHORS: usize = 50;

const SUMMARY_TEMPERATURE: f32 = 0.4;

// =============================================================================
// XClient Adapter (implements BaseSearchProvider trait)
// =============================================================================

/// Wrapper around XClient that implements BaseSearchProvider trait
pub struct XSearchAdapter(pub XClient);

impl XSearchAdapter {
    pub fn new(client: XClient) -> Self {
        Self(client)
    }
}

#[async_trait]
impl BaseSearchProvider for XSearchAdapter {
    async fn search_page(
        &self,
        query: &str,
        page_size: u32,
        next_token: Option<&str>,
    ) -> DigestResult<SearchPage> {
        let params = SearchRecentParams::new(query)
            .with_max_results(page_size)
            .with_next_token(next_token);
        let page = self.0.search_recent(&params).await?;

        Ok(SearchPage {
            next_token: page.next_token().map(str::to_string),
            posts: page.authored_tweets().into_iter().map(Post::from).collect(),
        })
    }
}

// =============================================================================
// OpenAI Adapters (implement BaseSafetyClassifier and BaseAI)
// =============================================================================

/// Moderation endpoint as a safety classifier
pub struct OpenAIModerationAdapter {
    client: OpenAIClient,
    model: String,
}

impl OpenAIModerationAdapter {
    pub fn new(client: OpenAIClient, model: impl Into<String>) -> Self {
        Self {
            client,
            model: model.into(),
        }
    }
}

#[async_trait]
impl BaseSafetyClassifier for OpenAIModerationAdapter {
    async fn classify(&self, text: &str) -> DigestResult<ModerationResult> {
        let outcome = self
            .client
            .moderate(ModerationRequest::new(&self.model, text))
            .await?;
        Ok(outcome.into())
    }
}

/// Chat completions with structured output as the summary model
pub struct OpenAIAdapter {
    client: OpenAIClient,
    model: String,
}

impl OpenAIAdapter {
    pub fn new(client: OpenAIClient, model: impl Into<String>) -> Self {
        Self {
            client,
            model: model.into(),
        }
    }
}

#[async_trait]
impl BaseAI for OpenAIAdapter {
    fn model(&self) -> &str {
        &self.model
    }

    async fn generate_structured(
        &self,
        schema_name: &str,
        system_prompt: &str,
        user_prompt: &str,
        schema: serde_json::Value,
    ) -> DigestResult<String> {
        let request =
            StructuredRequest::new(&self.model, schema_name, system_prompt, user_prompt, schema)
                .temperature(SUMMARY_TEMPERATURE);
        let raw = self.client.structured_output(request).await?;
        Ok(strip_code_blocks(&raw).to_string())
    }
}

// =============================================================================
// ServerDeps
// =============================================================================

/// Pipeline tunables
#[derive(Debug, Clone)]
pub struct DigestSettings {
    pub target_count: usize,
    pub cache_ttl_seconds: i64,
    pub summary_backend: SummaryBackend,
}

impl Default for DigestSettings {
    fn default() -> Self {
        Self {
            target_count: TARGET_UNIQUE_AUTHORS,
            cache_ttl_seconds: crate::config::DEFAULT_CACHE_TTL_SECONDS,
            summary_backend: SummaryBackend::Extractive,
        }
    }
}

/// Dependencies shared by every request (using traits for testability)
#[derive(Clone)]
pub struct ServerDeps {
    pub search: Arc<dyn BaseSearchProvider>,
    pub classifier: Arc<dyn BaseSafetyClassifier>,
    /// Only called when the OpenAI summary backend is selected
    pub ai: Arc<dyn BaseAI>,
    /// The only shared mutable state; constructed once at startup
    pub cache: Arc<ResponseCache<DigestResponse>>,
    pub settings: DigestSettings,
    /// First required credential absent from the configuration
    pub missing_credential: Option<&'static str>,
}

impl ServerDeps {
    /// Create new ServerDeps with the given dependencies
    pub fn new(
        search: Arc<dyn BaseSearchProvider>,
        classifier: Arc<dyn BaseSafetyClassifier>,
        ai: Arc<dyn BaseAI>,
        cache: Arc<ResponseCache<DigestResponse>>,
        settings: DigestSettings,
    ) -> Self {
        Self {
            search,
            classifier,
            ai,
            cache,
            settings,
            missing_credential: None,
        }
    }

    /// Wire the X and OpenAI clients from configuration.
    ///
    /// Missing credentials do not fail startup; `ensure_configured` reports
    /// them per request.
    pub fn from_config(config: &Config) -> Self {
        let x_client = XClient::new(config.x_bearer_token.clone().unwrap_or_default())
            .with_base_url(&config.x_api_base_url);
        let openai = OpenAIClient::new(config.openai_api_key.clone().unwrap_or_default())
            .with_base_url(&config.openai_api_base_url);

        let mut deps = Self::new(
            Arc::new(XSearchAdapter::new(x_client)),
            Arc::new(OpenAIModerationAdapter::new(
                openai.clone(),
                &config.moderation_model,
            )),
            Arc::new(OpenAIAdapter::new(openai, &config.openai_model)),
            Arc::new(ResponseCache::with_capacity(config.cache_max_entries)),
            DigestSettings {
                target_count: TARGET_UNIQUE_AUTHORS,
                cache_ttl_seconds: config.cache_ttl_seconds,
                summary_backend: config.summary_backend,
            },
        );
        deps.missing_credential = config.missing_credential();
        deps
    }

    /// Fail with a configuration error when upstream credentials are missing.
    pub fn ensure_configured(&self) -> DigestResult<()> {
        match self.missing_credential {
            Some(name) => Err(DigestError::missing_credential(name)),
            None => Ok(()),
        }
    }
}
