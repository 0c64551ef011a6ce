// Trait definitions for dependency injection
//
// These are INFRASTRUCTURE traits only - no business logic.
// The fetch, summarize and moderate steps are domain functions that use these traits.
//
// Naming convention: Base* for trait names (e.g., BaseSearchProvider, BaseAI)

use async_trait::async_trait;

use crate::domains::digest::models::{ModerationResult, Post};
use crate::error::DigestResult;

// =============================================================================
// Search Provider Trait (Infrastructure - paged post search)
// =============================================================================

/// One page of search results in provider order.
#[derive(Debug, Clone, Default)]
pub struct SearchPage {
    pub posts: Vec<Post>,
    /// Continuation token; `None` when the provider has no further pages
    pub next_token: Option<String>,
}

#[async_trait]
pub trait BaseSearchProvider: Send + Sync {
    /// Request one page of recent posts matching `query`.
    async fn search_page(
        &self,
        query: &str,
        page_size: u32,
        next_token: Option<&str>,
    ) -> DigestResult<SearchPage>;
}

// =============================================================================
// Safety Classifier Trait (Infrastructure)
// =============================================================================

#[async_trait]
pub trait BaseSafetyClassifier: Send + Sync {
    /// Classify a single piece of text.
    async fn classify(&self, text: &str) -> DigestResult<ModerationResult>;
}

// =============================================================================
// AI Trait (Infrastructure - schema-constrained LLM output)
// =============================================================================

#[async_trait]
pub trait BaseAI: Send + Sync {
    /// Model identifier reported in digest responses
    fn model(&self) -> &str;

    /// Generate JSON conforming to `schema`. Returns the raw JSON string;
    /// callers parse it with `serde_json::from_str`.
    async fn generate_structured(
        &self,
        schema_name: &str,
        system_prompt: &str,
        user_prompt: &str,
        schema: serde_json::Value,
    ) -> DigestResult<String>;
}
