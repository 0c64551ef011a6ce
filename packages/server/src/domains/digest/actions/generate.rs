//! Digest generation: cache lookup, then fetch, summarize and moderate.
//!
//! Both delivery modes call [`generate_digest`]; the streaming mode observes
//! progress through the callback, the single-shot mode ignores it.

use chrono::Utc;
use std::time::Instant;
use tracing::info;

use super::fetch_posts::fetch_recent_unique_authors;
use super::llm_summary::summarize_with_model;
use super::moderate::moderate_suggested_post;
use super::summarize::{summarize, EXTRACTIVE_MODEL};
use crate::domains::digest::models::{DigestResponse, SummaryBackend};
use crate::error::{DigestError, DigestResult};
use crate::kernel::ServerDeps;

/// Pipeline milestones reported while a digest is generated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DigestProgress {
    CacheHit,
    Fetching,
    Summarizing,
    Moderating,
}

impl DigestProgress {
    /// Status line shown to streaming clients.
    pub fn message(&self) -> &'static str {
        match self {
            DigestProgress::CacheHit => "Loaded from cache.",
            DigestProgress::Fetching => "Fetching recent tweets...",
            DigestProgress::Summarizing => "Summarizing...",
            DigestProgress::Moderating => "Running moderation...",
        }
    }
}

/// Trimmed topic, or a validation error when it is blank.
pub fn validate_topic(topic: Option<&str>) -> DigestResult<String> {
    match topic.map(str::trim) {
        Some(topic) if !topic.is_empty() => Ok(topic.to_string()),
        _ => Err(DigestError::topic_required()),
    }
}

/// Fetch, summarize and moderate without touching the cache.
pub async fn run_pipeline(
    topic: &str,
    deps: &ServerDeps,
    on_progress: &(dyn Fn(DigestProgress) + Send + Sync),
) -> DigestResult<DigestResponse> {
    let started = Instant::now();

    on_progress(DigestProgress::Fetching);
    let posts =
        fetch_recent_unique_authors(deps.search.as_ref(), topic, deps.settings.target_count)
            .await?;

    on_progress(DigestProgress::Summarizing);
    let (mut summary, model) = match deps.settings.summary_backend {
        SummaryBackend::Extractive => (summarize(topic, &posts), EXTRACTIVE_MODEL.to_string()),
        SummaryBackend::OpenAi => (
            summarize_with_model(deps.ai.as_ref(), topic, &posts).await?,
            deps.ai.model().to_string(),
        ),
    };

    on_progress(DigestProgress::Moderating);
    let (suggested_post, moderation) =
        moderate_suggested_post(deps.classifier.as_ref(), &summary.suggested_post).await?;
    summary.suggested_post = suggested_post;

    info!(
        topic = %topic,
        unique_authors = posts.len(),
        flagged = moderation.flagged,
        duration_ms = started.elapsed().as_millis() as u64,
        "Digest generated"
    );

    Ok(DigestResponse {
        topic: topic.to_string(),
        generated_at: Utc::now().to_rfc3339(),
        model,
        tweets: posts,
        summary,
        moderation,
        cache: false,
    })
}

/// Serve `topic` from the cache, or run the pipeline and cache the result.
///
/// Fails before any network call when the topic is blank or credentials are
/// missing. Failed runs are never cached.
pub async fn generate_digest(
    topic: &str,
    deps: &ServerDeps,
    on_progress: &(dyn Fn(DigestProgress) + Send + Sync),
) -> DigestResult<DigestResponse> {
    let topic = validate_topic(Some(topic))?;
    deps.ensure_configured()?;

    if let Some(mut cached) = deps.cache.get(&topic) {
        info!(topic = %topic, "Serving digest from cache");
        on_progress(DigestProgress::CacheHit);
        cached.cache = true;
        return Ok(cached);
    }

    let response = run_pipeline(&topic, deps, on_progress).await?;
    deps.cache
        .put(&topic, response.clone(), deps.settings.cache_ttl_seconds);
    Ok(response)
}
