//! Language-model summarization over the same post batch.

use serde::Deserialize;
use serde_json::json;
use tracing::debug;

use crate::common::{collapse_whitespace, truncate};
use crate::domains::digest::actions::summarize::{
    representative_posts, MAX_KEYWORDS, SUGGESTED_POST_MAX_CHARS,
};
use crate::domains::digest::models::{Post, SummaryResult};
use crate::error::{DigestError, DigestResult};
use crate::kernel::BaseAI;

const SCHEMA_NAME: &str = "tweet_summary";

const SYSTEM_PROMPT: &str = "You are a social media assistant. Create a concise summary and an original new post based strictly on the provided tweets. Do not invent facts, do not quote verbatim, and keep the suggested post within 280 characters. Return JSON only.";

#[derive(Debug, Deserialize)]
struct SummaryPayload {
    summary: String,
    suggested_post: String,
    #[serde(default)]
    keywords: Vec<String>,
    #[serde(default)]
    bullets: Vec<String>,
}

fn summary_schema() -> serde_json::Value {
    json!({
        "type": "object",
        "properties": {
            "summary": { "type": "string" },
            "suggested_post": { "type": "string" },
            "keywords": { "type": "array", "items": { "type": "string" } },
            "bullets": { "type": "array", "items": { "type": "string" } }
        },
        "required": ["summary", "suggested_post", "keywords", "bullets"],
        "additionalProperties": false
    })
}

/// Numbered post listing handed to the model.
pub fn build_prompt(topic: &str, posts: &[Post]) -> String {
    let mut prompt = format!("Topic: {}\nTweets:\n", topic);
    for (i, post) in posts.iter().enumerate() {
        prompt.push_str(&format!(
            "{}) {} (@{}) - {}\n",
            i + 1,
            post.author_name,
            post.author_username,
            collapse_whitespace(&post.text)
        ));
    }
    prompt.push_str("\nReturn JSON only.");
    prompt
}

/// Summarize `posts` with a schema-constrained model call.
///
/// Representative posts come from the extractive ranking so both backends
/// return the same response shape.
pub async fn summarize_with_model(
    ai: &dyn BaseAI,
    topic: &str,
    posts: &[Post],
) -> DigestResult<SummaryResult> {
    let raw = ai
        .generate_structured(
            SCHEMA_NAME,
            SYSTEM_PROMPT,
            &build_prompt(topic, posts),
            summary_schema(),
        )
        .await?;

    if raw.trim().is_empty() {
        return Err(DigestError::Parse(
            "OpenAI API response missing output text.".to_string(),
        ));
    }

    let payload: SummaryPayload = serde_json::from_str(&raw).map_err(|e| {
        DigestError::Parse(format!("OpenAI summary could not be parsed: {}", e))
    })?;

    debug!(
        topic = %topic,
        model = %ai.model(),
        keywords = payload.keywords.len(),
        "Model summary parsed"
    );

    let mut keywords = payload.keywords;
    keywords.truncate(MAX_KEYWORDS);

    Ok(SummaryResult {
        summary: payload.summary,
        suggested_post: truncate(&payload.suggested_post, SUGGESTED_POST_MAX_CHARS),
        keywords,
        bullets: payload.bullets,
        representative_posts: representative_posts(posts),
    })
}
