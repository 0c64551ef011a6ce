use serde::{Deserialize, Serialize};

use super::{ModerationResult, Post, SummaryResult};

/// The payload returned by both delivery modes and stored in the response cache.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DigestResponse {
    pub topic: String,
    /// RFC 3339 timestamp of the pipeline run that produced this payload
    pub generated_at: String,
    pub model: String,
    pub tweets: Vec<Post>,
    pub summary: SummaryResult,
    pub moderation: ModerationResult,
    /// True when served from the response cache
    pub cache: bool,
}
