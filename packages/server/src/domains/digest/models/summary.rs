use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::Post;

/// Digest text distilled from a batch of posts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryResult {
    pub summary: String,
    /// At most 280 characters; replaced by a withheld notice when moderation flags it
    pub suggested_post: String,
    /// At most 8, most frequent first
    pub keywords: Vec<String>,
    /// Short talking points shown alongside the summary
    pub bullets: Vec<String>,
    /// At most 4, highest keyword score first
    pub representative_posts: Vec<Post>,
}

/// Which summarizer produces the `SummaryResult`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SummaryBackend {
    /// Keyword-frequency extraction, no network calls
    #[default]
    Extractive,
    /// OpenAI structured output
    OpenAi,
}

#[derive(Debug, Error)]
#[error("unknown summary backend: {0}")]
pub struct UnknownSummaryBackend(String);

impl FromStr for SummaryBackend {
    type Err = UnknownSummaryBackend;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "extractive" => Ok(SummaryBackend::Extractive),
            "openai" | "llm" => Ok(SummaryBackend::OpenAi),
            other => Err(UnknownSummaryBackend(other.to_string())),
        }
    }
}

impl fmt::Display for SummaryBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SummaryBackend::Extractive => write!(f, "extractive"),
            SummaryBackend::OpenAi => write!(f, "openai"),
        }
    }
}
