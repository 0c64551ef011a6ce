use indexmap::IndexMap;
use openai_client::ModerationOutcome;
use serde::{Deserialize, Serialize};

/// Safety classifier verdict for the suggested post.
///
/// Category and score maps keep the order the classifier reported them in.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModerationResult {
    pub flagged: bool,
    pub categories: IndexMap<String, bool>,
    pub scores: IndexMap<String, f64>,
}

impl From<ModerationOutcome> for ModerationResult {
    fn from(outcome: ModerationOutcome) -> Self {
        Self {
            flagged: outcome.flagged,
            categories: outcome.categories,
            scores: outcome.category_scores,
        }
    }
}
