use tracing::{info, warn};

use crate::domains::digest::models::ModerationResult;
use crate::error::DigestResult;
use crate::kernel::BaseSafetyClassifier;

/// Replaces a suggested post the classifier flagged.
pub const WITHHELD_NOTICE: &str = "Suggested post withheld due to safety policies.";

/// Run the suggested post through the safety classifier.
///
/// Returns the post to publish (the original, or [`WITHHELD_NOTICE`] when
/// flagged) along with the full verdict. Classifier errors propagate, so no
/// unchecked post is ever returned.
pub async fn moderate_suggested_post(
    classifier: &dyn BaseSafetyClassifier,
    suggested_post: &str,
) -> DigestResult<(String, ModerationResult)> {
    let verdict = classifier.classify(suggested_post).await?;

    if verdict.flagged {
        let flagged_categories: Vec<&str> = verdict
            .categories
            .iter()
            .filter(|(_, flagged)| **flagged)
            .map(|(name, _)| name.as_str())
            .collect();
        warn!(
            categories = ?flagged_categories,
            "Suggested post flagged by moderation; withholding"
        );
        return Ok((WITHHELD_NOTICE.to_string(), verdict));
    }

    info!(flagged = false, "Suggested post passed moderation");
    Ok((suggested_post.to_string(), verdict))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DigestError;
    use crate::kernel::MockSafetyClassifier;

    #[tokio::test]
    async fn test_clean_post_passes_through() {
        let classifier = MockSafetyClassifier::new();

        let (post, verdict) = moderate_suggested_post(&classifier, "Nice roundup.")
            .await
            .unwrap();

        assert_eq!(post, "Nice roundup.");
        assert!(!verdict.flagged);
        assert_eq!(classifier.calls(), vec!["Nice roundup.".to_string()]);
    }

    #[tokio::test]
    async fn test_flagged_post_is_withheld_with_scores() {
        let classifier = MockSafetyClassifier::flagging("harassment");

        let (post, verdict) = moderate_suggested_post(&classifier, "something nasty")
            .await
            .unwrap();

        assert_eq!(post, WITHHELD_NOTICE);
        assert!(verdict.flagged);
        assert_eq!(verdict.categories.get("harassment"), Some(&true));
        assert!(verdict.scores.contains_key("harassment"));
    }

    #[tokio::test]
    async fn test_classifier_failure_propagates() {
        let classifier = MockSafetyClassifier::failing("OpenAI moderation error: HTTP 500");

        let err = moderate_suggested_post(&classifier, "hello")
            .await
            .unwrap_err();

        assert!(matches!(err, DigestError::Upstream(_)));
    }
}
