//! Single-shot digest endpoint.
//!
//! POST /api/generate with `{"topic": "..."}`

use axum::{body::Bytes, extract::Extension, Json};
use serde_json::Value;

use crate::domains::digest::actions::{generate_digest, validate_topic, DigestProgress};
use crate::domains::digest::models::DigestResponse;
use crate::error::DigestResult;
use crate::server::app::AxumAppState;

/// Topic from a JSON body. Malformed JSON and non-string topics count as missing.
fn topic_from_body(body: &[u8]) -> Option<String> {
    let payload: Value = serde_json::from_slice(body).ok()?;
    payload.get("topic")?.as_str().map(str::to_string)
}

pub async fn generate_handler(
    Extension(state): Extension<AxumAppState>,
    body: Bytes,
) -> DigestResult<Json<DigestResponse>> {
    let topic = validate_topic(topic_from_body(&body).as_deref())?;

    let response = generate_digest(&topic, &state.server_deps, &|_: DigestProgress| {})
        .await
        .map_err(|e| {
            tracing::warn!(topic = %topic, error = %e, "Digest generation failed");
            e
        })?;

    Ok(Json(response))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_topic_from_body() {
        assert_eq!(topic_from_body(br#"{"topic":"rust"}"#), Some("rust".to_string()));
        assert_eq!(topic_from_body(br#"{"topic":42}"#), None);
        assert_eq!(topic_from_body(br#"{"other":"x"}"#), None);
        assert_eq!(topic_from_body(b"not json"), None);
        assert_eq!(topic_from_body(b""), None);
    }
}
