//! Integration tests for the SSE digest endpoint.
//!
//! Tests the event sequences of GET /api/generate-sse:
//! - uncached topics: three status events then one result
//! - cached topics: one status event then one result
//! - failures: status events then one error, never a result

mod common;

use axum::http::StatusCode;
use digest_core::kernel::{MockSafetyClassifier, MockSearchProvider, TestDependencies};
use digest_core::DigestError;
use serde_json::json;

use crate::common::{rust_programming_posts, SseEvent, TestApp};

fn status(message: &str) -> SseEvent {
    SseEvent {
        event: "status".to_string(),
        data: message.to_string(),
    }
}

#[tokio::test]
async fn uncached_topic_reports_progress_then_result() {
    let search = MockSearchProvider::new().with_page(rust_programming_posts(), None);
    let app = TestApp::new(TestDependencies::new().mock_search(search));

    let (code, events) = app
        .get_events("/api/generate-sse?topic=rust%20programming")
        .await;

    assert_eq!(code, StatusCode::OK);
    assert_eq!(events.len(), 4);
    assert_eq!(events[0], status("Fetching recent tweets..."));
    assert_eq!(events[1], status("Summarizing..."));
    assert_eq!(events[2], status("Running moderation..."));

    assert_eq!(events[3].event, "result");
    let result = events[3].json();
    assert_eq!(result["topic"], "rust programming");
    assert_eq!(result["cache"], false);
    assert_eq!(result["summary"]["keywords"][0], "memory");
}

#[tokio::test]
async fn cached_topic_emits_exactly_two_events() {
    let search = MockSearchProvider::new().with_page(rust_programming_posts(), None);
    let app = TestApp::new(TestDependencies::new().mock_search(search.clone()));

    let (_, first) = app.get_events("/api/generate-sse?topic=rust").await;
    let (code, events) = app.get_events("/api/generate-sse?topic=%20RUST%20").await;

    assert_eq!(code, StatusCode::OK);
    assert_eq!(events.len(), 2);
    assert_eq!(events[0], status("Loaded from cache."));
    assert_eq!(events[1].event, "result");
    assert_eq!(events[1].json()["cache"], true);
    assert_eq!(
        events[1].json()["generated_at"],
        first[3].json()["generated_at"]
    );
    assert_eq!(search.call_count(), 1);
}

#[tokio::test]
async fn cache_is_shared_with_single_shot_mode() {
    let search = MockSearchProvider::new().with_page(rust_programming_posts(), None);
    let app = TestApp::new(TestDependencies::new().mock_search(search.clone()));

    let (code, _) = app.post_json("/api/generate", r#"{"topic":"rust"}"#).await;
    assert_eq!(code, StatusCode::OK);

    let (_, events) = app.get_events("/api/generate-sse?topic=rust").await;

    assert_eq!(events.len(), 2);
    assert_eq!(events[0], status("Loaded from cache."));
    assert_eq!(search.call_count(), 1);
}

#[tokio::test]
async fn blank_topic_rejected_before_stream_opens() {
    let app = TestApp::new(TestDependencies::new());

    for uri in ["/api/generate-sse", "/api/generate-sse?topic=", "/api/generate-sse?topic=%20%20"] {
        let (code, bytes) = app.get(uri).await;
        assert_eq!(code, StatusCode::BAD_REQUEST, "uri: {}", uri);
        let payload: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(payload, json!({"error": "Topic is required"}));
    }
}

#[tokio::test]
async fn missing_credential_reported_as_error_event() {
    let search = MockSearchProvider::new();
    let app = TestApp::new(
        TestDependencies::new()
            .mock_search(search.clone())
            .missing_credential("OPENAI_API_KEY"),
    );

    let (code, events) = app.get_events("/api/generate-sse?topic=rust").await;

    assert_eq!(code, StatusCode::OK);
    assert_eq!(
        events,
        vec![SseEvent {
            event: "error".to_string(),
            data: "Missing OPENAI_API_KEY".to_string(),
        }]
    );
    assert_eq!(search.call_count(), 0);
}

#[tokio::test]
async fn upstream_failure_ends_with_single_error_event() {
    let search = MockSearchProvider::new().with_error(DigestError::Upstream(
        "X API error: HTTP 429 -> Too Many\nRequests".to_string(),
    ));
    let app = TestApp::new(TestDependencies::new().mock_search(search));

    let (_, events) = app.get_events("/api/generate-sse?topic=rust").await;

    assert_eq!(events.len(), 2);
    assert_eq!(events[0], status("Fetching recent tweets..."));
    assert_eq!(events[1].event, "error");
    // line breaks never split an event across frames
    assert_eq!(events[1].data, "X API error: HTTP 429 -> Too Many Requests");
}

#[tokio::test]
async fn moderation_failure_after_summarizing() {
    let search = MockSearchProvider::new().with_page(rust_programming_posts(), None);
    let app = TestApp::new(
        TestDependencies::new()
            .mock_search(search)
            .mock_classifier(MockSafetyClassifier::failing("moderation unavailable")),
    );

    let (_, events) = app.get_events("/api/generate-sse?topic=rust").await;

    let names: Vec<_> = events.iter().map(|e| e.event.as_str()).collect();
    assert_eq!(names, vec!["status", "status", "status", "error"]);
    assert_eq!(events[3].data, "moderation unavailable");
}
