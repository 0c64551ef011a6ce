//! Test harness driving the axum router in-process.
//!
//! Requests go through `tower::ServiceExt::oneshot`, so no socket is bound.
//! Collaborators are the mocks from `digest_core::kernel::test_dependencies`.

use axum::{
    body::{to_bytes, Body},
    http::{header::CONTENT_TYPE, Method, Request, StatusCode},
    Router,
};
use digest_core::kernel::TestDependencies;
use digest_core::server::build_app;
use serde_json::Value;
use tower::ServiceExt;

/// One parsed `text/event-stream` frame.
#[derive(Debug, Clone, PartialEq)]
pub struct SseEvent {
    pub event: String,
    pub data: String,
}

impl SseEvent {
    pub fn json(&self) -> Value {
        serde_json::from_str(&self.data).expect("event data is JSON")
    }
}

pub struct TestApp {
    router: Router,
}

impl TestApp {
    pub fn new(deps: TestDependencies) -> Self {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();

        Self {
            router: build_app(deps.into_deps()),
        }
    }

    pub async fn post_json(&self, uri: &str, body: &str) -> (StatusCode, Value) {
        let request = Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        let (status, bytes) = self.send(request).await;
        (status, serde_json::from_slice(&bytes).expect("response is JSON"))
    }

    pub async fn get_json(&self, uri: &str) -> (StatusCode, Value) {
        let (status, bytes) = self.get(uri).await;
        (status, serde_json::from_slice(&bytes).expect("response is JSON"))
    }

    /// GET an SSE endpoint and collect every event until the stream closes.
    pub async fn get_events(&self, uri: &str) -> (StatusCode, Vec<SseEvent>) {
        let (status, bytes) = self.get(uri).await;
        let body = String::from_utf8(bytes).expect("stream is UTF-8");
        (status, parse_events(&body))
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Vec<u8>) {
        let request = Request::builder()
            .method(Method::GET)
            .uri(uri)
            .body(Body::empty())
            .unwrap();
        self.send(request).await
    }

    async fn send(&self, request: Request<Body>) -> (StatusCode, Vec<u8>) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, bytes.to_vec())
    }
}

/// Split an event-stream body into frames, skipping keep-alive comments.
pub fn parse_events(body: &str) -> Vec<SseEvent> {
    body.split("\n\n")
        .filter_map(|frame| {
            let mut event = None;
            let mut data = Vec::new();
            for line in frame.lines() {
                if let Some(name) = line.strip_prefix("event:") {
                    event = Some(name.trim_start().to_string());
                } else if let Some(value) = line.strip_prefix("data:") {
                    data.push(value.strip_prefix(' ').unwrap_or(value).to_string());
                }
            }
            event.map(|event| SseEvent {
                event,
                data: data.join("\n"),
            })
        })
        .collect()
}
