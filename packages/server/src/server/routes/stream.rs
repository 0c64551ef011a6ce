//! SSE digest endpoint.
//!
//! GET /api/generate-sse?topic=...
//!
//! Emits `status` events as the pipeline progresses, then exactly one
//! `result` (the digest as single-line JSON) or `error` (the message).
//! A blank topic is rejected with a 400 before the stream opens; every other
//! failure, missing credentials included, arrives as an `error` event.
//!
//! The pipeline runs on its own task. If the client disconnects, sends fail
//! silently and the run still completes and populates the cache.

use std::convert::Infallible;

use axum::{
    extract::{Extension, Query},
    response::sse::{Event, KeepAlive, Sse},
};
use futures::stream::{Stream, StreamExt};
use serde::Deserialize;
use tokio::sync::mpsc;
use tokio_stream::wrappers::UnboundedReceiverStream;

use crate::domains::digest::actions::{generate_digest, validate_topic, DigestProgress};
use crate::error::DigestResult;
use crate::server::app::AxumAppState;

#[derive(Deserialize)]
pub struct GenerateQuery {
    topic: Option<String>,
}

/// SSE frames are line-delimited, so event data must stay on one line.
fn single_line(data: &str) -> String {
    data.replace(['\r', '\n'], " ")
}

fn sse_event(name: &str, data: &str) -> Event {
    Event::default().event(name).data(single_line(data))
}

pub async fn generate_sse_handler(
    Extension(state): Extension<AxumAppState>,
    Query(query): Query<GenerateQuery>,
) -> DigestResult<Sse<impl Stream<Item = Result<Event, Infallible>>>> {
    let topic = validate_topic(query.topic.as_deref())?;

    let (tx, rx) = mpsc::unbounded_channel::<Event>();
    let deps = state.server_deps.clone();

    tokio::spawn(async move {
        let progress_tx = tx.clone();
        let on_progress = move |progress: DigestProgress| {
            let _ = progress_tx.send(sse_event("status", progress.message()));
        };

        let final_event = match generate_digest(&topic, &deps, &on_progress).await {
            Ok(response) => match serde_json::to_string(&response) {
                Ok(json) => sse_event("result", &json),
                Err(e) => sse_event("error", &e.to_string()),
            },
            Err(e) => {
                tracing::warn!(topic = %topic, error = %e, "Streaming digest failed");
                sse_event("error", &e.to_string())
            }
        };

        if tx.send(final_event).is_err() {
            tracing::debug!(topic = %topic, "Client disconnected before digest completed");
        }
    });

    let events = UnboundedReceiverStream::new(rx).map(Ok::<_, Infallible>);
    Ok(Sse::new(events).keep_alive(KeepAlive::default()))
}
