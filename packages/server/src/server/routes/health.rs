use axum::{extract::Extension, Json};
use serde::Serialize;

use crate::server::app::AxumAppState;

#[derive(Serialize)]
pub struct HealthResponse {
    status: String,
    cache_entries: usize,
}

/// Health check endpoint
///
/// The service holds no connections, so it is healthy whenever it answers.
/// Reports the number of cached digests, expired ones included.
pub async fn health_handler(Extension(state): Extension<AxumAppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        cache_entries: state.server_deps.cache.len(),
    })
}
