//! Health check endpoint.

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use collabgraph_core::graph::GraphStore;

use crate::state::AppState;

/// GET /healthz - Pings the graph store.
///
/// Returns 200 when the graph store answers, 503 otherwise.
pub async fn healthz(State(state): State<AppState>) -> impl IntoResponse {
    match state.stores.graph.ping().await {
        Ok(()) => (StatusCode::OK, Json(serde_json::json!({ "status": "ok" }))),
        Err(err) => {
            tracing::warn!(error = %err, "Graph store health check failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(serde_json::json!({ "status": "unavailable", "error": err.to_string() })),
            )
        }
    }
}
