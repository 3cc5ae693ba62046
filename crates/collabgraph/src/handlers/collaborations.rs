use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};

use collabgraph_core::graph::CollaborationRecord;
use collabgraph_core::research::CreateCollaborationRequest;

use crate::{handlers::AppError, state::AppState};

/// List researcher relationships, at most 50 (GET /collaborations).
pub async fn list_collaborations(
    State(state): State<AppState>,
) -> Result<Json<Vec<CollaborationRecord>>, AppError> {
    Ok(Json(state.records.list_collaborations().await?))
}

/// Link two researchers by name (POST /collaborations).
pub async fn create_collaboration(
    State(state): State<AppState>,
    Json(payload): Json<CreateCollaborationRequest>,
) -> Result<impl IntoResponse, AppError> {
    let record = state.records.create_collaboration(payload).await?;
    Ok((StatusCode::CREATED, Json(record)))
}
