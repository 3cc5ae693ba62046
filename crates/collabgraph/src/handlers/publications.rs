use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use uuid::Uuid;

use collabgraph_core::research::{CreatePublicationRequest, Publication};
use collabgraph_core::storage::RepositoryError;

use crate::{handlers::AppError, state::AppState};

/// List publications (GET /publications).
pub async fn list_publications(
    State(state): State<AppState>,
) -> Result<Json<Vec<Publication>>, AppError> {
    Ok(Json(state.records.list_publications().await?))
}

/// Create a publication (POST /publications).
pub async fn create_publication(
    State(state): State<AppState>,
    Json(payload): Json<CreatePublicationRequest>,
) -> Result<impl IntoResponse, AppError> {
    let publication = state.records.create_publication(payload).await?;
    Ok((StatusCode::CREATED, Json(publication)))
}

/// Get a publication by ID (GET /publications/{id}).
pub async fn get_publication(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Publication>, AppError> {
    state
        .records
        .get_publication(id)
        .await?
        .map(Json)
        .ok_or_else(|| RepositoryError::not_found("Publication", id).into())
}
