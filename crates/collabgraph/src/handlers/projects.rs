use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use uuid::Uuid;

use collabgraph_core::research::{CreateProjectRequest, PopulatedProject};
use collabgraph_core::storage::RepositoryError;

use crate::{handlers::AppError, state::AppState};

/// List projects with participants and publications (GET /projects).
pub async fn list_projects(
    State(state): State<AppState>,
) -> Result<Json<Vec<PopulatedProject>>, AppError> {
    Ok(Json(state.records.list_projects().await?))
}

/// Create a project (POST /projects).
///
/// Unknown participant relation types are rejected with 400 before anything
/// is stored.
pub async fn create_project(
    State(state): State<AppState>,
    Json(payload): Json<CreateProjectRequest>,
) -> Result<impl IntoResponse, AppError> {
    let project = state.records.create_project(payload).await?;
    Ok((StatusCode::CREATED, Json(project)))
}

/// Get a project by ID (GET /projects/{id}).
pub async fn get_project(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<PopulatedProject>, AppError> {
    state
        .records
        .get_project(id)
        .await?
        .map(Json)
        .ok_or_else(|| RepositoryError::not_found("Project", id).into())
}
