use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use uuid::Uuid;

use collabgraph_core::research::{CreateResearcherRequest, PopulatedResearcher, Profile};
use collabgraph_core::storage::RepositoryError;

use crate::{handlers::AppError, state::AppState};

/// List researchers with their publications (GET /researchers).
pub async fn list_researchers(
    State(state): State<AppState>,
) -> Result<Json<Vec<PopulatedResearcher>>, AppError> {
    Ok(Json(state.records.list_researchers().await?))
}

/// Create a researcher (POST /researchers).
pub async fn create_researcher(
    State(state): State<AppState>,
    Json(payload): Json<CreateResearcherRequest>,
) -> Result<impl IntoResponse, AppError> {
    let researcher = state.records.create_researcher(payload).await?;
    Ok((StatusCode::CREATED, Json(researcher)))
}

/// Get a researcher by ID (GET /researchers/{id}).
pub async fn get_researcher(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<PopulatedResearcher>, AppError> {
    state
        .records
        .get_researcher(id)
        .await?
        .map(Json)
        .ok_or_else(|| RepositoryError::not_found("Researcher", id).into())
}

/// Get the assembled profile of a researcher (GET /researchers/{id}/profile).
pub async fn get_profile(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Profile>, AppError> {
    let researcher = state
        .records
        .researcher_record(id)
        .await?
        .ok_or_else(|| RepositoryError::not_found("Researcher", id))?;

    Ok(Json(state.profiles.get_profile(&researcher).await?))
}
