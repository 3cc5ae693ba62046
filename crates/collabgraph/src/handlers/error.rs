use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use collabgraph_core::research::RelationError;
use collabgraph_core::storage::{repository_error_to_status_code, RepositoryError};

/// Handler error rendered as `{"error": "<message>"}`.
///
/// The status comes from the underlying error kind: repository errors use
/// their mapped code, invalid relation types are 400, anything else is 500.
#[derive(Debug)]
pub struct AppError(pub anyhow::Error);

impl AppError {
    fn status_code(&self) -> StatusCode {
        if let Some(repo_error) = self.0.downcast_ref::<RepositoryError>() {
            let code = repository_error_to_status_code(repo_error);
            StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
        } else if self.0.downcast_ref::<RelationError>().is_some() {
            StatusCode::BAD_REQUEST
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = self.0.to_string();
        if status.is_server_error() {
            tracing::error!(%status, error = %message, "Request failed");
        } else {
            tracing::warn!(%status, error = %message, "Request rejected");
        }

        (status, Json(serde_json::json!({ "error": message }))).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}
