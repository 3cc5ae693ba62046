use std::time::Duration;

use axum::{
    http::{header, Method, StatusCode},
    routing::get,
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::{
    handlers::{
        collaborations::{create_collaboration, list_collaborations},
        health::healthz,
        projects::{create_project, get_project, list_projects},
        publications::{create_publication, get_publication, list_publications},
        researchers::{create_researcher, get_profile, get_researcher, list_researchers},
    },
    state::AppState,
};

/// Create the application router with all routes and middleware.
pub fn create_app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE]);

    Router::new()
        .route("/healthz", get(healthz))
        .route("/researchers", get(list_researchers).post(create_researcher))
        .route("/researchers/{id}", get(get_researcher))
        .route("/researchers/{id}/profile", get(get_profile))
        .route("/projects", get(list_projects).post(create_project))
        .route("/projects/{id}", get(get_project))
        .route("/publications", get(list_publications).post(create_publication))
        .route("/publications/{id}", get(get_publication))
        .route(
            "/collaborations",
            get(list_collaborations).post(create_collaboration),
        )
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(10),
        ))
        .with_state(state)
}
