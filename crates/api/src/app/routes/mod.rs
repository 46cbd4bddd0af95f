use axum::Router;

pub mod job_descriptions;
pub mod system;

/// Router for all `/api` endpoints.
pub fn router() -> Router {
    Router::new().nest("/api/job-descriptions", job_descriptions::router())
}
