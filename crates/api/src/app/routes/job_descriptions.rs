use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};

use crate::app::{dto, errors};
use crate::app::services::AppServices;

pub fn router() -> Router {
    Router::new()
        .route("/", post(create_job_description).get(list_job_descriptions))
        .route(
            "/:id",
            get(get_job_description)
                .put(update_job_description)
                .delete(delete_job_description),
        )
}

pub async fn create_job_description(
    Extension(services): Extension<Arc<AppServices>>,
    body: Result<Json<dto::JobDescriptionRequest>, JsonRejection>,
) -> axum::response::Response {
    let details = match errors::parse_body(body).map(|req| req.validate()) {
        Ok(Ok(details)) => details,
        Ok(Err(e)) => return errors::domain_error_to_response(e),
        Err(resp) => return resp,
    };

    match services.job_descriptions.create(details).await {
        Ok(created) => (StatusCode::CREATED, Json(created)).into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}

pub async fn get_job_description(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id = match errors::parse_id(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };

    match services.job_descriptions.get_by_id(id).await {
        Ok(found) => (StatusCode::OK, Json(found)).into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}

pub async fn list_job_descriptions(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    match services.job_descriptions.get_all().await {
        Ok(items) => (StatusCode::OK, Json(items)).into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}

pub async fn update_job_description(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
    body: Result<Json<dto::JobDescriptionRequest>, JsonRejection>,
) -> axum::response::Response {
    let id = match errors::parse_id(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };

    // Input is checked before the record is looked up.
    let details = match errors::parse_body(body).map(|req| req.validate()) {
        Ok(Ok(details)) => details,
        Ok(Err(e)) => return errors::domain_error_to_response(e),
        Err(resp) => return resp,
    };

    match services.job_descriptions.update(id, details).await {
        Ok(updated) => (StatusCode::OK, Json(updated)).into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}

pub async fn delete_job_description(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id = match errors::parse_id(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };

    match services.job_descriptions.delete(id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}
