use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use jobdesk_core::{DomainError, ValidationErrors};
use jobdesk_job_descriptions::JobDescriptionId;

use crate::app::services::ServiceError;

pub fn service_error_to_response(err: ServiceError) -> axum::response::Response {
    match err {
        ServiceError::NotFound(_) => json_error(StatusCode::NOT_FOUND, "not_found", err.to_string()),
        ServiceError::Store(e) => {
            tracing::error!(error = %e, "store failure");
            json_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                "store_error",
                "unexpected storage failure",
            )
        }
    }
}

pub fn domain_error_to_response(err: DomainError) -> axum::response::Response {
    match err {
        DomainError::Validation(errors) => validation_error(errors),
        DomainError::InvalidId(msg) => json_error(StatusCode::BAD_REQUEST, "invalid_id", msg),
    }
}

pub fn validation_error(errors: ValidationErrors) -> axum::response::Response {
    (
        StatusCode::BAD_REQUEST,
        axum::Json(json!({
            "error": "validation_error",
            "message": errors.to_string(),
            "fields": errors,
        })),
    )
        .into_response()
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}

pub fn parse_id(s: &str) -> Result<JobDescriptionId, axum::response::Response> {
    s.parse().map_err(domain_error_to_response)
}

/// Unwrap a JSON body. A missing JSON content type is 415, any other
/// extractor rejection is 400.
pub fn parse_body<T>(body: Result<axum::Json<T>, JsonRejection>) -> Result<T, axum::response::Response> {
    match body {
        Ok(axum::Json(v)) => Ok(v),
        Err(JsonRejection::MissingJsonContentType(rejection)) => Err(json_error(
            StatusCode::UNSUPPORTED_MEDIA_TYPE,
            "unsupported_media_type",
            rejection.body_text(),
        )),
        Err(rejection) => Err(json_error(
            StatusCode::BAD_REQUEST,
            "invalid_body",
            rejection.body_text(),
        )),
    }
}
