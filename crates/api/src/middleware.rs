use axum::{
    extract::State,
    http::StatusCode,
    middleware::Next,
    response::Response,
};

use crate::app::errors;

/// Access decision applied to every `/api` request.
///
/// There is no authentication yet: the service either lets everything through
/// or refuses everything. A real access-control layer replaces this middleware
/// without touching the handlers.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum AccessPolicy {
    PermitAll,
    DenyAll,
}

impl AccessPolicy {
    pub fn from_permit_all(permit_all: bool) -> Self {
        if permit_all {
            Self::PermitAll
        } else {
            Self::DenyAll
        }
    }
}

pub async fn access_middleware(
    State(policy): State<AccessPolicy>,
    req: axum::http::Request<axum::body::Body>,
    next: Next,
) -> Response {
    match policy {
        AccessPolicy::PermitAll => next.run(req).await,
        AccessPolicy::DenyAll => {
            tracing::debug!(path = %req.uri().path(), "request rejected by access policy");
            errors::json_error(StatusCode::UNAUTHORIZED, "unauthorized", "access denied")
        }
    }
}
