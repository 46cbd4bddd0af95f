//! HTTP API application wiring (Axum router + service wiring).
//!
//! - `services.rs`: store selection and the job description service
//! - `routes/`: HTTP routes + handlers (one file per resource)
//! - `dto.rs`: request/response DTOs and mapping to/from domain types
//! - `errors.rs`: consistent error responses

use std::sync::Arc;

use axum::{routing::get, Extension, Router};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use crate::middleware::{self, AccessPolicy};

pub mod dto;
pub mod errors;
pub mod routes;
pub mod services;

/// Build the full HTTP router (public entrypoint used by `main.rs` and tests).
pub fn build_app(services: Arc<services::AppServices>, access: AccessPolicy) -> Router {
    // API routes: subject to the access policy. `route_layer` keeps unmatched
    // paths on the plain 404 fallback.
    let api = routes::router()
        .layer(Extension(services))
        .route_layer(axum::middleware::from_fn_with_state(
            access,
            middleware::access_middleware,
        ));

    Router::new()
        .route("/health", get(routes::system::health))
        .merge(api)
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
}
