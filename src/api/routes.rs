//! API route table.

use axum::routing::{get, post};
use axum::Router;

use super::handlers::{self, ServiceState};

/// Build the /api/v1 router.
pub fn api_routes(state: ServiceState) -> Router {
    Router::new()
        .route("/fields", get(handlers::get_fields))
        .route("/predict", post(handlers::predict))
        .route("/health", get(handlers::health))
        .with_state(state)
}

/// Legacy health endpoint at /health for load-balancer probes.
pub fn legacy_routes(state: ServiceState) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .with_state(state)
}
