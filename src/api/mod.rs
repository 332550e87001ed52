//! REST API module using Axum
//!
//! Provides the HTTP surface for the prediction form:
//! - `/` — the single-page form (embedded at compile time)
//! - `/api/v1/*` — fields, predict, health (enveloped JSON)
//! - `/health` — legacy probe endpoint

pub mod envelope;
pub mod handlers;
mod routes;

pub use handlers::ServiceState;

use axum::http::{header, Method};
use axum::response::Html;
use axum::routing::get;
use axum::Router;
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// The prediction form, embedded at compile time.
const INDEX_HTML: &str = include_str!("../../static/index.html");

/// GET / — serve the prediction form.
async fn serve_page() -> Html<&'static str> {
    Html(INDEX_HTML)
}

/// Build a CORS layer that is restrictive by default (same-origin only).
///
/// Set `VINOSCOPE_CORS_ORIGINS` to a comma-separated list of allowed
/// origins for development.
fn build_cors_layer() -> CorsLayer {
    match std::env::var("VINOSCOPE_CORS_ORIGINS") {
        Ok(origins) => {
            let allowed: Vec<_> = origins
                .split(',')
                .filter_map(|o| o.trim().parse().ok())
                .collect();
            tracing::info!(origins = %origins, "CORS: allowing configured origins");
            CorsLayer::new()
                .allow_origin(allowed)
                .allow_methods([Method::GET, Method::POST])
                .allow_headers([header::CONTENT_TYPE])
        }
        Err(_) => {
            // No cross-origin allowed — the form is same-origin
            CorsLayer::new()
                .allow_methods([Method::GET, Method::POST])
                .allow_headers([header::CONTENT_TYPE])
        }
    }
}

/// Create the complete application router with API and page serving.
pub fn create_app(state: ServiceState) -> Router {
    let cors = build_cors_layer();

    Router::new()
        .route("/", get(serve_page))
        .nest("/api/v1", routes::api_routes(state.clone()))
        .merge(routes::legacy_routes(state))
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(cors)
}
