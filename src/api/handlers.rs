//! API route handlers.
//!
//! Request handling for the prediction form:
//! - Field specs the page builds its sliders from
//! - The predict action itself
//! - Service health for probes and the page footer

use axum::extract::State;
use axum::response::Response;
use axum::Json;
use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;
use tracing::error;

use super::envelope::{ApiErrorResponse, ApiResponse};
use crate::artifacts::Artifacts;
use crate::fields::{self, MeasurementForm, FIELD_SPECS};
use crate::pipeline;

/// Shared read-only state behind every handler.
///
/// Artifacts are loaded once at startup; after that the only mutation is
/// the served-predictions counter.
#[derive(Clone)]
pub struct ServiceState {
    pub artifacts: Arc<Artifacts>,
    pub started_at: Instant,
    pub predictions_served: Arc<AtomicU64>,
}

impl ServiceState {
    pub fn new(artifacts: Arc<Artifacts>) -> Self {
        Self {
            artifacts,
            started_at: Instant::now(),
            predictions_served: Arc::new(AtomicU64::new(0)),
        }
    }
}

/// Prediction payload returned to the page.
#[derive(Debug, Serialize)]
pub struct PredictionV1 {
    /// Continuous model output before rounding.
    pub raw: f64,
    /// Rounded quality score.
    pub score: i32,
    /// Band identifier: "low" / "average" / "excellent".
    pub band: crate::types::QualityBand,
    /// Presentation label, e.g. "Excellent Quality Wine".
    pub label: &'static str,
}

/// Health payload for `/api/v1/health` and the legacy `/health` probe.
#[derive(Debug, Serialize)]
pub struct HealthV1 {
    pub status: &'static str,
    pub service: String,
    pub uptime_secs: u64,
    pub predictions_served: u64,
    pub scaler_kind: String,
    pub model_kind: String,
}

/// GET /api/v1/fields — slider declarations, in training order.
pub async fn get_fields() -> Response {
    ApiResponse::ok(FIELD_SPECS)
}

/// POST /api/v1/predict — run one prediction.
///
/// Values are clamped to their declared ranges before the pipeline runs,
/// so an arbitrary HTTP client gets the same bounds as the sliders.
pub async fn predict(
    State(state): State<ServiceState>,
    Json(form): Json<MeasurementForm>,
) -> Response {
    let features = fields::collect(&form);

    match pipeline::run(&features, state.artifacts.scaler.as_ref(), state.artifacts.model.as_ref()) {
        Ok(prediction) => {
            state.predictions_served.fetch_add(1, Ordering::Relaxed);
            ApiResponse::ok(PredictionV1 {
                raw: prediction.raw,
                score: prediction.score,
                band: prediction.band,
                label: prediction.band.label(),
            })
        }
        Err(e) => {
            error!(error = %e, "prediction failed");
            ApiErrorResponse::internal(format!("prediction failed: {e}"))
        }
    }
}

/// GET /api/v1/health — service health.
pub async fn health(State(state): State<ServiceState>) -> Response {
    let service = if crate::config::is_initialized() {
        crate::config::get().service.name.clone()
    } else {
        "vinoscope".to_string()
    };

    ApiResponse::ok(HealthV1 {
        status: "ok",
        service,
        uptime_secs: state.started_at.elapsed().as_secs(),
        predictions_served: state.predictions_served.load(Ordering::Relaxed),
        scaler_kind: state.artifacts.scaler_kind.clone(),
        model_kind: state.artifacts.model_kind.clone(),
    })
}
