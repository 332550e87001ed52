//! Prediction pipeline: feature vector in, scored prediction out.
//!
//! ```text
//! FeatureVector -> Scaler::transform -> Model::predict -> round -> band
//! ```
//!
//! A single call either fully succeeds or fully fails; there are no
//! retries, no partial results, and no state carried between calls.

use tracing::debug;

use crate::artifacts::{InferenceError, Model, Scaler, TransformError};
use crate::types::{FeatureVector, Prediction, QualityBand};

/// Per-request prediction failures, surfaced to the caller as a failed
/// attempt. No automatic recovery or degraded fallback is attempted.
#[derive(Debug, thiserror::Error)]
pub enum PredictError {
    #[error("feature scaling failed: {0}")]
    Transform(#[from] TransformError),

    #[error("inference failed: {0}")]
    Inference(#[from] InferenceError),
}

/// Run one prediction: scale, infer, round, classify.
///
/// Deterministic for a fixed artifact pair — identical inputs yield
/// identical (score, band) pairs.
pub fn run(
    features: &FeatureVector,
    scaler: &dyn Scaler,
    model: &dyn Model,
) -> Result<Prediction, PredictError> {
    let scaled = scaler.transform(features)?;
    let raw = model.predict(&scaled)?;

    // Runtime default rounding (half away from zero); continuous model
    // outputs make exact ties a non-event.
    let score = raw.round() as i32;
    let band = QualityBand::from_score(score);

    debug!(raw, score, band = %band, "prediction complete");

    Ok(Prediction { raw, score, band })
}
