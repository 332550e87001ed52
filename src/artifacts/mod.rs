//! Externally trained artifacts: the feature scaler and the quality model.
//!
//! Both artifacts are opaque capability interfaces with exactly one
//! operation each. The rest of the system depends only on the [`Scaler`]
//! and [`Model`] traits, so tests substitute deterministic stubs and the
//! serialized formats stay a private concern of this module.
//!
//! Concrete implementations deserialize JSON exports of the externally
//! trained scikit-learn pipeline; there is no training code here.

mod loader;
mod model;
mod scaler;

pub use loader::{load, shared, ArtifactCache, ArtifactPaths, LoadError};
pub use model::{Tree, TreeEnsembleModel};
pub use scaler::StandardScaler;

use crate::types::{FeatureVector, ScaledFeatures};

/// Feature-vector shape did not match what the scaler was trained on.
#[derive(Debug, thiserror::Error)]
pub enum TransformError {
    #[error("scaler expects {expected} features, artifact carries {got}")]
    ShapeMismatch { expected: usize, got: usize },
}

/// Internal model failure during inference.
#[derive(Debug, thiserror::Error)]
pub enum InferenceError {
    #[error("model internal failure: {0}")]
    Internal(String),
}

/// Deterministic rescaling of raw feature values, learned externally.
pub trait Scaler: Send + Sync {
    fn transform(&self, features: &FeatureVector) -> Result<ScaledFeatures, TransformError>;
}

/// Externally trained predictive function mapping scaled features to a
/// continuous quality estimate.
pub trait Model: Send + Sync {
    fn predict(&self, features: &ScaledFeatures) -> Result<f64, InferenceError>;
}

/// The loaded artifact pair, shared read-only for the process lifetime.
pub struct Artifacts {
    pub scaler: Box<dyn Scaler>,
    pub model: Box<dyn Model>,
    /// Artifact descriptors for the health endpoint.
    pub scaler_kind: String,
    pub model_kind: String,
}

impl std::fmt::Debug for Artifacts {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Artifacts")
            .field("scaler_kind", &self.scaler_kind)
            .field("model_kind", &self.model_kind)
            .finish()
    }
}
