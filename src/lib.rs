//! Vinoscope: Wine Quality Prediction Service
//!
//! Single-page interactive form over two pre-trained artifacts.
//!
//! ## Architecture
//!
//! - **Artifacts**: opaque scaler + model, loaded once at startup
//! - **Fields**: the eleven bounded chemistry inputs and their clamping
//! - **Pipeline**: scale → infer → round → band
//! - **API**: axum surface serving the form and the predict endpoint

pub mod api;
pub mod artifacts;
pub mod config;
pub mod fields;
pub mod pipeline;
pub mod types;

// Re-export service configuration
pub use config::AppConfig;

// Re-export commonly used types
pub use types::{FeatureVector, Prediction, QualityBand, ScaledFeatures, FEATURE_COUNT};

// Re-export the artifact interface
pub use artifacts::{
    ArtifactCache, ArtifactPaths, Artifacts, InferenceError, LoadError, Model, Scaler,
    TransformError,
};

// Re-export the pipeline entry point
pub use pipeline::{run as predict, PredictError};
