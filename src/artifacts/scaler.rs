//! Standard (affine) feature scaler deserialized from a JSON export.

use serde::{Deserialize, Serialize};

use super::{Scaler, TransformError};
use crate::types::{FeatureVector, ScaledFeatures, FEATURE_COUNT};

/// Per-feature affine rescaling: `(x - mean) / scale`.
///
/// `mean` and `scale` are the fitted parameters exported from the
/// training environment. Width is validated at load time but re-checked
/// on every transform, since the artifact does not self-describe its
/// schema beyond array lengths.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StandardScaler {
    pub mean: Vec<f64>,
    pub scale: Vec<f64>,
}

impl StandardScaler {
    /// Identity scaler (zero mean, unit scale). Used as a test double.
    #[cfg(test)]
    pub fn identity() -> Self {
        Self {
            mean: vec![0.0; FEATURE_COUNT],
            scale: vec![1.0; FEATURE_COUNT],
        }
    }

    /// Fitted width of this scaler.
    pub fn width(&self) -> usize {
        self.mean.len().min(self.scale.len())
    }
}

impl Scaler for StandardScaler {
    fn transform(&self, features: &FeatureVector) -> Result<ScaledFeatures, TransformError> {
        if self.mean.len() != FEATURE_COUNT || self.scale.len() != FEATURE_COUNT {
            return Err(TransformError::ShapeMismatch {
                expected: FEATURE_COUNT,
                got: self.width(),
            });
        }

        let raw = features.to_array();
        let mut scaled = [0.0; FEATURE_COUNT];
        for i in 0..FEATURE_COUNT {
            scaled[i] = (raw[i] - self.mean[i]) / self.scale[i];
        }
        Ok(scaled)
    }
}
