//! Core data types: FeatureVector, QualityBand, Prediction.
//!
//! The feature vector is a statically ordered struct rather than a
//! name-keyed map, so the order the artifacts were trained on is enforced
//! at compile time by [`FeatureVector::to_array`].

use serde::{Deserialize, Serialize};

/// Number of chemistry measurements the artifacts were trained on.
pub const FEATURE_COUNT: usize = 11;

/// The eleven wine-chemistry measurements, in training order.
///
/// Order is significant: [`to_array`](Self::to_array) is the single place
/// where the struct is flattened for the scaler/model, and its body is the
/// authoritative ordering.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector {
    pub fixed_acidity: f64,
    pub volatile_acidity: f64,
    pub citric_acid: f64,
    pub residual_sugar: f64,
    pub chlorides: f64,
    pub free_sulfur_dioxide: f64,
    pub total_sulfur_dioxide: f64,
    pub density: f64,
    pub ph: f64,
    pub sulphates: f64,
    pub alcohol: f64,
}

impl FeatureVector {
    /// Flatten into the fixed training order expected by the artifacts.
    pub fn to_array(&self) -> [f64; FEATURE_COUNT] {
        [
            self.fixed_acidity,
            self.volatile_acidity,
            self.citric_acid,
            self.residual_sugar,
            self.chlorides,
            self.free_sulfur_dioxide,
            self.total_sulfur_dioxide,
            self.density,
            self.ph,
            self.sulphates,
            self.alcohol,
        ]
    }
}

/// Feature vector after the scaler's affine transform. Same cardinality
/// and order as [`FeatureVector`].
pub type ScaledFeatures = [f64; FEATURE_COUNT];

/// Three-way qualitative classification of a rounded quality score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QualityBand {
    /// score < 5
    Low,
    /// 5 <= score < 7
    Average,
    /// score >= 7
    Excellent,
}

impl QualityBand {
    /// Band thresholds are fixed; they are not operator-tunable.
    pub fn from_score(score: i32) -> Self {
        if score >= 7 {
            Self::Excellent
        } else if score >= 5 {
            Self::Average
        } else {
            Self::Low
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Average => "Average",
            Self::Excellent => "Excellent",
        }
    }

    /// Presentation label shown next to the score card.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Low => "Low Quality Wine",
            Self::Average => "Average Quality Wine",
            Self::Excellent => "Excellent Quality Wine",
        }
    }
}

impl std::fmt::Display for QualityBand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Result of one prediction request.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Prediction {
    /// Continuous model output before rounding.
    pub raw: f64,
    /// `raw` rounded to the nearest integer (half away from zero).
    pub score: i32,
    /// Band derived from `score` via fixed thresholds.
    pub band: QualityBand,
}
