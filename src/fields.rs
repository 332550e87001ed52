//! Input field declarations for the eleven chemistry measurements.
//!
//! Each field carries a statically declared (min, max, default, step)
//! tuple matching the original form. The slider UI is generated from
//! [`FIELD_SPECS`], and [`collect`] clamps submitted values to the same
//! ranges so an arbitrary HTTP client cannot produce out-of-range inputs.
//!
//! The declared ranges are presentation choices (plausible red-wine
//! chemistry), not constraints validated against the artifacts' training
//! distribution.

use serde::{Deserialize, Serialize};

use crate::types::{FeatureVector, FEATURE_COUNT};

/// Static declaration of one numeric input control.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct FieldSpec {
    /// Stable key used in request bodies and element ids.
    pub key: &'static str,
    /// Human-readable label shown next to the slider.
    pub label: &'static str,
    pub min: f64,
    pub max: f64,
    pub default: f64,
    /// Slider increment.
    pub step: f64,
}

/// The eleven input controls, in training order.
///
/// Labels marked "(log)" reflect that the artifacts were trained on
/// log-transformed columns for those measurements.
pub const FIELD_SPECS: [FieldSpec; FEATURE_COUNT] = [
    FieldSpec { key: "fixed_acidity", label: "Fixed Acidity", min: 4.0, max: 16.0, default: 7.4, step: 0.1 },
    FieldSpec { key: "volatile_acidity", label: "Volatile Acidity", min: 0.1, max: 1.5, default: 0.70, step: 0.01 },
    FieldSpec { key: "citric_acid", label: "Citric Acid", min: 0.0, max: 1.0, default: 0.00, step: 0.01 },
    FieldSpec { key: "residual_sugar", label: "Residual Sugar (log)", min: 0.1, max: 2.0, default: 0.65, step: 0.01 },
    FieldSpec { key: "chlorides", label: "Chlorides (log)", min: 0.1, max: 1.5, default: 0.90, step: 0.01 },
    FieldSpec { key: "free_sulfur_dioxide", label: "Free Sulfur Dioxide", min: 1.0, max: 70.0, default: 20.0, step: 1.0 },
    FieldSpec { key: "total_sulfur_dioxide", label: "Total Sulfur Dioxide (log)", min: 5.0, max: 200.0, default: 98.0, step: 1.0 },
    FieldSpec { key: "density", label: "Density", min: 0.990, max: 1.005, default: 1.000, step: 0.001 },
    FieldSpec { key: "ph", label: "pH", min: 2.5, max: 4.5, default: 3.2, step: 0.1 },
    FieldSpec { key: "sulphates", label: "Sulphates (log)", min: 0.1, max: 2.0, default: 0.60, step: 0.01 },
    FieldSpec { key: "alcohol", label: "Alcohol (%)", min: 8.0, max: 15.0, default: 10.5, step: 0.1 },
];

impl FieldSpec {
    /// Clamp a submitted value into this field's declared range.
    pub fn clamp(&self, value: f64) -> f64 {
        value.clamp(self.min, self.max)
    }
}

/// Raw form submission: one named value per control.
///
/// Serde rejects missing or non-numeric values before this struct exists,
/// so collection only has to enforce the declared ranges.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct MeasurementForm {
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

/// Snapshot a form submission into a [`FeatureVector`], clamping every
/// value to its declared range.
pub fn collect(form: &MeasurementForm) -> FeatureVector {
    FeatureVector {
        fixed_acidity: FIELD_SPECS[0].clamp(form.fixed_acidity),
        volatile_acidity: FIELD_SPECS[1].clamp(form.volatile_acidity),
        citric_acid: FIELD_SPECS[2].clamp(form.citric_acid),
        residual_sugar: FIELD_SPECS[3].clamp(form.residual_sugar),
        chlorides: FIELD_SPECS[4].clamp(form.chlorides),
        free_sulfur_dioxide: FIELD_SPECS[5].clamp(form.free_sulfur_dioxide),
        total_sulfur_dioxide: FIELD_SPECS[6].clamp(form.total_sulfur_dioxide),
        density: FIELD_SPECS[7].clamp(form.density),
        ph: FIELD_SPECS[8].clamp(form.ph),
        sulphates: FIELD_SPECS[9].clamp(form.sulphates),
        alcohol: FIELD_SPECS[10].clamp(form.alcohol),
    }
}

/// Feature vector holding every control's default value — the page's
/// initial state.
pub fn defaults() -> FeatureVector {
    FeatureVector {
        fixed_acidity: FIELD_SPECS[0].default,
        volatile_acidity: FIELD_SPECS[1].default,
        citric_acid: FIELD_SPECS[2].default,
        residual_sugar: FIELD_SPECS[3].default,
        chlorides: FIELD_SPECS[4].default,
        free_sulfur_dioxide: FIELD_SPECS[5].default,
        total_sulfur_dioxide: FIELD_SPECS[6].default,
        density: FIELD_SPECS[7].default,
        ph: FIELD_SPECS[8].default,
        sulphates: FIELD_SPECS[9].default,
        alcohol: FIELD_SPECS[10].default,
    }
}
