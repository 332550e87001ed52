//! Prediction Regression Tests
//!
//! Exercises the full pipeline through the real artifact files that ship
//! with the repo (artifacts/model.json + artifacts/scaler.json). Asserts
//! on loader behavior, determinism, and score/band consistency across the
//! declared input ranges.

use vinoscope::artifacts::{self, ArtifactCache, ArtifactPaths};
use vinoscope::fields::{self, FIELD_SPECS};
use vinoscope::types::{FeatureVector, QualityBand};
use vinoscope::pipeline;

use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Paths to the artifact pair that ships with the repo.
fn shipped_artifact_paths() -> ArtifactPaths {
    let root = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    ArtifactPaths {
        model: root.join("artifacts/model.json"),
        scaler: root.join("artifacts/scaler.json"),
    }
}

fn vector_from_values(values: [f64; 11]) -> FeatureVector {
    FeatureVector {
        fixed_acidity: values[0],
        volatile_acidity: values[1],
        citric_acid: values[2],
        residual_sugar: values[3],
        chlorides: values[4],
        free_sulfur_dioxide: values[5],
        total_sulfur_dioxide: values[6],
        density: values[7],
        ph: values[8],
        sulphates: values[9],
        alcohol: values[10],
    }
}

/// Band derived from a score must always match the fixed thresholds.
fn assert_band_consistent(score: i32, band: QualityBand) {
    let expected = if score >= 7 {
        QualityBand::Excellent
    } else if score >= 5 {
        QualityBand::Average
    } else {
        QualityBand::Low
    };
    assert_eq!(band, expected, "score {score} mapped to {band}");
}

#[test]
fn shipped_artifacts_load_and_predict_defaults() {
    let loaded = artifacts::load(&shipped_artifact_paths()).expect("shipped artifacts must load");

    let out = pipeline::run(&fields::defaults(), loaded.scaler.as_ref(), loaded.model.as_ref())
        .expect("default inputs must predict");

    assert!(out.raw.is_finite());
    assert_eq!(out.score, out.raw.round() as i32);
    assert_band_consistent(out.score, out.band);
}

#[test]
fn predictions_are_deterministic_for_fixed_artifacts() {
    let loaded = artifacts::load(&shipped_artifact_paths()).expect("shipped artifacts must load");
    let fv = fields::defaults();

    let first = pipeline::run(&fv, loaded.scaler.as_ref(), loaded.model.as_ref()).unwrap();
    let second = pipeline::run(&fv, loaded.scaler.as_ref(), loaded.model.as_ref()).unwrap();

    assert_eq!(first, second);
}

#[test]
fn boundary_vectors_predict_without_error() {
    let loaded = artifacts::load(&shipped_artifact_paths()).expect("shipped artifacts must load");

    let mins = vector_from_values(FIELD_SPECS.map(|s| s.min));
    let maxs = vector_from_values(FIELD_SPECS.map(|s| s.max));

    for fv in [mins, maxs] {
        let out = pipeline::run(&fv, loaded.scaler.as_ref(), loaded.model.as_ref())
            .expect("boundary inputs must predict");
        assert!(out.raw.is_finite());
        assert_band_consistent(out.score, out.band);
    }
}

#[test]
fn band_stays_consistent_across_an_input_grid() {
    let loaded = artifacts::load(&shipped_artifact_paths()).expect("shipped artifacts must load");

    // Sweep each field across its range while the rest hold defaults.
    for (idx, spec) in FIELD_SPECS.iter().enumerate() {
        for step in 0..=4 {
            let mut values = FIELD_SPECS.map(|s| s.default);
            values[idx] = spec.min + (spec.max - spec.min) * f64::from(step) / 4.0;
            let out = pipeline::run(
                &vector_from_values(values),
                loaded.scaler.as_ref(),
                loaded.model.as_ref(),
            )
            .expect("in-range inputs must predict");
            assert_band_consistent(out.score, out.band);
        }
    }
}

#[test]
fn cache_loads_shipped_artifacts_once_across_many_predictions() {
    let cache = ArtifactCache::new();
    let loads = AtomicUsize::new(0);
    let paths = shipped_artifact_paths();

    for _ in 0..10 {
        let loaded = cache
            .get_or_load(|| {
                loads.fetch_add(1, Ordering::SeqCst);
                artifacts::load(&paths)
            })
            .expect("shipped artifacts must load");
        pipeline::run(&fields::defaults(), loaded.scaler.as_ref(), loaded.model.as_ref())
            .expect("default inputs must predict");
    }

    assert_eq!(loads.load(Ordering::SeqCst), 1);
}

#[test]
fn absent_artifact_file_propagates_load_error() {
    let dir = tempfile::tempdir().expect("tempdir");

    // Scaler present, model absent.
    let scaler_path = dir.path().join("scaler.json");
    std::fs::copy(shipped_artifact_paths().scaler, &scaler_path).expect("copy scaler");

    let paths = ArtifactPaths {
        model: dir.path().join("model.json"),
        scaler: scaler_path,
    };

    let err = artifacts::load(&paths).expect_err("missing model must fail");
    assert!(matches!(err, artifacts::LoadError::Io { .. }), "got {err:?}");
}
