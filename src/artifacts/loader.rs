//! Artifact loading and process-lifetime memoization.
//!
//! Both artifact files are JSON documents tagged with a `kind` field, so a
//! scaler file accidentally pointed at a model (or vice versa) fails with a
//! deserialization error instead of producing a silently meaningless
//! prediction.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, OnceLock};

use serde::Deserialize;
use tracing::info;

use super::model::TreeEnsembleModel;
use super::scaler::StandardScaler;
use super::Artifacts;
use crate::types::FEATURE_COUNT;

/// Artifact loading failures. All variants are fatal at startup: no
/// prediction is possible without both artifacts.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("failed to read artifact {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("artifact {path} is not a valid serialized artifact: {source}")]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("artifact {path} was fitted on {got} features, this service expects {expected}")]
    Shape {
        path: PathBuf,
        expected: usize,
        got: usize,
    },
}

/// On-disk locations of the artifact pair.
#[derive(Debug, Clone)]
pub struct ArtifactPaths {
    pub model: PathBuf,
    pub scaler: PathBuf,
}

/// Serialized scaler file, dispatched on the `kind` tag.
#[derive(Debug, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
enum ScalerArtifact {
    StandardScaler(StandardScaler),
}

/// Serialized model file, dispatched on the `kind` tag.
#[derive(Debug, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
enum ModelArtifact {
    TreeEnsemble(TreeEnsembleModel),
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, LoadError> {
    let bytes = std::fs::read(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_slice(&bytes).map_err(|source| LoadError::Malformed {
        path: path.to_path_buf(),
        source,
    })
}

/// Read and deserialize both artifact files.
///
/// Shape is validated once here; transform re-checks it defensively since
/// the trait object hides the concrete width from callers.
pub fn load(paths: &ArtifactPaths) -> Result<Artifacts, LoadError> {
    let ScalerArtifact::StandardScaler(scaler) = read_json(&paths.scaler)?;
    if scaler.mean.len() != FEATURE_COUNT || scaler.scale.len() != FEATURE_COUNT {
        return Err(LoadError::Shape {
            path: paths.scaler.clone(),
            expected: FEATURE_COUNT,
            got: scaler.width(),
        });
    }

    let ModelArtifact::TreeEnsemble(model) = read_json(&paths.model)?;
    if model.n_features != FEATURE_COUNT {
        return Err(LoadError::Shape {
            path: paths.model.clone(),
            expected: FEATURE_COUNT,
            got: model.n_features,
        });
    }

    info!(
        scaler = %paths.scaler.display(),
        model = %paths.model.display(),
        trees = model.trees.len(),
        "Loaded prediction artifacts"
    );

    Ok(Artifacts {
        scaler: Box::new(scaler),
        model: Box::new(model),
        scaler_kind: "standard_scaler".to_string(),
        model_kind: "tree_ensemble".to_string(),
    })
}

/// Lock-guarded, at-most-once artifact cache.
///
/// First caller runs the loader under the init mutex; every later caller
/// (including racers blocked on the mutex) gets the cached pair. A failed
/// load leaves the cell empty so startup can report the error and abort.
pub struct ArtifactCache {
    cell: OnceLock<Arc<Artifacts>>,
    init_lock: Mutex<()>,
}

impl ArtifactCache {
    pub const fn new() -> Self {
        Self {
            cell: OnceLock::new(),
            init_lock: Mutex::new(()),
        }
    }

    /// Return the cached pair, loading it via `loader` on first call.
    pub fn get_or_load<F>(&self, loader: F) -> Result<Arc<Artifacts>, LoadError>
    where
        F: FnOnce() -> Result<Artifacts, LoadError>,
    {
        if let Some(artifacts) = self.cell.get() {
            return Ok(Arc::clone(artifacts));
        }

        let _guard = self
            .init_lock
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);

        // Double-check: a racer may have finished loading while we waited.
        if let Some(artifacts) = self.cell.get() {
            return Ok(Arc::clone(artifacts));
        }

        let artifacts = Arc::new(loader()?);
        let _ = self.cell.set(Arc::clone(&artifacts));
        Ok(artifacts)
    }

    /// Cached pair, if loading already succeeded.
    pub fn get(&self) -> Option<Arc<Artifacts>> {
        self.cell.get().map(Arc::clone)
    }
}

impl Default for ArtifactCache {
    fn default() -> Self {
        Self::new()
    }
}

/// Process-wide artifact cache. Startup loads through this so the pair is
/// read from disk at most once per process no matter how many callers race.
static PROCESS_CACHE: ArtifactCache = ArtifactCache::new();

/// The process-wide [`ArtifactCache`].
pub fn shared() -> &'static ArtifactCache {
    &PROCESS_CACHE
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artifacts::{Model, Scaler};
    use crate::fields;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn stub_artifacts() -> Artifacts {
        Artifacts {
            scaler: Box::new(StandardScaler::identity()),
            model: Box::new(TreeEnsembleModel {
                n_features: FEATURE_COUNT,
                trees: vec![crate::artifacts::model::Tree {
                    feature: vec![-1],
                    threshold: vec![0.0],
                    children_left: vec![0],
                    children_right: vec![0],
                    value: vec![6.0],
                }],
            }),
            scaler_kind: "stub".to_string(),
            model_kind: "stub".to_string(),
        }
    }

    #[test]
    fn cache_invokes_loader_at_most_once() {
        let cache = ArtifactCache::new();
        let calls = AtomicUsize::new(0);

        for _ in 0..5 {
            let loaded = cache
                .get_or_load(|| {
                    calls.fetch_add(1, Ordering::SeqCst);
                    Ok(stub_artifacts())
                })
                .unwrap();
            let scaled = loaded.scaler.transform(&fields::defaults()).unwrap();
            assert!((loaded.model.predict(&scaled).unwrap() - 6.0).abs() < 1e-12);
        }

        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn failed_load_leaves_cache_empty() {
        let cache = ArtifactCache::new();
        let err = cache.get_or_load(|| {
            Err(LoadError::Shape {
                path: PathBuf::from("model.json"),
                expected: FEATURE_COUNT,
                got: 3,
            })
        });
        assert!(err.is_err());
        assert!(cache.get().is_none());
    }

    #[test]
    fn missing_file_is_an_io_load_error() {
        let dir = tempfile::tempdir().unwrap();
        let paths = ArtifactPaths {
            model: dir.path().join("missing_model.json"),
            scaler: dir.path().join("missing_scaler.json"),
        };
        match load(&paths) {
            Err(LoadError::Io { path, .. }) => {
                assert!(path.ends_with("missing_scaler.json"));
            }
            other => panic!("expected Io error, got {other:?}"),
        }
    }

    #[test]
    fn wrong_kind_tag_is_malformed() {
        let dir = tempfile::tempdir().unwrap();
        let scaler_path = dir.path().join("scaler.json");
        // A model document where the scaler is expected.
        std::fs::write(
            &scaler_path,
            serde_json::json!({"kind": "tree_ensemble", "n_features": 11, "trees": []}).to_string(),
        )
        .unwrap();
        let paths = ArtifactPaths {
            model: dir.path().join("model.json"),
            scaler: scaler_path,
        };
        assert!(matches!(load(&paths), Err(LoadError::Malformed { .. })));
    }

    #[test]
    fn wrong_width_scaler_is_a_shape_error() {
        let dir = tempfile::tempdir().unwrap();
        let scaler_path = dir.path().join("scaler.json");
        std::fs::write(
            &scaler_path,
            serde_json::json!({
                "kind": "standard_scaler",
                "mean": [0.0, 0.0, 0.0],
                "scale": [1.0, 1.0, 1.0]
            })
            .to_string(),
        )
        .unwrap();
        let paths = ArtifactPaths {
            model: dir.path().join("model.json"),
            scaler: scaler_path,
        };
        match load(&paths) {
            Err(LoadError::Shape { expected, got, .. }) => {
                assert_eq!(expected, FEATURE_COUNT);
                assert_eq!(got, 3);
            }
            other => panic!("expected Shape error, got {other:?}"),
        }
    }
}
