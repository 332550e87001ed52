//! Service configuration schema and TOML loading.
//!
//! Every struct implements `Default` with the shipped values, ensuring
//! the service runs with zero configuration when no file is present.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Root configuration for a vinoscope deployment.
///
/// Load with `AppConfig::load()` which searches:
/// 1. `$VINOSCOPE_CONFIG` env var
/// 2. `./vinoscope.toml`
/// 3. Built-in defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Service identification
    #[serde(default)]
    pub service: ServiceInfo,

    /// HTTP server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Artifact file locations
    #[serde(default)]
    pub artifacts: ArtifactConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            service: ServiceInfo::default(),
            server: ServerConfig::default(),
            artifacts: ArtifactConfig::default(),
        }
    }
}

/// Service identification shown on the page and in health responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceInfo {
    #[serde(default = "default_service_name")]
    pub name: String,
}

fn default_service_name() -> String {
    "Wine Quality Prediction".to_string()
}

impl Default for ServiceInfo {
    fn default() -> Self {
        Self {
            name: default_service_name(),
        }
    }
}

/// HTTP server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_server_addr")]
    pub addr: String,
}

fn default_server_addr() -> String {
    "0.0.0.0:8080".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: default_server_addr(),
        }
    }
}

/// Locations of the two pre-trained artifact files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtifactConfig {
    #[serde(default = "default_model_path")]
    pub model_path: PathBuf,

    #[serde(default = "default_scaler_path")]
    pub scaler_path: PathBuf,
}

fn default_model_path() -> PathBuf {
    PathBuf::from("./artifacts/model.json")
}

fn default_scaler_path() -> PathBuf {
    PathBuf::from("./artifacts/scaler.json")
}

impl Default for ArtifactConfig {
    fn default() -> Self {
        Self {
            model_path: default_model_path(),
            scaler_path: default_scaler_path(),
        }
    }
}

/// Configuration loading errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}

impl AppConfig {
    /// Load configuration using the standard search order:
    /// 1. `$VINOSCOPE_CONFIG` environment variable
    /// 2. `./vinoscope.toml` in the current working directory
    /// 3. Built-in defaults
    pub fn load() -> Self {
        if let Ok(path) = std::env::var("VINOSCOPE_CONFIG") {
            let p = PathBuf::from(&path);
            if p.exists() {
                match Self::load_from_file(&p) {
                    Ok(config) => {
                        info!(path = %p.display(), "Loaded config from VINOSCOPE_CONFIG");
                        return config;
                    }
                    Err(e) => {
                        warn!(path = %p.display(), error = %e, "Failed to load config from VINOSCOPE_CONFIG, falling back");
                    }
                }
            } else {
                warn!(path = %path, "VINOSCOPE_CONFIG points to non-existent file, falling back");
            }
        }

        let local = PathBuf::from("vinoscope.toml");
        if local.exists() {
            match Self::load_from_file(&local) {
                Ok(config) => {
                    info!("Loaded config from ./vinoscope.toml");
                    return config;
                }
                Err(e) => {
                    warn!(error = %e, "Failed to load ./vinoscope.toml, using defaults");
                }
            }
        }

        info!("No vinoscope.toml found — using built-in defaults");
        Self::default()
    }

    /// Load from a specific TOML file path.
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        for unknown in unknown_keys(&contents) {
            warn!(key = %unknown, "Unknown config key — ignored");
        }
        let config: Self = toml::from_str(&contents)?;
        Ok(config)
    }
}

/// Dotted key paths this schema understands.
const KNOWN_KEYS: &[&str] = &[
    "service.name",
    "server.addr",
    "artifacts.model_path",
    "artifacts.scaler_path",
];

/// Collect dotted key paths present in the TOML text but absent from the
/// schema, so a typo gets a startup warning instead of a silent default.
pub fn unknown_keys(toml_str: &str) -> Vec<String> {
    let Ok(value) = toml_str.parse::<toml::Value>() else {
        return Vec::new();
    };

    let mut found = Vec::new();
    walk_keys(&value, String::new(), &mut found);
    found
        .into_iter()
        .filter(|key| !KNOWN_KEYS.contains(&key.as_str()))
        .collect()
}

fn walk_keys(value: &toml::Value, prefix: String, out: &mut Vec<String>) {
    if let toml::Value::Table(table) = value {
        for (key, child) in table {
            let dotted = if prefix.is_empty() {
                key.clone()
            } else {
                format!("{prefix}.{key}")
            };
            if let toml::Value::Table(_) = child {
                walk_keys(child, dotted, out);
            } else {
                out.push(dotted);
            }
        }
    }
}
