//! Vinoscope - Wine Quality Prediction Service
//!
//! Serves a single-page form that collects eleven wine-chemistry
//! measurements and predicts a quality score through two pre-trained
//! artifacts (a feature scaler and a regression model).
//!
//! # Usage
//!
//! ```bash
//! # Run with the default artifact locations (./artifacts/*.json)
//! cargo run --release
//!
//! # Point at a different artifact pair
//! cargo run --release -- --model /opt/wine/model.json --scaler /opt/wine/scaler.json
//! ```
//!
//! # Environment Variables
//!
//! - `VINOSCOPE_CONFIG`: Path to a TOML config file
//! - `VINOSCOPE_CORS_ORIGINS`: Comma-separated allowed CORS origins (dev only)
//! - `RUST_LOG`: Logging level (default: info)

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

use vinoscope::api::{create_app, ServiceState};
use vinoscope::artifacts::{self, ArtifactPaths};
use vinoscope::config::{self, AppConfig};

// ============================================================================
// CLI Arguments
// ============================================================================

#[derive(Parser, Debug)]
#[command(name = "vinoscope")]
#[command(about = "Wine Quality Prediction Service")]
#[command(version)]
struct CliArgs {
    /// Override the server address (default: "0.0.0.0:8080")
    #[arg(short, long)]
    addr: Option<String>,

    /// Path to a TOML config file (overrides VINOSCOPE_CONFIG)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Path to the serialized model artifact
    #[arg(long, value_name = "FILE")]
    model: Option<PathBuf>,

    /// Path to the serialized scaler artifact
    #[arg(long, value_name = "FILE")]
    scaler: Option<PathBuf>,
}

// ============================================================================
// Startup
// ============================================================================

/// Resolve config from CLI and environment, applying CLI overrides.
fn resolve_config(args: &CliArgs) -> AppConfig {
    let mut app_config = match &args.config {
        Some(path) => match AppConfig::load_from_file(path) {
            Ok(c) => {
                info!(path = %path.display(), "Loaded config from --config");
                c
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Failed to load --config file, using search order");
                AppConfig::load()
            }
        },
        None => AppConfig::load(),
    };

    if let Some(addr) = &args.addr {
        app_config.server.addr = addr.clone();
    }
    if let Some(model) = &args.model {
        app_config.artifacts.model_path = model.clone();
    }
    if let Some(scaler) = &args.scaler {
        app_config.artifacts.scaler_path = scaler.clone();
    }

    app_config
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("Received shutdown signal");
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args = CliArgs::parse();

    config::init(resolve_config(&args));
    let app_config = config::get();

    info!("🍷 {} starting", app_config.service.name);

    // Both artifacts are required before any prediction is possible, so a
    // load failure aborts startup.
    let paths = ArtifactPaths {
        model: app_config.artifacts.model_path.clone(),
        scaler: app_config.artifacts.scaler_path.clone(),
    };
    let loaded = artifacts::shared()
        .get_or_load(|| artifacts::load(&paths))
        .context("Failed to load prediction artifacts")?;
    info!("✓ Prediction artifacts loaded");

    let state = ServiceState::new(Arc::clone(&loaded));
    let app = create_app(state);

    let listener = tokio::net::TcpListener::bind(&app_config.server.addr)
        .await
        .with_context(|| format!("Failed to bind to {}", app_config.server.addr))?;

    info!("✓ HTTP server listening on {}", app_config.server.addr);
    info!("🎯 Prediction form available at: http://{}", app_config.server.addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server error")?;

    info!("Graceful shutdown complete");
    Ok(())
}
