//! Server binary for the biochar estimator.
//!
//! Loads configuration, initializes structured logging, and serves the
//! estimator HTTP API until `Ctrl-C`.
//!
//! # Startup Sequence
//!
//! 1. Load configuration from `$BIOCHAR_CONFIG` (default
//!    `biochar-config.yaml`; defaults are used when the file is absent)
//! 2. Initialize structured logging (tracing), `RUST_LOG` taking priority
//!    over `logging.level`
//! 3. Build the shared, read-only application state
//! 4. Bind and serve

mod error;

use std::path::PathBuf;
use std::sync::Arc;

use biochar_api::AppState;
use biochar_core::EstimatorConfig;
use biochar_core::config::{LogFormat, LoggingConfig};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::error::BinError;

/// Environment variable naming the configuration file.
const ENV_CONFIG_PATH: &str = "BIOCHAR_CONFIG";

/// Configuration file used when `BIOCHAR_CONFIG` is unset.
const DEFAULT_CONFIG_PATH: &str = "biochar-config.yaml";

/// Application entry point for the estimator server.
///
/// # Errors
///
/// Returns an error if configuration, logging setup, binding, or serving
/// fails.
#[tokio::main]
async fn main() -> Result<(), BinError> {
    // 1. Load configuration.
    let config_path = std::env::var(ENV_CONFIG_PATH)
        .map_or_else(|_| PathBuf::from(DEFAULT_CONFIG_PATH), PathBuf::from);
    let config = EstimatorConfig::from_file_or_default(&config_path)?;

    // 2. Initialize structured logging.
    init_tracing(&config.logging)?;

    info!(
        config_path = %config_path.display(),
        host = config.server.host.as_str(),
        port = config.server.port,
        response_shape = ?config.response.shape,
        max_upload_bytes = config.server.max_upload_bytes,
        "biochar-server starting"
    );

    // 3. Build shared state.
    let state = Arc::new(AppState::from_config(&config));
    info!(
        feedstocks = state.estimator.catalog().len(),
        image_sources = state.estimator.resolutions().sources().len(),
        "Estimator tables loaded"
    );

    // 4. Serve until Ctrl-C.
    biochar_api::start_server(&config.server, state).await?;

    info!("biochar-server exiting");
    Ok(())
}

/// Build the log filter: `RUST_LOG` when set, otherwise the configured level.
fn build_filter(level: &str, rust_log: Option<&str>) -> Result<EnvFilter, BinError> {
    let directives = rust_log.unwrap_or(level);
    EnvFilter::try_new(directives).map_err(|e| BinError::LogFilter {
        level: directives.to_owned(),
        message: e.to_string(),
    })
}

fn init_tracing(logging: &LoggingConfig) -> Result<(), BinError> {
    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let filter = build_filter(&logging.level, rust_log.as_deref())?;

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true);

    match logging.format {
        LogFormat::Json => builder.json().init(),
        LogFormat::Pretty => builder.init(),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filter_from_configured_level() {
        assert!(build_filter("debug", None).is_ok());
    }

    #[test]
    fn rust_log_takes_priority() {
        let filter = build_filter("info", Some("biochar_api=trace"));
        assert!(filter.is_ok_and(|f| f.to_string().contains("biochar_api=trace")));
    }
}
