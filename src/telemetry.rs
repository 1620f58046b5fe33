//! Tracing subscriber setup.
//!
//! `RUST_LOG` wins when set; otherwise the configured `log_level` directive
//! is used.

use thiserror::Error;
use tracing_subscriber::filter::ParseError;
use tracing_subscriber::EnvFilter;

use crate::config::TelemetryConfig;

/// Errors raised while installing the global subscriber.
#[derive(Debug, Error)]
pub enum TelemetryError {
    #[error("invalid log filter: {0}")]
    InvalidFilter(#[from] ParseError),

    #[error("failed to install tracing subscriber: {0}")]
    Install(String),
}

/// Builds the filter from `RUST_LOG`, falling back to `config.log_level`.
pub fn env_filter(config: &TelemetryConfig) -> Result<EnvFilter, TelemetryError> {
    match EnvFilter::try_from_default_env() {
        Ok(filter) => Ok(filter),
        Err(_) => Ok(EnvFilter::try_new(&config.log_level)?),
    }
}

/// Installs the global `fmt` subscriber.
///
/// # Errors
///
/// Returns `TelemetryError::Install` if a global subscriber is already set,
/// rather than panicking.
pub fn init_tracing(config: &TelemetryConfig) -> Result<(), TelemetryError> {
    let filter = env_filter(config)?;
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    let installed = if config.json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
    installed.map_err(|e| TelemetryError::Install(e.to_string()))?;

    tracing::debug!(json = config.json, "Tracing initialized");
    Ok(())
}
