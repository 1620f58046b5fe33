//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("Invalid request timeout")]
    InvalidTimeout,

    #[error("Readiness threshold must be at least 1")]
    InvalidReadinessThreshold,

    #[error("Temperature must be between 0.0 and 2.0")]
    InvalidTemperature,

    #[error("Token budget for {0} must be greater than zero")]
    InvalidTokenBudget(&'static str),

    #[error("Invalid log filter: {0}")]
    InvalidLogLevel(String),
}
