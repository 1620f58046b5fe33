//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `TRAVEL_PLANNER` prefix and nested values use double underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use travel_planner::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Using model {}", config.ai.model());
//! ```

mod ai;
mod error;
mod planner;
mod telemetry;

pub use ai::{AiConfig, AiProvider};
pub use error::{ConfigError, ValidationError};
pub use planner::PlannerConfig;
pub use telemetry::TelemetryConfig;

use serde::Deserialize;

/// Root application configuration
///
/// Load using [`AppConfig::load()`] which reads from environment variables.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// AI provider configuration (Groq/OpenAI)
    #[serde(default)]
    pub ai: AiConfig,

    /// Conversation and itinerary tuning
    #[serde(default)]
    pub planner: PlannerConfig,

    /// Logging
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `TRAVEL_PLANNER` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `TRAVEL_PLANNER__AI__API_KEY=gsk_...` -> `ai.api_key = ...`
    /// - `TRAVEL_PLANNER__PLANNER__READINESS_THRESHOLD=5` -> `planner.readiness_threshold = 5`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("TRAVEL_PLANNER")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.ai.validate()?;
        self.planner.validate()?;
        self.telemetry.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::Mutex;

    // Mutex to ensure tests don't run in parallel (env vars are global)
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    fn set_minimal_env() {
        env::set_var("TRAVEL_PLANNER__AI__API_KEY", "gsk_test");
    }

    fn clear_env() {
        env::remove_var("TRAVEL_PLANNER__AI__API_KEY");
        env::remove_var("TRAVEL_PLANNER__AI__PROVIDER");
        env::remove_var("TRAVEL_PLANNER__PLANNER__READINESS_THRESHOLD");
        env::remove_var("TRAVEL_PLANNER__PLANNER__TEMPERATURE");
        env::remove_var("TRAVEL_PLANNER__TELEMETRY__JSON");
    }

    #[test]
    fn test_load_from_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        let result = AppConfig::load();
        clear_env();

        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());
        let config = result.unwrap();
        assert_eq!(config.ai.api_key.as_deref(), Some("gsk_test"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_defaults_apply() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.ai.provider, AiProvider::Groq);
        assert_eq!(config.planner, PlannerConfig::default());
        assert_eq!(config.telemetry, TelemetryConfig::default());
    }

    #[test]
    fn test_nested_overrides() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        env::set_var("TRAVEL_PLANNER__AI__PROVIDER", "openai");
        env::set_var("TRAVEL_PLANNER__PLANNER__READINESS_THRESHOLD", "6");
        env::set_var("TRAVEL_PLANNER__PLANNER__TEMPERATURE", "0.2");
        env::set_var("TRAVEL_PLANNER__TELEMETRY__JSON", "true");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.ai.provider, AiProvider::OpenAI);
        assert_eq!(config.planner.readiness_threshold, 6);
        assert_eq!(config.planner.temperature, 0.2);
        assert!(config.telemetry.json);
    }

    #[test]
    fn test_missing_api_key_fails_validation() {
        let config = AppConfig::default();
        assert!(matches!(
            config.validate(),
            Err(ValidationError::MissingRequired(_))
        ));
    }
}
