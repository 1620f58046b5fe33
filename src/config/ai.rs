//! AI provider configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;
use crate::adapters::ai::{DEFAULT_MODEL, GROQ_BASE_URL, OPENAI_BASE_URL, OPENAI_DEFAULT_MODEL};

/// AI provider configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AiConfig {
    /// Which chat completions service to call
    #[serde(default)]
    pub provider: AiProvider,

    /// API key for the selected provider
    pub api_key: Option<String>,

    /// Model override; defaults per provider
    pub model: Option<String>,

    /// Base URL override; defaults per provider
    pub base_url: Option<String>,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

/// AI provider type
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum AiProvider {
    #[default]
    Groq,
    OpenAI,
}

impl AiProvider {
    /// Name reported in logs and provider info
    pub fn name(&self) -> &'static str {
        match self {
            AiProvider::Groq => "groq",
            AiProvider::OpenAI => "openai",
        }
    }

    fn default_base_url(&self) -> &'static str {
        match self {
            AiProvider::Groq => GROQ_BASE_URL,
            AiProvider::OpenAI => OPENAI_BASE_URL,
        }
    }

    fn default_model(&self) -> &'static str {
        match self {
            AiProvider::Groq => DEFAULT_MODEL,
            AiProvider::OpenAI => OPENAI_DEFAULT_MODEL,
        }
    }
}

impl AiConfig {
    /// Get timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Check if an API key is configured
    pub fn has_api_key(&self) -> bool {
        self.api_key.as_ref().is_some_and(|k| !k.trim().is_empty())
    }

    /// Model to request, falling back to the provider default
    pub fn model(&self) -> &str {
        self.model
            .as_deref()
            .unwrap_or_else(|| self.provider.default_model())
    }

    /// Base URL to call, falling back to the provider default
    pub fn base_url(&self) -> &str {
        self.base_url
            .as_deref()
            .unwrap_or_else(|| self.provider.default_base_url())
    }

    /// Validate AI configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !self.has_api_key() {
            return Err(ValidationError::MissingRequired("AI__API_KEY"));
        }
        if self.timeout_secs == 0 || self.timeout_secs > 600 {
            return Err(ValidationError::InvalidTimeout);
        }
        Ok(())
    }
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            provider: AiProvider::default(),
            api_key: None,
            model: None,
            base_url: None,
            timeout_secs: default_timeout(),
        }
    }
}

fn default_timeout() -> u64 {
    120
}
