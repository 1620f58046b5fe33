//! Wiring from configuration to ready-to-use handlers.
//!
//! A presentation layer loads [`AppConfig`], calls [`PlannerHandlers::from_config`]
//! and drives the five handlers it gets back.

use std::sync::Arc;

use thiserror::Error;

use crate::adapters::ai::{OpenAIConfig, OpenAIProvider};
use crate::adapters::storage::InMemorySessionStore;
use crate::application::{
    ConversationEngine, EngineSettings, GenerateItineraryHandler, GetPlanningStateHandler,
    ResetSessionHandler, SendMessageHandler, StartSessionHandler,
};
use crate::config::{AiConfig, AppConfig, PlannerConfig, ValidationError};
use crate::ports::{AIError, AIProvider, SessionStore};

/// Errors raised while assembling the planner.
#[derive(Debug, Error)]
pub enum BootstrapError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ValidationError),

    #[error("failed to build AI provider: {0}")]
    Provider(#[from] AIError),
}

/// Builds the chat completions provider described by `config`.
pub fn build_provider(config: &AiConfig) -> Result<Arc<dyn AIProvider>, BootstrapError> {
    let api_key = config
        .api_key
        .as_deref()
        .filter(|key| !key.trim().is_empty())
        .ok_or(ValidationError::MissingRequired("AI__API_KEY"))?;

    let provider_config = OpenAIConfig::new(api_key)
        .with_provider_name(config.provider.name())
        .with_model(config.model())
        .with_base_url(config.base_url())
        .with_timeout(config.timeout());

    tracing::info!(
        provider = config.provider.name(),
        model = config.model(),
        "AI provider configured"
    );

    Ok(Arc::new(OpenAIProvider::new(provider_config)?))
}

/// The full set of planning handlers sharing one store and one engine.
pub struct PlannerHandlers {
    pub start_session: StartSessionHandler,
    pub send_message: SendMessageHandler,
    pub get_planning_state: GetPlanningStateHandler,
    pub generate_itinerary: GenerateItineraryHandler,
    pub reset_session: ResetSessionHandler,
}

impl PlannerHandlers {
    /// Assembles handlers over an explicit store and provider.
    pub fn new(
        store: Arc<dyn SessionStore>,
        provider: Arc<dyn AIProvider>,
        planner: &PlannerConfig,
    ) -> Self {
        let engine = ConversationEngine::new(provider, EngineSettings::from(planner));
        let threshold = planner.readiness_threshold;

        Self {
            start_session: StartSessionHandler::new(Arc::clone(&store)),
            send_message: SendMessageHandler::new(Arc::clone(&store), engine.clone(), threshold),
            get_planning_state: GetPlanningStateHandler::new(Arc::clone(&store), threshold),
            generate_itinerary: GenerateItineraryHandler::new(Arc::clone(&store), engine, threshold),
            reset_session: ResetSessionHandler::new(store),
        }
    }

    /// Validates `config` and assembles handlers over an in-memory store.
    pub fn from_config(config: &AppConfig) -> Result<Self, BootstrapError> {
        config.validate()?;
        let provider = build_provider(&config.ai)?;
        let store: Arc<dyn SessionStore> = Arc::new(InMemorySessionStore::new());
        Ok(Self::new(store, provider, &config.planner))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AiProvider;

    fn config_with_key(key: Option<&str>) -> AppConfig {
        AppConfig {
            ai: AiConfig {
                api_key: key.map(str::to_string),
                ..AiConfig::default()
            },
            ..AppConfig::default()
        }
    }

    #[test]
    fn provider_uses_configured_model() {
        let ai = AiConfig {
            provider: AiProvider::OpenAI,
            api_key: Some("sk-test".to_string()),
            ..AiConfig::default()
        };

        let provider = build_provider(&ai).unwrap();
        let info = provider.provider_info();

        assert_eq!(info.name, "openai");
        assert_eq!(info.model, "gpt-4o");
    }

    #[test]
    fn missing_key_is_a_config_error() {
        let err = build_provider(&AiConfig::default()).err().unwrap();
        assert!(matches!(
            err,
            BootstrapError::Config(ValidationError::MissingRequired(_))
        ));
    }

    #[test]
    fn from_config_validates_first() {
        let mut config = config_with_key(Some("gsk_test"));
        config.planner.readiness_threshold = 0;

        assert!(matches!(
            PlannerHandlers::from_config(&config),
            Err(BootstrapError::Config(ValidationError::InvalidReadinessThreshold))
        ));
    }

    #[tokio::test]
    async fn from_config_builds_working_handlers() {
        let handlers = PlannerHandlers::from_config(&config_with_key(Some("gsk_test"))).unwrap();

        let id = handlers.start_session.handle().await.unwrap();
        let state = handlers.get_planning_state.handle(id).await.unwrap();

        assert!(state.turns.is_empty());
        assert_eq!(state.readiness.required, 4);
    }
}
