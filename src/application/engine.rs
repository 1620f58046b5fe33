//! Conversation engine.
//!
//! Drives one preference-collection turn or one itinerary request against the
//! AI provider. The session is only mutated after the provider answers, so a
//! failed call leaves history and preferences exactly as they were.

use std::sync::Arc;

use thiserror::Error;
use uuid::Uuid;

use crate::config::PlannerConfig;
use crate::domain::conversation::prompts::{
    collector_system_prompt, itinerary_prompt, known_preferences_prompt, ITINERARY_SYSTEM_PROMPT,
};
use crate::domain::conversation::{ExtractionOutcome, PlanningSession};
use crate::ports::{AIError, AIProvider, CompletionRequest, MessageRole, RequestMetadata};

/// Sampling parameters for the two model calls.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EngineSettings {
    pub turn_max_tokens: u32,
    pub summary_max_tokens: u32,
    pub temperature: f32,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self::from(&PlannerConfig::default())
    }
}

impl From<&PlannerConfig> for EngineSettings {
    fn from(config: &PlannerConfig) -> Self {
        Self {
            turn_max_tokens: config.turn_max_tokens,
            summary_max_tokens: config.summary_max_tokens,
            temperature: config.temperature,
        }
    }
}

/// Result of a successful turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnOutcome {
    /// Conversational reply, trailer removed.
    pub reply: String,
    /// Preference keys merged during this turn.
    pub learned: Vec<String>,
    /// Full extraction result, including rejected trailers.
    pub extraction: ExtractionOutcome,
}

/// Errors from [`ConversationEngine::process_turn`].
#[derive(Debug, Error)]
pub enum ProcessTurnError {
    #[error("AI provider error: {0}")]
    Provider(#[from] AIError),
}

/// Errors from [`ConversationEngine::generate_summary`].
#[derive(Debug, Error)]
pub enum SummaryError {
    #[error("AI provider error: {0}")]
    Provider(#[from] AIError),
}

impl ProcessTurnError {
    /// True if resending the same message may succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Provider(err) => err.is_retryable(),
        }
    }
}

impl SummaryError {
    /// True if requesting the itinerary again may succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Provider(err) => err.is_retryable(),
        }
    }
}

/// Orchestrates model calls for a planning session.
#[derive(Clone)]
pub struct ConversationEngine {
    provider: Arc<dyn AIProvider>,
    settings: EngineSettings,
}

impl ConversationEngine {
    pub fn new(provider: Arc<dyn AIProvider>, settings: EngineSettings) -> Self {
        Self { provider, settings }
    }

    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    /// Runs one conversational turn.
    ///
    /// Sends the collector prompt, the currently known preferences and the
    /// full transcript ending in `user_text`. On success the exchange is
    /// recorded in `session` and any trailer is merged into its preferences.
    ///
    /// # Errors
    ///
    /// Returns `ProcessTurnError::Provider` when the model call fails. The
    /// session is left untouched in that case.
    pub async fn process_turn(
        &self,
        session: &mut PlanningSession,
        user_text: &str,
    ) -> Result<TurnOutcome, ProcessTurnError> {
        let session_id = session.id();
        let trace_id = Uuid::new_v4().to_string();
        tracing::debug!(
            session_id = %session_id,
            trace_id = %trace_id,
            history_len = session.turns().len(),
            "Processing planning turn"
        );

        let request = CompletionRequest::new(RequestMetadata::new(session_id, trace_id))
            .with_message(MessageRole::System, collector_system_prompt())
            .with_message(
                MessageRole::System,
                known_preferences_prompt(session.preferences()),
            )
            .with_message(MessageRole::User, session.transcript_with(user_text))
            .with_max_tokens(self.settings.turn_max_tokens)
            .with_temperature(self.settings.temperature);

        let response = self.provider.complete(request).await.map_err(|err| {
            tracing::warn!(session_id = %session_id, error = %err, "Planning turn failed");
            err
        })?;

        let applied = session.apply_exchange(user_text, &response.content);
        let learned = applied.extraction.merged_keys().to_vec();

        if !learned.is_empty() {
            tracing::info!(
                session_id = %session_id,
                keys = ?learned,
                total = session.preferences().len(),
                "Preferences learned"
            );
        }

        Ok(TurnOutcome {
            reply: applied.reply,
            learned,
            extraction: applied.extraction,
        })
    }

    /// Requests the full itinerary for the session's preferences.
    ///
    /// Readiness is not checked here. The model output is returned verbatim
    /// and the session is not modified.
    pub async fn generate_summary(&self, session: &PlanningSession) -> Result<String, SummaryError> {
        let session_id = session.id();
        let trace_id = Uuid::new_v4().to_string();
        tracing::debug!(
            session_id = %session_id,
            trace_id = %trace_id,
            preferences = session.preferences().len(),
            "Generating itinerary"
        );

        let request = CompletionRequest::new(RequestMetadata::new(session_id, trace_id))
            .with_message(MessageRole::System, ITINERARY_SYSTEM_PROMPT)
            .with_message(MessageRole::User, itinerary_prompt(session.preferences()))
            .with_max_tokens(self.settings.summary_max_tokens)
            .with_temperature(self.settings.temperature);

        let response = self.provider.complete(request).await.map_err(|err| {
            tracing::warn!(session_id = %session_id, error = %err, "Itinerary generation failed");
            err
        })?;

        Ok(response.content)
    }
}
