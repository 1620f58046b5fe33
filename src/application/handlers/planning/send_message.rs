//! SendMessage command handler.
//!
//! Validates the traveler's message, runs one conversation turn under the
//! session lock and reports what was learned.

use std::sync::Arc;

use thiserror::Error;

use crate::application::engine::{ConversationEngine, ProcessTurnError};
use crate::domain::conversation::Readiness;
use crate::domain::foundation::SessionId;
use crate::ports::{SessionStore, SessionStoreError};

/// Command to send a message in a planning session.
#[derive(Debug, Clone)]
pub struct SendMessageCommand {
    /// Session the message belongs to.
    pub session_id: SessionId,
    /// The message content.
    pub content: String,
}

impl SendMessageCommand {
    pub fn new(session_id: SessionId, content: impl Into<String>) -> Self {
        Self {
            session_id,
            content: content.into(),
        }
    }
}

/// Errors that can occur when sending a message.
#[derive(Debug, Error)]
pub enum SendMessageError {
    /// Message content is empty or whitespace only.
    #[error("Validation error: message content cannot be empty")]
    EmptyContent,

    #[error(transparent)]
    Session(#[from] SessionStoreError),

    #[error(transparent)]
    Turn(#[from] ProcessTurnError),
}

impl SendMessageError {
    /// True if resending the same message may succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Turn(err) => err.is_retryable(),
            _ => false,
        }
    }
}

/// Result of sending a message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SendMessageResult {
    /// Assistant reply to display.
    pub reply: String,
    /// Preference keys learned this turn.
    pub learned: Vec<String>,
    /// Readiness after the turn.
    pub readiness: Readiness,
}

/// Handler for sending messages.
pub struct SendMessageHandler {
    store: Arc<dyn SessionStore>,
    engine: ConversationEngine,
    readiness_threshold: usize,
}

impl SendMessageHandler {
    pub fn new(
        store: Arc<dyn SessionStore>,
        engine: ConversationEngine,
        readiness_threshold: usize,
    ) -> Self {
        Self {
            store,
            engine,
            readiness_threshold,
        }
    }

    pub async fn handle(
        &self,
        cmd: SendMessageCommand,
    ) -> Result<SendMessageResult, SendMessageError> {
        if cmd.content.trim().is_empty() {
            return Err(SendMessageError::EmptyContent);
        }

        let handle = self.store.get(cmd.session_id).await?;
        let mut session = handle.lock().await;

        let outcome = self.engine.process_turn(&mut session, &cmd.content).await?;
        let readiness = session.readiness(self.readiness_threshold);

        if readiness.is_ready() && !outcome.learned.is_empty() {
            tracing::info!(
                session_id = %cmd.session_id,
                collected = readiness.collected,
                "Session ready for itinerary"
            );
        }

        Ok(SendMessageResult {
            reply: outcome.reply,
            learned: outcome.learned,
            readiness,
        })
    }
}
