//! GenerateItinerary command handler.
//!
//! Gates on readiness, then asks the engine for the full itinerary. The
//! session itself is never modified, and its lock is not held during the
//! model call.

use std::sync::Arc;

use serde::Serialize;
use thiserror::Error;

use crate::application::engine::{ConversationEngine, SummaryError};
use crate::domain::conversation::Readiness;
use crate::domain::foundation::{SessionId, Timestamp};
use crate::ports::{SessionStore, SessionStoreError};

/// A generated itinerary, as returned by the model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Itinerary {
    pub content: String,
    pub generated_at: Timestamp,
}

/// Errors that can occur when generating an itinerary.
#[derive(Debug, Error)]
pub enum GenerateItineraryError {
    /// Not enough preferences collected yet.
    #[error("Session not ready: {} more preferences needed", .readiness.remaining())]
    NotReady { readiness: Readiness },

    #[error(transparent)]
    Session(#[from] SessionStoreError),

    #[error(transparent)]
    Summary(#[from] SummaryError),
}

impl GenerateItineraryError {
    /// True if requesting again may succeed without further input.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Summary(err) => err.is_retryable(),
            _ => false,
        }
    }
}

/// Handler for generating the final itinerary.
pub struct GenerateItineraryHandler {
    store: Arc<dyn SessionStore>,
    engine: ConversationEngine,
    readiness_threshold: usize,
}

impl GenerateItineraryHandler {
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

    pub async fn handle(&self, session_id: SessionId) -> Result<Itinerary, GenerateItineraryError> {
        let handle = self.store.get(session_id).await?;

        // Snapshot under the lock; the model call runs with it released.
        let session = {
            let session = handle.lock().await;
            let readiness = session.readiness(self.readiness_threshold);
            if !readiness.is_ready() {
                return Err(GenerateItineraryError::NotReady { readiness });
            }
            session.clone()
        };

        let content = self.engine.generate_summary(&session).await?;
        tracing::info!(
            session_id = %session_id,
            length = content.len(),
            "Itinerary generated"
        );

        Ok(Itinerary {
            content,
            generated_at: Timestamp::now(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ai::{MockAIProvider, MockError};
    use crate::adapters::storage::InMemorySessionStore;
    use crate::application::engine::EngineSettings;
    use std::time::Duration;

    const FOUR_PREFERENCES: &str = "Perfect! {\"destination\": \"Bali\", \"duration\": \"7 days\", \"budget\": \"mid-range\", \"interests\": \"temples\"}";

    async fn setup(
        provider: &MockAIProvider,
        raw_reply: &str,
    ) -> (GenerateItineraryHandler, SessionId) {
        let store = Arc::new(InMemorySessionStore::new());
        let handle = store.create().await.unwrap();
        let id = {
            let mut session = handle.lock().await;
            session.apply_exchange("Plan my trip", raw_reply);
            session.id()
        };
        let engine = ConversationEngine::new(Arc::new(provider.clone()), EngineSettings::default());
        (GenerateItineraryHandler::new(store, engine, 4), id)
    }

    #[tokio::test]
    async fn generates_when_ready() {
        let provider = MockAIProvider::new().with_response("Day 1: Arrive in Ubud.");
        let (handler, id) = setup(&provider, FOUR_PREFERENCES).await;

        let itinerary = handler.handle(id).await.unwrap();

        assert_eq!(itinerary.content, "Day 1: Arrive in Ubud.");
        assert_eq!(provider.call_count(), 1);
    }

    #[tokio::test]
    async fn refuses_before_threshold() {
        let provider = MockAIProvider::new();
        let (handler, id) = setup(&provider, "When? {\"destination\": \"Bali\"}").await;

        let err = handler.handle(id).await.unwrap_err();

        assert!(matches!(
            err,
            GenerateItineraryError::NotReady { readiness } if readiness.remaining() == 3
        ));
        assert_eq!(provider.call_count(), 0);
    }

    #[tokio::test]
    async fn provider_failure_propagates() {
        let provider =
            MockAIProvider::new().with_error(MockError::RateLimited { retry_after_secs: 10 });
        let (handler, id) = setup(&provider, FOUR_PREFERENCES).await;

        let err = handler.handle(id).await.unwrap_err();

        assert!(matches!(err, GenerateItineraryError::Summary(_)));
        assert!(err.is_retryable());
    }

    #[tokio::test]
    async fn session_stays_readable_while_itinerary_generates() {
        let store = Arc::new(InMemorySessionStore::new());
        let handle = store.create().await.unwrap();
        let id = {
            let mut session = handle.lock().await;
            session.apply_exchange("Plan my trip", FOUR_PREFERENCES);
            session.id()
        };
        let provider = MockAIProvider::new()
            .with_delay(Duration::from_millis(300))
            .with_response("Day 1: Arrive in Ubud.");
        let engine = ConversationEngine::new(Arc::new(provider.clone()), EngineSettings::default());
        let handler = GenerateItineraryHandler::new(store.clone(), engine, 4);

        let read_during_call = async {
            tokio::time::sleep(Duration::from_millis(20)).await;
            let handle = store.get(id).await.unwrap();
            let session = tokio::time::timeout(Duration::from_millis(100), handle.lock())
                .await
                .expect("session lock held during itinerary call");
            session.preferences().len()
        };

        let (itinerary, collected) = tokio::join!(handler.handle(id), read_during_call);

        assert_eq!(collected, 4);
        assert_eq!(itinerary.unwrap().content, "Day 1: Arrive in Ubud.");
    }

    #[test]
    fn not_ready_message_names_remaining_count() {
        let err = GenerateItineraryError::NotReady {
            readiness: Readiness::new(1, 4),
        };
        assert_eq!(err.to_string(), "Session not ready: 3 more preferences needed");
    }
}
