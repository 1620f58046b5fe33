//! GetPlanningStateHandler - Query handler for the session sidebar view.

use std::sync::Arc;

use serde::Serialize;

use crate::domain::conversation::{ConversationTurn, PreferenceSet, Readiness};
use crate::domain::foundation::SessionId;
use crate::ports::{SessionStore, SessionStoreError};

/// Snapshot of a session as shown to the traveler.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlanningState {
    pub session_id: SessionId,
    pub turns: Vec<ConversationTurn>,
    pub preferences: PreferenceSet,
    pub readiness: Readiness,
}

/// Handler for reading the current planning state.
pub struct GetPlanningStateHandler {
    store: Arc<dyn SessionStore>,
    readiness_threshold: usize,
}

impl GetPlanningStateHandler {
    pub fn new(store: Arc<dyn SessionStore>, readiness_threshold: usize) -> Self {
        Self {
            store,
            readiness_threshold,
        }
    }

    pub async fn handle(&self, session_id: SessionId) -> Result<PlanningState, SessionStoreError> {
        let handle = self.store.get(session_id).await?;
        let session = handle.lock().await;

        Ok(PlanningState {
            session_id,
            turns: session.turns().to_vec(),
            preferences: session.preferences().clone(),
            readiness: session.readiness(self.readiness_threshold),
        })
    }
}
