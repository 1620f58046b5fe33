//! ResetSessionHandler - Command handler for starting over.

use std::sync::Arc;

use crate::domain::foundation::SessionId;
use crate::ports::{SessionStore, SessionStoreError};

/// Handler that discards a session and opens a fresh one in its place.
pub struct ResetSessionHandler {
    store: Arc<dyn SessionStore>,
}

impl ResetSessionHandler {
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self { store }
    }

    /// Returns the id of the replacement session.
    ///
    /// An unknown `session_id` is not an error; the traveler still ends up
    /// with an empty session.
    pub async fn handle(&self, session_id: SessionId) -> Result<SessionId, SessionStoreError> {
        if let Err(err) = self.store.discard(session_id).await {
            tracing::debug!(session_id = %session_id, error = %err, "Nothing to discard on reset");
        }

        let handle = self.store.create().await?;
        let id = handle.lock().await.id();
        tracing::debug!(previous = %session_id, session_id = %id, "Session reset");

        Ok(id)
    }
}
