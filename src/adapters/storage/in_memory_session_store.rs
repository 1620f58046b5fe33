//! In-Memory Session Store Adapter
//!
//! Keeps every live planning session in process memory. Nothing survives a
//! restart.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};

use crate::domain::conversation::PlanningSession;
use crate::domain::foundation::SessionId;
use crate::ports::{SessionHandle, SessionStore, SessionStoreError};

/// In-memory registry of planning sessions
#[derive(Debug, Clone, Default)]
pub struct InMemorySessionStore {
    sessions: Arc<RwLock<HashMap<SessionId, SessionHandle>>>,
}

impl InMemorySessionStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live sessions
    pub async fn session_count(&self) -> usize {
        self.sessions.read().await.len()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn create(&self) -> Result<SessionHandle, SessionStoreError> {
        let session = PlanningSession::new();
        let id = session.id();
        let handle = Arc::new(Mutex::new(session));

        self.sessions.write().await.insert(id, Arc::clone(&handle));
        tracing::info!(session_id = %id, "Planning session created");

        Ok(handle)
    }

    async fn get(&self, id: SessionId) -> Result<SessionHandle, SessionStoreError> {
        self.sessions
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or(SessionStoreError::NotFound(id))
    }

    async fn discard(&self, id: SessionId) -> Result<(), SessionStoreError> {
        match self.sessions.write().await.remove(&id) {
            Some(_) => {
                tracing::info!(session_id = %id, "Planning session discarded");
                Ok(())
            }
            None => Err(SessionStoreError::NotFound(id)),
        }
    }
}
