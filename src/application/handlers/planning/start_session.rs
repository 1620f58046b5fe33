//! StartSessionHandler - Command handler for opening a planning session.

use std::sync::Arc;

use crate::domain::foundation::SessionId;
use crate::ports::{SessionStore, SessionStoreError};

/// Handler for starting a new, empty planning session.
pub struct StartSessionHandler {
    store: Arc<dyn SessionStore>,
}

impl StartSessionHandler {
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self { store }
    }

    pub async fn handle(&self) -> Result<SessionId, SessionStoreError> {
        let handle = self.store.create().await?;
        let id = handle.lock().await.id();
        Ok(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::storage::InMemorySessionStore;

    #[tokio::test]
    async fn creates_empty_session() {
        let store = Arc::new(InMemorySessionStore::new());
        let handler = StartSessionHandler::new(store.clone());

        let id = handler.handle().await.unwrap();

        let session = store.get(id).await.unwrap();
        let session = session.lock().await;
        assert!(session.turns().is_empty());
        assert!(session.preferences().is_empty());
    }

    #[tokio::test]
    async fn each_call_opens_a_distinct_session() {
        let store = Arc::new(InMemorySessionStore::new());
        let handler = StartSessionHandler::new(store.clone());

        let first = handler.handle().await.unwrap();
        let second = handler.handle().await.unwrap();

        assert_ne!(first, second);
        assert_eq!(store.session_count().await, 2);
    }
}
