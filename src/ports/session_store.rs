//! Session Store Port - Registry of live planning sessions.
//!
//! Each session is handed out behind its own async mutex. Holding the lock
//! for the duration of a turn serializes turns on one session while
//! leaving other sessions free to proceed.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::domain::conversation::PlanningSession;
use crate::domain::foundation::SessionId;

/// Shared, lockable handle to one session.
pub type SessionHandle = Arc<Mutex<PlanningSession>>;

/// Errors that can occur during session store operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionStoreError {
    #[error("Session not found: {0}")]
    NotFound(SessionId),
}

/// Port for creating, looking up and discarding sessions.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Registers a fresh, empty session and returns its handle.
    async fn create(&self) -> Result<SessionHandle, SessionStoreError>;

    /// Looks up a live session.
    ///
    /// # Errors
    /// Returns `SessionStoreError::NotFound` if the id is unknown or was
    /// discarded.
    async fn get(&self, id: SessionId) -> Result<SessionHandle, SessionStoreError>;

    /// Drops a session and everything it accumulated.
    ///
    /// # Errors
    /// Returns `SessionStoreError::NotFound` if the id is unknown.
    async fn discard(&self, id: SessionId) -> Result<(), SessionStoreError>;
}
