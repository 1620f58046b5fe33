//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the planner and the outside world. Adapters implement these ports.
//!
//! - `AIProvider` - Upstream language-model completion call
//! - `SessionStore` - In-process registry of planning sessions

mod ai_provider;
mod session_store;

pub use ai_provider::{
    AIError, AIProvider, CompletionRequest, CompletionResponse, FinishReason, Message,
    MessageRole, ProviderInfo, RequestMetadata, TokenUsage,
};
pub use session_store::{SessionHandle, SessionStore, SessionStoreError};
