//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the planner to external systems:
//! - `ai` - Language-model providers (chat completions, mock)
//! - `storage` - Session registry (in-memory)

pub mod ai;
pub mod storage;

pub use ai::{MockAIProvider, MockError, OpenAIConfig, OpenAIProvider};
pub use storage::InMemorySessionStore;
