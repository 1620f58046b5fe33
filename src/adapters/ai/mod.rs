//! AI Provider Adapters.
//!
//! Implementations of the AIProvider port.
//!
//! ## Available Adapters
//!
//! - `MockAIProvider` - Scripted mock for testing
//! - `OpenAIProvider` - OpenAI-compatible chat completions (Groq, OpenAI)

mod mock_provider;
mod openai_provider;

pub use mock_provider::{MockAIProvider, MockError, FALLBACK_REPLY};
pub use openai_provider::{
    OpenAIConfig, OpenAIProvider, DEFAULT_MODEL, GROQ_BASE_URL, OPENAI_BASE_URL,
    OPENAI_DEFAULT_MODEL,
};
