//! AI Provider Port - the single upstream completion call.
//!
//! The planner talks to a language model in exactly two shapes: a short
//! conversational turn and a long itinerary request. Both are a list of
//! role-tagged messages plus sampling parameters, so one trait covers them.
//! Adapters translate to a concrete chat completions API or replay a script.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::SessionId;

/// Port for language-model completions.
///
/// The model id belongs to the adapter's own configuration, not to the
/// request.
#[async_trait]
pub trait AIProvider: Send + Sync {
    /// Sends one request and waits for the full reply.
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, AIError>;

    /// Name, model and context window of the backing service.
    fn provider_info(&self) -> ProviderInfo;
}

/// One completion call.
#[derive(Debug, Clone)]
pub struct CompletionRequest {
    /// Messages in the order the model should read them.
    pub messages: Vec<Message>,
    /// Output token budget; provider default when `None`.
    pub max_tokens: Option<u32>,
    /// Sampling temperature; provider default when `None`.
    pub temperature: Option<f32>,
    /// Correlation data for logs.
    pub metadata: RequestMetadata,
}

impl CompletionRequest {
    pub fn new(metadata: RequestMetadata) -> Self {
        Self {
            messages: Vec::new(),
            max_tokens: None,
            temperature: None,
            metadata,
        }
    }

    /// Appends a message.
    pub fn with_message(mut self, role: MessageRole, content: impl Into<String>) -> Self {
        self.messages.push(Message {
            role,
            content: content.into(),
        });
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }
}

/// A role-tagged chunk of prompt text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub role: MessageRole,
    pub content: String,
}

/// Who a message is attributed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    System,
    User,
    Assistant,
}

impl MessageRole {
    /// Wire name used by chat completions APIs.
    pub fn as_str(&self) -> &'static str {
        match self {
            MessageRole::System => "system",
            MessageRole::User => "user",
            MessageRole::Assistant => "assistant",
        }
    }
}

/// Correlation data attached to every call.
#[derive(Debug, Clone)]
pub struct RequestMetadata {
    /// Session the call is made for.
    pub session_id: SessionId,
    /// Per-call id for matching request and response log lines.
    pub trace_id: String,
}

impl RequestMetadata {
    pub fn new(session_id: SessionId, trace_id: impl Into<String>) -> Self {
        Self {
            session_id,
            trace_id: trace_id.into(),
        }
    }
}

/// The model's reply.
#[derive(Debug, Clone)]
pub struct CompletionResponse {
    /// Raw reply text, untouched.
    pub content: String,
    pub usage: TokenUsage,
    /// Model id the provider reports having used.
    pub model: String,
    pub finish_reason: FinishReason,
}

/// Token accounting as reported by the provider.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenUsage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

impl TokenUsage {
    pub fn new(prompt_tokens: u32, completion_tokens: u32) -> Self {
        Self {
            prompt_tokens,
            completion_tokens,
            total_tokens: prompt_tokens + completion_tokens,
        }
    }
}

/// Why generation ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FinishReason {
    /// The model finished on its own.
    Stop,
    /// Cut off at `max_tokens`.
    Length,
    /// Stopped by the provider's safety filter.
    ContentFilter,
}

/// Static description of a provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderInfo {
    /// Service name, e.g. "groq".
    pub name: String,
    /// Model id, e.g. "llama-3.3-70b-versatile".
    pub model: String,
    pub max_context_tokens: u32,
}

impl ProviderInfo {
    pub fn new(name: impl Into<String>, model: impl Into<String>, max_context_tokens: u32) -> Self {
        Self {
            name: name.into(),
            model: model.into(),
            max_context_tokens,
        }
    }
}

/// Failures of a single completion call.
#[derive(Debug, thiserror::Error)]
pub enum AIError {
    #[error("rate limited: retry after {retry_after_secs}s")]
    RateLimited { retry_after_secs: u32 },

    /// Prompt plus history no longer fits the model's context window.
    #[error("context too long: {message}")]
    ContextTooLong { message: String },

    #[error("provider unavailable: {message}")]
    Unavailable { message: String },

    #[error("authentication failed")]
    AuthenticationFailed,

    #[error("network error: {0}")]
    Network(String),

    /// The reply body could not be decoded.
    #[error("parse error: {0}")]
    Parse(String),

    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u32 },
}

impl AIError {
    pub fn rate_limited(retry_after_secs: u32) -> Self {
        Self::RateLimited { retry_after_secs }
    }

    pub fn context_too_long(message: impl Into<String>) -> Self {
        Self::ContextTooLong {
            message: message.into(),
        }
    }

    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }

    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse(message.into())
    }

    /// True if the traveler can reasonably resend.
    ///
    /// Nothing in the crate retries on its own; this only drives the retry
    /// prompt shown by the presentation layer.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            AIError::RateLimited { .. }
                | AIError::Unavailable { .. }
                | AIError::Network(_)
                | AIError::Timeout { .. }
        )
    }
}
