//! Scripted AI provider for tests and local development.
//!
//! Replies are queued up front and handed out in order; once the queue is
//! empty every call gets a fixed fallback reply. Every request is recorded so
//! tests can assert on the exact prompt that was sent.
//!
//! # Panics
//!
//! Methods panic if an internal lock is poisoned.
//!
//! # Example
//!
//! ```ignore
//! let provider = MockAIProvider::new()
//!     .with_response("Bali sounds great! When are you traveling?\n{\"destination\": \"Bali\"}")
//!     .with_error(MockError::Unavailable { message: "overloaded".into() });
//! ```

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::ports::{
    AIError, AIProvider, CompletionRequest, CompletionResponse, FinishReason, ProviderInfo,
    TokenUsage,
};

/// Reply returned once the script runs out.
pub const FALLBACK_REPLY: &str = "Mock response";

/// Failures the mock can be scripted to produce.
#[derive(Debug, Clone)]
pub enum MockError {
    RateLimited { retry_after_secs: u32 },
    Unavailable { message: String },
    AuthenticationFailed,
    Network { message: String },
    Timeout { timeout_secs: u32 },
}

impl From<MockError> for AIError {
    fn from(err: MockError) -> Self {
        match err {
            MockError::RateLimited { retry_after_secs } => AIError::rate_limited(retry_after_secs),
            MockError::Unavailable { message } => AIError::unavailable(message),
            MockError::AuthenticationFailed => AIError::AuthenticationFailed,
            MockError::Network { message } => AIError::network(message),
            MockError::Timeout { timeout_secs } => AIError::Timeout { timeout_secs },
        }
    }
}

/// Scripted implementation of [`AIProvider`].
///
/// Clones share the script and the call log.
#[derive(Debug, Clone)]
pub struct MockAIProvider {
    script: Arc<Mutex<VecDeque<Result<String, MockError>>>>,
    calls: Arc<Mutex<Vec<CompletionRequest>>>,
    delay: Duration,
}

impl Default for MockAIProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl MockAIProvider {
    pub fn new() -> Self {
        Self {
            script: Arc::new(Mutex::new(VecDeque::new())),
            calls: Arc::new(Mutex::new(Vec::new())),
            delay: Duration::ZERO,
        }
    }

    /// Queues a successful raw reply.
    pub fn with_response(self, content: impl Into<String>) -> Self {
        self.enqueue(Ok(content.into()))
    }

    /// Queues a failure.
    pub fn with_error(self, error: MockError) -> Self {
        self.enqueue(Err(error))
    }

    /// Makes every call wait before answering.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().expect("mock call log poisoned").len()
    }

    /// Every request received so far, oldest first.
    pub fn get_calls(&self) -> Vec<CompletionRequest> {
        self.calls.lock().expect("mock call log poisoned").clone()
    }

    pub fn last_call(&self) -> Option<CompletionRequest> {
        self.calls.lock().expect("mock call log poisoned").last().cloned()
    }

    fn enqueue(self, entry: Result<String, MockError>) -> Self {
        self.script
            .lock()
            .expect("mock script poisoned")
            .push_back(entry);
        self
    }
}

#[async_trait]
impl AIProvider for MockAIProvider {
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, AIError> {
        self.calls
            .lock()
            .expect("mock call log poisoned")
            .push(request);

        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        let next = self
            .script
            .lock()
            .expect("mock script poisoned")
            .pop_front()
            .unwrap_or_else(|| Ok(FALLBACK_REPLY.to_string()));

        let content = next?;
        Ok(CompletionResponse {
            usage: TokenUsage::new(10, content.len() as u32),
            content,
            model: "mock-model".to_string(),
            finish_reason: FinishReason::Stop,
        })
    }

    fn provider_info(&self) -> ProviderInfo {
        ProviderInfo::new("mock", "mock-model", 128_000)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::SessionId;
    use crate::ports::{MessageRole, RequestMetadata};

    fn request(text: &str) -> CompletionRequest {
        CompletionRequest::new(RequestMetadata::new(SessionId::new(), "trace-1"))
            .with_message(MessageRole::User, text)
    }

    #[tokio::test]
    async fn replays_script_in_order_then_falls_back() {
        let provider = MockAIProvider::new()
            .with_response("First")
            .with_response("Second");

        assert_eq!(provider.complete(request("a")).await.unwrap().content, "First");
        assert_eq!(provider.complete(request("b")).await.unwrap().content, "Second");
        assert_eq!(
            provider.complete(request("c")).await.unwrap().content,
            FALLBACK_REPLY
        );
    }

    #[tokio::test]
    async fn scripted_error_is_returned_as_ai_error() {
        let provider =
            MockAIProvider::new().with_error(MockError::RateLimited { retry_after_secs: 30 });

        let err = provider.complete(request("a")).await.unwrap_err();

        assert!(matches!(err, AIError::RateLimited { retry_after_secs: 30 }));
    }

    #[tokio::test]
    async fn records_requests_across_clones() {
        let provider = MockAIProvider::new();
        let shared = provider.clone();
        assert!(provider.last_call().is_none());

        shared.complete(request("Hello")).await.unwrap();

        assert_eq!(provider.call_count(), 1);
        assert_eq!(provider.last_call().unwrap().messages[0].content, "Hello");
    }

    #[tokio::test]
    async fn waits_for_configured_delay() {
        let provider = MockAIProvider::new().with_delay(Duration::from_millis(50));

        let start = std::time::Instant::now();
        provider.complete(request("a")).await.unwrap();

        assert!(start.elapsed() >= Duration::from_millis(50));
    }

    #[test]
    fn mock_errors_map_onto_port_errors() {
        assert!(matches!(
            AIError::from(MockError::AuthenticationFailed),
            AIError::AuthenticationFailed
        ));
        assert!(matches!(
            AIError::from(MockError::Network {
                message: "reset".to_string()
            }),
            AIError::Network(_)
        ));
    }
}
