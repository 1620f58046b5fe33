//! OpenAI-compatible Provider - Implementation of AIProvider for chat
//! completions APIs.
//!
//! Speaks the `/chat/completions` dialect shared by OpenAI and Groq. The
//! default configuration targets Groq's endpoint with
//! `llama-3.3-70b-versatile`.
//!
//! # Configuration
//!
//! ```ignore
//! let config = OpenAIConfig::new(api_key)
//!     .with_model("llama-3.3-70b-versatile")
//!     .with_base_url("https://api.groq.com/openai/v1");
//!
//! let provider = OpenAIProvider::new(config)?;
//! ```
//!
//! Each `complete` call makes exactly one HTTP request. Failures are mapped
//! to `AIError` and returned; nothing is retried here.

use async_trait::async_trait;
use reqwest::{Client, Response};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::ports::{
    AIError, AIProvider, CompletionRequest, CompletionResponse, FinishReason, ProviderInfo,
    TokenUsage,
};

/// Groq's OpenAI-compatible endpoint.
pub const GROQ_BASE_URL: &str = "https://api.groq.com/openai/v1";

/// OpenAI's own endpoint.
pub const OPENAI_BASE_URL: &str = "https://api.openai.com/v1";

/// Model used when none is configured.
pub const DEFAULT_MODEL: &str = "llama-3.3-70b-versatile";

/// Model used against OpenAI's own endpoint when none is configured.
pub const OPENAI_DEFAULT_MODEL: &str = "gpt-4o";

/// Configuration for the chat completions provider.
#[derive(Debug, Clone)]
pub struct OpenAIConfig {
    /// API key for authentication.
    api_key: Secret<String>,
    /// Provider name reported in `ProviderInfo`.
    pub provider_name: String,
    /// Model to use.
    pub model: String,
    /// Base URL for the API.
    pub base_url: String,
    /// Request timeout.
    pub timeout: Duration,
}

impl OpenAIConfig {
    /// Creates a Groq-targeted configuration with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Secret::new(api_key.into()),
            provider_name: "groq".to_string(),
            model: DEFAULT_MODEL.to_string(),
            base_url: GROQ_BASE_URL.to_string(),
            timeout: Duration::from_secs(120),
        }
    }

    /// Sets the provider name.
    pub fn with_provider_name(mut self, name: impl Into<String>) -> Self {
        self.provider_name = name.into();
        self
    }

    /// Sets the model to use.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Sets the base URL.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Exposes the API key (for making requests).
    fn api_key(&self) -> &str {
        self.api_key.expose_secret()
    }
}

/// Chat completions API provider implementation.
pub struct OpenAIProvider {
    config: OpenAIConfig,
    client: Client,
}

impl OpenAIProvider {
    /// Creates a new provider with the given configuration.
    ///
    /// # Errors
    /// Returns `AIError::InvalidRequest` if the HTTP client cannot be built.
    pub fn new(config: OpenAIConfig) -> Result<Self, AIError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| AIError::InvalidRequest(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }

    /// Builds the chat completions endpoint URL.
    fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.config.base_url.trim_end_matches('/'))
    }

    /// Converts our request to the wire format.
    fn to_openai_request(&self, request: &CompletionRequest) -> OpenAIRequest {
        OpenAIRequest {
            model: self.config.model.clone(),
            messages: request
                .messages
                .iter()
                .map(|msg| OpenAIMessage {
                    role: msg.role.as_str().to_string(),
                    content: msg.content.clone(),
                })
                .collect(),
            max_tokens: request.max_tokens,
            temperature: request.temperature,
        }
    }

    /// Sends a request.
    async fn send_request(&self, request: &CompletionRequest) -> Result<Response, AIError> {
        let openai_request = self.to_openai_request(request);

        self.client
            .post(self.completions_url())
            .header("Authorization", format!("Bearer {}", self.config.api_key()))
            .header("Content-Type", "application/json")
            .json(&openai_request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    AIError::Timeout {
                        timeout_secs: self.config.timeout.as_secs() as u32,
                    }
                } else if e.is_connect() {
                    AIError::network(format!("Connection failed: {}", e))
                } else {
                    AIError::network(e.to_string())
                }
            })
    }

    /// Passes successful responses through, maps the rest to errors.
    async fn handle_response_status(&self, response: Response) -> Result<Response, AIError> {
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        let error_body = response.text().await.unwrap_or_default();
        Err(error_for_status(status.as_u16(), error_body))
    }

    /// Parses a successful response body.
    async fn parse_response(&self, response: Response) -> Result<CompletionResponse, AIError> {
        let response = self.handle_response_status(response).await?;

        let openai_response: OpenAIResponse = response
            .json()
            .await
            .map_err(|e| AIError::parse(format!("Failed to parse response: {}", e)))?;

        into_completion(openai_response)
    }
}

#[async_trait]
impl AIProvider for OpenAIProvider {
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, AIError> {
        tracing::debug!(
            session_id = %request.metadata.session_id,
            trace_id = %request.metadata.trace_id,
            model = %self.config.model,
            messages = request.messages.len(),
            "Sending chat completion request"
        );

        let response = self.send_request(&request).await?;
        let completion = self.parse_response(response).await?;

        tracing::debug!(
            trace_id = %request.metadata.trace_id,
            prompt_tokens = completion.usage.prompt_tokens,
            completion_tokens = completion.usage.completion_tokens,
            finish_reason = ?completion.finish_reason,
            "Chat completion received"
        );

        Ok(completion)
    }

    fn provider_info(&self) -> ProviderInfo {
        let max_context = match self.config.model.as_str() {
            m if m.starts_with("llama-3.3") || m.starts_with("llama-3.1") => 128000,
            m if m.starts_with("gpt-4o") || m.starts_with("gpt-4-turbo") => 128000,
            m if m.starts_with("gpt-3.5") => 16385,
            m if m.starts_with("gpt-4") => 8192,
            _ => 8192,
        };

        ProviderInfo::new(&self.config.provider_name, &self.config.model, max_context)
    }
}

/// Maps a non-success HTTP status and body to an `AIError`.
fn error_for_status(status: u16, error_body: String) -> AIError {
    match status {
        401 | 403 => AIError::AuthenticationFailed,
        429 => AIError::rate_limited(parse_retry_after(&error_body)),
        400 | 413 => {
            if error_body.contains("maximum context length")
                || error_body.contains("context_length_exceeded")
            {
                AIError::context_too_long(error_body)
            } else {
                AIError::InvalidRequest(error_body)
            }
        }
        500..=599 => AIError::unavailable(format!("Server error {}: {}", status, error_body)),
        _ => AIError::network(format!("Unexpected status {}: {}", status, error_body)),
    }
}

/// Parses retry-after seconds from an error body, defaulting to 30.
fn parse_retry_after(error_body: &str) -> u32 {
    serde_json::from_str::<serde_json::Value>(error_body)
        .ok()
        .and_then(|parsed| {
            let message = parsed.get("error")?.get("message")?.as_str()?.to_string();
            let idx = message.find("try again in ")?;
            let rest = &message[idx + "try again in ".len()..];
            let digits: String = rest.chars().take_while(|c| c.is_ascii_digit()).collect();
            digits.parse::<u32>().ok()
        })
        .unwrap_or(30)
}

/// Converts a decoded response body into our completion type.
fn into_completion(openai_response: OpenAIResponse) -> Result<CompletionResponse, AIError> {
    let choice = openai_response
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| AIError::parse("No choices in response"))?;

    let finish_reason = match choice.finish_reason.as_deref() {
        Some("length") => FinishReason::Length,
        Some("content_filter") => FinishReason::ContentFilter,
        _ => FinishReason::Stop,
    };

    let usage = openai_response
        .usage
        .map(|u| TokenUsage::new(u.prompt_tokens, u.completion_tokens))
        .unwrap_or_default();

    Ok(CompletionResponse {
        content: choice.message.content.unwrap_or_default(),
        usage,
        model: openai_response.model,
        finish_reason,
    })
}

// ----- Chat Completions API Types -----

#[derive(Debug, Serialize)]
struct OpenAIRequest {
    model: String,
    messages: Vec<OpenAIMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

#[derive(Debug, Serialize)]
struct OpenAIMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct OpenAIResponse {
    model: String,
    choices: Vec<OpenAIChoice>,
    usage: Option<OpenAIUsage>,
}

#[derive(Debug, Deserialize)]
struct OpenAIChoice {
    message: OpenAIResponseMessage,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OpenAIResponseMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OpenAIUsage {
    prompt_tokens: u32,
    completion_tokens: u32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::SessionId;
    use crate::ports::{MessageRole, RequestMetadata};

    fn provider(config: OpenAIConfig) -> OpenAIProvider {
        OpenAIProvider::new(config).unwrap()
    }

    #[test]
    fn config_defaults_target_groq() {
        let config = OpenAIConfig::new("gsk-test");
        assert_eq!(config.provider_name, "groq");
        assert_eq!(config.model, "llama-3.3-70b-versatile");
        assert_eq!(config.base_url, GROQ_BASE_URL);
        assert_eq!(config.timeout, Duration::from_secs(120));
        assert_eq!(config.api_key(), "gsk-test");
    }

    #[test]
    fn config_builder_works() {
        let config = OpenAIConfig::new("sk-test")
            .with_provider_name("openai")
            .with_model("gpt-4o")
            .with_base_url(OPENAI_BASE_URL)
            .with_timeout(Duration::from_secs(30));

        assert_eq!(config.provider_name, "openai");
        assert_eq!(config.model, "gpt-4o");
        assert_eq!(config.base_url, OPENAI_BASE_URL);
        assert_eq!(config.timeout, Duration::from_secs(30));
    }

    #[test]
    fn completions_url_tolerates_trailing_slash() {
        let p = provider(OpenAIConfig::new("k").with_base_url("https://example.com/v1/"));
        assert_eq!(p.completions_url(), "https://example.com/v1/chat/completions");
    }

    #[test]
    fn request_carries_messages_and_sampling() {
        let p = provider(OpenAIConfig::new("k"));
        let request = CompletionRequest::new(RequestMetadata::new(SessionId::new(), "t"))
            .with_message(MessageRole::System, "collector")
            .with_message(MessageRole::User, "User: hi")
            .with_max_tokens(400)
            .with_temperature(0.7);

        let json = serde_json::to_value(p.to_openai_request(&request)).unwrap();

        assert_eq!(json["model"], "llama-3.3-70b-versatile");
        assert_eq!(json["max_tokens"], 400);
        assert_eq!(json["messages"][0]["role"], "system");
        assert_eq!(json["messages"][1]["role"], "user");
        assert_eq!(json["messages"][1]["content"], "User: hi");
    }

    #[test]
    fn request_omits_unset_options() {
        let p = provider(OpenAIConfig::new("k"));
        let request = CompletionRequest::new(RequestMetadata::new(SessionId::new(), "t"));
        let json = serde_json::to_value(p.to_openai_request(&request)).unwrap();
        assert!(json.get("max_tokens").is_none());
        assert!(json.get("temperature").is_none());
    }

    #[test]
    fn parses_completion_body() {
        let body = r#"{
            "model": "llama-3.3-70b-versatile",
            "choices": [{"message": {"role": "assistant", "content": "Where to?"}, "finish_reason": "stop"}],
            "usage": {"prompt_tokens": 12, "completion_tokens": 4}
        }"#;
        let decoded: OpenAIResponse = serde_json::from_str(body).unwrap();

        let completion = into_completion(decoded).unwrap();

        assert_eq!(completion.content, "Where to?");
        assert_eq!(completion.finish_reason, FinishReason::Stop);
        assert_eq!(completion.usage.total_tokens, 16);
    }

    #[test]
    fn length_finish_reason_is_preserved() {
        let body = r#"{"model": "m", "choices": [{"message": {"content": "Day 1"}, "finish_reason": "length"}]}"#;
        let completion = into_completion(serde_json::from_str(body).unwrap()).unwrap();
        assert_eq!(completion.finish_reason, FinishReason::Length);
        assert_eq!(completion.usage, TokenUsage::default());
    }

    #[test]
    fn empty_choices_is_parse_error() {
        let body = r#"{"model": "m", "choices": []}"#;
        let err = into_completion(serde_json::from_str(body).unwrap()).unwrap_err();
        assert!(matches!(err, AIError::Parse(_)));
    }

    #[test]
    fn maps_status_codes() {
        assert!(matches!(error_for_status(401, String::new()), AIError::AuthenticationFailed));
        assert!(matches!(
            error_for_status(429, String::new()),
            AIError::RateLimited { retry_after_secs: 30 }
        ));
        assert!(matches!(
            error_for_status(400, "context_length_exceeded".to_string()),
            AIError::ContextTooLong { .. }
        ));
        assert!(matches!(
            error_for_status(400, "bad field".to_string()),
            AIError::InvalidRequest(_)
        ));
        assert!(matches!(error_for_status(503, String::new()), AIError::Unavailable { .. }));
        assert!(matches!(error_for_status(302, String::new()), AIError::Network(_)));
    }

    #[test]
    fn parse_retry_after_from_message() {
        let error = r#"{"error":{"message":"Rate limit reached. Please try again in 12s."}}"#;
        assert_eq!(parse_retry_after(error), 12);
    }

    #[test]
    fn parse_retry_after_default() {
        assert_eq!(parse_retry_after(r#"{"error":{"message":"slow down"}}"#), 30);
        assert_eq!(parse_retry_after("not json"), 30);
    }

    #[test]
    fn provider_info_reports_configured_model() {
        let p = provider(OpenAIConfig::new("k"));
        let info = p.provider_info();
        assert_eq!(info.name, "groq");
        assert_eq!(info.model, "llama-3.3-70b-versatile");
        assert_eq!(info.max_context_tokens, 128000);
    }
}
