//! Client for the external text-completion service.
//!
//! The service is a black box: given a system instruction and a prompt
//! it returns freeform text plus optional token usage. Parsing that text
//! into lists is the caller's concern (`aistagram_core::profile`).

use async_trait::async_trait;
use serde::Deserialize;

/// One completion result.
#[derive(Debug, Clone)]
pub struct Completion {
    pub text: String,
    pub usage: Option<CompletionUsage>,
}

/// Token accounting, when the service reports it.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct CompletionUsage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

/// Errors from the completion service.
#[derive(Debug, thiserror::Error)]
pub enum CompletionError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Completion service error ({status}): {body}")]
    ApiError { status: u16, body: String },

    /// The service answered 2xx but the body had no usable text.
    #[error("Malformed completion response: {0}")]
    Malformed(String),
}

/// Text-generation seam used by the prompt generator.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    async fn generate(&self, system: &str, prompt: &str) -> Result<Completion, CompletionError>;
}

/// Default chat-completions endpoint base.
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
/// Default completion model.
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// OpenAI-compatible chat-completions client.
pub struct OpenAiCompletions {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    model: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
    #[serde(default)]
    usage: Option<CompletionUsage>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ChatMessage {
    content: Option<String>,
}

impl OpenAiCompletions {
    pub fn new(api_key: String) -> Self {
        Self::with_base_url(api_key, DEFAULT_BASE_URL.to_string(), DEFAULT_MODEL.to_string())
    }

    pub fn with_base_url(api_key: String, base_url: String, model: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url,
            api_key,
            model,
        }
    }
}

#[async_trait]
impl CompletionClient for OpenAiCompletions {
    async fn generate(&self, system: &str, prompt: &str) -> Result<Completion, CompletionError> {
        let body = serde_json::json!({
            "model": self.model,
            "messages": [
                { "role": "system", "content": system },
                { "role": "user", "content": prompt },
            ],
        });

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(CompletionError::ApiError {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: ChatResponse = response.json().await?;
        let text = parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| CompletionError::Malformed("no choices in response".to_string()))?;

        Ok(Completion {
            text,
            usage: parsed.usage,
        })
    }
}
