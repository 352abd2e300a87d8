//! LLM client — the single point of entry for all generation-service calls.
//!
//! ARCHITECTURAL RULE: no other module may talk to the provider directly.
//! Every enrichment, tailoring, and cover-letter call goes through here.
//!
//! No automatic retries anywhere: a 429 surfaces as `LlmError::RateLimited`
//! and the caller decides whether to prompt the user to resubmit.

use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

const OPENAI_API_URL: &str = "https://api.openai.com/v1/chat/completions";
/// The model used for all generation calls.
/// Intentionally hardcoded to prevent accidental drift between endpoints.
pub const MODEL: &str = "gpt-4o-mini";
const REQUEST_TIMEOUT_SECS: u64 = 120;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("rate limited by generation provider")]
    RateLimited,

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("generation service returned empty content")]
    EmptyContent,
}

/// Per-call knobs. Prompts that expect a JSON object set `json_object` so
/// the provider enforces the shape on its side too.
#[derive(Debug, Clone, Copy)]
pub struct ChatOptions {
    pub temperature: f32,
    pub json_object: bool,
}

impl Default for ChatOptions {
    fn default() -> Self {
        Self {
            temperature: 0.4,
            json_object: false,
        }
    }
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    format_type: &'static str,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_format: Option<ResponseFormat>,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ChatResponseMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ProviderError {
    error: ProviderErrorBody,
}

#[derive(Debug, Deserialize)]
struct ProviderErrorBody {
    message: String,
}

/// The single generation-service client shared through `AppState`.
#[derive(Clone)]
pub struct LlmClient {
    client: Client,
    api_key: String,
}

impl LlmClient {
    pub fn new(api_key: String) -> Self {
        Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
                .build()
                .expect("failed to build HTTP client"),
            api_key,
        }
    }

    /// One chat completion: system prompt + user prompt in, message text out.
    pub async fn complete(
        &self,
        system: &str,
        user: &str,
        options: ChatOptions,
    ) -> Result<String, LlmError> {
        let request_body = ChatRequest {
            model: MODEL,
            messages: vec![
                ChatMessage { role: "system", content: system },
                ChatMessage { role: "user", content: user },
            ],
            temperature: options.temperature,
            response_format: options
                .json_object
                .then_some(ResponseFormat { format_type: "json_object" }),
        };

        let response = self
            .client
            .post(OPENAI_API_URL)
            .bearer_auth(&self.api_key)
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();

        if status.as_u16() == 429 {
            return Err(LlmError::RateLimited);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ProviderError>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            return Err(LlmError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let completion: ChatResponse = response.json().await?;

        let content = completion
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .filter(|c| !c.trim().is_empty())
            .ok_or(LlmError::EmptyContent)?;

        debug!("generation call succeeded ({} chars)", content.len());

        Ok(content)
    }
}
