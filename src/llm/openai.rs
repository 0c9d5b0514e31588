//! OpenAI-compatible chat-completions client.
//!
//! Works with any endpoint exposing `POST {base_url}/chat/completions`.
//! HTTP failures are classified into [`GeneratorError`] kinds so callers can
//! decide between retrying, shrinking the input, or reporting to the user.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::GeneratorConfig;
use crate::error::GeneratorError;

use super::generator::{GenerationRequest, TextGenerator};

/// Phrase the API uses when the prompt exceeds the model's input window.
const CONTEXT_LENGTH_PHRASE: &str = "maximum context length";

/// Chat-completions generator backed by `reqwest`.
pub struct OpenAiGenerator {
    client: reqwest::Client,
    api_key: String,
    url: String,
    model: String,
    max_tokens: u32,
    temperature: f32,
    timeout_secs: u64,
}

impl OpenAiGenerator {
    /// Build a generator from `config`.
    ///
    /// Fails with [`GeneratorError::MissingApiKey`] when no key is configured.
    pub fn new(config: &GeneratorConfig) -> Result<Self, GeneratorError> {
        let api_key = config
            .api_key
            .clone()
            .ok_or(GeneratorError::MissingApiKey)?;

        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| GeneratorError::Connection(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            api_key,
            url: config.completions_url(),
            model: config.model.clone(),
            max_tokens: config.max_tokens,
            temperature: config.temperature,
            timeout_secs: config.timeout.as_secs(),
        })
    }

    fn body<'a>(&'a self, request: &'a GenerationRequest) -> ChatRequest<'a> {
        ChatRequest {
            model: &self.model,
            messages: [
                ChatMessage {
                    role: "system",
                    content: &request.system,
                },
                ChatMessage {
                    role: "user",
                    content: &request.user,
                },
            ],
            max_tokens: self.max_tokens,
            temperature: self.temperature,
            top_p: 1.0,
            frequency_penalty: 0.0,
            presence_penalty: 0.0,
        }
    }

    fn classify_transport_error(&self, err: reqwest::Error) -> GeneratorError {
        if err.is_timeout() {
            GeneratorError::Timeout(self.timeout_secs)
        } else {
            GeneratorError::Connection(err.to_string())
        }
    }
}

#[async_trait]
impl TextGenerator for OpenAiGenerator {
    async fn generate(&self, request: &GenerationRequest) -> Result<String, GeneratorError> {
        debug!(
            model = %self.model,
            prompt_len = request.system.len() + request.user.len(),
            "Sending completion request"
        );

        let response = self
            .client
            .post(&self.url)
            .bearer_auth(&self.api_key)
            .json(&self.body(request))
            .send()
            .await
            .map_err(|e| self.classify_transport_error(e))?;

        let status = response.status().as_u16();

        if !response.status().is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = api_error_message(&body);
            warn!(status, message = %message, "Generator returned error");
            return Err(classify_status(status, message));
        }

        let body: ChatResponse = response
            .json()
            .await
            .map_err(|e| GeneratorError::InvalidResponse(format!("Failed to parse response: {e}")))?;

        extract_content(body)
    }
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
    max_tokens: u32,
    temperature: f32,
    top_p: f32,
    frequency_penalty: f32,
    presence_penalty: f32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

#[derive(Deserialize)]
struct ApiErrorBody {
    error: ApiErrorDetail,
}

#[derive(Deserialize)]
struct ApiErrorDetail {
    message: String,
}

fn extract_content(response: ChatResponse) -> Result<String, GeneratorError> {
    response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .map(|content| content.trim().to_string())
        .filter(|content| !content.is_empty())
        .ok_or(GeneratorError::EmptyResponse)
}

/// Pull `error.message` out of an error body, or fall back to the raw text.
fn api_error_message(body: &str) -> String {
    match serde_json::from_str::<ApiErrorBody>(body) {
        Ok(parsed) => parsed.error.message,
        Err(_) if body.trim().is_empty() => "Unknown API error".to_string(),
        Err(_) => body.chars().take(500).collect(),
    }
}

/// Map a non-success HTTP status to an error kind.
pub(crate) fn classify_status(status: u16, message: String) -> GeneratorError {
    match status {
        401 | 403 => GeneratorError::InvalidApiKey { status },
        429 => GeneratorError::RateLimited,
        400 | 413 if message.contains(CONTEXT_LENGTH_PHRASE) || status == 413 => {
            GeneratorError::InputTooLarge(message)
        }
        s if s >= 500 => GeneratorError::ServerError { status },
        _ => GeneratorError::Api { status, message },
    }
}
