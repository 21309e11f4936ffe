//! Chat completion client for the OpenAI API.

use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::utils::sanitize_answer;

pub const OPENAI_API_URL: &str = "https://api.openai.com/v1";

pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";

const ROLE_USER: &str = "user";

#[derive(Debug, thiserror::Error)]
pub enum CompletionError {
    #[error("OPENAI_KEY is not set")]
    MissingKey,

    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("status {status}: {message}")]
    Api { status: StatusCode, message: String },

    #[error("failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("response contained no choices")]
    NoChoices,
}

#[derive(Debug, Serialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

#[derive(Debug, Serialize)]
pub struct ChatCompletionRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatCompletionChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionChoice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorResponse {
    error: ApiError,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    message: String,
}

/// Something that can answer a question, degrading to an empty answer on failure.
pub trait Completer {
    async fn ask_ai(&self, question: &str) -> String;
}

pub struct OpenAiClient {
    client: Client,
    api_key: Option<String>,
    model: String,
    base_url: String,
}

impl OpenAiClient {
    pub fn new(api_key: Option<String>, model: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key,
            model: model.into(),
            base_url: OPENAI_API_URL.to_string(),
        }
    }

    #[cfg(test)]
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Single-turn request with `question` as the only user message.
    pub fn request_for(&self, question: &str) -> ChatCompletionRequest {
        ChatCompletionRequest {
            model: self.model.clone(),
            messages: vec![ChatMessage {
                role: ROLE_USER.to_string(),
                content: question.to_string(),
            }],
        }
    }

    /// Ask the model and return the first choice with quotes stripped.
    pub async fn complete(&self, question: &str) -> Result<String, CompletionError> {
        let api_key = self.api_key.as_ref().ok_or(CompletionError::MissingKey)?;
        let url = format!("{}/chat/completions", self.base_url.trim_end_matches('/'));

        debug!("Sending {} byte question to {}", question.len(), self.model);
        let response = self
            .client
            .post(&url)
            .bearer_auth(api_key)
            .json(&self.request_for(question))
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let message = match serde_json::from_str::<ApiErrorResponse>(&body) {
                Ok(err) => err.error.message,
                Err(_) => body,
            };
            return Err(CompletionError::Api { status, message });
        }

        let parsed: ChatCompletionResponse = serde_json::from_str(&body)?;
        let choice = parsed
            .choices
            .into_iter()
            .next()
            .ok_or(CompletionError::NoChoices)?;
        Ok(sanitize_answer(&choice.message.content.unwrap_or_default()))
    }
}

impl Completer for OpenAiClient {
    async fn ask_ai(&self, question: &str) -> String {
        match self.complete(question).await {
            Ok(answer) => answer,
            Err(e) => {
                warn!("ChatCompletion error: {}", e);
                String::new()
            }
        }
    }
}
