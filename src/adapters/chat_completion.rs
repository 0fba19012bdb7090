//! OpenAI-compatible chat-completions client.

use crate::domain::ports::{CompletionClient, ConfigProvider};
use crate::utils::error::{Result, TarotError};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const API_KEY_ENV: &str = "OPENAI_API_KEY";

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Clone)]
pub struct ChatCompletionClient {
    endpoint: String,
    model: String,
    api_key: Option<String>,
    temperature: f32,
    client: Client,
}

impl std::fmt::Debug for ChatCompletionClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChatCompletionClient")
            .field("endpoint", &self.endpoint)
            .field("model", &self.model)
            .field("temperature", &self.temperature)
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

impl ChatCompletionClient {
    pub fn new(
        endpoint: impl Into<String>,
        model: impl Into<String>,
        api_key: Option<String>,
        temperature: f32,
        timeout: Duration,
    ) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| TarotError::ConfigError {
                message: format!("Failed to create HTTP client: {}", e),
            })?;

        Ok(Self {
            endpoint: endpoint.into(),
            model: model.into(),
            api_key,
            temperature,
            client,
        })
    }

    /// Builds a client from configuration, falling back to `OPENAI_API_KEY`
    /// when no key is configured.
    pub fn from_config<C: ConfigProvider + ?Sized>(config: &C) -> Result<Self> {
        let api_key = config
            .api_key()
            .map(str::to_string)
            .or_else(|| std::env::var(API_KEY_ENV).ok())
            .filter(|key| !key.trim().is_empty());

        if api_key.is_none() {
            tracing::warn!(
                "No API key configured (set {} or llm.api_key); sending unauthenticated requests",
                API_KEY_ENV
            );
        }

        Self::new(
            config.llm_endpoint(),
            config.model(),
            api_key,
            config.temperature(),
            Duration::from_secs(config.timeout_seconds()),
        )
    }
}

#[async_trait]
impl CompletionClient for ChatCompletionClient {
    async fn submit(&self, prompt: &str) -> Result<String> {
        let body = ChatRequest {
            model: &self.model,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
            temperature: self.temperature,
        };

        tracing::debug!("Making completion request to: {} (model {})", self.endpoint, self.model);
        let mut request = self.client.post(&self.endpoint).json(&body);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request
            .send()
            .await
            .map_err(|e| TarotError::interpretation_with_source("request to the model failed", e))?;

        let status = response.status();
        tracing::debug!("Completion response status: {}", status);

        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(TarotError::interpretation(format!(
                "model endpoint returned {}: {}",
                status,
                detail.trim()
            )));
        }

        let parsed: ChatResponse = response
            .json()
            .await
            .map_err(|e| TarotError::interpretation_with_source("malformed model response", e))?;

        let content = parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .map(|content| content.trim().to_string())
            .unwrap_or_default();

        if content.is_empty() {
            return Err(TarotError::interpretation("the model returned an empty completion"));
        }

        Ok(content)
    }
}
