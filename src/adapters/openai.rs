//! OpenAI-compatible chat-completion adapter.
//!
//! Sends one system + user message pair per call and returns the first
//! choice's content verbatim. Structured-output parsing happens upstream.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{truncate_body, Completion, ReasoningService, ServiceError};
use crate::config::ReasoningSettings;

const SERVICE: &str = "openai";

/// Reasoning service backed by the chat completions endpoint
pub struct OpenAiReasoning {
    api_key: String,
    settings: ReasoningSettings,
    timeout: Duration,
    client: Client,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    temperature: f32,
    messages: [ChatMessage<'a>; 2],
    #[serde(skip_serializing_if = "Option::is_none")]
    response_format: Option<ResponseFormat>,
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

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
    usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Usage {
    total_tokens: Option<u64>,
}

impl OpenAiReasoning {
    /// Create a client; fails if the key is blank or the HTTP client cannot be built
    pub fn new(
        api_key: impl Into<String>,
        settings: ReasoningSettings,
        timeout: Duration,
    ) -> Result<Self, ServiceError> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(ServiceError::MissingApiKey {
                service: SERVICE.to_string(),
            });
        }

        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ServiceError::transport(SERVICE, e.to_string()))?;

        Ok(Self {
            api_key,
            settings,
            timeout,
            client,
        })
    }

    /// Build the completions URL from the configured base endpoint
    fn completions_url(&self) -> String {
        format!(
            "{}/chat/completions",
            self.settings.endpoint.trim_end_matches('/')
        )
    }
}

#[async_trait]
impl ReasoningService for OpenAiReasoning {
    fn name(&self) -> &str {
        SERVICE
    }

    async fn complete(&self, system: &str, user: &str) -> Result<Completion, ServiceError> {
        let request = ChatRequest {
            model: &self.settings.model,
            temperature: self.settings.temperature,
            messages: [
                ChatMessage {
                    role: "system",
                    content: system,
                },
                ChatMessage {
                    role: "user",
                    content: user,
                },
            ],
            response_format: self.settings.json_mode.then_some(ResponseFormat {
                format_type: "json_object",
            }),
        };

        debug!(model = %self.settings.model, prompt_chars = user.len(), "Calling reasoning service");

        let timeout_seconds = self.timeout.as_secs();
        let response = self
            .client
            .post(self.completions_url())
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| ServiceError::from_reqwest(SERVICE, e, timeout_seconds))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ServiceError::Http {
                service: SERVICE.to_string(),
                status: status.as_u16(),
                body: truncate_body(&body),
            });
        }

        let parsed: ChatResponse = response
            .json()
            .await
            .map_err(|e| ServiceError::from_reqwest(SERVICE, e, timeout_seconds))?;

        let tokens_used = parsed.usage.and_then(|u| u.total_tokens);
        let content = parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .filter(|c| !c.trim().is_empty())
            .ok_or_else(|| ServiceError::EmptyResponse {
                service: SERVICE.to_string(),
            })?;

        Ok(Completion {
            content,
            tokens_used,
        })
    }
}
