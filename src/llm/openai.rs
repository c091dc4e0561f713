// OpenAI-compatible chat-completions adapter.
// Groq and OpenAI both accept this wire format; only the URL and the
// provider name in error messages differ.

use crate::llm::provider::LLMAdapter;
use crate::types::{LLMError, LLMRequest, LLMResponse, LLMResult, TokenUsage};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::debug;

pub const OPENAI_CHAT_COMPLETIONS_URL: &str = "https://api.openai.com/v1/chat/completions";

pub struct OpenAIAdapter {
    client: Client,
    api_key: String,
    api_url: String,
    provider_name: String,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    max_tokens: Option<u32>,
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

// Every field is optional so that a 200 with an unexpected shape maps to
// MissingContent rather than a decode failure.
#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
    #[serde(default)]
    usage: Option<ChatUsage>,
}

#[derive(Deserialize)]
struct ChatChoice {
    #[serde(default)]
    message: Option<ChatResponseMessage>,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Deserialize)]
struct ChatResponseMessage {
    #[serde(default)]
    content: Option<String>,
}

// Usage is informational; providers that report it partially still succeed.
#[derive(Deserialize)]
struct ChatUsage {
    #[serde(default)]
    prompt_tokens: u32,
    #[serde(default)]
    completion_tokens: u32,
    #[serde(default)]
    total_tokens: u32,
}

impl OpenAIAdapter {
    pub fn new(client: Client, api_key: &str) -> Self {
        Self::new_with_api_url(client, api_key, OPENAI_CHAT_COMPLETIONS_URL)
    }

    pub fn new_with_api_url(client: Client, api_key: &str, api_url: &str) -> Self {
        Self {
            client,
            api_key: api_key.to_string(),
            api_url: api_url.to_string(),
            provider_name: "OpenAI".to_string(),
        }
    }

    /// Override the provider name used in error messages
    pub fn with_provider_name(mut self, name: &str) -> Self {
        self.provider_name = name.to_string();
        self
    }

    #[cfg(test)]
    pub(crate) fn api_url(&self) -> &str {
        &self.api_url
    }

    fn build_messages(request: &LLMRequest) -> Vec<ChatMessage<'_>> {
        let system = request
            .system_instruction
            .as_deref()
            .map(|content| ChatMessage { role: "system", content });

        system
            .into_iter()
            .chain(request.messages.iter().map(|m| ChatMessage {
                role: m.role.as_str(),
                content: m.content.as_str(),
            }))
            .collect()
    }
}

#[async_trait]
impl LLMAdapter for OpenAIAdapter {
    async fn create_chat_completion(&self, request: &LLMRequest) -> LLMResult<LLMResponse> {
        let body = ChatRequest {
            max_tokens: request.max_tokens,
            model: &request.model,
            messages: Self::build_messages(request),
            temperature: request.temperature,
        };

        let response = self
            .client
            .post(&self.api_url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| LLMError::Request(format!("{} request failed: {}", self.provider_name, e)))?;

        // Anything but 200 carries no completion, even other 2xx codes
        let status = response.status();
        if status != StatusCode::OK {
            return Err(LLMError::Status {
                provider: self.provider_name.clone(),
                status: status.as_u16(),
            });
        }

        let parsed: ChatResponse = response.json().await.map_err(|e| {
            LLMError::Request(format!("Failed to parse {} response: {}", self.provider_name, e))
        })?;

        let choice = parsed.choices.into_iter().next();
        let finish_reason = choice.as_ref().and_then(|c| c.finish_reason.clone());
        let content = choice
            .and_then(|c| c.message)
            .and_then(|m| m.content)
            .filter(|c| !c.is_empty())
            .ok_or_else(|| LLMError::MissingContent {
                provider: self.provider_name.clone(),
            })?;

        debug!(
            provider = %self.provider_name,
            response_len = content.len(),
            "Chat completion received"
        );

        Ok(LLMResponse {
            content,
            finish_reason,
            usage: parsed.usage.map(|u| TokenUsage {
                prompt_tokens: u.prompt_tokens,
                completion_tokens: u.completion_tokens,
                total_tokens: u.total_tokens,
            }),
        })
    }

    fn provider_name(&self) -> &str {
        &self.provider_name
    }
}
