use async_trait::async_trait;
use crate::types::{AppError, AppResult, LLMProvider, LLMRequest, LLMResponse, LLMResult};

#[async_trait]
pub trait LLMAdapter: Send + Sync {
    async fn create_chat_completion(&self, request: &LLMRequest) -> LLMResult<LLMResponse>;

    /// Provider name as it appears in error messages ("Groq", "OpenAI")
    fn provider_name(&self) -> &str;
}

/// Configuration for an LLM provider
pub struct LLMProviderConfig {
    pub name: String,
    pub api_key: String,
    /// Full chat-completions URL; the provider default is used when absent
    pub api_url: Option<String>,
}

pub struct LLM {
    adapter: Box<dyn LLMAdapter>,
    provider: LLMProvider,
}

impl LLM {
    pub fn new(config: LLMProviderConfig, client: reqwest::Client) -> AppResult<Self> {
        let provider = LLMProvider::from_id(&config.name).ok_or_else(|| {
            AppError::InvalidRequest(format!("Unsupported provider: {}", config.name))
        })?;

        let adapter: Box<dyn LLMAdapter> = match provider {
            LLMProvider::Groq => Box::new(crate::llm::groq::GroqAdapter::new(
                client,
                &config.api_key,
                config.api_url.as_deref(),
            )),
            LLMProvider::OpenAI => match config.api_url.as_deref() {
                Some(url) => Box::new(crate::llm::openai::OpenAIAdapter::new_with_api_url(
                    client,
                    &config.api_key,
                    url,
                )),
                None => Box::new(crate::llm::openai::OpenAIAdapter::new(client, &config.api_key)),
            },
        };

        Ok(Self { adapter, provider })
    }

    pub fn provider(&self) -> LLMProvider {
        self.provider
    }
}

#[async_trait]
impl LLMAdapter for LLM {
    async fn create_chat_completion(&self, request: &LLMRequest) -> LLMResult<LLMResponse> {
        self.adapter.create_chat_completion(request).await
    }

    fn provider_name(&self) -> &str {
        self.adapter.provider_name()
    }
}
