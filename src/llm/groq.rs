use crate::llm::provider::LLMAdapter;
use crate::types::{LLMRequest, LLMResponse, LLMResult};
use async_trait::async_trait;
use reqwest::Client;

pub const GROQ_CHAT_COMPLETIONS_URL: &str = "https://api.groq.com/openai/v1/chat/completions";

pub struct GroqAdapter {
    inner: crate::llm::openai::OpenAIAdapter,
}

impl GroqAdapter {
    pub fn new(client: Client, api_key: &str, api_url: Option<&str>) -> Self {
        let url = api_url.unwrap_or(GROQ_CHAT_COMPLETIONS_URL);
        Self {
            inner: crate::llm::openai::OpenAIAdapter::new_with_api_url(client, api_key, url)
                .with_provider_name("Groq"),
        }
    }

    #[cfg(test)]
    pub(crate) fn api_url(&self) -> &str {
        self.inner.api_url()
    }
}

#[async_trait]
impl LLMAdapter for GroqAdapter {
    async fn create_chat_completion(&self, request: &LLMRequest) -> LLMResult<LLMResponse> {
        self.inner.create_chat_completion(request).await
    }

    fn provider_name(&self) -> &str {
        self.inner.provider_name()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_and_custom_url() {
        let adapter = GroqAdapter::new(Client::new(), "key", None);
        assert_eq!(adapter.api_url(), GROQ_CHAT_COMPLETIONS_URL);
        assert_eq!(adapter.provider_name(), "Groq");

        let adapter = GroqAdapter::new(Client::new(), "key", Some("http://127.0.0.1:8080/chat"));
        assert_eq!(adapter.api_url(), "http://127.0.0.1:8080/chat");
    }
}
