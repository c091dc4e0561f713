//! Direct Summarizer
//!
//! Sends the search findings to the chat-completion endpoint in a single
//! user message and returns the reply as-is.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info};

use super::{CompletionSettings, Summarizer};
use crate::llm::LLMAdapter;
use crate::pipeline::Query;
use crate::search::SearchResults;
use crate::types::{LLMMessage, LLMRequest, LLMResult};

const SUMMARY_INSTRUCTION: &str = "Please summarize the following research findings:";

pub struct DirectSummarizer {
    llm: Arc<dyn LLMAdapter>,
    settings: CompletionSettings,
}

impl DirectSummarizer {
    pub fn new(llm: Arc<dyn LLMAdapter>, settings: CompletionSettings) -> Self {
        Self { llm, settings }
    }

    pub fn create_summary_prompt(findings: &SearchResults) -> String {
        format!("{}\n{}", SUMMARY_INSTRUCTION, findings.as_text())
    }
}

#[async_trait]
impl Summarizer for DirectSummarizer {
    async fn summarize(&self, topic: &Query, findings: &SearchResults) -> LLMResult<String> {
        info!(
            topic = %topic,
            snippets = findings.len(),
            provider = self.llm.provider_name(),
            "Summarizing research findings"
        );

        let request = LLMRequest {
            model: self.settings.model.clone(),
            messages: vec![LLMMessage::user(Self::create_summary_prompt(findings))],
            max_tokens: Some(self.settings.max_tokens),
            temperature: None,
            system_instruction: None,
        };

        let response = self.llm.create_chat_completion(&request).await?;
        if let Some(usage) = &response.usage {
            debug!(
                prompt_tokens = usage.prompt_tokens,
                completion_tokens = usage.completion_tokens,
                total_tokens = usage.total_tokens,
                "Summary token usage"
            );
        }
        Ok(response.content)
    }
}
