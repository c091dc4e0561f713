//! Agent System
//!
//! Summarization step of the research pipeline. Two strategies exist:
//!
//! - **Direct**: one chat completion that summarizes the search findings
//! - **Crew**: a research agent analyses the findings, then a writer agent
//!   turns the research notes into a blog post
//!
//! ```text
//! Search findings
//!      │
//!      ├──────────── direct ──────────┐
//!      ▼                              ▼
//! ┌─────────────┐              ┌─────────────┐
//! │  Research   │  notes  ──►  │   Writer    │
//! │   Agent     │              │   Agent     │
//! └─────────────┘              └─────────────┘
//!                                     │
//!                                     ▼
//!                              Markdown summary
//! ```

pub mod crew;
pub mod summarizer;

pub use crew::{AgentRole, ResearchWriterCrew};
pub use summarizer::DirectSummarizer;

use std::sync::Arc;

use async_trait::async_trait;

use crate::config::{LLMConfig, PipelineMode, DEFAULT_MAX_TOKENS, DEFAULT_MODEL};
use crate::llm::LLMAdapter;
use crate::pipeline::Query;
use crate::search::SearchResults;
use crate::types::LLMResult;

#[async_trait]
pub trait Summarizer: Send + Sync {
    /// Produce a markdown write-up of the findings
    async fn summarize(&self, topic: &Query, findings: &SearchResults) -> LLMResult<String>;
}

/// Model and token budget, fixed for the process lifetime
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionSettings {
    pub model: String,
    pub max_tokens: u32,
}

impl Default for CompletionSettings {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            max_tokens: DEFAULT_MAX_TOKENS,
        }
    }
}

impl From<&LLMConfig> for CompletionSettings {
    fn from(config: &LLMConfig) -> Self {
        Self {
            model: config.model.clone(),
            max_tokens: config.max_tokens,
        }
    }
}

/// Create the summarizer for the configured pipeline mode
pub fn create_summarizer(
    mode: PipelineMode,
    llm: Arc<dyn LLMAdapter>,
    settings: CompletionSettings,
) -> Arc<dyn Summarizer> {
    match mode {
        PipelineMode::Direct => Arc::new(DirectSummarizer::new(llm, settings)),
        PipelineMode::Crew => Arc::new(ResearchWriterCrew::new(llm, settings)),
    }
}
