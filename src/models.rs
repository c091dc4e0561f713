use std::sync::Arc;
use std::time::Duration;

use tracing::info;

use crate::agents::{create_summarizer, CompletionSettings};
use crate::config::Config;
use crate::llm::{LLMProviderConfig, LLM};
use crate::pipeline::{PipelineState, ResearchPipeline, SessionStore};
use crate::search::{build_http_client, create_provider};
use crate::types::{AppError, AppResult};
use crate::utils::render_markdown;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub pipeline: Arc<ResearchPipeline>,
    pub sessions: SessionStore,
}

impl AppState {
    pub fn new(config: Config, pipeline: Arc<ResearchPipeline>) -> Self {
        let ttl = Duration::from_secs(config.pipeline.session_ttl_secs);
        Self {
            config,
            pipeline,
            sessions: SessionStore::with_ttl(ttl),
        }
    }

    /// Wire the configured search provider, LLM and summarizer together
    pub fn from_config(config: Config) -> AppResult<Self> {
        let client = build_http_client(config.search.timeout_secs)
            .map_err(|e| AppError::Internal(format!("Failed to build HTTP client: {}", e)))?;

        let search = create_provider(&config.search, client.clone());
        let llm = LLM::new(
            LLMProviderConfig {
                name: config.llm.provider.clone(),
                api_key: config.llm.api_key.clone(),
                api_url: config.llm.api_url.clone(),
            },
            client,
        )?;
        info!(
            search = search.name(),
            provider = %llm.provider(),
            model = %config.llm.model,
            mode = %config.pipeline.mode,
            "Research pipeline configured"
        );

        let summarizer = create_summarizer(
            config.pipeline.mode,
            Arc::new(llm),
            CompletionSettings::from(&config.llm),
        );
        let pipeline = Arc::new(ResearchPipeline::new(search, summarizer));

        Ok(Self::new(config, pipeline))
    }
}

// API Request/Response types

#[derive(Debug, serde::Deserialize)]
pub struct ResearchRequest {
    #[serde(default)]
    pub topic: String,
    pub session_id: Option<uuid::Uuid>,
}

/// State plus the flags the page renders from. A ready summary is also
/// sent as HTML so the page can show the markdown formatted.
#[derive(Debug, serde::Serialize)]
pub struct StateView {
    #[serde(flatten)]
    pub state: PipelineState,
    pub processing: bool,
    pub result_ready: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result_html: Option<String>,
}

impl From<PipelineState> for StateView {
    fn from(state: PipelineState) -> Self {
        let result_html = match &state {
            PipelineState::Ready { result, .. } => Some(render_markdown(result)),
            _ => None,
        };
        Self {
            processing: state.processing(),
            result_ready: state.result_ready(),
            result_html,
            state,
        }
    }
}

#[derive(Debug, serde::Serialize)]
pub struct ResearchStartResponse {
    pub session_id: uuid::Uuid,
    pub request_id: uuid::Uuid,
    pub state: StateView,
}

#[derive(Debug, serde::Serialize)]
pub struct ResearchStatusResponse {
    pub session_id: uuid::Uuid,
    pub state: StateView,
}

#[derive(Debug, serde::Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
    pub search_backend: String,
    pub llm_provider: String,
    pub pipeline_mode: String,
    pub active_sessions: usize,
}
