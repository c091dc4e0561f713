//! Research Pipeline
//!
//! Sequences the two steps of a research request and drives the state the
//! UI observes:
//!
//! ```text
//!   submit(topic)
//!        │  empty topic → notice, no state change
//!        ▼
//!   Processing ──► Search ──► Empty ───────────────► Ready("No relevant research results found.")
//!                    │
//!                    ▼ Found(snippets)
//!                 Summarize ──► Ok(markdown) ──────► Ready(summary)
//!                    │
//!                    └──► any error ───────────────► Failed(message)
//! ```
//!
//! Each submission gets a fresh request id; only the latest request of a
//! session may write its result (see [`SessionStore::finish`]).

pub mod session;
pub mod state;

pub use session::SessionStore;
pub use state::PipelineState;

use std::sync::Arc;

use thiserror::Error;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use crate::agents::Summarizer;
use crate::search::{SearchError, SearchOutcome, SearchProvider};
use crate::types::LLMError;

pub const EMPTY_TOPIC_NOTICE: &str = "Please enter a topic to process.";
pub const NO_RESULTS_MESSAGE: &str = "No relevant research results found.";

/// A validated, non-blank research topic
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query(String);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    #[error("Please enter a topic to process.")]
    Empty,
}

impl Query {
    pub fn parse(raw: &str) -> Result<Self, QueryError> {
        let topic = raw.trim();
        if topic.is_empty() {
            return Err(QueryError::Empty);
        }
        Ok(Query(topic.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Query {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Successful end of a run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResearchOutcome {
    Summary(String),
    NoResults,
}

impl ResearchOutcome {
    /// Text shown in the result box
    pub fn into_message(self) -> String {
        match self {
            ResearchOutcome::Summary(summary) => summary,
            ResearchOutcome::NoResults => NO_RESULTS_MESSAGE.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Search(#[from] SearchError),

    #[error(transparent)]
    Summarize(#[from] LLMError),

    #[error("research task aborted: {0}")]
    Aborted(String),
}

impl PipelineError {
    /// Message stored in the `Failed` state.
    ///
    /// Status and shape failures are shown verbatim; everything else gets the
    /// generic prefix.
    pub fn user_message(&self) -> String {
        match self {
            PipelineError::Search(SearchError::Status(_))
            | PipelineError::Summarize(LLMError::Status { .. })
            | PipelineError::Summarize(LLMError::MissingContent { .. }) => self.to_string(),
            other => format!("Error during research process: {}", other),
        }
    }
}

/// Handle to a submitted request
pub struct Submission {
    pub request_id: Uuid,
    /// State installed by the submission (always `Processing`)
    pub state: PipelineState,
    /// Resolves once the result has been written (or discarded as stale)
    pub handle: JoinHandle<bool>,
}

pub struct ResearchPipeline {
    search: Arc<dyn SearchProvider>,
    summarizer: Arc<dyn Summarizer>,
}

impl ResearchPipeline {
    pub fn new(search: Arc<dyn SearchProvider>, summarizer: Arc<dyn Summarizer>) -> Self {
        Self { search, summarizer }
    }

    /// Run search then summarization for one query
    pub async fn run(&self, query: &Query) -> Result<ResearchOutcome, PipelineError> {
        info!(query = %query, provider = self.search.name(), "Starting research pipeline");

        let results = match self.search.search(query).await? {
            SearchOutcome::Found(results) => results,
            SearchOutcome::Empty => {
                info!(query = %query, "Search returned no results, skipping summarization");
                return Ok(ResearchOutcome::NoResults);
            }
        };

        info!(count = results.len(), "Search complete, summarizing");
        let summary = self.summarizer.summarize(query, &results).await?;

        info!(summary_len = summary.len(), "Research pipeline complete");
        Ok(ResearchOutcome::Summary(summary))
    }

    /// Validate the topic, mark the session as processing and run the
    /// pipeline in the background.
    ///
    /// The session is `Processing` before this returns and before any
    /// network call is made. A blank topic leaves the session untouched.
    pub async fn submit(
        self: &Arc<Self>,
        sessions: &SessionStore,
        session_id: Uuid,
        topic: &str,
    ) -> Result<Submission, QueryError> {
        let query = Query::parse(topic)?;
        let (request_id, state) = sessions.begin(session_id).await;
        debug!(%session_id, %request_id, "Research request accepted");

        let pipeline = Arc::clone(self);
        let sessions = sessions.clone();
        let handle = tokio::spawn(async move {
            // Run in a child task so a panic still ends in a Failed state.
            let result = match tokio::spawn(async move { pipeline.run(&query).await }).await {
                Ok(result) => result,
                Err(join_error) => {
                    error!(error = %join_error, "Research task aborted");
                    Err(PipelineError::Aborted(join_error.to_string()))
                }
            };

            if let Err(e) = &result {
                warn!(%session_id, %request_id, error = %e, "Research request failed");
            }

            let applied = sessions.finish(session_id, request_id, result).await;
            if !applied {
                debug!(%session_id, %request_id, "Discarding result of superseded request");
            }
            applied
        });

        Ok(Submission {
            request_id,
            state,
            handle,
        })
    }
}
