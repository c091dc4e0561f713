//! Stub collaborators for unit tests

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::Notify;

use crate::config::{
    Config, LLMConfig, PipelineConfig, PipelineMode, SearchBackend, SearchConfig, ServerConfig,
};
use crate::llm::LLMAdapter;
use crate::pipeline::Query;
use crate::search::{SearchError, SearchOutcome, SearchProvider};
use crate::types::{LLMError, LLMRequest, LLMResponse, LLMResult};

/// Search provider returning a canned outcome
pub struct StubSearch {
    outcome: Result<SearchOutcome, SearchError>,
    echo_query: bool,
    gates: HashMap<String, Arc<Notify>>,
    calls: AtomicUsize,
}

impl StubSearch {
    pub fn with_snippets(snippets: &[&str]) -> Self {
        let snippets = snippets.iter().map(|s| s.to_string()).collect();
        Self::with_outcome(Ok(SearchOutcome::from_snippets(snippets)))
    }

    pub fn failing(error: SearchError) -> Self {
        Self::with_outcome(Err(error))
    }

    fn with_outcome(outcome: Result<SearchOutcome, SearchError>) -> Self {
        Self {
            outcome,
            echo_query: false,
            gates: HashMap::new(),
            calls: AtomicUsize::new(0),
        }
    }

    /// Append the query text to every snippet
    pub fn echo_query(mut self) -> Self {
        self.echo_query = true;
        self
    }

    /// Block searches for `topic` until `gate` is notified
    pub fn gated(mut self, topic: &str, gate: Arc<Notify>) -> Self {
        self.gates.insert(topic.to_string(), gate);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SearchProvider for StubSearch {
    async fn search(&self, query: &Query) -> Result<SearchOutcome, SearchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(gate) = self.gates.get(query.as_str()) {
            gate.notified().await;
        }

        match &self.outcome {
            Ok(SearchOutcome::Found(results)) if self.echo_query => {
                let snippets = results
                    .snippets()
                    .iter()
                    .map(|s| format!("{} ({})", s, query))
                    .collect();
                Ok(SearchOutcome::from_snippets(snippets))
            }
            other => other.clone(),
        }
    }

    fn name(&self) -> &str {
        "stub"
    }
}

/// Chat-completion stub that answers `"SUMMARY: " + <last user message>`
pub struct EchoLLM {
    failure: Option<LLMError>,
    requests: Mutex<Vec<LLMRequest>>,
}

impl EchoLLM {
    pub fn new() -> Self {
        Self {
            failure: None,
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(error: LLMError) -> Self {
        Self {
            failure: Some(error),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn requests(&self) -> Vec<LLMRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn last_user_message(&self) -> Option<String> {
        self.requests
            .lock()
            .unwrap()
            .last()
            .and_then(|r| r.messages.iter().rev().find(|m| m.role == "user"))
            .map(|m| m.content.clone())
    }
}

#[async_trait]
impl LLMAdapter for EchoLLM {
    async fn create_chat_completion(&self, request: &LLMRequest) -> LLMResult<LLMResponse> {
        self.requests.lock().unwrap().push(request.clone());
        if let Some(error) = &self.failure {
            return Err(error.clone());
        }

        let prompt = request
            .messages
            .iter()
            .rev()
            .find(|m| m.role == "user")
            .map(|m| m.content.as_str())
            .unwrap_or_default();

        Ok(LLMResponse {
            content: format!("SUMMARY: {}", prompt),
            finish_reason: Some("stop".to_string()),
            usage: None,
        })
    }

    fn provider_name(&self) -> &str {
        "Stub"
    }
}

pub fn test_config() -> Config {
    Config {
        server: ServerConfig {
            port: 0,
            host: "127.0.0.1".to_string(),
            cors_allowed_origins: vec!["*".to_string()],
            log_dir: None,
        },
        llm: LLMConfig {
            provider: "groq".to_string(),
            api_key: "test-key".to_string(),
            api_url: None,
            model: crate::config::DEFAULT_MODEL.to_string(),
            max_tokens: crate::config::DEFAULT_MAX_TOKENS,
        },
        search: SearchConfig {
            backend: SearchBackend::Html,
            endpoint: None,
            timeout_secs: 5,
        },
        pipeline: PipelineConfig {
            mode: PipelineMode::Direct,
            session_ttl_secs: crate::pipeline::session::DEFAULT_SESSION_TTL_SECS,
        },
    }
}
