//! Search Module
//!
//! Turns a topic into a short, ranked list of text snippets using DuckDuckGo:
//! - HTML results page (primary) - result titles scraped from the listing
//! - Instant Answer API (alternative) - related-topic texts from the JSON payload
//!
//! Providers never re-rank or deduplicate. At most [`MAX_SNIPPETS`] snippets
//! are kept, in provider order. An empty listing is a normal outcome
//! ([`SearchOutcome::Empty`]), distinct from a transport failure.

pub mod duckduckgo;
pub mod instant_answer;

pub use duckduckgo::DuckDuckGoHtml;
pub use instant_answer::DuckDuckGoInstant;

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::{SearchBackend, SearchConfig};
use crate::pipeline::Query;

/// Maximum number of snippets a search step yields
pub const MAX_SNIPPETS: usize = 10;

/// Some result pages are only served to browser-like clients
const USER_AGENT: &str =
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0 Safari/537.36";

/// Errors that can occur during search operations
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SearchError {
    #[error("Error fetching data from DuckDuckGo. Status code: {0}")]
    Status(u16),

    #[error("Search request failed: {0}")]
    Request(String),

    #[error("Failed to parse search results: {0}")]
    Parse(String),
}

/// Ordered snippets extracted from one search response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResults {
    snippets: Vec<String>,
}

impl SearchResults {
    /// Keeps the first [`MAX_SNIPPETS`] entries, in order.
    pub fn new(mut snippets: Vec<String>) -> Self {
        snippets.truncate(MAX_SNIPPETS);
        Self { snippets }
    }

    pub fn snippets(&self) -> &[String] {
        &self.snippets
    }

    pub fn len(&self) -> usize {
        self.snippets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snippets.is_empty()
    }

    /// Newline-joined snippets, the form the summarizer embeds in its prompt
    pub fn as_text(&self) -> String {
        self.snippets.join("\n")
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    Found(SearchResults),
    Empty,
}

impl SearchOutcome {
    /// `Empty` when no snippets survived extraction
    pub fn from_snippets(snippets: Vec<String>) -> Self {
        if snippets.is_empty() {
            SearchOutcome::Empty
        } else {
            SearchOutcome::Found(SearchResults::new(snippets))
        }
    }
}

#[async_trait]
pub trait SearchProvider: Send + Sync {
    async fn search(&self, query: &Query) -> Result<SearchOutcome, SearchError>;

    fn name(&self) -> &str;
}

/// Shared HTTP client for every outbound call
pub fn build_http_client(timeout_secs: u64) -> reqwest::Result<reqwest::Client> {
    reqwest::Client::builder()
        .user_agent(USER_AGENT)
        .timeout(Duration::from_secs(timeout_secs))
        .build()
}

/// Create the configured search provider
pub fn create_provider(config: &SearchConfig, client: reqwest::Client) -> Arc<dyn SearchProvider> {
    match config.backend {
        SearchBackend::Html => {
            let provider = match &config.endpoint {
                Some(url) => DuckDuckGoHtml::with_endpoint(client, url),
                None => DuckDuckGoHtml::new(client),
            };
            Arc::new(provider)
        }
        SearchBackend::Instant => {
            let provider = match &config.endpoint {
                Some(url) => DuckDuckGoInstant::with_endpoint(client, url),
                None => DuckDuckGoInstant::new(client),
            };
            Arc::new(provider)
        }
    }
}
