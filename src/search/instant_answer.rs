//! DuckDuckGo Instant Answer search
//!
//! Uses the JSON API (no key required). Only `RelatedTopics` is read; topic
//! groups (entries carrying a nested `Topics` array) are flattened in place
//! so provider order is preserved.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde_json::Value;
use tracing::{debug, info};

use super::{SearchError, SearchOutcome, SearchProvider, MAX_SNIPPETS};
use crate::pipeline::Query;

pub const DUCKDUCKGO_API_URL: &str = "https://api.duckduckgo.com/";

pub struct DuckDuckGoInstant {
    client: Client,
    endpoint: String,
}

impl DuckDuckGoInstant {
    pub fn new(client: Client) -> Self {
        Self::with_endpoint(client, DUCKDUCKGO_API_URL)
    }

    pub fn with_endpoint(client: Client, endpoint: &str) -> Self {
        Self {
            client,
            endpoint: endpoint.to_string(),
        }
    }
}

#[async_trait]
impl SearchProvider for DuckDuckGoInstant {
    async fn search(&self, query: &Query) -> Result<SearchOutcome, SearchError> {
        info!(query = %query, "Searching DuckDuckGo (instant answer)");

        let response = self
            .client
            .get(&self.endpoint)
            .query(&[
                ("q", query.as_str()),
                ("format", "json"),
                ("no_html", "1"),
                ("skip_disambig", "1"),
            ])
            .send()
            .await
            .map_err(|e| SearchError::Request(e.to_string()))?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(SearchError::Status(status.as_u16()));
        }

        // The API sometimes answers with a JavaScript content type, so decode the text ourselves.
        let body = response
            .text()
            .await
            .map_err(|e| SearchError::Request(e.to_string()))?;
        let data: Value =
            serde_json::from_str(&body).map_err(|e| SearchError::Parse(e.to_string()))?;

        let topics = extract_related_topics(&data);
        debug!(count = topics.len(), results = ?topics, "Search tool results");
        Ok(SearchOutcome::from_snippets(topics))
    }

    fn name(&self) -> &str {
        "duckduckgo-instant"
    }
}

/// Non-empty `Text` of each related topic, first [`MAX_SNIPPETS`] only
pub fn extract_related_topics(data: &Value) -> Vec<String> {
    let mut out = Vec::new();
    if let Some(topics) = data["RelatedTopics"].as_array() {
        collect_topics(topics, &mut out);
    }
    out
}

fn collect_topics(topics: &[Value], out: &mut Vec<String>) {
    for topic in topics {
        if out.len() >= MAX_SNIPPETS {
            return;
        }
        if let Some(text) = topic["Text"].as_str() {
            let text = text.trim();
            if !text.is_empty() {
                out.push(text.to_string());
            }
        } else if let Some(nested) = topic["Topics"].as_array() {
            collect_topics(nested, out);
        }
    }
}
