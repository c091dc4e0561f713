use anyhow::{bail, Result};
use serde::Deserialize;
use std::env;

use crate::pipeline::session::DEFAULT_SESSION_TTL_SECS;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub llm: LLMConfig,
    pub search: SearchConfig,
    pub pipeline: PipelineConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub port: u16,
    pub host: String,
    pub cors_allowed_origins: Vec<String>,
    pub log_dir: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LLMConfig {
    pub provider: String,
    pub api_key: String,
    pub api_url: Option<String>,
    pub model: String,
    pub max_tokens: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchBackend {
    /// DuckDuckGo HTML results page, parsed for `.result__title`
    Html,
    /// DuckDuckGo Instant Answer JSON, parsed for `RelatedTopics`
    Instant,
}

impl SearchBackend {
    pub fn from_id(id: &str) -> Option<Self> {
        match id.trim().to_lowercase().as_str() {
            "html" => Some(SearchBackend::Html),
            "instant" | "json" => Some(SearchBackend::Instant),
            _ => None,
        }
    }
}

impl std::fmt::Display for SearchBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SearchBackend::Html => write!(f, "html"),
            SearchBackend::Instant => write!(f, "instant"),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchConfig {
    pub backend: SearchBackend,
    pub endpoint: Option<String>,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PipelineMode {
    /// One chat completion summarizing the findings
    Direct,
    /// Research call followed by a writer call
    Crew,
}

impl PipelineMode {
    pub fn from_id(id: &str) -> Option<Self> {
        match id.trim().to_lowercase().as_str() {
            "direct" => Some(PipelineMode::Direct),
            "crew" | "two-agent" => Some(PipelineMode::Crew),
            _ => None,
        }
    }
}

impl std::fmt::Display for PipelineMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PipelineMode::Direct => write!(f, "direct"),
            PipelineMode::Crew => write!(f, "crew"),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct PipelineConfig {
    pub mode: PipelineMode,
    /// Seconds a finished result stays available before the session is evicted
    pub session_ttl_secs: u64,
}

pub const DEFAULT_MODEL: &str = "llama3-8b-8192";
pub const DEFAULT_MAX_TOKENS: u32 = 1000;

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let backend_id = env::var("SEARCH_BACKEND").unwrap_or_else(|_| "html".to_string());
        let Some(backend) = SearchBackend::from_id(&backend_id) else {
            bail!("Unsupported SEARCH_BACKEND: {}", backend_id);
        };

        let mode_id = env::var("PIPELINE_MODE").unwrap_or_else(|_| "direct".to_string());
        let Some(mode) = PipelineMode::from_id(&mode_id) else {
            bail!("Unsupported PIPELINE_MODE: {}", mode_id);
        };

        Ok(Self {
            server: ServerConfig {
                port: env::var("PORT")
                    .unwrap_or_else(|_| "3000".to_string())
                    .parse()?,
                host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
                cors_allowed_origins: parse_origins(
                    &env::var("ALLOWED_ORIGINS").unwrap_or_else(|_| "*".to_string()),
                ),
                log_dir: env::var("LOG_DIR").ok().filter(|s| !s.is_empty()),
            },
            // The key is not validated here; a missing key surfaces as a 401 from the provider.
            llm: LLMConfig {
                provider: env::var("LLM_PROVIDER").unwrap_or_else(|_| "groq".to_string()),
                api_key: env::var("GROQ_API_KEY")
                    .or_else(|_| env::var("LLM_API_KEY"))
                    .unwrap_or_default(),
                api_url: env::var("GROQ_API_URL")
                    .or_else(|_| env::var("LLM_API_URL"))
                    .ok()
                    .filter(|s| !s.is_empty()),
                model: env::var("LLM_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string()),
                max_tokens: env::var("LLM_MAX_TOKENS")
                    .unwrap_or_else(|_| DEFAULT_MAX_TOKENS.to_string())
                    .parse()?,
            },
            search: SearchConfig {
                backend,
                endpoint: env::var("SEARCH_URL").ok().filter(|s| !s.is_empty()),
                timeout_secs: env::var("HTTP_TIMEOUT_SECS")
                    .unwrap_or_else(|_| "30".to_string())
                    .parse()?,
            },
            pipeline: PipelineConfig {
                mode,
                session_ttl_secs: env::var("SESSION_TTL_SECS")
                    .unwrap_or_else(|_| DEFAULT_SESSION_TTL_SECS.to_string())
                    .parse()?,
            },
        })
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_backend_ids() {
        assert_eq!(SearchBackend::from_id("html"), Some(SearchBackend::Html));
        assert_eq!(SearchBackend::from_id(" Instant "), Some(SearchBackend::Instant));
        assert_eq!(SearchBackend::from_id("json"), Some(SearchBackend::Instant));
        assert_eq!(SearchBackend::from_id("bing"), None);
    }

    #[test]
    fn test_pipeline_mode_ids() {
        assert_eq!(PipelineMode::from_id("direct"), Some(PipelineMode::Direct));
        assert_eq!(PipelineMode::from_id("CREW"), Some(PipelineMode::Crew));
        assert_eq!(PipelineMode::from_id("three-agent"), None);
        assert_eq!(PipelineMode::Crew.to_string(), "crew");
    }

    #[test]
    fn test_parse_origins() {
        assert_eq!(parse_origins("*"), vec!["*"]);
        assert_eq!(
            parse_origins("http://localhost:3000, http://localhost:5173,"),
            vec!["http://localhost:3000", "http://localhost:5173"]
        );
    }
}
