// Agentic Blogger - web search plus LLM write-ups behind a small web UI

pub mod config;
pub mod types;
pub mod models;
pub mod llm;
pub mod search;    // DuckDuckGo search providers
pub mod agents;    // Summarization strategies (direct, research/writer crew)
pub mod pipeline;  // Request pipeline and per-session state
pub mod routes;
pub mod middleware;
pub mod utils;

#[cfg(test)]
pub(crate) mod testing;

// Re-exports for convenience
pub use config::Config;
pub use models::AppState;

pub fn create_router(state: AppState) -> axum::Router {
    routes::create_router(state)
}
