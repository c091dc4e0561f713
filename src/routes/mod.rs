//! API Routes
//!
//! - `/` - Research page (topic form, spinner, result box)
//! - `/api/research` - Start a research request
//! - `/api/research/{session_id}` - Poll or reset a session
//! - `/api/health` - Health check

pub mod health;
pub mod research;
pub mod ui;

use axum::Router;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::middleware::cors_layer;
use crate::models::AppState;

/// Create the main application router
pub fn create_router(state: AppState) -> Router {
    info!("Creating application router");

    let cors = cors_layer(&state.config.server.cors_allowed_origins);

    Router::new()
        .merge(research::router(state.clone()))
        .merge(health::router(state))
        .merge(ui::router())
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::test_config;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    #[tokio::test]
    async fn test_health_reports_configuration() {
        let state = AppState::from_config(test_config()).unwrap();
        let response = create_router(state)
            .oneshot(Request::builder().uri("/api/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["status"], "ok");
        assert_eq!(body["search_backend"], "html");
        assert_eq!(body["pipeline_mode"], "direct");
        assert_eq!(body["llm_provider"], "groq");
        assert_eq!(body["active_sessions"], 0);
    }

    #[tokio::test]
    async fn test_index_serves_form() {
        let state = AppState::from_config(test_config()).unwrap();
        let response = create_router(state)
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let html = String::from_utf8(bytes.to_vec()).unwrap();
        assert!(html.contains("Enter your topic..."));
        assert!(html.contains("/api/research"));
        assert!(html.contains("state.result_html"));
        assert!(html.contains("showError(err)"));
    }
}
