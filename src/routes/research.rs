use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::Json as ResponseJson,
    routing::{get, post},
    Json, Router,
};
use tracing::info;
use uuid::Uuid;

use crate::models::{AppState, ResearchRequest, ResearchStartResponse, ResearchStatusResponse};
use crate::types::{AppError, AppResult};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/research", post(start_research))
        .route(
            "/api/research/{session_id}",
            get(get_status).delete(reset_session),
        )
        .with_state(state)
}

/// Accept a topic and start the pipeline; the reply already reports `processing`.
async fn start_research(
    State(state): State<AppState>,
    payload: Result<Json<ResearchRequest>, JsonRejection>,
) -> AppResult<(StatusCode, ResponseJson<ResearchStartResponse>)> {
    let Json(request) = payload.map_err(|e| AppError::InvalidRequest(e.body_text()))?;
    let session_id = request.session_id.unwrap_or_else(Uuid::new_v4);
    info!(%session_id, topic = %request.topic, "Received research request");

    let submission = state
        .pipeline
        .submit(&state.sessions, session_id, &request.topic)
        .await
        .map_err(|e| {
            info!(%session_id, "Rejected blank topic");
            AppError::InvalidRequest(e.to_string())
        })?;

    let response = ResearchStartResponse {
        session_id,
        request_id: submission.request_id,
        state: submission.state.into(),
    };

    Ok((StatusCode::ACCEPTED, Json(response)))
}

async fn get_status(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> ResponseJson<ResearchStatusResponse> {
    let current = state.sessions.state(session_id).await;
    Json(ResearchStatusResponse {
        session_id,
        state: current.into(),
    })
}

async fn reset_session(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> ResponseJson<ResearchStatusResponse> {
    info!(%session_id, "Resetting research session");
    state.sessions.reset(session_id).await;
    Json(ResearchStatusResponse {
        session_id,
        state: state.sessions.state(session_id).await.into(),
    })
}
