use std::collections::HashMap;
use std::sync::Arc;

use chrono::{Duration, Utc};
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

use super::{PipelineError, PipelineState, ResearchOutcome};

/// How long a settled result stays readable when no TTL is configured
pub const DEFAULT_SESSION_TTL_SECS: u64 = 3600;

/// Per-session pipeline state, held in memory only.
///
/// A session has at most one current request. Starting a new one supersedes
/// the previous request; results are only written for the current request id.
/// Settled sessions older than the TTL are dropped whenever a request begins.
#[derive(Clone)]
pub struct SessionStore {
    inner: Arc<RwLock<HashMap<Uuid, PipelineState>>>,
    ttl: Duration,
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::with_ttl(std::time::Duration::from_secs(DEFAULT_SESSION_TTL_SECS))
    }
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_ttl(ttl: std::time::Duration) -> Self {
        Self {
            inner: Arc::new(RwLock::new(HashMap::new())),
            ttl: Duration::from_std(ttl).unwrap_or_else(|_| Duration::days(365)),
        }
    }

    /// Current state, `Idle` for unknown sessions
    pub async fn state(&self, session_id: Uuid) -> PipelineState {
        self.inner
            .read()
            .await
            .get(&session_id)
            .cloned()
            .unwrap_or_default()
    }

    /// Install `Processing` under a new request id
    pub async fn begin(&self, session_id: Uuid) -> (Uuid, PipelineState) {
        let request_id = Uuid::new_v4();
        let now = Utc::now();
        let state = PipelineState::Processing {
            request_id,
            started_at: now,
        };

        let mut sessions = self.inner.write().await;
        if let Some(cutoff) = now.checked_sub_signed(self.ttl) {
            let before = sessions.len();
            // In-flight requests are kept regardless of age
            sessions.retain(|_, s| s.finished_at().map_or(true, |at| at > cutoff));
            let evicted = before - sessions.len();
            if evicted > 0 {
                debug!(evicted, "Evicted expired research sessions");
            }
        }
        sessions.insert(session_id, state.clone());
        (request_id, state)
    }

    /// Store the result if `request_id` is still the session's current request.
    /// Returns whether the result was applied.
    pub async fn finish(
        &self,
        session_id: Uuid,
        request_id: Uuid,
        result: Result<ResearchOutcome, PipelineError>,
    ) -> bool {
        let mut sessions = self.inner.write().await;

        let current = sessions
            .get(&session_id)
            .filter(|s| s.processing())
            .and_then(PipelineState::request_id)
            == Some(request_id);
        if !current {
            return false;
        }

        let finished_at = Utc::now();
        let next = match result {
            Ok(outcome) => PipelineState::Ready {
                request_id,
                result: outcome.into_message(),
                finished_at,
            },
            Err(e) => PipelineState::Failed {
                request_id,
                error: e.user_message(),
                finished_at,
            },
        };
        sessions.insert(session_id, next);
        true
    }

    /// Forget the session; later results for it are discarded
    pub async fn reset(&self, session_id: Uuid) {
        self.inner.write().await.remove(&session_id);
    }

    /// Number of tracked sessions, settled ones included
    pub async fn len(&self) -> usize {
        self.inner.read().await.len()
    }
}
