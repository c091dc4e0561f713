use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

/// Observable state of a session's research request
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PipelineState {
    Idle,
    Processing {
        request_id: Uuid,
        started_at: DateTime<Utc>,
    },
    Ready {
        request_id: Uuid,
        result: String,
        finished_at: DateTime<Utc>,
    },
    Failed {
        request_id: Uuid,
        error: String,
        finished_at: DateTime<Utc>,
    },
}

impl PipelineState {
    pub fn processing(&self) -> bool {
        matches!(self, PipelineState::Processing { .. })
    }

    /// True once a result or an error is available to show
    pub fn result_ready(&self) -> bool {
        matches!(self, PipelineState::Ready { .. } | PipelineState::Failed { .. })
    }

    pub fn request_id(&self) -> Option<Uuid> {
        match self {
            PipelineState::Idle => None,
            PipelineState::Processing { request_id, .. }
            | PipelineState::Ready { request_id, .. }
            | PipelineState::Failed { request_id, .. } => Some(*request_id),
        }
    }

    /// When the result was stored; `None` until the request settles
    pub fn finished_at(&self) -> Option<DateTime<Utc>> {
        match self {
            PipelineState::Ready { finished_at, .. } | PipelineState::Failed { finished_at, .. } => {
                Some(*finished_at)
            }
            PipelineState::Idle | PipelineState::Processing { .. } => None,
        }
    }
}

impl Default for PipelineState {
    fn default() -> Self {
        PipelineState::Idle
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags() {
        let id = Uuid::new_v4();
        assert!(!PipelineState::Idle.processing());
        assert!(!PipelineState::Idle.result_ready());

        let processing = PipelineState::Processing {
            request_id: id,
            started_at: Utc::now(),
        };
        assert!(processing.processing());
        assert!(!processing.result_ready());

        let failed = PipelineState::Failed {
            request_id: id,
            error: "boom".into(),
            finished_at: Utc::now(),
        };
        assert!(!failed.processing());
        assert!(failed.result_ready());
        assert_eq!(failed.request_id(), Some(id));
    }

    #[test]
    fn test_serializes_with_status_tag() {
        let value = serde_json::to_value(PipelineState::Idle).unwrap();
        assert_eq!(value, serde_json::json!({"status": "idle"}));

        let ready = PipelineState::Ready {
            request_id: Uuid::nil(),
            result: "# Post".into(),
            finished_at: Utc::now(),
        };
        let value = serde_json::to_value(ready).unwrap();
        assert_eq!(value["status"], "ready");
        assert_eq!(value["result"], "# Post");
        assert_eq!(value["request_id"], Uuid::nil().to_string());
    }
}
