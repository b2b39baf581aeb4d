//! Health check endpoint

use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
    store: &'static str,
}

async fn health_check(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let (code, status, store) = match state.tasks().ping().await {
        Ok(()) => (StatusCode::OK, "ok", "up"),
        Err(e) => {
            tracing::warn!("Health check could not reach store: {}", e);
            (StatusCode::SERVICE_UNAVAILABLE, "degraded", "down")
        }
    };

    (
        code,
        Json(HealthResponse {
            status,
            version: env!("CARGO_PKG_VERSION"),
            store,
        }),
    )
}

pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use axum::{
        body::{to_bytes, Body},
        http::{Request, StatusCode},
    };
    use serde_json::Value;
    use tower::ServiceExt;

    use todo_core::task::{Task, TaskPatch, TaskRepository};
    use todo_core::{Error, Result};

    use crate::state::AppState;

    struct PingOnly {
        up: bool,
    }

    #[async_trait]
    impl TaskRepository for PingOnly {
        async fn list(&self) -> Result<Vec<Task>> {
            Ok(Vec::new())
        }

        async fn get(&self, _id: i64) -> Result<Option<Task>> {
            Ok(None)
        }

        async fn create(&self, task: &str) -> Result<Task> {
            Ok(Task::created(1, task))
        }

        async fn update(&self, id: i64, _patch: &TaskPatch) -> Result<()> {
            Err(Error::TaskNotFound(id))
        }

        async fn delete(&self, id: i64) -> Result<()> {
            Err(Error::TaskNotFound(id))
        }

        async fn ping(&self) -> Result<()> {
            if self.up {
                Ok(())
            } else {
                Err(Error::Storage("connection refused".to_string()))
            }
        }
    }

    async fn check(up: bool) -> (StatusCode, Value) {
        let response = super::router()
            .with_state(AppState::new(PingOnly { up }))
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&body).unwrap())
    }

    #[tokio::test]
    async fn healthy_store_reports_ok() {
        let (status, body) = check(true).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
        assert_eq!(body["store"], "up");
        assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
    }

    #[tokio::test]
    async fn unreachable_store_reports_degraded() {
        let (status, body) = check(false).await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["store"], "down");
    }
}
