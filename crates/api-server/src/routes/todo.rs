//! Todo API endpoints
//!
//! JSON CRUD over the task repository.

use axum::{
    extract::{rejection::JsonRejection, FromRequestParts, Path, State},
    http::{request::Parts, StatusCode},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};

use todo_core::task::{Task, TaskPatch};
use todo_core::Error;

use crate::state::AppState;

pub const NOT_FOUND_MESSAGE: &str = "No task found with the provided ID";

// ============================================================================
// Request/Response types
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct CreateTodoRequest {
    #[serde(default, alias = "title")]
    pub task: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateTodoRequest {
    #[serde(default, alias = "title")]
    pub task: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

impl From<UpdateTodoRequest> for TaskPatch {
    fn from(req: UpdateTodoRequest) -> Self {
        Self {
            task: req.task,
            status: req.status,
        }
    }
}

/// Body of every acknowledgement and every failure
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub status: &'static str,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub task: Option<Task>,
}

impl StatusResponse {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            status: "success",
            message: message.into(),
            task: None,
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            status: "failed",
            message: message.into(),
            task: None,
        }
    }
}

pub type RouteError = (StatusCode, Json<StatusResponse>);

pub fn route_error(status: StatusCode, message: impl Into<String>) -> RouteError {
    (status, Json(StatusResponse::failed(message)))
}

fn bad_request(message: impl Into<String>) -> RouteError {
    route_error(StatusCode::BAD_REQUEST, message)
}

fn not_found() -> RouteError {
    route_error(StatusCode::NOT_FOUND, NOT_FOUND_MESSAGE)
}

/// Translate a repository failure into a response; details of
/// unexpected store errors are logged, not returned.
pub fn map_store_error(err: Error) -> RouteError {
    match err {
        Error::TaskNotFound(_) => not_found(),
        Error::InvalidInput(message) => bad_request(message),
        e if e.is_unavailable() => {
            tracing::warn!("Store unavailable: {}", e);
            route_error(StatusCode::SERVICE_UNAVAILABLE, "Store unavailable, try again later")
        }
        e => {
            tracing::error!("Store operation failed: {}", e);
            route_error(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
        }
    }
}

fn json_body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, RouteError> {
    payload
        .map(|Json(body)| body)
        .map_err(|rejection| bad_request(rejection.body_text()))
}

/// Task id taken from the path. Anything other than a non-negative
/// integer is answered with 404, the same as an unknown route.
#[derive(Debug, Clone, Copy)]
pub struct TaskId(pub i64);

impl<S> FromRequestParts<S> for TaskId
where
    S: Send + Sync,
{
    type Rejection = RouteError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|_| route_error(StatusCode::NOT_FOUND, "Not found"))?;

        if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
            return Err(route_error(StatusCode::NOT_FOUND, "Not found"));
        }
        raw.parse::<i64>()
            .map(TaskId)
            .map_err(|_| route_error(StatusCode::NOT_FOUND, "Not found"))
    }
}

// ============================================================================
// Handlers
// ============================================================================

/// GET /todos - List all tasks
async fn list_todos(State(state): State<AppState>) -> Result<Json<Vec<Task>>, RouteError> {
    let tasks = state.tasks().list().await.map_err(map_store_error)?;
    Ok(Json(tasks))
}

/// GET /todo/{id} - Get a single task
async fn get_todo(
    State(state): State<AppState>,
    TaskId(id): TaskId,
) -> Result<Json<Task>, RouteError> {
    match state.tasks().get(id).await.map_err(map_store_error)? {
        Some(task) => Ok(Json(task)),
        None => Err(not_found()),
    }
}

/// POST /todo - Create a new task
async fn create_todo(
    State(state): State<AppState>,
    payload: Result<Json<CreateTodoRequest>, JsonRejection>,
) -> Result<Json<StatusResponse>, RouteError> {
    let req = json_body(payload)?;
    let Some(text) = req.task else {
        return Err(bad_request("Task is required"));
    };

    let created = state.tasks().create(&text).await.map_err(map_store_error)?;
    tracing::info!("Task {} added", created.id);

    Ok(Json(StatusResponse {
        task: Some(created),
        ..StatusResponse::success("Task added")
    }))
}

/// PUT /todo/{id} - Update a task's text and/or status
async fn update_todo(
    State(state): State<AppState>,
    TaskId(id): TaskId,
    payload: Result<Json<UpdateTodoRequest>, JsonRejection>,
) -> Result<Json<StatusResponse>, RouteError> {
    let patch = TaskPatch::from(json_body(payload)?);
    state
        .tasks()
        .update(id, &patch)
        .await
        .map_err(map_store_error)?;

    Ok(Json(StatusResponse::success("Task updated")))
}

/// DELETE /todo/{id} - Delete a task
async fn delete_todo(
    State(state): State<AppState>,
    TaskId(id): TaskId,
) -> Result<Json<StatusResponse>, RouteError> {
    state.tasks().delete(id).await.map_err(map_store_error)?;
    tracing::info!("Task {} deleted", id);

    Ok(Json(StatusResponse::success("Task deleted")))
}

// ============================================================================
// Router
// ============================================================================

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/todos", get(list_todos))
        .route("/todo", post(create_todo))
        .route(
            "/todo/{id}",
            get(get_todo).put(update_todo).delete(delete_todo),
        )
}
