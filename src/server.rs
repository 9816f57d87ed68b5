//! HTTP surface: routing, handlers, and response envelopes
//!
//! Handlers are request-scoped and stateless; the only state shared
//! across requests is the [`TodoStorage`] handle. Each handler runs one
//! full load -> mutate -> persist cycle against it or none at all.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, RawQuery, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;

use crate::error::{Result, TodoError};
use crate::storage::TodoStorage;
use crate::types::Task;

/// JSON wrapper for every list/item read
#[derive(Debug, Serialize, Deserialize)]
pub struct TodoResponse {
    /// Tasks covered by the request
    pub results: Vec<Task>,
    /// Unix timestamp of when the response was produced
    pub date: i64,
    /// Number of entries in `results`
    pub total_results: usize,
}

impl TodoResponse {
    fn new(results: Vec<Task>) -> Self {
        Self {
            total_results: results.len(),
            date: Utc::now().timestamp(),
            results,
        }
    }
}

/// Request body for creating a task
#[derive(Debug, Deserialize)]
struct CreateTask {
    task: String,
}

/// Build the application router around a shared storage handle
pub fn router(storage: Arc<TodoStorage>) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/todo", get(list_todos).post(create_todo))
        .route(
            "/todo/:position",
            get(get_todo).patch(complete_todo).delete(delete_todo),
        )
        .fallback(not_found)
        .with_state(storage)
}

/// Bind the given address and serve the API in a background task
///
/// Returns the locally bound address (useful when binding port 0) and
/// the join handle for the server task; abort the handle to shut down.
pub async fn start_server(
    storage: Arc<TodoStorage>,
    addr: &str,
) -> Result<(SocketAddr, tokio::task::JoinHandle<()>)> {
    let listener = TcpListener::bind(addr).await?;
    let local_addr = listener.local_addr()?;
    let app = router(storage);

    tracing::info!(%local_addr, "todo server listening");

    let handle = tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await {
            tracing::error!(error = %e, "todo server error");
        }
    });

    Ok((local_addr, handle))
}

impl IntoResponse for TodoError {
    fn into_response(self) -> Response {
        let status = match &self {
            TodoError::EmptyTask | TodoError::InvalidRequest { .. } => StatusCode::BAD_REQUEST,
            TodoError::TaskNotFound { .. } | TodoError::InvalidPosition { .. } => {
                StatusCode::NOT_FOUND
            }
            TodoError::Io(_) | TodoError::Json(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        } else {
            tracing::debug!(error = %self, "request rejected");
        }

        (status, self.to_string()).into_response()
    }
}

/// Liveness/landing probe, not API traffic
async fn root() -> &'static str {
    "There's an API here. Get to work!\n"
}

async fn not_found() -> (StatusCode, &'static str) {
    (StatusCode::NOT_FOUND, "Not Found\n")
}

async fn list_todos(
    State(storage): State<Arc<TodoStorage>>,
) -> Result<Json<TodoResponse>> {
    let list = storage.list_tasks().await?;
    Ok(Json(TodoResponse::new(list.all().to_vec())))
}

async fn create_todo(
    State(storage): State<Arc<TodoStorage>>,
    body: std::result::Result<Json<CreateTask>, JsonRejection>,
) -> Result<(StatusCode, Json<TodoResponse>)> {
    // Every decode failure answers 400, not axum's default 415/422 split
    let Json(body) = body.map_err(|rejection| TodoError::InvalidRequest {
        message: rejection.body_text(),
    })?;

    let task = storage.add_task(&body.task).await?;
    tracing::info!(position = task.position, "created task");

    Ok((StatusCode::CREATED, Json(TodoResponse::new(vec![task]))))
}

async fn get_todo(
    State(storage): State<Arc<TodoStorage>>,
    Path(position): Path<String>,
) -> Result<Json<TodoResponse>> {
    let position = parse_position(&position)?;
    let task = storage.get_task(position).await?;

    Ok(Json(TodoResponse::new(vec![task])))
}

async fn complete_todo(
    State(storage): State<Arc<TodoStorage>>,
    Path(position): Path<String>,
    RawQuery(query): RawQuery,
) -> Result<StatusCode> {
    let position = parse_position(&position)?;

    if !has_flag(query.as_deref(), "complete") {
        return Err(TodoError::InvalidRequest {
            message: "call PATCH with ?complete to complete a task".to_string(),
        });
    }

    storage.complete_task(position).await?;
    tracing::info!(position, "completed task");

    Ok(StatusCode::NO_CONTENT)
}

async fn delete_todo(
    State(storage): State<Arc<TodoStorage>>,
    Path(position): Path<String>,
) -> Result<StatusCode> {
    let position = parse_position(&position)?;

    storage.delete_task(position).await?;
    tracing::info!(position, "deleted task");

    Ok(StatusCode::NO_CONTENT)
}

/// Parse a 1-based position from a raw path segment
///
/// A non-numeric segment is treated as an unmatched route (404), not a
/// bad request.
fn parse_position(raw: &str) -> Result<usize> {
    raw.parse().map_err(|_| TodoError::InvalidPosition {
        value: raw.to_string(),
    })
}

/// Whether a query string carries the given bare flag, as in `?complete`
fn has_flag(query: Option<&str>, name: &str) -> bool {
    query
        .unwrap_or_default()
        .split('&')
        .any(|pair| pair.split('=').next() == Some(name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_position() {
        assert_eq!(parse_position("3").unwrap(), 3);
        assert!(matches!(
            parse_position("abc"),
            Err(TodoError::InvalidPosition { .. })
        ));
        assert!(matches!(
            parse_position("-1"),
            Err(TodoError::InvalidPosition { .. })
        ));
    }

    #[test]
    fn test_has_flag() {
        assert!(has_flag(Some("complete"), "complete"));
        assert!(has_flag(Some("complete="), "complete"));
        assert!(has_flag(Some("a=1&complete"), "complete"));
        assert!(!has_flag(Some("completed"), "complete"));
        assert!(!has_flag(Some(""), "complete"));
        assert!(!has_flag(None, "complete"));
    }

    #[test]
    fn test_envelope_counts_results() {
        let response = TodoResponse::new(vec![Task::new("Task Number 1.")]);

        assert_eq!(response.total_results, 1);
        assert_eq!(response.results[0].task, "Task Number 1.");
        assert!(response.date > 0);
    }

    #[tokio::test]
    async fn test_root_greeting() {
        let greeting = root().await;
        assert!(greeting.contains("There's an API here"));
    }
}
