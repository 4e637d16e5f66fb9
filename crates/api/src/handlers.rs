//! HTTP handlers for the task API.
//!
//! Each handler validates its input, makes exactly one store call and maps
//! the outcome to a response. Absence from the store becomes 404, store
//! failures become 500 through [`ApiErrorResponse`]'s `From<StoreError>`.

use axum::{
    Json,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::StatusCode,
};
use serde::Serialize;

use tasktracker_domain::{StatusFilter, TaskId};

use crate::dto::{CreateTaskRequest, ListTasksQuery, TaskResponse, UpdateTaskRequest};
use crate::error::ApiErrorResponse;
use crate::state::AppState;

/// Result type shared by the task handlers.
pub type ApiResult<T> = Result<T, ApiErrorResponse>;

// =============================================================================
// POST /api/tasks
// =============================================================================

/// Creates a task.
///
/// # Response
///
/// - **201 Created**: the created task
/// - **400 Bad Request**: malformed body, unknown status, missing or blank title
///
/// # Errors
///
/// Returns [`ApiErrorResponse`] on validation or store failure.
pub async fn create_task(
    State(state): State<AppState>,
    body: Result<Json<CreateTaskRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<TaskResponse>)> {
    let Json(request) = body?;
    let new_task = request.validate().inspect_err(|error| {
        tracing::warn!(?error, "Rejected task creation");
    })?;

    let task = state.store.insert(new_task).await?;
    tracing::info!(task_id = %task.id, "Task created");

    Ok((StatusCode::CREATED, Json(TaskResponse::from(task))))
}

// =============================================================================
// GET /api/tasks
// =============================================================================

/// Lists tasks, newest first.
///
/// `?status=` narrows the list to one status. An empty value or `all` means
/// no filter; any other unrecognized value matches no task. Other and
/// repeated parameters are ignored.
///
/// # Errors
///
/// Returns [`ApiErrorResponse`] on store failure.
pub async fn list_tasks(
    State(state): State<AppState>,
    pairs: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> ApiResult<Json<Vec<TaskResponse>>> {
    let Query(pairs) = pairs?;
    let query = ListTasksQuery::from_pairs(pairs);
    let filter = match query.status.as_deref().map(str::trim) {
        None | Some("") => StatusFilter::All,
        Some(value) => match value.parse::<StatusFilter>() {
            Ok(filter) => filter,
            Err(error) => {
                tracing::debug!(%error, "Unknown status filter, returning no tasks");
                return Ok(Json(Vec::new()));
            }
        },
    };

    let tasks = state.store.find_all(filter.status()).await?;
    Ok(Json(tasks.into_iter().map(TaskResponse::from).collect()))
}

// =============================================================================
// GET /api/tasks/{id}
// =============================================================================

/// Returns one task.
///
/// # Errors
///
/// Returns 404 if no task has this identifier, including identifiers that
/// are not valid UUIDs.
pub async fn get_task(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<TaskResponse>> {
    let task_id = parse_task_id(&id)?;
    let task = state
        .store
        .find_by_id(&task_id)
        .await?
        .ok_or_else(|| ApiErrorResponse::task_not_found(&id))?;
    Ok(Json(TaskResponse::from(task)))
}

// =============================================================================
// PATCH /api/tasks/{id}
// =============================================================================

/// Applies a partial update.
///
/// The body is validated before the store is touched, so a rejected request
/// never changes the stored task.
///
/// # Response
///
/// - **200 OK**: the updated task
/// - **400 Bad Request**: unknown key, blank title, unknown status
/// - **404 Not Found**: no such task
///
/// # Errors
///
/// Returns [`ApiErrorResponse`] as listed above, or 500 on store failure.
pub async fn update_task(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<UpdateTaskRequest>, JsonRejection>,
) -> ApiResult<Json<TaskResponse>> {
    let Json(request) = body?;
    let patch = request.validate().inspect_err(|error| {
        tracing::warn!(task_id = %id, ?error, "Rejected task update");
    })?;
    let task_id = parse_task_id(&id)?;

    let task = state
        .store
        .update_by_id(&task_id, patch)
        .await?
        .ok_or_else(|| ApiErrorResponse::task_not_found(&id))?;
    tracing::info!(task_id = %task.id, "Task updated");

    Ok(Json(TaskResponse::from(task)))
}

// =============================================================================
// DELETE /api/tasks/{id}
// =============================================================================

/// Deletes a task and returns it.
///
/// # Errors
///
/// Returns 404 if no task has this identifier.
pub async fn delete_task(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<TaskResponse>> {
    let task_id = parse_task_id(&id)?;
    let task = state
        .store
        .delete_by_id(&task_id)
        .await?
        .ok_or_else(|| ApiErrorResponse::task_not_found(&id))?;
    tracing::info!(task_id = %task.id, "Task deleted");

    Ok(Json(TaskResponse::from(task)))
}

// =============================================================================
// GET /health
// =============================================================================

/// Health check response body.
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

/// Liveness probe.
///
/// ```json
/// { "status": "healthy", "version": "0.1.0" }
/// ```
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
    })
}

// =============================================================================
// Helpers
// =============================================================================

/// A path segment that is not a task identifier cannot name a stored task.
fn parse_task_id(raw: &str) -> ApiResult<TaskId> {
    raw.parse()
        .map_err(|_| ApiErrorResponse::task_not_found(raw))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn test_parse_task_id_malformed_is_not_found() {
        let error = parse_task_id("507f1f77bcf86cd799439011").unwrap_err();
        assert_eq!(error.status, StatusCode::NOT_FOUND);
    }

    #[rstest]
    fn test_parse_task_id_valid() {
        let id = TaskId::generate();
        assert_eq!(parse_task_id(&id.to_string()).unwrap(), id);
    }

    #[rstest]
    #[tokio::test]
    async fn test_health_check() {
        let Json(health) = health_check().await;
        assert_eq!(health.status, "healthy");
        assert_eq!(health.version, env!("CARGO_PKG_VERSION"));
    }
}
