//! Client side of the task API.
//!
//! [`TaskApi`] is the seam between the controller and the network. The
//! terminal client uses [`HttpTaskApi`]; tests substitute an in-process fake.

use futures::future::{BoxFuture, FutureExt};
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use tasktracker_domain::{StatusFilter, Task, TaskId, TaskStatus};

// =============================================================================
// Errors
// =============================================================================

/// Errors returned by [`TaskApi`] calls.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The request did not complete or the response could not be decoded.
    #[error("{0}")]
    Transport(#[from] reqwest::Error),

    /// The server answered with a non-2xx status.
    #[error("{message}")]
    Status { status: u16, message: String },
}

impl ClientError {
    /// HTTP status code of a rejected request.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Transport(_) => None,
        }
    }
}

/// Future returned by every [`TaskApi`] call.
pub type ApiFuture<T> = BoxFuture<'static, Result<T, ClientError>>;

// =============================================================================
// Request Bodies
// =============================================================================

/// Body sent to create a task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreateTaskBody {
    pub title: String,
    pub description: String,
    pub status: TaskStatus,
}

/// Body sent to update a task. Absent fields are left out of the JSON.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct UpdateTaskBody {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<TaskStatus>,
}

impl UpdateTaskBody {
    /// A body that only changes the status.
    #[must_use]
    pub fn status(status: TaskStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }
}

// =============================================================================
// TaskApi
// =============================================================================

/// The five task operations as seen by the client.
pub trait TaskApi: Send + Sync {
    /// Lists tasks passing `filter`, newest first.
    fn list(&self, filter: StatusFilter) -> ApiFuture<Vec<Task>>;

    fn create(&self, body: CreateTaskBody) -> ApiFuture<Task>;

    fn update(&self, id: TaskId, body: UpdateTaskBody) -> ApiFuture<Task>;

    fn delete(&self, id: TaskId) -> ApiFuture<Task>;
}

// =============================================================================
// HttpTaskApi
// =============================================================================

/// Error body returned by the server.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

/// [`TaskApi`] over HTTP.
///
/// # Example
///
/// ```ignore
/// let api = HttpTaskApi::new("http://127.0.0.1:3000");
/// let tasks = api.list(StatusFilter::All).await?;
/// ```
#[derive(Debug, Clone)]
pub struct HttpTaskApi {
    client: Client,
    base_url: String,
}

impl HttpTaskApi {
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    #[must_use]
    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn tasks_url(&self) -> String {
        format!("{}/api/tasks", self.base_url)
    }

    fn task_url(&self, id: TaskId) -> String {
        format!("{}/api/tasks/{id}", self.base_url)
    }
}

impl TaskApi for HttpTaskApi {
    fn list(&self, filter: StatusFilter) -> ApiFuture<Vec<Task>> {
        let mut request = self.client.get(self.tasks_url());
        if let Some(status) = filter.status() {
            request = request.query(&[("status", status.as_str())]);
        }
        async move { read_json(request.send().await?).await }.boxed()
    }

    fn create(&self, body: CreateTaskBody) -> ApiFuture<Task> {
        let request = self.client.post(self.tasks_url()).json(&body);
        async move { read_json(request.send().await?).await }.boxed()
    }

    fn update(&self, id: TaskId, body: UpdateTaskBody) -> ApiFuture<Task> {
        let request = self.client.patch(self.task_url(id)).json(&body);
        async move { read_json(request.send().await?).await }.boxed()
    }

    fn delete(&self, id: TaskId) -> ApiFuture<Task> {
        let request = self.client.delete(self.task_url(id));
        async move { read_json(request.send().await?).await }.boxed()
    }
}

/// Decodes a 2xx body, or turns anything else into [`ClientError::Status`]
/// carrying the server's message when it sent one.
async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, ClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response.json().await?);
    }

    let message = response
        .json::<ErrorBody>()
        .await
        .ok()
        .and_then(|body| body.message)
        .filter(|message| !message.trim().is_empty())
        .unwrap_or_else(|| format!("Request failed with status code {}", status.as_u16()));

    tracing::debug!(status = status.as_u16(), %message, "Request rejected");
    Err(ClientError::Status {
        status: status.as_u16(),
        message,
    })
}

// =============================================================================
// Tests
// =============================================================================
