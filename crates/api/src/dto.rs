//! Request and response bodies.
//!
//! Requests are deserialized into these DTOs first and only become domain
//! inputs ([`NewTask`], [`TaskPatch`]) after validation.

use serde::{Deserialize, Deserializer, Serialize};

use tasktracker_domain::{
    NewTask, Task, TaskId, TaskPatch, TaskStatus, Timestamp, Title, TitleError,
};

use crate::error::ValidationError;

// =============================================================================
// Requests
// =============================================================================

/// Body of `POST /api/tasks`.
///
/// Unknown keys are ignored. A missing or `null` title is reported the same
/// way as an empty one.
///
/// ```json
/// { "title": "Buy milk", "description": "2 liters", "status": "pending" }
/// ```
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct CreateTaskRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub status: Option<TaskStatus>,
}

impl CreateTaskRequest {
    /// Validates the request into store input.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if the title is missing or blank.
    pub fn validate(self) -> Result<NewTask, ValidationError> {
        let title = Title::parse(self.title.unwrap_or_default())?;
        Ok(NewTask::new(title)
            .with_description(self.description.unwrap_or_default())
            .with_status(self.status.unwrap_or_default()))
    }
}

/// Body of `PATCH /api/tasks/{id}`.
///
/// Only `title`, `description` and `status` are accepted; any other key
/// rejects the whole request. An absent field is left unchanged, as is a
/// `null` description or status. A `null` title clears a required field and
/// is rejected.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct UpdateTaskRequest {
    /// `None` when absent, `Some(None)` when `null`.
    #[serde(
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub title: Option<Option<String>>,
    pub description: Option<String>,
    pub status: Option<TaskStatus>,
}

impl UpdateTaskRequest {
    /// Validates the request into a patch.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if a title is present but `null` or blank.
    pub fn validate(self) -> Result<TaskPatch, ValidationError> {
        let mut patch = TaskPatch::new();
        match self.title {
            None => {}
            Some(None) => return Err(TitleError::Empty.into()),
            Some(Some(title)) => patch = patch.title(Title::parse(title)?),
        }
        if let Some(description) = self.description {
            patch = patch.description(description);
        }
        if let Some(status) = self.status {
            patch = patch.status(status);
        }
        Ok(patch)
    }
}

/// Marks a field that appeared in the body, even as `null`.
fn present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Query string of `GET /api/tasks`.
///
/// Built from raw key/value pairs so repeated or unrelated parameters never
/// reject the request. Only the first `status` counts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListTasksQuery {
    pub status: Option<String>,
}

impl ListTasksQuery {
    #[must_use]
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let status = pairs
            .into_iter()
            .find_map(|(key, value)| (key == "status").then_some(value));
        Self { status }
    }
}

// =============================================================================
// Responses
// =============================================================================

/// Task as returned by every task endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskResponse {
    pub id: TaskId,
    pub title: String,
    pub description: String,
    pub status: TaskStatus,
    pub created_at: Timestamp,
}

impl From<Task> for TaskResponse {
    fn from(task: Task) -> Self {
        Self {
            id: task.id,
            title: task.title.into_inner(),
            description: task.description,
            status: task.status,
            created_at: task.created_at,
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
