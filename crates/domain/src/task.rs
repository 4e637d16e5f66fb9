//! Task domain model.
//!
//! A [`Task`] is created from a validated [`NewTask`] and only ever changed by
//! applying a [`TaskPatch`], which cannot touch the identifier or the creation
//! timestamp.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::status::TaskStatus;
use crate::title::Title;

// =============================================================================
// Value Objects - Newtypes
// =============================================================================

/// Unique identifier for a task.
///
/// This is a newtype wrapper around UUID to provide type safety.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(Uuid);

impl TaskId {
    /// Creates a `TaskId` from an existing UUID.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the inner UUID.
    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }

    /// Generates a new `TaskId` with a time-ordered UUID (v7).
    ///
    /// **Note**: This is an impure function (side effect: time + random).
    /// Stores call it when assigning identifiers on insert.
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::now_v7())
    }
}

impl std::fmt::Display for TaskId {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "{}", self.0)
    }
}

/// Error returned when a string is not a valid task identifier.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("Invalid task identifier: '{0}'")]
pub struct TaskIdError(pub String);

impl FromStr for TaskId {
    type Err = TaskIdError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(value)
            .map(Self)
            .map_err(|_| TaskIdError(value.to_string()))
    }
}

/// A timestamp wrapper for `DateTime<Utc>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// Creates a `Timestamp` from a `DateTime<Utc>`.
    #[must_use]
    pub const fn from_datetime(datetime: DateTime<Utc>) -> Self {
        Self(datetime)
    }

    /// Returns the inner `DateTime<Utc>`.
    #[must_use]
    pub const fn as_datetime(&self) -> &DateTime<Utc> {
        &self.0
    }

    /// Returns the current time as a `Timestamp`.
    ///
    /// **Note**: This is an impure function (side effect: system clock).
    #[must_use]
    pub fn now() -> Self {
        Self(Utc::now())
    }
}

impl std::fmt::Display for Timestamp {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "{}", self.0.format("%Y-%m-%d %H:%M:%S UTC"))
    }
}

// =============================================================================
// Task Entity
// =============================================================================

/// A persisted unit of work.
///
/// Serializes as `{id, title, description, status, createdAt}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Store-assigned identifier.
    pub id: TaskId,
    /// Non-empty title.
    pub title: Title,
    /// Free text, empty by default.
    #[serde(default)]
    pub description: String,
    /// Current status.
    #[serde(default)]
    pub status: TaskStatus,
    /// Creation time; the default sort key (newest first).
    pub created_at: Timestamp,
}

impl Task {
    /// Builds a task from validated input and store-assigned values.
    ///
    /// This is a pure function.
    #[must_use]
    pub fn create(id: TaskId, new_task: NewTask, created_at: Timestamp) -> Self {
        Self {
            id,
            title: new_task.title,
            description: new_task.description,
            status: new_task.status,
            created_at,
        }
    }

    /// Returns a copy of this task with the patch applied.
    ///
    /// Fields absent from the patch keep their current values; `id` and
    /// `created_at` are never changed.
    #[must_use]
    pub fn with_patch(self, patch: &TaskPatch) -> Self {
        Self {
            title: patch.title.clone().unwrap_or(self.title),
            description: patch.description.clone().unwrap_or(self.description),
            status: patch.status.unwrap_or(self.status),
            ..self
        }
    }
}

// =============================================================================
// Inputs
// =============================================================================

/// Validated input for creating a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    /// Title of the new task.
    pub title: Title,
    /// Description, empty when not provided.
    pub description: String,
    /// Initial status, `pending` when not provided.
    pub status: TaskStatus,
}

impl NewTask {
    /// Creates input with an empty description and `pending` status.
    #[must_use]
    pub const fn new(title: Title) -> Self {
        Self {
            title,
            description: String::new(),
            status: TaskStatus::Pending,
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Sets the initial status.
    #[must_use]
    pub const fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = status;
        self
    }
}

/// Validated partial update.
///
/// Only the three updatable fields exist here, so a patch can never reach the
/// identifier or the creation timestamp. Serializes with absent fields
/// omitted, which makes it usable as a JSON merge document.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct TaskPatch {
    /// New title.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<Title>,
    /// New description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// New status.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<TaskStatus>,
}

impl TaskPatch {
    /// Creates an empty patch.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the new title.
    #[must_use]
    pub fn title(mut self, title: Title) -> Self {
        self.title = Some(title);
        self
    }

    /// Sets the new description.
    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the new status.
    #[must_use]
    pub const fn status(mut self, status: TaskStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Returns `true` if the patch changes nothing.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.title.is_none() && self.description.is_none() && self.status.is_none()
    }
}

// =============================================================================
// Tests
// =============================================================================
