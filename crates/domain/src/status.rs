//! Task status.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

// =============================================================================
// TaskStatus
// =============================================================================

/// The status of a task.
///
/// Serialized in kebab-case: `pending`, `in-progress`, `completed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum TaskStatus {
    /// Task has not been started yet.
    #[default]
    Pending,
    /// Task is currently being worked on.
    InProgress,
    /// Task has been completed.
    Completed,
}

impl TaskStatus {
    /// Every status, in display order.
    pub const ALL: [Self; 3] = [Self::Pending, Self::InProgress, Self::Completed];

    /// Returns the wire representation (`in-progress`, ...).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::InProgress => "in-progress",
            Self::Completed => "completed",
        }
    }

    /// Returns `true` for [`TaskStatus::Completed`].
    #[must_use]
    pub const fn is_completed(self) -> bool {
        matches!(self, Self::Completed)
    }

    /// Returns the status a completion toggle moves to.
    ///
    /// `Completed` goes back to `Pending`; every other status becomes
    /// `Completed`, so an `InProgress` marker is not restored on un-toggle.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Completed => Self::Pending,
            Self::Pending | Self::InProgress => Self::Completed,
        }
    }

    /// Returns the next status in display order, wrapping around.
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::Pending => Self::InProgress,
            Self::InProgress => Self::Completed,
            Self::Completed => Self::Pending,
        }
    }
}

impl std::fmt::Display for TaskStatus {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pending => write!(formatter, "Pending"),
            Self::InProgress => write!(formatter, "In Progress"),
            Self::Completed => write!(formatter, "Completed"),
        }
    }
}

/// Error returned when parsing an unrecognized status string.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("Unknown task status: '{0}'. Expected 'pending', 'in-progress' or 'completed'")]
pub struct UnknownStatus(pub String);

impl FromStr for TaskStatus {
    type Err = UnknownStatus;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == value)
            .ok_or_else(|| UnknownStatus(value.to_string()))
    }
}

// =============================================================================
// Tests
// =============================================================================
