//! Status filter used when listing tasks.

use std::str::FromStr;

use crate::status::{TaskStatus, UnknownStatus};

/// Which tasks a list view shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum StatusFilter {
    /// No constraint.
    #[default]
    All,
    /// Exact match on a single status.
    Only(TaskStatus),
}

impl StatusFilter {
    /// Every filter, in display order.
    pub const ALL: [Self; 4] = [
        Self::All,
        Self::Only(TaskStatus::Pending),
        Self::Only(TaskStatus::InProgress),
        Self::Only(TaskStatus::Completed),
    ];

    /// Returns the status constraint, if any.
    #[must_use]
    pub const fn status(self) -> Option<TaskStatus> {
        match self {
            Self::All => None,
            Self::Only(status) => Some(status),
        }
    }

    /// Returns `true` if a task with `status` passes this filter.
    #[must_use]
    pub fn matches(self, status: TaskStatus) -> bool {
        self.status().is_none_or(|expected| expected == status)
    }

    /// Returns the wire name: `all` or the status value.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Only(status) => status.as_str(),
        }
    }

    /// Heading for a list showing this filter, e.g. `All Tasks`, `In-progress Tasks`.
    #[must_use]
    pub fn heading(self) -> String {
        match self {
            Self::All => "All Tasks".to_string(),
            Self::Only(status) => {
                let name = status.as_str();
                let mut characters = name.chars();
                let capitalized: String = characters
                    .next()
                    .map(|first| first.to_uppercase().chain(characters).collect())
                    .unwrap_or_default();
                format!("{capitalized} Tasks")
            }
        }
    }

    /// Returns the next filter in display order, wrapping around.
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::All => Self::Only(TaskStatus::Pending),
            Self::Only(TaskStatus::Pending) => Self::Only(TaskStatus::InProgress),
            Self::Only(TaskStatus::InProgress) => Self::Only(TaskStatus::Completed),
            Self::Only(TaskStatus::Completed) => Self::All,
        }
    }
}

impl From<Option<TaskStatus>> for StatusFilter {
    fn from(status: Option<TaskStatus>) -> Self {
        status.map_or(Self::All, Self::Only)
    }
}

impl FromStr for StatusFilter {
    type Err = UnknownStatus;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        if value == "all" {
            return Ok(Self::All);
        }
        value.parse().map(Self::Only)
    }
}

// =============================================================================
// Tests
// =============================================================================
