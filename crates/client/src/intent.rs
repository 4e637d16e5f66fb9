//! User intents and the API calls they plan into.
//!
//! Planning is pure: it reads the state, validates the draft and decides
//! which single [`Command`] to issue, if any. Running the command and the
//! listing that follows it is the controller's job.

use thiserror::Error;

use tasktracker_domain::{StatusFilter, TaskId};

use crate::api::{CreateTaskBody, UpdateTaskBody};
use crate::state::ClientState;

/// A user command that needs the server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    /// Re-run the listing for the active filter.
    Load,
    ChangeFilter(StatusFilter),
    /// Create from the draft, or update the task being edited.
    Submit,
    /// Flip `completed` and `pending`; any other status becomes `completed`.
    ToggleCompletion(TaskId),
    Delete(TaskId),
}

/// One planned mutating API call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Create(CreateTaskBody),
    Update(TaskId, UpdateTaskBody),
    Delete(TaskId),
}

/// Which user-facing operation a command belongs to. Picks the messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Fetch,
    Add,
    ToggleStatus,
    Edit,
    Remove,
}

impl Operation {
    /// Message shown after the operation and the follow-up listing succeed.
    #[must_use]
    pub const fn success_message(self) -> Option<&'static str> {
        match self {
            Self::Fetch => None,
            Self::Add => Some("Task added successfully"),
            Self::ToggleStatus => Some("Task status updated"),
            Self::Edit => Some("Task updated successfully"),
            Self::Remove => Some("Task deleted successfully"),
        }
    }

    #[must_use]
    pub const fn failure_prefix(self) -> &'static str {
        match self {
            Self::Fetch => "Failed to fetch tasks",
            Self::Add => "Failed to add task",
            Self::ToggleStatus => "Failed to update status",
            Self::Edit => "Failed to update task",
            Self::Remove => "Failed to delete task",
        }
    }

    /// `"<prefix>: <reason>"`.
    #[must_use]
    pub fn failure_message(self, reason: impl std::fmt::Display) -> String {
        format!("{}: {reason}", self.failure_prefix())
    }

    /// Whether success resets the draft and leaves edit mode.
    #[must_use]
    pub const fn consumes_draft(self) -> bool {
        matches!(self, Self::Add | Self::Edit)
    }
}

/// A validated command together with the operation it performs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Plan {
    pub operation: Operation,
    /// `None` when the listing alone is enough.
    pub command: Option<Command>,
}

/// Reasons an intent is refused before any request is made.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PlanError {
    #[error("Task title cannot be empty")]
    EmptyTitle,

    #[error("Task {0} is not in the current list")]
    UnknownTask(TaskId),
}

/// Plans `intent` against the current state.
///
/// `Load` and `ChangeFilter` plan no command, only the listing; the caller
/// applies a new filter to the state first.
///
/// # Errors
///
/// Returns `PlanError::EmptyTitle` when submitting a blank title, and
/// `PlanError::UnknownTask` when toggling a task that is not listed.
pub fn plan(state: &ClientState, intent: &Intent) -> Result<Plan, PlanError> {
    match intent {
        Intent::Load | Intent::ChangeFilter(_) => Ok(Plan {
            operation: Operation::Fetch,
            command: None,
        }),
        Intent::Submit => plan_submit(state),
        Intent::ToggleCompletion(id) => {
            let task = state
                .tasks
                .iter()
                .find(|task| task.id == *id)
                .ok_or(PlanError::UnknownTask(*id))?;
            Ok(Plan {
                operation: Operation::ToggleStatus,
                command: Some(Command::Update(
                    *id,
                    UpdateTaskBody::status(task.status.toggled()),
                )),
            })
        }
        Intent::Delete(id) => Ok(Plan {
            operation: Operation::Remove,
            command: Some(Command::Delete(*id)),
        }),
    }
}

fn plan_submit(state: &ClientState) -> Result<Plan, PlanError> {
    let draft = &state.draft;
    if draft.title.trim().is_empty() {
        return Err(PlanError::EmptyTitle);
    }

    Ok(match &state.editing {
        None => Plan {
            operation: Operation::Add,
            command: Some(Command::Create(CreateTaskBody {
                title: draft.title.clone(),
                description: draft.description.clone(),
                status: draft.status,
            })),
        },
        Some(task) => Plan {
            operation: Operation::Edit,
            command: Some(Command::Update(
                task.id,
                UpdateTaskBody {
                    title: Some(draft.title.clone()),
                    description: Some(draft.description.clone()),
                    status: Some(draft.status),
                },
            )),
        },
    })
}

// =============================================================================
// Tests
// =============================================================================
