//! Client state and its reducer.
//!
//! [`reduce`] is the only way the state changes. It performs no I/O, so every
//! transition can be tested without a terminal or a server.

use tasktracker_domain::{StatusFilter, Task, TaskStatus};

// =============================================================================
// State
// =============================================================================

/// Task fields being typed in, not yet submitted.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Draft {
    pub title: String,
    pub description: String,
    pub status: TaskStatus,
}

impl Draft {
    /// A draft holding the current values of `task`.
    #[must_use]
    pub fn from_task(task: &Task) -> Self {
        Self {
            title: task.title.as_str().to_string(),
            description: task.description.clone(),
            status: task.status,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Success,
    Error,
}

/// A transient message shown to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub text: String,
    pub severity: Severity,
}

impl Notice {
    #[must_use]
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            severity: Severity::Success,
        }
    }

    #[must_use]
    pub fn error(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            severity: Severity::Error,
        }
    }
}

/// Everything the view renders.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ClientState {
    /// Result of the last successful listing.
    pub tasks: Vec<Task>,
    pub draft: Draft,
    pub filter: StatusFilter,
    /// Task whose values the draft is editing, if any.
    pub editing: Option<Task>,
    /// At most one message at a time.
    pub notice: Option<Notice>,
}

impl ClientState {
    #[must_use]
    pub const fn is_editing(&self) -> bool {
        self.editing.is_some()
    }

    /// Heading above the task list, e.g. `All Tasks`.
    #[must_use]
    pub fn heading(&self) -> String {
        self.filter.heading()
    }
}

// =============================================================================
// Actions
// =============================================================================

/// A state transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// A listing succeeded; replaces the task sequence.
    TasksLoaded(Vec<Task>),
    SetDraftTitle(String),
    SetDraftDescription(String),
    SetDraftStatus(TaskStatus),
    SetFilter(StatusFilter),
    /// Copies the task into the draft and remembers it as the edit target.
    BeginEdit(Task),
    /// Leaves edit mode without saving.
    CancelEdit,
    /// A create or update was accepted; resets the draft and leaves edit mode.
    DraftSubmitted,
    Succeeded(String),
    Failed(String),
    DismissNotice,
}

/// Applies `action` to `state`.
///
/// A failure never touches the task sequence, so the last successful listing
/// stays visible.
#[must_use]
pub fn reduce(state: ClientState, action: Action) -> ClientState {
    match action {
        Action::TasksLoaded(tasks) => ClientState { tasks, ..state },
        Action::SetDraftTitle(title) => ClientState {
            draft: Draft {
                title,
                ..state.draft
            },
            ..state
        },
        Action::SetDraftDescription(description) => ClientState {
            draft: Draft {
                description,
                ..state.draft
            },
            ..state
        },
        Action::SetDraftStatus(status) => ClientState {
            draft: Draft {
                status,
                ..state.draft
            },
            ..state
        },
        Action::SetFilter(filter) => ClientState { filter, ..state },
        Action::BeginEdit(task) => ClientState {
            draft: Draft::from_task(&task),
            editing: Some(task),
            ..state
        },
        Action::CancelEdit | Action::DraftSubmitted => ClientState {
            draft: Draft::default(),
            editing: None,
            ..state
        },
        Action::Succeeded(text) => ClientState {
            notice: Some(Notice::success(text)),
            ..state
        },
        Action::Failed(text) => ClientState {
            notice: Some(Notice::error(text)),
            ..state
        },
        Action::DismissNotice => ClientState {
            notice: None,
            ..state
        },
    }
}

// =============================================================================
// Tests
// =============================================================================
