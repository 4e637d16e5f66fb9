//! Store trait for task documents.
//!
//! Every method returns a boxed `'static` future so the trait stays object
//! safe; the service holds the store as `Arc<dyn TaskStore + Send + Sync>`
//! and picks the backend at runtime.

use std::sync::Arc;

use futures::future::BoxFuture;
use thiserror::Error;

use tasktracker_domain::{NewTask, Task, TaskId, TaskPatch, TaskStatus};

// =============================================================================
// Store Error
// =============================================================================

/// Errors that can occur during store operations.
///
/// Absence of a document is not an error: lookups return `Ok(None)`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The backing store cannot be reached.
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    /// The backing store rejected or failed an operation.
    #[error("Database error: {0}")]
    Database(String),

    /// A document could not be encoded or decoded.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Future returned by every store operation.
pub type StoreFuture<T> = BoxFuture<'static, Result<T, StoreError>>;

/// Store handle shared across request handlers.
pub type SharedTaskStore = Arc<dyn TaskStore + Send + Sync>;

// =============================================================================
// Task Store
// =============================================================================

/// A collection of task documents.
///
/// Each operation is atomic for the single document it touches and returns
/// the full resulting document. Concurrent writes to the same task are
/// last-write-wins.
pub trait TaskStore: Send + Sync {
    /// Prepares the collection for use.
    ///
    /// Called once at startup, before the service accepts requests.
    fn initialize(&self) -> StoreFuture<()>;

    /// Inserts a new task, assigning its identifier and creation timestamp.
    fn insert(&self, new_task: NewTask) -> StoreFuture<Task>;

    /// Returns all tasks, optionally restricted to one status, newest first.
    fn find_all(&self, status: Option<TaskStatus>) -> StoreFuture<Vec<Task>>;

    /// Finds a task by its identifier.
    fn find_by_id(&self, id: &TaskId) -> StoreFuture<Option<Task>>;

    /// Applies a patch to a task.
    ///
    /// Returns `Ok(None)` if no task has this identifier.
    fn update_by_id(&self, id: &TaskId, patch: TaskPatch) -> StoreFuture<Option<Task>>;

    /// Deletes a task and returns it.
    ///
    /// Returns `Ok(None)` if no task has this identifier.
    fn delete_by_id(&self, id: &TaskId) -> StoreFuture<Option<Task>>;

    /// Releases the store's resources. Called once at shutdown.
    fn close(&self) -> BoxFuture<'static, ()>;
}

/// Sort order for listings: creation time descending, identifier descending
/// as a tie-breaker.
pub(crate) fn newest_first(left: &Task, right: &Task) -> std::cmp::Ordering {
    right
        .created_at
        .cmp(&left.created_at)
        .then_with(|| right.id.cmp(&left.id))
}

// =============================================================================
// Tests
// =============================================================================
