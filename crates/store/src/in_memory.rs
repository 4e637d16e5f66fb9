//! In-memory task store.
//!
//! Backed by a persistent `im::HashMap` behind an `Arc<RwLock<...>>`. Writers
//! replace the map with an updated version under the write lock, so every
//! operation is atomic per document. Readers clone a snapshot in O(1) and
//! release the lock before filtering. Contents are lost when the process
//! exits.

use std::sync::Arc;

use futures::future::{BoxFuture, FutureExt};
use im::HashMap;
use tokio::sync::RwLock;

use tasktracker_domain::{NewTask, Task, TaskId, TaskPatch, TaskStatus, Timestamp};

use crate::store::{StoreFuture, TaskStore, newest_first};

/// In-memory implementation of [`TaskStore`].
///
/// Clones share the same underlying map.
///
/// # Example
///
/// ```ignore
/// let store = InMemoryTaskStore::new();
/// let task = store.insert(NewTask::new(Title::parse("Buy milk")?)).await?;
/// let found = store.find_by_id(&task.id).await?;
/// ```
#[derive(Debug, Clone, Default)]
pub struct InMemoryTaskStore {
    tasks: Arc<RwLock<HashMap<TaskId, Task>>>,
}

impl InMemoryTaskStore {
    /// Creates a new empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[allow(clippy::significant_drop_tightening)]
impl TaskStore for InMemoryTaskStore {
    fn initialize(&self) -> StoreFuture<()> {
        async { Ok(()) }.boxed()
    }

    fn insert(&self, new_task: NewTask) -> StoreFuture<Task> {
        let tasks = Arc::clone(&self.tasks);
        async move {
            let task = Task::create(TaskId::generate(), new_task, Timestamp::now());
            let mut guard = tasks.write().await;
            *guard = guard.update(task.id, task.clone());
            tracing::debug!(task_id = %task.id, "Inserted task");
            Ok(task)
        }
        .boxed()
    }

    fn find_all(&self, status: Option<TaskStatus>) -> StoreFuture<Vec<Task>> {
        let tasks = Arc::clone(&self.tasks);
        async move {
            let snapshot = tasks.read().await.clone();
            let mut found: Vec<Task> = snapshot
                .values()
                .filter(|task| status.is_none_or(|expected| task.status == expected))
                .cloned()
                .collect();
            found.sort_by(newest_first);
            Ok(found)
        }
        .boxed()
    }

    fn find_by_id(&self, id: &TaskId) -> StoreFuture<Option<Task>> {
        let tasks = Arc::clone(&self.tasks);
        let id = *id;
        async move { Ok(tasks.read().await.get(&id).cloned()) }.boxed()
    }

    fn update_by_id(&self, id: &TaskId, patch: TaskPatch) -> StoreFuture<Option<Task>> {
        let tasks = Arc::clone(&self.tasks);
        let id = *id;
        async move {
            let mut guard = tasks.write().await;
            let Some(existing) = guard.get(&id) else {
                return Ok(None);
            };
            let updated = existing.clone().with_patch(&patch);
            *guard = guard.update(id, updated.clone());
            tracing::debug!(task_id = %id, "Updated task");
            Ok(Some(updated))
        }
        .boxed()
    }

    fn delete_by_id(&self, id: &TaskId) -> StoreFuture<Option<Task>> {
        let tasks = Arc::clone(&self.tasks);
        let id = *id;
        async move {
            let mut guard = tasks.write().await;
            let Some((removed, remaining)) = guard.extract(&id) else {
                return Ok(None);
            };
            *guard = remaining;
            tracing::debug!(task_id = %id, "Deleted task");
            Ok(Some(removed))
        }
        .boxed()
    }

    fn close(&self) -> BoxFuture<'static, ()> {
        async {}.boxed()
    }
}

// =============================================================================
// Tests
// =============================================================================
