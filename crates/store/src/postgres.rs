//! `PostgreSQL` task store.
//!
//! Tasks live in a single table, one JSONB document per task. The `status`
//! and `created_at` columns duplicate document fields so filtering and
//! ordering can use an index.
//!
//! # Table Schema
//!
//! ```sql
//! CREATE TABLE IF NOT EXISTS tasks (
//!     id UUID PRIMARY KEY,
//!     status TEXT NOT NULL,
//!     created_at TIMESTAMPTZ NOT NULL,
//!     data JSONB NOT NULL
//! );
//! CREATE INDEX IF NOT EXISTS idx_tasks_created_at ON tasks (created_at DESC);
//! CREATE INDEX IF NOT EXISTS idx_tasks_status_created_at ON tasks (status, created_at DESC);
//! ```
//!
//! Every operation is a single statement, so each is atomic for the document
//! it touches.

use futures::future::{BoxFuture, FutureExt};
use sqlx::PgPool;

use tasktracker_domain::{NewTask, Task, TaskId, TaskPatch, TaskStatus, Timestamp};

use crate::store::{StoreError, StoreFuture, TaskStore};

const CREATE_TABLE: &str = "CREATE TABLE IF NOT EXISTS tasks (\
     id UUID PRIMARY KEY, \
     status TEXT NOT NULL, \
     created_at TIMESTAMPTZ NOT NULL, \
     data JSONB NOT NULL)";

const CREATE_INDEXES: [&str; 2] = [
    "CREATE INDEX IF NOT EXISTS idx_tasks_created_at ON tasks (created_at DESC)",
    "CREATE INDEX IF NOT EXISTS idx_tasks_status_created_at ON tasks (status, created_at DESC)",
];

// =============================================================================
// Helper Functions
// =============================================================================

/// Maps a driver error, separating connectivity failures from the rest.
fn map_database_error(error: &sqlx::Error) -> StoreError {
    match error {
        sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
            StoreError::Unavailable(error.to_string())
        }
        _ => StoreError::Database(error.to_string()),
    }
}

fn encode<T: serde::Serialize>(value: &T) -> Result<serde_json::Value, StoreError> {
    serde_json::to_value(value).map_err(|error| StoreError::Serialization(error.to_string()))
}

fn decode(data: serde_json::Value) -> Result<Task, StoreError> {
    serde_json::from_value(data).map_err(|error| StoreError::Serialization(error.to_string()))
}

// =============================================================================
// PostgreSQL Task Store
// =============================================================================

/// `PostgreSQL` implementation of [`TaskStore`].
///
/// # Example
///
/// ```ignore
/// let pool = PgPool::connect("postgres://localhost/tasktracker").await?;
/// let store = PostgresTaskStore::new(pool);
/// store.initialize().await?;
/// ```
#[derive(Debug, Clone)]
pub struct PostgresTaskStore {
    pool: PgPool,
}

impl PostgresTaskStore {
    /// Creates a store over an existing connection pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Returns the underlying connection pool.
    #[must_use]
    pub const fn pool(&self) -> &PgPool {
        &self.pool
    }
}

impl TaskStore for PostgresTaskStore {
    fn initialize(&self) -> StoreFuture<()> {
        let pool = self.pool.clone();
        async move {
            sqlx::query(CREATE_TABLE)
                .execute(&pool)
                .await
                .map_err(|error| map_database_error(&error))?;
            for statement in CREATE_INDEXES {
                sqlx::query(statement)
                    .execute(&pool)
                    .await
                    .map_err(|error| map_database_error(&error))?;
            }
            tracing::info!("Task table ready");
            Ok(())
        }
        .boxed()
    }

    fn insert(&self, new_task: NewTask) -> StoreFuture<Task> {
        let pool = self.pool.clone();
        async move {
            let task = Task::create(TaskId::generate(), new_task, Timestamp::now());
            let data = encode(&task)?;

            sqlx::query("INSERT INTO tasks (id, status, created_at, data) VALUES ($1, $2, $3, $4)")
                .bind(*task.id.as_uuid())
                .bind(task.status.as_str())
                .bind(*task.created_at.as_datetime())
                .bind(data)
                .execute(&pool)
                .await
                .map_err(|error| map_database_error(&error))?;

            tracing::debug!(task_id = %task.id, "Inserted task");
            Ok(task)
        }
        .boxed()
    }

    fn find_all(&self, status: Option<TaskStatus>) -> StoreFuture<Vec<Task>> {
        let pool = self.pool.clone();
        async move {
            let rows: Vec<(serde_json::Value,)> = sqlx::query_as(
                "SELECT data FROM tasks \
                 WHERE ($1::text IS NULL OR status = $1) \
                 ORDER BY created_at DESC, id DESC",
            )
            .bind(status.map(TaskStatus::as_str))
            .fetch_all(&pool)
            .await
            .map_err(|error| map_database_error(&error))?;

            rows.into_iter().map(|(data,)| decode(data)).collect()
        }
        .boxed()
    }

    fn find_by_id(&self, id: &TaskId) -> StoreFuture<Option<Task>> {
        let pool = self.pool.clone();
        let id = *id.as_uuid();
        async move {
            let row: Option<(serde_json::Value,)> =
                sqlx::query_as("SELECT data FROM tasks WHERE id = $1")
                    .bind(id)
                    .fetch_optional(&pool)
                    .await
                    .map_err(|error| map_database_error(&error))?;

            row.map(|(data,)| decode(data)).transpose()
        }
        .boxed()
    }

    fn update_by_id(&self, id: &TaskId, patch: TaskPatch) -> StoreFuture<Option<Task>> {
        let pool = self.pool.clone();
        let id = *id;
        async move {
            let merge = encode(&patch)?;

            let row: Option<(serde_json::Value,)> = sqlx::query_as(
                "UPDATE tasks \
                 SET data = data || $2::jsonb, status = COALESCE($3, status) \
                 WHERE id = $1 \
                 RETURNING data",
            )
            .bind(*id.as_uuid())
            .bind(merge)
            .bind(patch.status.map(TaskStatus::as_str))
            .fetch_optional(&pool)
            .await
            .map_err(|error| map_database_error(&error))?;

            if row.is_some() {
                tracing::debug!(task_id = %id, "Updated task");
            }
            row.map(|(data,)| decode(data)).transpose()
        }
        .boxed()
    }

    fn delete_by_id(&self, id: &TaskId) -> StoreFuture<Option<Task>> {
        let pool = self.pool.clone();
        let id = *id;
        async move {
            let row: Option<(serde_json::Value,)> =
                sqlx::query_as("DELETE FROM tasks WHERE id = $1 RETURNING data")
                    .bind(*id.as_uuid())
                    .fetch_optional(&pool)
                    .await
                    .map_err(|error| map_database_error(&error))?;

            if row.is_some() {
                tracing::debug!(task_id = %id, "Deleted task");
            }
            row.map(|(data,)| decode(data)).transpose()
        }
        .boxed()
    }

    fn close(&self) -> BoxFuture<'static, ()> {
        let pool = self.pool.clone();
        async move {
            pool.close().await;
            tracing::info!("Database pool closed");
        }
        .boxed()
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use tasktracker_domain::Title;

    #[rstest]
    fn test_map_database_error_unavailable() {
        let error = map_database_error(&sqlx::Error::PoolTimedOut);
        assert!(matches!(error, StoreError::Unavailable(_)));

        let error = map_database_error(&sqlx::Error::PoolClosed);
        assert!(matches!(error, StoreError::Unavailable(_)));
    }

    #[rstest]
    fn test_map_database_error_other() {
        let error = map_database_error(&sqlx::Error::RowNotFound);
        assert!(matches!(error, StoreError::Database(_)));
    }

    #[rstest]
    fn test_decode_round_trips_document() {
        let task = Task::create(
            TaskId::generate(),
            NewTask::new(Title::parse("Stored").unwrap()).with_status(TaskStatus::InProgress),
            Timestamp::now(),
        );

        let decoded = decode(encode(&task).unwrap()).unwrap();

        assert_eq!(decoded, task);
    }

    #[rstest]
    fn test_decode_rejects_blank_title() {
        let document = serde_json::json!({
            "id": TaskId::generate().to_string(),
            "title": "   ",
            "description": "",
            "status": "pending",
            "createdAt": "2024-01-01T00:00:00Z",
        });

        assert!(matches!(decode(document), Err(StoreError::Serialization(_))));
    }

    #[rstest]
    fn test_patch_merge_document_contains_only_present_fields() {
        let merge = encode(&TaskPatch::new().description("notes")).unwrap();
        assert_eq!(merge, serde_json::json!({ "description": "notes" }));
    }
}
