use async_trait::async_trait;
use futures::stream::BoxStream;

use crate::error::TaskResult;
use crate::models::Task;

/// Store trait for Task persistence
///
/// This trait defines the document-store interface for tasks.
/// Implementations can use different storage backends (MongoDB, etc.)
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TaskStore: Send + Sync {
    /// Persist a task. Inserts and assigns a fresh identifier when `id` is
    /// unset; otherwise overwrites the record at `id`. Overwriting a record
    /// that no longer exists yields `NotFound`.
    async fn save(&self, task: Task) -> TaskResult<Task>;

    /// Get a task by identifier
    async fn find_by_id(&self, id: &str) -> TaskResult<Option<Task>>;

    /// Get all tasks, materialized, in insertion order
    async fn find_all(&self) -> TaskResult<Vec<Task>>;

    /// Get all tasks as a lazy stream over the store cursor.
    ///
    /// Dropping the stream releases the cursor, so a consumer may stop
    /// early without leaking the underlying connection.
    async fn stream_all(&self) -> TaskResult<BoxStream<'static, TaskResult<Task>>>;

    /// Check whether a task with this identifier exists
    async fn exists_by_id(&self, id: &str) -> TaskResult<bool>;

    /// Delete a task by identifier; deleting an absent record is a no-op
    async fn delete_by_id(&self, id: &str) -> TaskResult<()>;

    /// Delete every task (test/reset support)
    async fn delete_all(&self) -> TaskResult<()>;
}
