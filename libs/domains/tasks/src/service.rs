//! Task Service - the resource-management core

use futures::stream::BoxStream;
use std::sync::Arc;
use tracing::instrument;

use crate::error::{TaskError, TaskResult};
use crate::models::Task;
use crate::store::TaskStore;

/// Task service orchestrating the store operations.
///
/// The service validates identifiers before any store access, enforces the
/// create/replace/merge-patch invariants and maps outcomes to the error
/// taxonomy. It holds no mutable state of its own and takes no locks:
/// operations on different identifiers run fully concurrently, and
/// operations on the *same* identifier are not serialized either - the
/// check-then-write sequences in [`replace`](TaskService::replace) and
/// [`partial_update`](TaskService::partial_update) have an unguarded window
/// between the read and the write, so concurrent writers are last-write-wins
/// at the store layer.
pub struct TaskService<S: TaskStore> {
    store: Arc<S>,
}

impl<S: TaskStore> TaskService<S> {
    /// Create a new TaskService with the given store
    pub fn new(store: S) -> Self {
        Self {
            store: Arc::new(store),
        }
    }

    /// Create a new task.
    ///
    /// The payload must not carry an identifier; the store assigns one on
    /// insert. Returns the persisted task including the assigned identifier.
    #[instrument(skip(self, task))]
    pub async fn create(&self, task: Task) -> TaskResult<Task> {
        if task.id.is_some() {
            return Err(TaskError::IdConflict);
        }

        self.store.save(task).await
    }

    /// Fully replace the task at `id` with the payload.
    ///
    /// Every field of the stored record is overwritten, including clearing
    /// fields absent from the payload. The payload identifier must be set
    /// and equal to `id`, and the record must exist; there is no
    /// upsert-on-update.
    ///
    /// Existence check and write are two separate store calls; a record
    /// deleted in between surfaces as `NotFound` from the save.
    #[instrument(skip(self, task))]
    pub async fn replace(&self, id: &str, task: Task) -> TaskResult<Task> {
        let body_id = task.id.as_deref().ok_or(TaskError::MissingId)?;
        if body_id != id {
            return Err(TaskError::IdMismatch {
                path_id: id.to_string(),
                body_id: body_id.to_string(),
            });
        }

        if !self.store.exists_by_id(id).await? {
            return Err(TaskError::NotFound(id.to_string()));
        }

        self.store.save(task).await
    }

    /// Merge-patch the task at `id`.
    ///
    /// Loads the stored task, overwrites only the fields present in the
    /// patch and saves the merged result. Same identifier preconditions as
    /// [`replace`](TaskService::replace), and the same read-modify-write
    /// window: two concurrent patches on one identifier can silently lose
    /// one patch's effect.
    #[instrument(skip(self, patch))]
    pub async fn partial_update(&self, id: &str, patch: Task) -> TaskResult<Task> {
        let body_id = patch.id.as_deref().ok_or(TaskError::MissingId)?;
        if body_id != id {
            return Err(TaskError::IdMismatch {
                path_id: id.to_string(),
                body_id: body_id.to_string(),
            });
        }

        if !self.store.exists_by_id(id).await? {
            return Err(TaskError::NotFound(id.to_string()));
        }

        let mut task = self
            .store
            .find_by_id(id)
            .await?
            .ok_or_else(|| TaskError::NotFound(id.to_string()))?;
        task.merge_from(patch);

        self.store.save(task).await
    }

    /// Get all tasks as a materialized list
    #[instrument(skip(self))]
    pub async fn get_all(&self) -> TaskResult<Vec<Task>> {
        self.store.find_all().await
    }

    /// Get all tasks as a lazy stream.
    ///
    /// Records are emitted as the store yields them; the stream is not
    /// restartable and may be dropped early without leaking the cursor.
    #[instrument(skip(self))]
    pub async fn get_all_streamed(&self) -> TaskResult<BoxStream<'static, TaskResult<Task>>> {
        self.store.stream_all().await
    }

    /// Get one task by identifier. Absence is a value (`Ok(None)`), not an
    /// error.
    #[instrument(skip(self))]
    pub async fn get_one(&self, id: &str) -> TaskResult<Option<Task>> {
        self.store.find_by_id(id).await
    }

    /// Delete the task at `id`. Deleting an absent identifier succeeds.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: &str) -> TaskResult<()> {
        self.store.delete_by_id(id).await
    }

    /// Delete every task (reset/test scenarios)
    #[instrument(skip(self))]
    pub async fn delete_all(&self) -> TaskResult<()> {
        self.store.delete_all().await
    }
}

impl<S: TaskStore> Clone for TaskService<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MockTaskStore;
    use chrono::NaiveDate;

    fn task(id: Option<&str>, name: Option<&str>) -> Task {
        Task {
            id: id.map(str::to_string),
            name: name.map(str::to_string),
            ..Task::default()
        }
    }

    #[tokio::test]
    async fn test_create_assigns_id_via_store() {
        let mut store = MockTaskStore::new();
        store.expect_save().times(1).returning(|mut t| {
            t.id = Some("68b100000000000000000001".to_string());
            Ok(t)
        });

        let service = TaskService::new(store);
        let created = service.create(task(None, Some("A"))).await.unwrap();

        assert_eq!(created.id.as_deref(), Some("68b100000000000000000001"));
        assert_eq!(created.name.as_deref(), Some("A"));
    }

    #[tokio::test]
    async fn test_create_with_preset_id_fails_before_store_access() {
        let mut store = MockTaskStore::new();
        store.expect_save().never();

        let service = TaskService::new(store);
        let err = service.create(task(Some("X"), None)).await.unwrap_err();

        assert!(matches!(err, TaskError::IdConflict));
    }

    #[tokio::test]
    async fn test_replace_requires_payload_id() {
        let mut store = MockTaskStore::new();
        store.expect_exists_by_id().never();
        store.expect_save().never();

        let service = TaskService::new(store);
        let err = service.replace("X", task(None, None)).await.unwrap_err();

        assert!(matches!(err, TaskError::MissingId));
    }

    #[tokio::test]
    async fn test_replace_rejects_mismatched_id_before_store_access() {
        let mut store = MockTaskStore::new();
        store.expect_exists_by_id().never();
        store.expect_save().never();

        let service = TaskService::new(store);
        let err = service
            .replace("X", task(Some("Y"), None))
            .await
            .unwrap_err();

        assert!(
            matches!(err, TaskError::IdMismatch { ref path_id, ref body_id }
                if path_id == "X" && body_id == "Y")
        );
    }

    #[tokio::test]
    async fn test_replace_nonexistent_id_is_not_found() {
        let mut store = MockTaskStore::new();
        store
            .expect_exists_by_id()
            .times(1)
            .returning(|_| Ok(false));
        store.expect_save().never();

        let service = TaskService::new(store);
        let err = service
            .replace("X", task(Some("X"), Some("A")))
            .await
            .unwrap_err();

        assert!(matches!(err, TaskError::NotFound(ref id) if id == "X"));
    }

    #[tokio::test]
    async fn test_replace_saves_full_payload() {
        let mut store = MockTaskStore::new();
        store.expect_exists_by_id().times(1).returning(|_| Ok(true));
        store
            .expect_save()
            .times(1)
            .withf(|t| t.id.as_deref() == Some("X") && t.name.as_deref() == Some("B"))
            .returning(Ok);

        let service = TaskService::new(store);
        let saved = service
            .replace("X", task(Some("X"), Some("B")))
            .await
            .unwrap();

        assert_eq!(saved.name.as_deref(), Some("B"));
    }

    #[tokio::test]
    async fn test_replace_surfaces_race_as_not_found() {
        // Record deleted between the existence check and the save
        let mut store = MockTaskStore::new();
        store.expect_exists_by_id().times(1).returning(|_| Ok(true));
        store
            .expect_save()
            .times(1)
            .returning(|_| Err(TaskError::NotFound("X".to_string())));

        let service = TaskService::new(store);
        let err = service
            .replace("X", task(Some("X"), None))
            .await
            .unwrap_err();

        assert!(matches!(err, TaskError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_partial_update_merges_only_supplied_fields() {
        let mut store = MockTaskStore::new();
        store.expect_exists_by_id().times(1).returning(|_| Ok(true));
        store.expect_find_by_id().times(1).returning(|id| {
            Ok(Some(Task {
                id: Some(id.to_string()),
                name: Some("A".to_string()),
                due_date: NaiveDate::from_ymd_opt(1970, 1, 1),
                completed: Some(false),
            }))
        });
        store
            .expect_save()
            .times(1)
            .withf(|t| {
                t.name.as_deref() == Some("A")
                    && t.due_date == NaiveDate::from_ymd_opt(2024, 1, 1)
                    && t.completed == Some(false)
            })
            .returning(Ok);

        let service = TaskService::new(store);
        let patch = Task {
            id: Some("X".to_string()),
            due_date: NaiveDate::from_ymd_opt(2024, 1, 1),
            ..Task::default()
        };
        let merged = service.partial_update("X", patch).await.unwrap();

        assert_eq!(merged.name.as_deref(), Some("A"));
        assert_eq!(merged.due_date, NaiveDate::from_ymd_opt(2024, 1, 1));
        assert_eq!(merged.completed, Some(false));
    }

    #[tokio::test]
    async fn test_partial_update_nonexistent_id_is_not_found() {
        let mut store = MockTaskStore::new();
        store
            .expect_exists_by_id()
            .times(1)
            .returning(|_| Ok(false));
        store.expect_find_by_id().never();
        store.expect_save().never();

        let service = TaskService::new(store);
        let err = service
            .partial_update("X", task(Some("X"), None))
            .await
            .unwrap_err();

        assert!(matches!(err, TaskError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_get_one_absence_is_a_value() {
        let mut store = MockTaskStore::new();
        store.expect_find_by_id().times(1).returning(|_| Ok(None));

        let service = TaskService::new(store);
        assert!(service.get_one("X").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_delete_absent_id_succeeds() {
        let mut store = MockTaskStore::new();
        store.expect_delete_by_id().times(1).returning(|_| Ok(()));

        let service = TaskService::new(store);
        assert!(service.delete("X").await.is_ok());
    }

    #[tokio::test]
    async fn test_store_failure_propagates_unchanged() {
        let mut store = MockTaskStore::new();
        store
            .expect_find_all()
            .times(1)
            .returning(|| Err(TaskError::Store("connection reset".to_string())));

        let service = TaskService::new(store);
        let err = service.get_all().await.unwrap_err();

        assert!(matches!(err, TaskError::Store(ref msg) if msg == "connection reset"));
    }

    #[tokio::test]
    async fn test_get_all_streamed_yields_store_items() {
        use futures::StreamExt;
        use futures::stream;

        let mut store = MockTaskStore::new();
        store.expect_stream_all().times(1).returning(|| {
            let items = vec![
                Ok(task(Some("a"), Some("first"))),
                Ok(task(Some("b"), Some("second"))),
            ];
            Ok(stream::iter(items).boxed())
        });

        let service = TaskService::new(store);
        let collected: Vec<_> = service
            .get_all_streamed()
            .await
            .unwrap()
            .collect::<Vec<_>>()
            .await;

        assert_eq!(collected.len(), 2);
        assert_eq!(
            collected[0].as_ref().unwrap().name.as_deref(),
            Some("first")
        );
    }
}
