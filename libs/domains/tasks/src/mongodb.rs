//! MongoDB implementation of TaskStore

use async_trait::async_trait;
use chrono::NaiveDate;
use futures::stream::BoxStream;
use futures::{StreamExt, TryStreamExt};
use mongodb::{
    Collection, Database,
    bson::{doc, oid::ObjectId},
};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::error::{TaskError, TaskResult};
use crate::models::Task;
use crate::store::TaskStore;

/// Persisted shape of a task: one document per task, `_id` holds the
/// store-assigned ObjectId. Kept separate from [`Task`] so the API model
/// can carry the identifier as an opaque hex string.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TaskDocument {
    #[serde(rename = "_id")]
    id: ObjectId,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    due_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    completed: Option<bool>,
}

impl TaskDocument {
    fn from_task(task: Task, id: ObjectId) -> Self {
        Self {
            id,
            name: task.name,
            due_date: task.due_date,
            completed: task.completed,
        }
    }

    fn into_task(self) -> Task {
        Task {
            id: Some(self.id.to_hex()),
            name: self.name,
            due_date: self.due_date,
            completed: self.completed,
        }
    }
}

/// An identifier that does not parse as an ObjectId can never match a
/// stored document, so callers treat `None` as "nonexistent identifier".
fn parse_object_id(id: &str) -> Option<ObjectId> {
    ObjectId::parse_str(id).ok()
}

/// MongoDB implementation of the TaskStore
pub struct MongoTaskStore {
    collection: Collection<TaskDocument>,
}

impl MongoTaskStore {
    /// Create a new MongoTaskStore on the `tasks` collection
    ///
    /// # Example
    /// ```ignore
    /// let client = Client::with_uri_str("mongodb://localhost:27017").await?;
    /// let db = client.database("mydb");
    /// let store = MongoTaskStore::new(db);
    /// ```
    pub fn new(db: Database) -> Self {
        let collection = db.collection::<TaskDocument>("tasks");
        Self { collection }
    }

    /// Create a new MongoTaskStore with a custom collection name
    pub fn with_collection(db: Database, collection_name: &str) -> Self {
        let collection = db.collection::<TaskDocument>(collection_name);
        Self { collection }
    }
}

#[async_trait]
impl TaskStore for MongoTaskStore {
    #[instrument(skip(self, task))]
    async fn save(&self, task: Task) -> TaskResult<Task> {
        match task.id.clone() {
            // Insert: the store assigns the identifier
            None => {
                let document = TaskDocument::from_task(task, ObjectId::new());
                self.collection.insert_one(&document).await?;

                tracing::info!(task_id = %document.id, "Task created");
                Ok(document.into_task())
            }
            // Overwrite at the given identifier
            Some(id) => {
                let object_id =
                    parse_object_id(&id).ok_or_else(|| TaskError::NotFound(id.clone()))?;
                let document = TaskDocument::from_task(task, object_id);

                let result = self
                    .collection
                    .replace_one(doc! { "_id": object_id }, &document)
                    .await?;

                // The record can vanish between a caller's existence check
                // and this write; surface that as NotFound rather than
                // silently inserting.
                if result.matched_count == 0 {
                    return Err(TaskError::NotFound(id));
                }

                tracing::info!(task_id = %id, "Task saved");
                Ok(document.into_task())
            }
        }
    }

    #[instrument(skip(self))]
    async fn find_by_id(&self, id: &str) -> TaskResult<Option<Task>> {
        let Some(object_id) = parse_object_id(id) else {
            return Ok(None);
        };

        let document = self.collection.find_one(doc! { "_id": object_id }).await?;
        Ok(document.map(TaskDocument::into_task))
    }

    #[instrument(skip(self))]
    async fn find_all(&self) -> TaskResult<Vec<Task>> {
        let options = mongodb::options::FindOptions::builder()
            .sort(doc! { "_id": 1 })
            .build();

        let cursor = self.collection.find(doc! {}).with_options(options).await?;
        let documents: Vec<TaskDocument> = cursor.try_collect().await?;

        Ok(documents.into_iter().map(TaskDocument::into_task).collect())
    }

    #[instrument(skip(self))]
    async fn stream_all(&self) -> TaskResult<BoxStream<'static, TaskResult<Task>>> {
        let options = mongodb::options::FindOptions::builder()
            .sort(doc! { "_id": 1 })
            .build();

        let cursor = self.collection.find(doc! {}).with_options(options).await?;

        // The cursor owns its connection; dropping the boxed stream drops
        // the cursor, so early consumer termination releases it.
        let stream = cursor
            .map(|item| {
                item.map(TaskDocument::into_task)
                    .map_err(TaskError::from)
            })
            .boxed();

        Ok(stream)
    }

    #[instrument(skip(self))]
    async fn exists_by_id(&self, id: &str) -> TaskResult<bool> {
        let Some(object_id) = parse_object_id(id) else {
            return Ok(false);
        };

        let count = self
            .collection
            .count_documents(doc! { "_id": object_id })
            .await?;
        Ok(count > 0)
    }

    #[instrument(skip(self))]
    async fn delete_by_id(&self, id: &str) -> TaskResult<()> {
        let Some(object_id) = parse_object_id(id) else {
            return Ok(());
        };

        // Idempotent: a zero deleted_count is not an error
        self.collection.delete_one(doc! { "_id": object_id }).await?;

        tracing::info!(task_id = %id, "Task deleted");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete_all(&self) -> TaskResult<()> {
        let result = self.collection.delete_many(doc! {}).await?;
        tracing::info!(deleted = result.deleted_count, "All tasks deleted");
        Ok(())
    }
}
