//! Tasks domain: a MongoDB-backed task resource with full CRUD, merge-patch
//! and streamed retrieval.
//!
//! Layering, top to bottom: HTTP handlers (axum + utoipa) call into
//! [`TaskService`], which owns identifier validation and merge semantics
//! and talks to a [`TaskStore`] implementation; [`MongoTaskStore`] is the
//! production store, and tests substitute mocks or in-memory stores at the
//! same seam.
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_tasks::{MongoTaskStore, TaskService, handlers};
//! use mongodb::Client;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = Client::with_uri_str("mongodb://localhost:27017").await?;
//! let store = MongoTaskStore::new(client.database("mydb"));
//! let router = handlers::router(TaskService::new(store));
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod handlers;
pub mod models;
pub mod mongodb;
pub mod service;
pub mod store;

pub use error::{TaskError, TaskResult};
pub use handlers::ApiDoc;
pub use models::Task;
pub use mongodb::MongoTaskStore;
pub use service::TaskService;
pub use store::TaskStore;
