//! MongoDB connectivity for the task service: configuration, connection
//! establishment with retry, and health probes.
//!
//! The `config` feature pulls in `core_config` so [`mongodb::MongoConfig`]
//! can load itself from environment variables.

pub mod common;
pub mod mongodb;

pub use common::{RetryConfig, retry, retry_with_backoff};
