//! MongoDB connector: config, connection with retry, health probes.

mod config;
mod connector;
mod health;

pub use config::MongoConfig;
pub use connector::{
    MongoError, connect, connect_from_config, connect_from_config_with_retry, connect_with_retry,
};
pub use health::{HealthStatus, check_health, check_health_detailed};

// Client types re-exported so consumers need no direct mongodb dependency
// for plain connection handling
pub use mongodb::{Client, Collection, Database};
