use mongodb::{Client, Database};

/// Shared application state handed to the API routers.
///
/// Cloning is cheap: the MongoDB client and database handles are Arc-backed
/// and share one connection pool.
#[derive(Clone)]
pub struct AppState {
    pub config: crate::config::Config,
    pub mongo_client: Client,
    pub db: Database,
}
