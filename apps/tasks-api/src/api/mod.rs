//! API routes module
//!
//! This module defines all HTTP API routes for the Tasks API.

pub mod health;
pub mod tasks;

use axum::Router;

use crate::state::AppState;

/// Create all API routes
/// Note: These are nested under /api by axum_helpers::create_router
pub fn routes(state: &AppState) -> Router {
    Router::new()
        .nest("/tasks", tasks::router(state))
        .merge(health::router(state.clone()))
}
