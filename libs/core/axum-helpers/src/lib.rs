//! # Axum Helpers
//!
//! A collection of utilities and helpers for building Axum web applications.
//!
//! ## Modules
//!
//! - **[`server`]**: Server setup, OpenAPI docs, graceful shutdown
//! - **[`errors`]**: Structured error responses with error codes
//! - **[`health`]**: Health and readiness endpoints
//!
//! ## Quick Start
//!
//! ```ignore
//! use axum::Router;
//! use axum_helpers::server::{create_app, create_router};
//! use core_config::server::ServerConfig;
//! use utoipa::OpenApi;
//!
//! #[derive(OpenApi)]
//! #[openapi(paths())]
//! struct ApiDoc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let api_routes = Router::new(); // Add your routes
//!     let router = create_router::<ApiDoc>(api_routes).await?;
//!
//!     let config = ServerConfig::default();
//!     create_app(router, &config).await?;
//!     Ok(())
//! }
//! ```

pub mod errors;
pub mod health;
pub mod server;
pub mod shutdown;

// Re-export error types
pub use errors::{AppError, ErrorCode, ErrorResponse};

// Re-export health types
pub use health::{
    HealthCheckFuture, HealthResponse, health_handler, health_router, run_health_checks,
};

// Re-export server types
pub use server::{create_app, create_production_app, create_router};

// Re-export shutdown types
pub use shutdown::{ShutdownCoordinator, shutdown_signal};
