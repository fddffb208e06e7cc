use axum_helpers::{create_production_app, health_router};
use core_config::tracing::{init_tracing, install_color_eyre};
use std::time::Duration;
use tracing::info;

mod api;
mod config;
mod openapi;
mod state;

use config::Config;
use state::AppState;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // color-eyre before anything that can fail, tracing before anything noisy
    install_color_eyre();
    let config = Config::from_env()?;
    init_tracing(&config.environment);

    info!("Connecting to MongoDB at {}", config.mongodb.url());
    let mongo_client =
        database::mongodb::connect_from_config_with_retry(&config.mongodb, None).await?;
    let db = mongo_client.database(config.mongodb.database());
    info!(database = config.mongodb.database(), "MongoDB connected");

    let state = AppState {
        config,
        mongo_client,
        db,
    };

    // Domain routes nested under /api, plus OpenAPI docs and liveness probes
    let api_routes = api::routes(&state);
    let router = axum_helpers::create_router::<openapi::ApiDoc>(api_routes).await?;
    let app = router.merge(health_router(state.config.app.clone()));

    info!("Starting Tasks API");

    create_production_app(
        app,
        &state.config.server,
        Duration::from_secs(30),
        async move {
            // The client closes its pool on drop
            info!("Closing MongoDB connections");
            drop(state.mongo_client);
        },
    )
    .await
    .map_err(|e| eyre::eyre!("Server error: {}", e))?;

    info!("Tasks API shutdown complete");
    Ok(())
}
