//! Readiness probe

use axum::{Json, Router, extract::State, routing::get};
use serde::Serialize;

use crate::state::AppState;

#[derive(Serialize)]
struct ReadinessResponse {
    status: &'static str,
    mongodb: bool,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/ready", get(readiness_check))
        .with_state(state)
}

/// Ready only when the MongoDB connection answers
async fn readiness_check(State(state): State<AppState>) -> Json<ReadinessResponse> {
    let mongodb = database::mongodb::check_health(&state.mongo_client).await;

    Json(ReadinessResponse {
        status: if mongodb { "ready" } else { "unhealthy" },
        mongodb,
    })
}
