use mongodb::Client;
use std::time::Instant;

/// Outcome of a detailed MongoDB health probe
#[derive(Debug, Clone)]
pub struct HealthStatus {
    pub healthy: bool,
    pub message: Option<String>,
    pub response_time_ms: u64,
}

/// Probe the deployment with a cheap server round-trip.
///
/// Used by readiness endpoints; returns plain true/false.
pub async fn check_health(client: &Client) -> bool {
    client.list_database_names().await.is_ok()
}

/// Like [`check_health`] but keeps the error text and response time
pub async fn check_health_detailed(client: &Client) -> HealthStatus {
    let start = Instant::now();
    let result = client.list_database_names().await;

    HealthStatus {
        healthy: result.is_ok(),
        message: result.err().map(|e| e.to_string()),
        response_time_ms: start.elapsed().as_millis() as u64,
    }
}
