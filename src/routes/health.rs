use crate::routes::types::{HealthCheckResponse, HealthStatus};
use axum::extract::State;
use axum::Json;
use std::sync::Arc;
use std::time::{Duration, Instant};

use super::AppState;

/// Health check endpoint
#[utoipa::path(
    get,
    path = "/_health",
    responses(
        (status = 200, description = "Service health", body = HealthCheckResponse)
    ),
    tag = "health"
)]
pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<HealthCheckResponse> {
    let start = Instant::now();

    // Check the link store behind the resolver
    let resolver_health = match tokio::time::timeout(
        Duration::from_secs(5),
        state.redirector.resolver().ping(),
    )
    .await
    {
        Ok(Ok(())) => HealthStatus {
            status: "healthy".to_string(),
            latency_ms: Some(start.elapsed().as_millis() as u64),
        },
        Ok(Err(e)) => {
            tracing::warn!("Resolver health check failed: {}", e);
            HealthStatus {
                status: "unhealthy".to_string(),
                latency_ms: None,
            }
        }
        Err(_) => {
            tracing::warn!("Resolver health check timed out");
            HealthStatus {
                status: "unhealthy".to_string(),
                latency_ms: None,
            }
        }
    };

    // Redirects still work when the store is down, they just fall back
    let overall_status = if resolver_health.status == "healthy" {
        "healthy"
    } else {
        "degraded"
    };

    Json(HealthCheckResponse {
        status: overall_status.to_string(),
        resolver: resolver_health,
        timestamp: chrono::Utc::now(),
    })
}
