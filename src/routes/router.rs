use crate::config::{CorsConfig, RateLimitConfig};
use crate::error::{AppError, AppResult};
use crate::middleware::{request_id_middleware, ClientIpKeyExtractor};
use axum::middleware;
use axum::routing::get;
use std::sync::Arc;
use tower_governor::governor::GovernorConfigBuilder;
use tower_governor::GovernorLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use super::health;
use super::link_handlers;
use super::openapi;
use super::pricing_handlers;
use super::AppState;

/// Create application router
pub fn create_router(
    state: Arc<AppState>,
    cors_config: &CorsConfig,
    rate_limit_config: &RateLimitConfig,
) -> AppResult<axum::Router> {
    let governor_layer = GovernorLayer::new(
        GovernorConfigBuilder::default()
            .per_millisecond(rate_limit_config.replenish_interval_ms().max(1))
            .burst_size(rate_limit_config.burst_size)
            .key_extractor(ClientIpKeyExtractor)
            .finish()
            .ok_or_else(|| AppError::Configuration("Invalid rate limit".to_string()))?,
    );

    // Configure CORS with specific origins
    let cors = if cors_config.allows_any() {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        let origins: Vec<http::HeaderValue> = cors_config
            .allowed_origins
            .iter()
            .filter_map(|s| s.parse::<http::HeaderValue>().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(Any)
            .allow_headers(Any)
    };

    // Short links always redirect, so they sit outside the rate limiter
    let link_routes = axum::Router::new()
        .route("/s", get(link_handlers::resolve_empty))
        .route("/s/", get(link_handlers::resolve_empty))
        .route("/s/{code}", get(link_handlers::resolve_link))
        .route("/{code}", get(link_handlers::resolve_link));

    let pricing_routes = axum::Router::new()
        .route("/_pricing/round", get(pricing_handlers::round_price))
        .route("/_pricing/strategies", get(pricing_handlers::list_strategies))
        .layer(governor_layer);

    // Operational endpoints (no rate limiting)
    let ops_routes = axum::Router::new()
        .route("/_health", get(health::health_check))
        .route("/_openapi.json", get(openapi::openapi_json));

    Ok(link_routes
        .merge(pricing_routes)
        .merge(ops_routes)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(request_id_middleware))
        .with_state(state))
}
