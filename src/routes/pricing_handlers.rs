use crate::error::{AppError, AppResult};
use crate::pricing::RoundingStrategy;
use crate::routes::types::{
    ErrorResponse, RoundPriceQuery, RoundPriceResponse, StrategiesResponse,
};
use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::Json;
use std::sync::Arc;
use validator::Validate;

use super::AppState;

/// Round a price with a named strategy
#[utoipa::path(
    get,
    path = "/_pricing/round",
    params(RoundPriceQuery),
    responses(
        (status = 200, description = "Rounded and formatted price", body = RoundPriceResponse),
        (status = 400, description = "Unknown strategy or invalid amount", body = ErrorResponse)
    ),
    tag = "pricing"
)]
pub async fn round_price(
    State(state): State<Arc<AppState>>,
    query: Result<Query<RoundPriceQuery>, QueryRejection>,
) -> AppResult<Json<RoundPriceResponse>> {
    let Query(query) = query.map_err(|e| AppError::InvalidRequest(e.body_text()))?;

    query
        .validate()
        .map_err(|e| AppError::InvalidRequest(format!("Validation failed: {}", e)))?;

    let price = state.pricing.quote(query.amount, &query.strategy)?;

    Ok(Json(price.into()))
}

/// List rounding strategies and the active `auto` breakpoint
#[utoipa::path(
    get,
    path = "/_pricing/strategies",
    responses(
        (status = 200, description = "Available strategies", body = StrategiesResponse)
    ),
    tag = "pricing"
)]
pub async fn list_strategies(State(state): State<Arc<AppState>>) -> Json<StrategiesResponse> {
    Json(StrategiesResponse {
        strategies: RoundingStrategy::ALL
            .iter()
            .map(|s| s.as_str().to_string())
            .collect(),
        auto_breakpoint: state.pricing.rounder().auto_breakpoint(),
    })
}
