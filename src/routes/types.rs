use crate::pricing::RoundedPrice;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

/// Largest amount accepted by the pricing endpoint
pub const MAX_PRICE_AMOUNT: u64 = 1_000_000_000_000;

/// Query parameters for rounding a price
#[derive(Debug, Deserialize, Validate, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct RoundPriceQuery {
    /// Raw non-negative price
    #[validate(range(max = 1_000_000_000_000u64, message = "Amount must be at most 1000000000000"))]
    pub amount: u64,

    /// One of `charm`, `hundred`, `thousand`, `auto`
    pub strategy: String,
}

/// Rounded price response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RoundPriceResponse {
    pub rounded_amount: u64,
    pub formatted: String,
    pub strategy: String,
}

impl From<RoundedPrice> for RoundPriceResponse {
    fn from(price: RoundedPrice) -> Self {
        Self {
            rounded_amount: price.rounded_amount,
            formatted: price.formatted,
            strategy: price.strategy.to_string(),
        }
    }
}

/// Available rounding strategies
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct StrategiesResponse {
    pub strategies: Vec<String>,
    pub auto_breakpoint: u64,
}

/// Error body returned by failing endpoints
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

/// Health check response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthCheckResponse {
    pub status: String,
    pub resolver: HealthStatus,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Individual health status
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthStatus {
    pub status: String,
    pub latency_ms: Option<u64>,
}
