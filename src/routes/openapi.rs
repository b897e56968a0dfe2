use crate::routes::types::{
    ErrorResponse, HealthCheckResponse, HealthStatus, RoundPriceResponse, StrategiesResponse,
};
use axum::Json;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(title = "zenlink", description = "Short link resolution and price rounding"),
    paths(
        super::pricing_handlers::round_price,
        super::pricing_handlers::list_strategies,
        super::health::health_check,
    ),
    components(schemas(
        RoundPriceResponse,
        StrategiesResponse,
        ErrorResponse,
        HealthCheckResponse,
        HealthStatus,
    )),
    tags(
        (name = "pricing", description = "Price rounding"),
        (name = "health", description = "Service health")
    )
)]
pub struct ApiDoc;

/// Serve the OpenAPI document
pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_lists_pricing_paths() {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key("/_pricing/round"));
        assert!(doc.paths.paths.contains_key("/_pricing/strategies"));
        assert!(doc.paths.paths.contains_key("/_health"));
    }
}
