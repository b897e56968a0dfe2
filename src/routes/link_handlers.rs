use crate::resolver::Resolution;
use axum::extract::{Path, State};
use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use std::sync::Arc;

use super::AppState;

/// Resolve a short code and redirect.
///
/// Always answers 307: either to the stored destination or to the
/// configured fallback.
pub async fn resolve_link(State(state): State<Arc<AppState>>, Path(code): Path<String>) -> Response {
    let target = match state.redirector.resolve(&code).await {
        Resolution::Destination(url) => url,
        Resolution::Fallback(_) => state.redirector.fallback_url().to_string(),
    };

    redirect_to(&target, state.redirector.fallback_url())
}

/// `/s/` with no code at all
pub async fn resolve_empty(State(state): State<Arc<AppState>>) -> Response {
    let fallback = state.redirector.fallback_url();

    tracing::warn!(code = "", reason = "invalid_input", "Rejected malformed short link code");
    redirect_to(fallback, fallback)
}

/// 307 to `target`, or to `fallback` if `target` can't be sent as a header
fn redirect_to(target: &str, fallback: &str) -> Response {
    let location = HeaderValue::from_str(target)
        .or_else(|_| {
            tracing::warn!(destination = %target.escape_debug(), "Destination is not a valid Location header");
            HeaderValue::from_str(fallback)
        })
        .unwrap_or_else(|_| HeaderValue::from_static("/"));

    (StatusCode::TEMPORARY_REDIRECT, [(header::LOCATION, location)]).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_redirect_to_destination() {
        let response = redirect_to("https://example.com/a?b=c", "/");
        assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
        assert_eq!(
            response.headers()[header::LOCATION],
            "https://example.com/a?b=c"
        );
    }

    #[test]
    fn test_unsendable_destination_uses_fallback() {
        let response = redirect_to("https://example.com/\r\nSet-Cookie: x=1", "/home");
        assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
        assert_eq!(response.headers()[header::LOCATION], "/home");
    }
}
