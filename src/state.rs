use crate::pricing::PricingService;
use crate::resolver::LinkRedirector;

/// Application state shared across all HTTP handlers.
///
/// Wrapped in `Arc` and handed to handlers through Axum's `State` extractor.
#[derive(Clone)]
pub struct AppState {
    /// Short link resolution with its fallback destination
    pub redirector: LinkRedirector,

    /// Price rounding and currency formatting
    pub pricing: PricingService,
}

impl AppState {
    pub fn new(redirector: LinkRedirector, pricing: PricingService) -> Self {
        Self {
            redirector,
            pricing,
        }
    }
}
