pub mod health;
pub mod link_handlers;
pub mod openapi;
pub mod pricing_handlers;
mod router;
pub mod types;

pub use router::create_router;

// Re-export AppState for convenience
pub use crate::state::AppState;
