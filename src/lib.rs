//! # zenlink
//!
//! Short-link resolution and price rounding for the studio platform.
//!
//! - [`resolver`] turns short codes into redirect targets, always falling
//!   back to a safe destination instead of erroring.
//! - [`pricing`] rounds raw prices with a named strategy and formats them
//!   for currency display. Pricing failures are surfaced, never guessed.
//!
//! The HTTP surface lives in [`routes`]; [`server`] wires configuration,
//! the Postgres link store and the Redis cache together.

pub mod admin;
pub mod cache;
pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod pricing;
pub mod resolver;
pub mod routes;
pub mod server;
pub mod state;

pub use error::{AppError, AppResult};
pub use state::AppState;
