//! Server startup and shutdown.
//!
//! This module wires the configured link store into a resolver, builds the
//! application state and router, and serves it until a shutdown signal.

use crate::cache::{LinkCache, RedisCache};
use crate::config::Config;
use crate::db::Repository;
use crate::error::{AppError, AppResult};
use crate::pricing::PricingService;
use crate::resolver::{
    CachedLinkResolver, InMemoryLinkResolver, LinkRedirector, LinkResolver, PgLinkResolver,
};
use crate::routes;
use crate::state::AppState;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{info, warn};

/// Where short links are looked up
#[derive(Debug, Clone)]
pub enum LinkSource {
    /// The `short_links` table, optionally migrating it first
    Postgres { migrate: bool },
    /// A fixed set of `(code, url)` pairs held in memory
    InMemory(Vec<(String, String)>),
}

/// Open a database connection pool from configuration.
pub async fn connect_repository(config: &Config) -> AppResult<Repository> {
    Repository::new(
        config.database_url()?,
        config.database.max_connections,
        config.database.min_connections,
        config.database.acquire_timeout_seconds,
    )
    .await
}

/// Build the lookup collaborator for `source`.
///
/// A Postgres source gets a Redis read-through cache in front of it when
/// caching is enabled.
pub async fn build_resolver(config: &Config, source: LinkSource) -> AppResult<Arc<dyn LinkResolver>> {
    match source {
        LinkSource::InMemory(links) => {
            info!("Using in-memory link store with {} link(s)", links.len());
            Ok(Arc::new(links.into_iter().collect::<InMemoryLinkResolver>()))
        }
        LinkSource::Postgres { migrate } => {
            info!("Connecting to database...");
            let repository = connect_repository(config).await?;

            if migrate {
                info!("Running database migrations...");
                repository.run_migrations().await?;
                info!("Migrations completed successfully");
            }

            let resolver = PgLinkResolver::new(repository);

            if !config.cache.enabled {
                return Ok(Arc::new(resolver));
            }

            info!("Connecting to cache...");
            let cache = RedisCache::new(
                &config.cache.url,
                config.cache.max_connections,
                config.cache.default_ttl_seconds,
            )?;

            match cache.ping().await {
                Ok(()) => info!("Cache connection verified"),
                Err(e) => warn!("Cache ping failed: {}. Lookups will bypass it until it recovers.", e),
            }

            Ok(Arc::new(CachedLinkResolver::new(resolver, cache)))
        }
    }
}

/// Build the shared application state around `resolver`.
pub fn build_state(config: &Config, resolver: Arc<dyn LinkResolver>) -> AppResult<AppState> {
    let rounder = config.pricing.rounder().map_err(AppError::Configuration)?;
    let pricing = PricingService::new(rounder, config.pricing.currency_format());
    let redirector = LinkRedirector::new(resolver, config.links.fallback_url.clone());

    Ok(AppState::new(redirector, pricing))
}

/// Run the web server with the given configuration.
///
/// # Errors
///
/// Returns an error if the link store can't be reached, migrations fail, the
/// address can't be bound, or the server stops with an I/O error. A cache
/// that fails its startup ping is not an error.
pub async fn run_server(config: Config, addr: String, source: LinkSource) -> AppResult<()> {
    info!("Starting zenlink server...");

    let resolver = build_resolver(&config, source).await?;
    let state = Arc::new(build_state(&config, resolver)?);

    let app = routes::create_router(state, &config.cors, &config.rate_limit)?;

    let listener = TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::Internal(format!("Failed to bind to address {}: {}", addr, e)))?;

    info!("Server listening on {}", addr);
    info!("Fallback destination: {}", config.links.fallback_url);

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(create_shutdown_signal())
    .await
    .map_err(|e| AppError::Internal(format!("Server error: {}", e)))?;

    info!("Server shutdown complete");
    Ok(())
}

/// Resolves when Ctrl+C (or SIGTERM on Unix) is received.
///
/// # Panics
///
/// Panics if the signal handlers can't be installed; without them the
/// server could never shut down gracefully.
async fn create_shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(unix)]
    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    #[cfg(not(unix))]
    ctrl_c.await;

    info!("Shutdown signal received");
}
