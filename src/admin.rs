//! Administrative command handlers.
//!
//! CLI commands for operating the service without starting the HTTP server:
//! running migrations, inspecting the link table, checking the cache, and
//! trying out resolution and price rounding from the terminal.

use crate::cache::{LinkCache, RedisCache};
use crate::config::Config;
use crate::error::{AppError, AppResult};
use crate::pricing::PricingService;
use crate::resolver::Resolution;
use crate::server::{build_resolver, build_state, connect_repository, LinkSource};
use clap::Subcommand;
use tracing::info;

/// Administrative commands available via CLI.
#[derive(Subcommand, Debug)]
pub enum AdminCommands {
    /// Run database migrations
    Migrate,

    /// Show link statistics
    Stats,

    /// Ping the cache server
    PingCache,

    /// Resolve a short code and print the redirect target
    Resolve {
        /// Short code to resolve
        code: String,
    },

    /// Round a price and print the formatted result
    Round {
        /// Raw non-negative price
        amount: u64,

        /// Rounding strategy: charm, hundred, thousand or auto
        strategy: String,
    },
}

/// Run an administrative command with the given configuration.
pub async fn run(config: Config, admin_command: AdminCommands) -> AppResult<()> {
    match admin_command {
        AdminCommands::Migrate => migrate(config).await,
        AdminCommands::Stats => stats(config).await,
        AdminCommands::PingCache => ping_cache(config).await,
        AdminCommands::Resolve { code } => resolve(config, &code).await,
        AdminCommands::Round { amount, strategy } => round(&config, amount, &strategy),
    }
}

/// Run database migrations.
async fn migrate(config: Config) -> AppResult<()> {
    info!("Running database migrations...");

    let repository = connect_repository(&config).await?;
    repository.run_migrations().await?;

    info!("Migrations completed successfully");
    Ok(())
}

/// Display statistics.
async fn stats(config: Config) -> AppResult<()> {
    info!("Fetching statistics...");

    let repository = connect_repository(&config).await?;
    let stats = repository.get_stats().await?;

    println!("\n=== zenlink Statistics ===");
    println!("Total links:     {}", stats.total_links);
    println!("Active links:    {}", stats.active_links);
    println!("Expired links:   {}", stats.expired_links);
    println!();

    Ok(())
}

/// Ping the cache server.
async fn ping_cache(config: Config) -> AppResult<()> {
    info!("Pinging cache server...");

    let cache = RedisCache::new(
        &config.cache.url,
        config.cache.max_connections,
        config.cache.default_ttl_seconds,
    )?;

    cache.ping().await?;

    info!("Cache server responded");
    Ok(())
}

/// Resolve a code the same way the HTTP entry point does.
async fn resolve(config: Config, code: &str) -> AppResult<()> {
    let resolver = build_resolver(&config, LinkSource::Postgres { migrate: false }).await?;
    let state = build_state(&config, resolver)?;

    match state.redirector.resolve(code).await {
        Resolution::Destination(url) => println!("{} -> {}", code, url),
        Resolution::Fallback(reason) => println!(
            "{} -> {} (fallback: {})",
            code,
            state.redirector.fallback_url(),
            reason.as_str()
        ),
    }

    Ok(())
}

/// Round a price with the configured pricing settings.
fn round(config: &Config, amount: u64, strategy: &str) -> AppResult<()> {
    let rounder = config.pricing.rounder().map_err(AppError::Configuration)?;
    let pricing = PricingService::new(rounder, config.pricing.currency_format());

    let price = pricing.quote(amount, strategy)?;

    println!(
        "{} ({}) -> {} [{}]",
        amount, price.strategy, price.rounded_amount, price.formatted
    );

    Ok(())
}
