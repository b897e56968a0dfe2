mod cache;
mod cors;
mod database;
mod links;
mod pricing;
mod rate_limit;
mod server;

pub use cache::CacheConfig;
pub use cors::CorsConfig;
pub use database::DatabaseConfig;
pub use links::LinksConfig;
pub use pricing::PricingConfig;
pub use rate_limit::RateLimitConfig;
pub use server::ServerConfig;

use crate::error::{AppError, AppResult};
use serde::Deserialize;
use std::env;
use std::str::FromStr;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub cache: CacheConfig,
    pub links: LinksConfig,
    pub pricing: PricingConfig,
    pub rate_limit: RateLimitConfig,
    pub cors: CorsConfig,
}

/// Read `name` from the environment, falling back to `default`
fn var_or<T: FromStr>(name: &str, default: &str) -> AppResult<T> {
    env::var(name)
        .unwrap_or_else(|_| default.to_string())
        .parse()
        .map_err(|_| AppError::Configuration(format!("Invalid {}", name)))
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> AppResult<Self> {
        dotenvy::dotenv().ok();

        let config = Config {
            server: ServerConfig {
                host: env::var("SERVER_HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
                port: var_or("SERVER_PORT", "3000")?,
            },
            database: DatabaseConfig {
                url: env::var("DATABASE_URL").ok().filter(|url| !url.trim().is_empty()),
                max_connections: var_or("DB_MAX_CONNECTIONS", "10")?,
                min_connections: var_or("DB_MIN_CONNECTIONS", "1")?,
                acquire_timeout_seconds: var_or("DB_ACQUIRE_TIMEOUT_SECONDS", "30")?,
            },
            cache: CacheConfig {
                url: env::var("REDIS_URL").unwrap_or_else(|_| "redis://127.0.0.1:6379".to_string()),
                max_connections: var_or("CACHE_MAX_CONNECTIONS", "10")?,
                default_ttl_seconds: var_or("CACHE_DEFAULT_TTL_SECONDS", "3600")?,
                enabled: var_or("CACHE_ENABLED", "true")?,
            },
            links: LinksConfig {
                fallback_url: env::var("FALLBACK_URL").unwrap_or_else(|_| "/".to_string()),
            },
            pricing: PricingConfig {
                auto_breakpoint: var_or("PRICING_AUTO_BREAKPOINT", "10000")?,
                currency_symbol: env::var("PRICING_CURRENCY_SYMBOL")
                    .unwrap_or_else(|_| "$".to_string()),
                currency_code: env::var("PRICING_CURRENCY_CODE")
                    .unwrap_or_else(|_| "MXN".to_string()),
                thousands_separator: var_or("PRICING_THOUSANDS_SEPARATOR", ",")?,
                decimal_separator: var_or("PRICING_DECIMAL_SEPARATOR", ".")?,
                minor_unit_digits: var_or("PRICING_MINOR_UNIT_DIGITS", "0")?,
            },
            rate_limit: RateLimitConfig {
                requests_per_minute: var_or("RATE_LIMIT_PER_MINUTE", "600")?,
                burst_size: var_or("RATE_LIMIT_BURST", "50")?,
            },
            cors: CorsConfig::parse(
                &env::var("ALLOWED_ORIGINS").unwrap_or_else(|_| "*".to_string()),
            ),
        };

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> AppResult<()> {
        self.database
            .validate()
            .and_then(|_| self.cache.validate())
            .and_then(|_| self.links.validate())
            .and_then(|_| self.pricing.validate())
            .and_then(|_| self.rate_limit.validate())
            .map_err(AppError::Configuration)
    }

    /// Database URL, required when the server is backed by Postgres
    pub fn database_url(&self) -> AppResult<&str> {
        self.database
            .url
            .as_deref()
            .ok_or_else(|| AppError::MissingEnvVar("DATABASE_URL".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> Config {
        Config {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 3000,
            },
            database: DatabaseConfig {
                url: Some("postgresql://localhost/test".to_string()),
                max_connections: 10,
                min_connections: 1,
                acquire_timeout_seconds: 30,
            },
            cache: CacheConfig {
                url: "redis://127.0.0.1".to_string(),
                max_connections: 10,
                default_ttl_seconds: 3600,
                enabled: true,
            },
            links: LinksConfig {
                fallback_url: "/".to_string(),
            },
            pricing: PricingConfig {
                auto_breakpoint: 10_000,
                currency_symbol: "$".to_string(),
                currency_code: "MXN".to_string(),
                thousands_separator: ',',
                decimal_separator: '.',
                minor_unit_digits: 0,
            },
            rate_limit: RateLimitConfig {
                requests_per_minute: 600,
                burst_size: 50,
            },
            cors: CorsConfig {
                allowed_origins: vec!["*".to_string()],
            },
        }
    }

    #[test]
    fn test_default_config_is_valid() {
        assert!(config().validate().is_ok());
    }

    #[test]
    fn test_connection_limits() {
        let mut config = config();
        config.database.min_connections = 20;
        assert!(matches!(config.validate(), Err(AppError::Configuration(_))));
    }

    #[test]
    fn test_fallback_url_validation() {
        let mut config = config();

        for valid in ["/", "/home", "https://zen.example.com/", "http://localhost:3000"] {
            config.links.fallback_url = valid.to_string();
            assert!(config.validate().is_ok(), "{} should be accepted", valid);
        }

        for invalid in ["", "home", "//evil.example.com", "javascript:alert(1)", "ftp://x"] {
            config.links.fallback_url = invalid.to_string();
            assert!(config.validate().is_err(), "{} should be rejected", invalid);
        }
    }

    #[test]
    fn test_pricing_validation() {
        let mut config = config();
        config.pricing.auto_breakpoint = 2_500;
        assert!(config.validate().is_err());

        let mut config = self::config();
        config.pricing.minor_unit_digits = 5;
        assert!(config.validate().is_err());

        let mut config = self::config();
        config.pricing.decimal_separator = ',';
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_pricing_currency_format() {
        let mut config = config();
        assert_eq!(config.pricing.currency_format().format(20200), "$20,200 MXN");

        config.pricing.currency_code = String::new();
        assert_eq!(config.pricing.currency_format().format(20200), "$20,200");
        assert_eq!(config.pricing.rounder().unwrap().auto_breakpoint(), 10_000);
    }

    #[test]
    fn test_rate_limit_validation() {
        let mut config = config();
        assert_eq!(config.rate_limit.replenish_interval_ms(), 100);

        config.rate_limit.requests_per_minute = 120_000;
        assert!(config.validate().is_err());

        config.rate_limit.requests_per_minute = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_database_url_required() {
        let mut config = config();
        assert_eq!(config.database_url().unwrap(), "postgresql://localhost/test");

        config.database.url = None;
        assert!(matches!(config.database_url(), Err(AppError::MissingEnvVar(_))));
    }

    #[test]
    fn test_cors_parsing() {
        assert!(CorsConfig::parse("*").allows_any());

        let cors = CorsConfig::parse("http://localhost:3000, https://example.com,");
        assert_eq!(
            cors.allowed_origins,
            vec!["http://localhost:3000", "https://example.com"]
        );
        assert!(!cors.allows_any());
    }
}
