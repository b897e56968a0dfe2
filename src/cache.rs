use crate::error::{AppError, AppResult};
use crate::models::ResolvedLink;
use async_trait::async_trait;
use chrono::Utc;
use deadpool_redis::{Manager, Pool, Runtime};
use std::time::Duration;

/// Cache of resolved short links
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LinkCache: Send + Sync {
    /// Get a resolved link by short code
    async fn get_link(&self, code: &str) -> AppResult<Option<ResolvedLink>>;

    /// Store a resolved link
    async fn set_link(&self, code: &str, link: &ResolvedLink) -> AppResult<()>;

    /// Check connectivity
    async fn ping(&self) -> AppResult<()>;
}

/// Redis-backed link cache
#[derive(Clone)]
pub struct RedisCache {
    pool: Pool,
    default_ttl: Duration,
}

impl RedisCache {
    /// Create a new cache connection pool
    pub fn new(redis_url: &str, max_connections: u32, default_ttl_seconds: u64) -> AppResult<Self> {
        let manager = Manager::new(redis_url)
            .map_err(|e| AppError::Configuration(format!("Invalid Redis URL: {}", e)))?;

        let pool = Pool::builder(manager)
            .max_size(max_connections as usize)
            .runtime(Runtime::Tokio1)
            .build()
            .map_err(|e| AppError::Configuration(format!("Failed to create Redis pool: {}", e)))?;

        Ok(Self {
            pool,
            default_ttl: Duration::from_secs(default_ttl_seconds),
        })
    }

    /// TTL for a link, capped by its own expiry. `None` means don't cache.
    fn ttl_for(&self, link: &ResolvedLink) -> Option<u64> {
        let default_ttl = self.default_ttl.as_secs();

        match link.expires_at {
            Some(expires_at) => {
                let remaining = (expires_at - Utc::now()).num_seconds();
                if remaining <= 0 {
                    None
                } else {
                    Some(default_ttl.min(remaining as u64))
                }
            }
            None => Some(default_ttl),
        }
    }

    /// Generate cache key for a link
    fn link_key(code: &str) -> String {
        format!("{}:{}", Self::KEY_PREFIX, code)
    }

    const KEY_PREFIX: &'static str = "link";
}

#[async_trait]
impl LinkCache for RedisCache {
    async fn get_link(&self, code: &str) -> AppResult<Option<ResolvedLink>> {
        let key = Self::link_key(code);
        let mut conn = self.pool.get().await?;

        let value: Option<String> = redis::cmd("GET").arg(&key).query_async(&mut conn).await?;

        match value {
            Some(v) => Ok(Some(serde_json::from_str(&v)?)),
            None => Ok(None),
        }
    }

    async fn set_link(&self, code: &str, link: &ResolvedLink) -> AppResult<()> {
        let Some(ttl) = self.ttl_for(link) else {
            return Ok(());
        };

        let key = Self::link_key(code);
        let value = serde_json::to_string(link)?;
        let mut conn = self.pool.get().await?;

        let _: () = redis::cmd("SET")
            .arg(&key)
            .arg(value)
            .arg("EX")
            .arg(ttl)
            .query_async(&mut conn)
            .await?;

        Ok(())
    }

    async fn ping(&self) -> AppResult<()> {
        let mut conn = self.pool.get().await?;
        let _: String = redis::cmd("PING").query_async(&mut conn).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration as ChronoDuration;

    fn cache() -> RedisCache {
        RedisCache::new("redis://127.0.0.1:6379", 4, 3600).unwrap()
    }

    #[test]
    fn test_link_key_generation() {
        assert_eq!(RedisCache::link_key("abc123"), "link:abc123");
        assert_eq!(RedisCache::link_key("promo"), "link:promo");
    }

    #[tokio::test]
    async fn test_ttl_defaults_without_expiry() {
        let link = ResolvedLink::new("https://example.com");
        assert_eq!(cache().ttl_for(&link), Some(3600));
    }

    #[tokio::test]
    async fn test_ttl_capped_by_expiry() {
        let link = ResolvedLink::new("https://example.com")
            .with_expiry(Utc::now() + ChronoDuration::minutes(10));
        let ttl = cache().ttl_for(&link).unwrap();
        assert!(ttl <= 600 && ttl > 500);

        let expired = ResolvedLink::new("https://example.com")
            .with_expiry(Utc::now() - ChronoDuration::minutes(1));
        assert_eq!(cache().ttl_for(&expired), None);
    }

    #[test]
    fn test_invalid_redis_url() {
        assert!(matches!(
            RedisCache::new("not-a-url", 4, 3600),
            Err(AppError::Configuration(_))
        ));
    }
}
