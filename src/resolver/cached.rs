use super::{LinkResolver, ShortCode};
use crate::cache::LinkCache;
use crate::error::AppResult;
use crate::models::ResolvedLink;
use async_trait::async_trait;
use chrono::Utc;
use tracing::{debug, warn};

/// Read-through cache in front of another resolver.
///
/// Cache errors are logged and bypassed; only the inner resolver decides
/// whether a code exists.
pub struct CachedLinkResolver<R, C> {
    inner: R,
    cache: C,
}

impl<R, C> CachedLinkResolver<R, C>
where
    R: LinkResolver,
    C: LinkCache,
{
    pub fn new(inner: R, cache: C) -> Self {
        Self { inner, cache }
    }
}

#[async_trait]
impl<R, C> LinkResolver for CachedLinkResolver<R, C>
where
    R: LinkResolver,
    C: LinkCache,
{
    async fn resolve(&self, code: &ShortCode) -> AppResult<Option<ResolvedLink>> {
        match self.cache.get_link(code.as_str()).await {
            Ok(Some(link)) if !link.is_expired(Utc::now()) => {
                debug!(code = %code, "Cache HIT");
                return Ok(Some(link));
            }
            Ok(_) => debug!(code = %code, "Cache MISS"),
            Err(e) => warn!(code = %code, error = %e, "Cache read failed, using backing store"),
        }

        let resolved = self.inner.resolve(code).await?;

        if let Some(link) = &resolved {
            if let Err(e) = self.cache.set_link(code.as_str(), link).await {
                warn!(code = %code, error = %e, "Failed to cache short link");
            }
        }

        Ok(resolved)
    }

    async fn ping(&self) -> AppResult<()> {
        if let Err(e) = self.cache.ping().await {
            warn!("Cache ping failed: {}", e);
        }
        self.inner.ping().await
    }
}
