use super::{LinkResolver, ShortCode};
use crate::db::Repository;
use crate::error::AppResult;
use crate::models::ResolvedLink;
use async_trait::async_trait;
use chrono::Utc;

/// Resolves codes against the `short_links` table. Expired rows count as missing.
#[derive(Clone)]
pub struct PgLinkResolver {
    repository: Repository,
}

impl PgLinkResolver {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl LinkResolver for PgLinkResolver {
    async fn resolve(&self, code: &ShortCode) -> AppResult<Option<ResolvedLink>> {
        let link = self.repository.get_link_by_code(code.as_str()).await?;
        let now = Utc::now();

        Ok(link
            .filter(|link| !link.is_expired(now))
            .map(ResolvedLink::from))
    }

    async fn ping(&self) -> AppResult<()> {
        self.repository.ping().await
    }
}
