use super::{LinkResolver, ShortCode};
use crate::error::AppResult;
use crate::models::ResolvedLink;
use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use std::sync::Arc;

/// Map-backed resolver for running without a database.
#[derive(Debug, Clone, Default)]
pub struct InMemoryLinkResolver {
    links: Arc<DashMap<String, ResolvedLink>>,
}

impl InMemoryLinkResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, code: impl Into<String>, original_url: impl Into<String>) {
        self.insert_link(code, ResolvedLink::new(original_url));
    }

    pub fn insert_link(&self, code: impl Into<String>, link: ResolvedLink) {
        self.links.insert(code.into(), link);
    }

    pub fn remove(&self, code: &str) -> Option<ResolvedLink> {
        self.links.remove(code).map(|(_, link)| link)
    }

    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for InMemoryLinkResolver
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let resolver = Self::new();
        for (code, url) in iter {
            resolver.insert(code, url);
        }
        resolver
    }
}

#[async_trait]
impl LinkResolver for InMemoryLinkResolver {
    async fn resolve(&self, code: &ShortCode) -> AppResult<Option<ResolvedLink>> {
        let now = Utc::now();

        Ok(self
            .links
            .get(code.as_str())
            .map(|entry| entry.value().clone())
            .filter(|link| !link.is_expired(now)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[tokio::test]
    async fn test_resolve_known_and_unknown() {
        let resolver: InMemoryLinkResolver =
            [("abc", "https://example.com/a")].into_iter().collect();

        let found = resolver.resolve(&ShortCode::parse("abc").unwrap()).await.unwrap();
        assert_eq!(found.unwrap().original_url, "https://example.com/a");

        let missing = resolver.resolve(&ShortCode::parse("xyz").unwrap()).await.unwrap();
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn test_expired_links_are_missing() {
        let resolver = InMemoryLinkResolver::new();
        resolver.insert_link(
            "old",
            ResolvedLink::new("https://example.com/old").with_expiry(Utc::now() - Duration::days(1)),
        );

        let result = resolver.resolve(&ShortCode::parse("old").unwrap()).await.unwrap();
        assert!(result.is_none());
        assert_eq!(resolver.len(), 1);
    }

    #[test]
    fn test_insert_and_remove() {
        let resolver = InMemoryLinkResolver::new();
        assert!(resolver.is_empty());

        resolver.insert("a", "https://example.com");
        assert_eq!(resolver.len(), 1);

        assert!(resolver.remove("a").is_some());
        assert!(resolver.remove("a").is_none());
        assert!(resolver.is_empty());
    }
}
