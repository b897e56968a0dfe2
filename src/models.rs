use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Short link row in the database
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct ShortLink {
    pub id: i64,
    pub code: String,
    pub original_url: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: Option<DateTime<Utc>>,
}

impl ShortLink {
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|expires_at| expires_at <= now)
    }
}

/// Destination returned by a successful lookup
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedLink {
    pub original_url: String,
    pub expires_at: Option<DateTime<Utc>>,
}

impl ResolvedLink {
    pub fn new(original_url: impl Into<String>) -> Self {
        Self {
            original_url: original_url.into(),
            expires_at: None,
        }
    }

    pub fn with_expiry(mut self, expires_at: DateTime<Utc>) -> Self {
        self.expires_at = Some(expires_at);
        self
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|expires_at| expires_at <= now)
    }
}

impl From<ShortLink> for ResolvedLink {
    fn from(link: ShortLink) -> Self {
        ResolvedLink {
            original_url: link.original_url,
            expires_at: link.expires_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_short_link_expiry() {
        let now = Utc::now();
        let mut link = ShortLink {
            id: 1,
            code: "promo24".to_string(),
            original_url: "https://studio.example.com/offers/24".to_string(),
            created_at: now - Duration::days(3),
            expires_at: None,
        };

        assert!(!link.is_expired(now));

        link.expires_at = Some(now - Duration::hours(1));
        assert!(link.is_expired(now));

        link.expires_at = Some(now + Duration::hours(1));
        assert!(!link.is_expired(now));
    }

    #[test]
    fn test_resolved_link_from_short_link() {
        let now = Utc::now();
        let link = ShortLink {
            id: 7,
            code: "abc123".to_string(),
            original_url: "https://example.com/p/abc".to_string(),
            created_at: now,
            expires_at: Some(now + Duration::days(30)),
        };

        let resolved = ResolvedLink::from(link);
        assert_eq!(resolved.original_url, "https://example.com/p/abc");
        assert!(resolved.expires_at.is_some());
        assert!(!resolved.is_expired(now));
    }
}
