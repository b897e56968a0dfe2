//! Short-link resolution.
//!
//! [`LinkRedirector`] turns a raw path segment into a redirect target. Every
//! path ends in a redirect: codes that fail validation, lookups that find
//! nothing and lookups that error all land on the fallback destination.

mod cached;
mod memory;
mod postgres;

pub use cached::CachedLinkResolver;
pub use memory::InMemoryLinkResolver;
pub use postgres::PgLinkResolver;

use crate::error::AppResult;
use crate::models::ResolvedLink;
use async_trait::async_trait;
use regex::Regex;
use std::fmt;
use std::sync::{Arc, LazyLock};
use tracing::{debug, warn};

static CODE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_-]{1,64}$").expect("short code pattern compiles"));

/// A syntactically valid short code.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ShortCode(String);

impl ShortCode {
    /// Trim `raw` and accept it if it is 1-64 characters of `[A-Za-z0-9_-]`.
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        CODE_PATTERN
            .is_match(trimmed)
            .then(|| Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ShortCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Lookup collaborator mapping short codes to destinations.
///
/// `Ok(None)` means the code is unknown; `Err` means the lookup itself failed.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LinkResolver: Send + Sync {
    async fn resolve(&self, code: &ShortCode) -> AppResult<Option<ResolvedLink>>;

    /// Check that the backing store is reachable
    async fn ping(&self) -> AppResult<()> {
        Ok(())
    }
}

/// Why a request was sent to the fallback destination
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FallbackReason {
    InvalidInput,
    NotFound,
    LookupFailed,
}

impl FallbackReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            FallbackReason::InvalidInput => "invalid_input",
            FallbackReason::NotFound => "not_found",
            FallbackReason::LookupFailed => "lookup_failed",
        }
    }
}

/// Outcome of resolving a raw code
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Destination(String),
    Fallback(FallbackReason),
}

/// Resolves raw codes into redirect targets
#[derive(Clone)]
pub struct LinkRedirector {
    resolver: Arc<dyn LinkResolver>,
    fallback_url: String,
}

impl LinkRedirector {
    pub fn new(resolver: Arc<dyn LinkResolver>, fallback_url: impl Into<String>) -> Self {
        Self {
            resolver,
            fallback_url: fallback_url.into(),
        }
    }

    pub fn fallback_url(&self) -> &str {
        &self.fallback_url
    }

    pub fn resolver(&self) -> &Arc<dyn LinkResolver> {
        &self.resolver
    }

    /// Resolve `raw_code`. Never fails; failures become `Resolution::Fallback`.
    pub async fn resolve(&self, raw_code: &str) -> Resolution {
        let Some(code) = ShortCode::parse(raw_code) else {
            warn!(
                code = %raw_code.escape_debug(),
                reason = FallbackReason::InvalidInput.as_str(),
                "Rejected malformed short link code"
            );
            return Resolution::Fallback(FallbackReason::InvalidInput);
        };

        match self.resolver.resolve(&code).await {
            Ok(Some(link)) => {
                debug!(code = %code, destination = %link.original_url, "Short link resolved");
                Resolution::Destination(link.original_url)
            }
            Ok(None) => {
                warn!(
                    code = %code,
                    reason = FallbackReason::NotFound.as_str(),
                    "Short link not found"
                );
                Resolution::Fallback(FallbackReason::NotFound)
            }
            Err(e) => {
                warn!(
                    code = %code,
                    reason = FallbackReason::LookupFailed.as_str(),
                    error = %e,
                    "Short link lookup failed"
                );
                Resolution::Fallback(FallbackReason::LookupFailed)
            }
        }
    }

    /// URL to redirect to for `raw_code`
    pub async fn redirect_target(&self, raw_code: &str) -> String {
        match self.resolve(raw_code).await {
            Resolution::Destination(url) => url,
            Resolution::Fallback(_) => self.fallback_url.clone(),
        }
    }
}
