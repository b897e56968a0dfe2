use serde::Deserialize;
use url::Url;

/// Short link resolution configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LinksConfig {
    /// Where unresolvable codes are redirected (site root by default)
    pub fallback_url: String,
}

impl LinksConfig {
    /// Validate link configuration values
    pub fn validate(&self) -> Result<(), String> {
        if self.fallback_url.starts_with('/') && !self.fallback_url.starts_with("//") {
            return Ok(());
        }

        match Url::parse(&self.fallback_url) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => Ok(()),
            _ => Err(
                "FALLBACK_URL must be a path starting with '/' or an absolute http(s) URL"
                    .to_string(),
            ),
        }
    }
}
