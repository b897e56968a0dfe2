use crate::error::{AppError, AppResult};
use crate::models::ShortLink;
use sqlx::{
    postgres::{PgConnectOptions, PgPoolOptions},
    ConnectOptions, PgPool,
};
use std::str::FromStr;
use std::time::Duration;

/// Read-only access to the short link table
#[derive(Clone)]
pub struct Repository {
    pool: PgPool,
}

impl Repository {
    /// Create a new repository with a connection pool
    pub async fn new(
        database_url: &str,
        max_connections: u32,
        min_connections: u32,
        acquire_timeout_seconds: u64,
    ) -> AppResult<Self> {
        let options = PgConnectOptions::from_str(database_url)
            .map_err(|e| AppError::Configuration(format!("Invalid database URL: {}", e)))?
            .disable_statement_logging();

        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .min_connections(min_connections)
            .acquire_timeout(Duration::from_secs(acquire_timeout_seconds))
            .connect_with(options)
            .await?;

        Ok(Self { pool })
    }

    /// Run database migrations
    pub async fn run_migrations(&self) -> AppResult<()> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        Ok(())
    }

    /// Check database connectivity
    pub async fn ping(&self) -> AppResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    /// Get a short link by its code
    pub async fn get_link_by_code(&self, code: &str) -> AppResult<Option<ShortLink>> {
        let result = sqlx::query_as::<_, ShortLink>(
            r#"
            SELECT id, code, original_url, created_at, expires_at
            FROM short_links
            WHERE code = $1
            "#,
        )
        .bind(code)
        .fetch_optional(&self.pool)
        .await?;

        Ok(result)
    }

    /// Get statistics
    pub async fn get_stats(&self) -> AppResult<LinkStats> {
        let row = sqlx::query_as::<_, (i64, i64, i64)>(
            r#"
            SELECT
                COUNT(*) as total_links,
                COUNT(*) FILTER (WHERE expires_at IS NULL OR expires_at > NOW()) as active_links,
                COUNT(*) FILTER (WHERE expires_at IS NOT NULL AND expires_at <= NOW()) as expired_links
            FROM short_links
            "#,
        )
        .fetch_one(&self.pool)
        .await?;

        Ok(LinkStats {
            total_links: row.0,
            active_links: row.1,
            expired_links: row.2,
        })
    }
}

/// Statistics struct
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkStats {
    pub total_links: i64,
    pub active_links: i64,
    pub expired_links: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_invalid_database_url_is_configuration_error() {
        let result = Repository::new("not a url", 1, 1, 1).await;
        assert!(matches!(result, Err(AppError::Configuration(_))));
    }
}
