use std::time::Duration;

use sqlx::{postgres::PgPoolOptions, PgPool};
use thiserror::Error;
use tracing::info;

use crate::catalog::CatalogError;
use crate::config::DatabaseConfig;

/// Errors from DatabaseManager
#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("Invalid database URL: {0}")]
    InvalidDatabaseUrl(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Query error: {0}")]
    QueryError(String),

    #[error(transparent)]
    Migrate(#[from] sqlx::migrate::MigrateError),

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

impl From<DatabaseError> for CatalogError {
    fn from(err: DatabaseError) -> Self {
        match err {
            DatabaseError::NotFound(what) => CatalogError::NotFound(what),
            DatabaseError::Sqlx(e) => CatalogError::from(e),
            other => CatalogError::storage(other),
        }
    }
}

/// Owns the single connection pool of the process.
#[derive(Clone)]
pub struct DatabaseManager {
    pool: PgPool,
}

impl DatabaseManager {
    /// Builds the pool without opening a connection; the first query
    /// connects. Lets the server start while Postgres is still coming up.
    pub fn connect_lazy(config: &DatabaseConfig) -> Result<Self, DatabaseError> {
        Self::validate_url(&config.url)?;

        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(config.connection_timeout))
            .connect_lazy(&config.url)?;

        info!(url = %Self::redacted(&config.url), "Created database pool");
        Ok(Self { pool })
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Pings the pool to ensure connectivity
    pub async fn health_check(&self) -> Result<(), DatabaseError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    /// Applies the migrations embedded from `migrations/`.
    pub async fn migrate(&self) -> Result<(), DatabaseError> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        info!("Database migrations applied");
        Ok(())
    }

    pub async fn close(&self) {
        self.pool.close().await;
        info!("Closed database pool");
    }

    fn validate_url(raw: &str) -> Result<(), DatabaseError> {
        let url = url::Url::parse(raw).map_err(|e| DatabaseError::InvalidDatabaseUrl(e.to_string()))?;
        match url.scheme() {
            "postgres" | "postgresql" => Ok(()),
            other => Err(DatabaseError::InvalidDatabaseUrl(format!("unsupported scheme {}", other))),
        }
    }

    /// The URL with any password masked, for log lines.
    fn redacted(raw: &str) -> String {
        match url::Url::parse(raw) {
            Ok(mut url) => {
                if url.password().is_some() {
                    let _ = url.set_password(Some("****"));
                }
                url.to_string()
            }
            Err(_) => "<invalid>".to_string(),
        }
    }
}
