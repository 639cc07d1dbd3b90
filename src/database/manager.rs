use sqlx::{postgres::PgPoolOptions, PgPool};
use std::future::Future;
use std::time::Duration;
use thiserror::Error;
use tracing::info;

use crate::config::DatabaseConfig;

/// Errors from the note and user stores
#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("{0} timed out after {1:?}")]
    Timeout(&'static str, Duration),

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

/// Owns the connection pool for the lifetime of the process.
///
/// The pool is built once at startup and handed to the stores explicitly; there is
/// no global instance.
pub struct DatabaseManager {
    pool: PgPool,
}

impl DatabaseManager {
    /// Open the pool described by `config`. Waiting callers beyond `max_connections`
    /// queue for up to `acquire_timeout` before failing.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, DatabaseError> {
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(config.acquire_timeout())
            .connect(&config.url)
            .await?;

        info!(
            "Created database pool (max_connections={})",
            config.max_connections
        );
        Ok(Self { pool })
    }

    pub fn pool(&self) -> PgPool {
        self.pool.clone()
    }

    /// Pings the pool to ensure connectivity
    pub async fn health_check(pool: &PgPool, timeout: Duration) -> Result<(), DatabaseError> {
        with_timeout("health check", timeout, sqlx::query("SELECT 1").execute(pool)).await?;
        Ok(())
    }

    /// Close the pool on shutdown, waiting for checked-out connections to return.
    pub async fn close(self) {
        self.pool.close().await;
        info!("Closed database pool");
    }
}

/// Run a store future under `limit`; expiry becomes `DatabaseError::Timeout`.
pub async fn with_timeout<T, E, F>(
    operation: &'static str,
    limit: Duration,
    fut: F,
) -> Result<T, DatabaseError>
where
    F: Future<Output = Result<T, E>>,
    E: Into<DatabaseError>,
{
    match tokio::time::timeout(limit, fut).await {
        Ok(result) => result.map_err(Into::into),
        Err(_) => Err(DatabaseError::Timeout(operation, limit)),
    }
}
