//! PostgreSQL connection pooling

use std::time::Duration;

use sqlx::postgres::{PgPool, PgPoolOptions};
use tracing::info;

use crate::config::DatabaseConfig;
use crate::domain::DomainError;

/// Pool settings derived from the database configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoolSettings {
    pub max_connections: u32,
    pub min_connections: u32,
    pub acquire_timeout: Duration,
    pub idle_timeout: Duration,
}

impl From<&DatabaseConfig> for PoolSettings {
    fn from(config: &DatabaseConfig) -> Self {
        Self {
            max_connections: config.max_connections.max(1),
            min_connections: config.min_connections.min(config.max_connections.max(1)),
            acquire_timeout: Duration::from_secs(config.acquire_timeout_secs),
            idle_timeout: Duration::from_secs(config.health_check_secs),
        }
    }
}

/// Connect a pool and verify it with a ping
///
/// Connections are tested before each acquire, so dead ones are evicted
/// instead of being handed to a request.
pub async fn connect(config: &DatabaseConfig) -> Result<PgPool, DomainError> {
    let settings = PoolSettings::from(config);

    let pool = PgPoolOptions::new()
        .max_connections(settings.max_connections)
        .min_connections(settings.min_connections)
        .acquire_timeout(settings.acquire_timeout)
        .idle_timeout(settings.idle_timeout)
        .test_before_acquire(true)
        .connect(&config.url())
        .await
        .map_err(|e| DomainError::storage(format!("Failed to connect to PostgreSQL: {}", e)))?;

    sqlx::query("SELECT 1")
        .execute(&pool)
        .await
        .map_err(|e| DomainError::storage(format!("PostgreSQL ping failed: {}", e)))?;

    info!(host = %config.host, port = config.port, "Connected to PostgreSQL");

    Ok(pool)
}
