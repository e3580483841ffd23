//! PostgreSQL/PostGIS storage adapter implementation

pub mod analytics;
pub mod config;
pub mod features;
pub mod query;

pub use config::{ConfigError, PoolConfig, PostgresConfig};

use async_trait::async_trait;
use geoapp_core::error::{GeoappError, Result};
use sqlx::pool::PoolConnection;
use sqlx::postgres::PgPoolOptions;
use sqlx::{PgPool, Postgres};

use crate::ports::HealthCheck;

/// Feature and point-analysis store over the NYC PostGIS tables
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    /// Open the pool and confirm the database has PostGIS installed
    pub async fn new(config: PostgresConfig) -> Result<Self> {
        config.validate()?;

        let pool = PgPoolOptions::new()
            .min_connections(config.pool.min_connections)
            .max_connections(config.pool.max_connections)
            .acquire_timeout(config.pool.acquire_timeout)
            .idle_timeout(config.pool.idle_timeout)
            .max_lifetime(config.pool.max_lifetime)
            .connect(&config.database_url)
            .await
            .map_err(|e| GeoappError::Store(format!("Failed to connect to database: {}", e)))?;

        // The catalogue tables need the PostGIS extension
        let version: String = sqlx::query_scalar("SELECT PostGIS_Version()")
            .fetch_one(&pool)
            .await
            .map_err(|e| GeoappError::Store(format!("PostGIS check failed: {}", e)))?;

        tracing::info!(postgis = %version, "Connected to PostGIS");

        Ok(Self { pool })
    }

    /// Acquire one pooled connection; it returns to the pool when dropped
    pub(crate) async fn acquire(&self) -> Result<PoolConnection<Postgres>> {
        self.pool
            .acquire()
            .await
            .map_err(|e| GeoappError::Store(format!("Failed to acquire connection: {}", e)))
    }
}

#[async_trait]
impl HealthCheck for PostgresStore {
    async fn health_check(&self) -> Result<()> {
        sqlx::query("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| GeoappError::Store(format!("Health check failed: {}", e)))?;
        Ok(())
    }
}
