//! PostGIS connection settings

use geoapp_core::error::GeoappError;
use std::env;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

/// Connection settings errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} is not set")]
    Missing(String),

    #[error("{key} is invalid: {reason}")]
    Invalid { key: String, reason: String },
}

impl From<ConfigError> for GeoappError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::Missing(key) => GeoappError::ConfigMissing { key },
            ConfigError::Invalid { key, reason } => GeoappError::ConfigInvalid { key, reason },
        }
    }
}

/// Where and how to connect to the NYC sample database
#[derive(Debug, Clone)]
pub struct PostgresConfig {
    pub database_url: String,
    pub pool: PoolConfig,
}

impl PostgresConfig {
    /// Read `DATABASE_URL` plus the optional `GEOAPP_DB_*` pool overrides
    pub fn from_env() -> Result<Self, ConfigError> {
        let url = env::var("DATABASE_URL").map_err(|_| ConfigError::Missing("DATABASE_URL".into()))?;

        let mut config = Self::from_database_url(&url).map_err(|e| match e {
            ConfigError::Invalid { reason, .. } => {
                ConfigError::Invalid { key: "DATABASE_URL".into(), reason }
            }
            other => other,
        })?;
        config.pool = PoolConfig::from_env()?;
        config.validate()?;
        Ok(config)
    }

    /// Settings for an explicit URL with the default pool
    pub fn from_database_url(database_url: &str) -> Result<Self, ConfigError> {
        let url = database_url.trim();
        let scheme_ok = url.starts_with("postgres://") || url.starts_with("postgresql://");
        if !scheme_ok {
            return Err(ConfigError::Invalid {
                key: "database_url".into(),
                reason: format!("expected a postgres:// or postgresql:// URL, got '{}'", url),
            });
        }

        Ok(Self { database_url: url.to_string(), pool: PoolConfig::default() })
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.database_url.trim().is_empty() {
            return Err(ConfigError::Missing("database_url".into()));
        }
        self.pool.validate()
    }
}

/// Connection pool limits.
///
/// Every request holds at most one connection, so `max_connections` bounds
/// the number of queries in flight.
#[derive(Debug, Clone)]
pub struct PoolConfig {
    pub min_connections: u32,
    pub max_connections: u32,
    pub acquire_timeout: Duration,
    pub idle_timeout: Duration,
    pub max_lifetime: Duration,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            min_connections: 2,
            max_connections: 10,
            acquire_timeout: Duration::from_secs(30),
            idle_timeout: Duration::from_secs(600),
            max_lifetime: Duration::from_secs(1800),
        }
    }
}

fn env_override<T: FromStr>(key: &str) -> Result<Option<T>, ConfigError> {
    match env::var(key) {
        Ok(raw) => raw.trim().parse().map(Some).map_err(|_| ConfigError::Invalid {
            key: key.to_string(),
            reason: format!("'{}' is not a number", raw),
        }),
        Err(_) => Ok(None),
    }
}

impl PoolConfig {
    /// Defaults overridden by `GEOAPP_DB_MIN_CONNECTIONS`,
    /// `GEOAPP_DB_MAX_CONNECTIONS` and `GEOAPP_DB_ACQUIRE_TIMEOUT_SECS`
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut pool = Self::default();
        if let Some(min) = env_override("GEOAPP_DB_MIN_CONNECTIONS")? {
            pool.min_connections = min;
        }
        if let Some(max) = env_override("GEOAPP_DB_MAX_CONNECTIONS")? {
            pool.max_connections = max;
        }
        if let Some(secs) = env_override("GEOAPP_DB_ACQUIRE_TIMEOUT_SECS")? {
            pool.acquire_timeout = Duration::from_secs(secs);
        }
        Ok(pool)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_connections == 0 {
            return Err(ConfigError::Invalid {
                key: "max_connections".into(),
                reason: "must be at least 1".into(),
            });
        }
        if self.min_connections > self.max_connections {
            return Err(ConfigError::Invalid {
                key: "min_connections".into(),
                reason: format!("{} exceeds max_connections {}", self.min_connections, self.max_connections),
            });
        }
        Ok(())
    }
}
