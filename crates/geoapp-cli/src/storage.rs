use crate::cli::StorageBackend;
use anyhow::{Context, Result};
use geoapp_store::memory::MemoryStore;
use geoapp_store::ports::{FeatureStore, PointAnalysisStore};
use geoapp_store::postgres::{PostgresConfig, PostgresStore};
use std::sync::Arc;

/// Where a connection URL points, shown when the connection fails
#[derive(Debug, PartialEq)]
struct ConnectionTarget {
    host: String,
    port: u16,
    database: String,
}

impl ConnectionTarget {
    fn from_url(url: &str) -> Self {
        let rest = url.split_once("://").map_or(url, |(_, rest)| rest);
        let rest = rest.rsplit_once('@').map_or(rest, |(_, rest)| rest);
        let (authority, path) = rest.split_once('/').unwrap_or((rest, ""));
        let (host, port) = match authority.rsplit_once(':') {
            Some((host, port)) => (host, port.parse().unwrap_or(5432)),
            None => (authority, 5432),
        };
        let database = path.split('?').next().unwrap_or_default();

        Self {
            host: if host.is_empty() { "localhost" } else { host }.to_string(),
            port,
            database: if database.is_empty() { "nyc" } else { database }.to_string(),
        }
    }
}

pub struct Storage {
    pub features: Arc<dyn FeatureStore>,
    pub analysis: Arc<dyn PointAnalysisStore>,
}

impl Storage {
    pub async fn new(backend: StorageBackend) -> Result<Self> {
        match backend {
            StorageBackend::Memory => Ok(Self::new_memory()),
            StorageBackend::Postgres => Self::new_postgres().await,
        }
    }

    /// Create the in-memory adapter
    fn new_memory() -> Self {
        let store = Arc::new(MemoryStore::new());
        Self { features: store.clone(), analysis: store }
    }

    /// PostGIS adapter configured from `DATABASE_URL`
    async fn new_postgres() -> Result<Self> {
        let config = PostgresConfig::from_env()
            .context("DATABASE_URL must point at the NYC PostGIS database (or use --storage memory)")?;
        let target = ConnectionTarget::from_url(&config.database_url);

        let store = PostgresStore::new(config).await.with_context(|| {
            format!(
                "Could not reach PostGIS at {}:{} (database '{}').\n\
                 Check that the server is up, PostGIS is installed and the NYC tables are loaded,\n\
                 or rerun with --storage memory.",
                target.host, target.port, target.database
            )
        })?;
        let store = Arc::new(store);

        Ok(Self { features: store.clone(), analysis: store })
    }
}
