use std::env;
use std::path::PathBuf;

use geoapp_core::config::QueryConfig;
use geoapp_core::error::Result;

/// Port the map client expects
pub const DEFAULT_PORT: u16 = 6543;

/// API server configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub port: u16,
    pub cors_origin: String,
    pub database_url: Option<String>,
    pub config_path: Option<PathBuf>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            cors_origin: "*".to_string(),
            database_url: None,
            config_path: None,
        }
    }
}

impl ApiConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let port = env::var("GEOAPP_PORT").ok().and_then(|p| p.parse().ok()).unwrap_or(DEFAULT_PORT);

        let cors_origin = env::var("GEOAPP_CORS_ORIGIN").unwrap_or_else(|_| "*".to_string());

        let database_url = env::var("DATABASE_URL").ok().filter(|url| !url.trim().is_empty());

        let config_path = env::var("GEOAPP_CONFIG").ok().map(PathBuf::from);

        Self { port, cors_origin, database_url, config_path }
    }

    /// Get the server bind address
    pub fn bind_address(&self) -> String {
        format!("0.0.0.0:{}", self.port)
    }

    /// Resolve the query defaults: file (if configured), then environment
    pub fn query_config(&self) -> Result<QueryConfig> {
        let mut config = QueryConfig::with_defaults();
        if let Some(path) = &self.config_path {
            config = config.load_from_file(path)?;
        }
        let config = config.load_from_env();
        config.validate()?;
        Ok(config)
    }
}
