use crate::error::{GeoappError, Result};
use crate::models::{AnalyzeOptions, FetchOptions};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::Path;
use std::str::FromStr;

/// Layer a setting was resolved from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConfigSource {
    /// Default value
    Default,
    /// TOML file named by `--config` or `GEOAPP_CONFIG`
    File,
    /// `GEOAPP_*` variables
    Environment,
    /// Command-line flags
    Cli,
}

impl ConfigSource {
    /// Rank of the layer; later layers win
    pub fn precedence(&self) -> u8 {
        match self {
            ConfigSource::Default => 0,
            ConfigSource::File => 1,
            ConfigSource::Environment => 2,
            ConfigSource::Cli => 3,
        }
    }
}

/// A setting and the layer that supplied it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigValue<T> {
    pub value: T,
    pub source: ConfigSource,
}

impl<T> ConfigValue<T> {
    pub fn new(value: T, source: ConfigSource) -> Self {
        Self { value, source }
    }

    /// Update the value if the new source has at least the same precedence
    pub fn update(&mut self, value: T, source: ConfigSource) {
        if source.precedence() >= self.source.precedence() {
            self.value = value;
            self.source = source;
        }
    }
}

/// Layered configuration of query defaults
#[derive(Debug, Clone)]
pub struct QueryConfig {
    pub target_srid: ConfigValue<i32>,
    pub precision: ConfigValue<u32>,
    pub source_srid: ConfigValue<i32>,
    pub native_srid: ConfigValue<i32>,
    pub radius_meters: ConfigValue<f64>,
}

impl QueryConfig {
    /// Web Mercator input, WGS84 output, 100 m radius, 6 decimals
    pub fn with_defaults() -> Self {
        let fetch = FetchOptions::default();
        let analyze = AnalyzeOptions::default();
        Self {
            target_srid: ConfigValue::new(fetch.target_srid, ConfigSource::Default),
            precision: ConfigValue::new(fetch.precision, ConfigSource::Default),
            source_srid: ConfigValue::new(analyze.source_srid, ConfigSource::Default),
            native_srid: ConfigValue::new(analyze.native_srid, ConfigSource::Default),
            radius_meters: ConfigValue::new(analyze.radius_meters, ConfigSource::Default),
        }
    }

    /// Overlay the values present in a TOML file
    pub fn load_from_file<P: AsRef<Path>>(mut self, path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;

        let file_config: FileConfig =
            toml::from_str(&content).map_err(|e| GeoappError::ConfigInvalid {
                key: "file".to_string(),
                reason: format!("Failed to parse TOML: {}", e),
            })?;

        if let Some(srid) = file_config.target_srid {
            self.target_srid.update(srid, ConfigSource::File);
        }
        if let Some(precision) = file_config.precision {
            self.precision.update(precision, ConfigSource::File);
        }
        if let Some(srid) = file_config.source_srid {
            self.source_srid.update(srid, ConfigSource::File);
        }
        if let Some(srid) = file_config.native_srid {
            self.native_srid.update(srid, ConfigSource::File);
        }
        if let Some(radius) = file_config.radius_meters {
            self.radius_meters.update(radius, ConfigSource::File);
        }

        Ok(self)
    }

    /// Overlay `GEOAPP_SOURCE_SRID`, `GEOAPP_TARGET_SRID` and friends
    pub fn load_from_env(mut self) -> Self {
        if let Some(srid) = env_value::<i32>("GEOAPP_TARGET_SRID") {
            self.target_srid.update(srid, ConfigSource::Environment);
        }
        if let Some(precision) = env_value::<u32>("GEOAPP_PRECISION") {
            self.precision.update(precision, ConfigSource::Environment);
        }
        if let Some(srid) = env_value::<i32>("GEOAPP_SOURCE_SRID") {
            self.source_srid.update(srid, ConfigSource::Environment);
        }
        if let Some(srid) = env_value::<i32>("GEOAPP_NATIVE_SRID") {
            self.native_srid.update(srid, ConfigSource::Environment);
        }
        if let Some(radius) = env_value::<f64>("GEOAPP_RADIUS_METERS") {
            self.radius_meters.update(radius, ConfigSource::Environment);
        }

        self
    }

    /// Overlay flags given on the command line
    pub fn update_from_cli(&mut self, overrides: CliConfigOverrides) {
        if let Some(srid) = overrides.target_srid {
            self.target_srid.update(srid, ConfigSource::Cli);
        }
        if let Some(precision) = overrides.precision {
            self.precision.update(precision, ConfigSource::Cli);
        }
        if let Some(radius) = overrides.radius_meters {
            self.radius_meters.update(radius, ConfigSource::Cli);
        }
    }

    /// Retrieval options with the configured values
    pub fn fetch_options(&self) -> FetchOptions {
        FetchOptions {
            target_srid: self.target_srid.value,
            precision: self.precision.value,
        }
    }

    /// Point analytics options with the configured values
    pub fn analyze_options(&self) -> AnalyzeOptions {
        AnalyzeOptions {
            source_srid: self.source_srid.value,
            native_srid: self.native_srid.value,
            radius_meters: self.radius_meters.value,
        }
    }

    /// Check that the resolved values form usable options
    pub fn validate(&self) -> Result<()> {
        self.fetch_options().validate()?;
        self.analyze_options().validate()
    }

    /// Setting name to rendered value and layer, for `geoapp config`
    pub fn to_inspection_map(&self) -> HashMap<String, (String, ConfigSource)> {
        let mut map = HashMap::new();

        map.insert(
            "target_srid".to_string(),
            (format!("EPSG:{}", self.target_srid.value), self.target_srid.source),
        );
        map.insert(
            "precision".to_string(),
            (self.precision.value.to_string(), self.precision.source),
        );
        map.insert(
            "source_srid".to_string(),
            (format!("EPSG:{}", self.source_srid.value), self.source_srid.source),
        );
        map.insert(
            "native_srid".to_string(),
            (format!("EPSG:{}", self.native_srid.value), self.native_srid.source),
        );
        map.insert(
            "radius_meters".to_string(),
            (self.radius_meters.value.to_string(), self.radius_meters.source),
        );

        map
    }
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self::with_defaults()
    }
}

fn env_value<T: FromStr>(key: &str) -> Option<T> {
    let raw = env::var(key).ok()?;
    match raw.trim().parse::<T>() {
        Ok(value) => Some(value),
        Err(_) => {
            tracing::warn!("Invalid {} value '{}', keeping previous setting", key, raw);
            None
        }
    }
}

/// On-disk shape of the TOML file; every key optional
#[derive(Debug, Deserialize, Serialize)]
struct FileConfig {
    target_srid: Option<i32>,
    precision: Option<u32>,
    source_srid: Option<i32>,
    native_srid: Option<i32>,
    radius_meters: Option<f64>,
}

/// Flags that override the other layers
#[derive(Debug, Default)]
pub struct CliConfigOverrides {
    pub target_srid: Option<i32>,
    pub precision: Option<u32>,
    pub radius_meters: Option<f64>,
}
