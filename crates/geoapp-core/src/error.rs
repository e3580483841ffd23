//! Error types for geoapp

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GeoappError {
    // Request validation errors
    #[error("Model '{identifier}' not found.")]
    UnknownTable { identifier: String },

    #[error("Invalid filter parameters: {}.", names.join(", "))]
    InvalidFilters { names: Vec<String> },

    #[error("Invalid coordinates: {reason}")]
    InvalidCoordinates { reason: String },

    #[error("Invalid value for {name}: {reason}")]
    InvalidParameter { name: String, reason: String },

    // Store errors
    #[error("Spatial store failure: {0}")]
    Store(String),

    // Configuration errors
    #[error("Missing required configuration: {key}")]
    ConfigMissing { key: String },

    #[error("Invalid configuration value for {key}: {reason}")]
    ConfigInvalid { key: String, reason: String },

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl GeoappError {
    /// Whether the error was raised by request validation, before any query ran
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            GeoappError::UnknownTable { .. }
                | GeoappError::InvalidFilters { .. }
                | GeoappError::InvalidCoordinates { .. }
                | GeoappError::InvalidParameter { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, GeoappError>;
