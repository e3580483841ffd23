//! geoapp store - Storage ports and adapters
//!
//! This crate defines the read-only store ports used by the query engines
//! and provides a PostGIS adapter plus an in-memory adapter for development
//! and testing.

pub mod memory;
pub mod ports;
pub mod postgres;

pub use memory::{MemoryRecord, MemoryStore};
pub use ports::{FeatureStore, HealthCheck, PointAnalysisStore};
pub use postgres::{PostgresConfig, PostgresStore};
