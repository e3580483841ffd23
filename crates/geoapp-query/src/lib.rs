//! geoapp query - Feature retrieval and point analytics
//!
//! This crate implements the two read use cases, orchestrating the feature
//! catalogue, filter validation and the store ports.

pub mod analyzer;
pub mod engine;

pub use analyzer::{parse_coordinate, SpatialPointAnalyzer};
pub use engine::FeatureQueryEngine;
