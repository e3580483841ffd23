//! geoapp core - Catalogue, filter validation, models and GeoJSON serialization
//!
//! This crate holds the domain logic that does not touch a store: which
//! tables exist, which filters are valid for them, and how query rows become
//! a FeatureCollection.

pub mod catalogue;
pub mod config;
pub mod error;
pub mod filter;
pub mod models;
pub mod serialize;

pub use catalogue::{Column, ColumnType, FeatureCatalogue, TableDescriptor};
pub use error::{GeoappError, Result};
pub use filter::{validate_filters, Filter, FilterSet};
pub use serialize::rows_to_feature_collection;
