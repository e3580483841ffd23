//! Domain models shared by the engines and the store adapters

pub mod point;
pub mod query;
pub mod row;

pub use point::{
    AnalyzeOptions, NearestStation, NeighborhoodMatch, PointQuery, SpatialPointResult,
    HOMICIDES_TABLE, NEIGHBORHOODS_TABLE, STATIONS_TABLE,
};
pub use query::{FeatureQuery, FetchOptions, MAX_PRECISION};
pub use row::FeatureRow;
