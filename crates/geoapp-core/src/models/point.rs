use serde::{Deserialize, Serialize};

use crate::error::{GeoappError, Result};

/// Polygon table searched for containment
pub const NEIGHBORHOODS_TABLE: &str = "nyc_neighborhoods";
/// Point table counted within the radius
pub const HOMICIDES_TABLE: &str = "nyc_homicides";
/// Point table searched for the nearest feature
pub const STATIONS_TABLE: &str = "nyc_subway_stations";

/// Coordinate systems and radius used by point analytics
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnalyzeOptions {
    /// SRID of incoming coordinates
    pub source_srid: i32,
    /// SRID of the stored data; distances are in its linear unit
    pub native_srid: i32,
    pub radius_meters: f64,
}

impl Default for AnalyzeOptions {
    fn default() -> Self {
        Self {
            source_srid: 3857,
            native_srid: 26918,
            radius_meters: 100.0,
        }
    }
}

impl AnalyzeOptions {
    pub fn validate(&self) -> Result<()> {
        if !self.radius_meters.is_finite() || self.radius_meters < 0.0 {
            return Err(GeoappError::InvalidParameter {
                name: "radius_meters".to_string(),
                reason: format!("must be a finite, non-negative distance, got {}", self.radius_meters),
            });
        }
        for (name, srid) in [("source_srid", self.source_srid), ("native_srid", self.native_srid)] {
            if srid <= 0 {
                return Err(GeoappError::InvalidParameter {
                    name: name.to_string(),
                    reason: format!("{} is not a valid SRID", srid),
                });
            }
        }
        Ok(())
    }
}

/// A point analytics request handed to a store
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointQuery {
    pub x: f64,
    pub y: f64,
    pub options: AnalyzeOptions,
}

/// Neighborhood polygon containing the point
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NeighborhoodMatch {
    pub neighborhood_gid: i32,
    pub name: Option<String>,
    pub boroname: Option<String>,
}

/// Closest station to the point
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NearestStation {
    pub subway_gid: i32,
    pub name: Option<String>,
    /// Distance in the native SRID's linear unit
    pub subway_distance: f64,
}

/// Answer to a point analytics request
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SpatialPointResult {
    pub neighborhoods: Vec<NeighborhoodMatch>,
    pub number_of_homicides: i64,
    pub subway: Option<NearestStation>,
}
