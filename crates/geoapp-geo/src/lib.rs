//! geoapp geo - In-process geometry support
//!
//! CRS reprojection, coordinate rounding, GeoJSON text output and an R-tree
//! point index. The PostGIS adapter pushes all of this into SQL; the
//! in-memory adapter uses this crate instead.

pub mod spatial;
pub mod transform;

pub use spatial::{intersects_point, round_coordinates, to_geojson_text, PointIndex};
pub use transform::{reproject_geometry, reproject_point};
