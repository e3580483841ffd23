//! In-memory feature tables for development and testing.
//!
//! Records are held in their table's native SRID, and point tables keep an
//! R-tree beside the records. A poisoned lock means a writer panicked, so
//! lock results are unwrapped.

use async_trait::async_trait;
use geo::{Geometry, Point};
use geoapp_core::error::{GeoappError, Result};
use geoapp_core::models::{
    FeatureQuery, FeatureRow, NearestStation, NeighborhoodMatch, PointQuery, SpatialPointResult,
    HOMICIDES_TABLE, NEIGHBORHOODS_TABLE, STATIONS_TABLE,
};
use geoapp_geo::{
    intersects_point, reproject_geometry, reproject_point, round_coordinates, to_geojson_text,
    PointIndex,
};
use serde_json::{Map, Value as JsonValue};
use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::ports::{FeatureStore, HealthCheck, PointAnalysisStore};

/// One stored feature
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MemoryRecord {
    pub attributes: Map<String, JsonValue>,
    pub geometry: Option<Geometry<f64>>,
}

impl MemoryRecord {
    pub fn new(attributes: Map<String, JsonValue>, geometry: Option<Geometry<f64>>) -> Self {
        Self { attributes, geometry }
    }

    /// Build a record from `(column, value)` pairs
    pub fn from_pairs<'a>(
        pairs: impl IntoIterator<Item = (&'a str, JsonValue)>,
        geometry: Option<Geometry<f64>>,
    ) -> Self {
        let attributes = pairs.into_iter().map(|(k, v)| (k.to_string(), v)).collect();
        Self { attributes, geometry }
    }
}

#[derive(Debug, Default)]
struct MemoryTable {
    records: Vec<MemoryRecord>,
    points: PointIndex,
}

/// In-memory implementation of the feature and point analysis ports
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    tables: Arc<RwLock<HashMap<String, MemoryTable>>>,
}

impl MemoryStore {
    /// Create a new, empty in-memory store
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a record to a table, creating the table on first use.
    ///
    /// `Point` and `MultiPoint` members go into the table's R-tree under the
    /// record's index. Radius and nearest searches read only the R-tree, so
    /// the homicide and station tables accept no other geometry.
    pub fn insert(&self, table: &str, record: MemoryRecord) -> Result<()> {
        let mut tables = self.tables.write().unwrap();
        let entry = tables.entry(table.to_string()).or_default();
        let id = entry.records.len();

        match &record.geometry {
            Some(Geometry::Point(point)) => entry.points.insert(id, *point),
            Some(Geometry::MultiPoint(members)) => {
                for point in members {
                    entry.points.insert(id, *point);
                }
            }
            Some(other) if POINT_TABLES.contains(&table) => {
                return Err(GeoappError::Store(format!(
                    "{} holds point geometries only, got {}",
                    table,
                    geometry_kind(other)
                )));
            }
            _ => {}
        }
        entry.records.push(record);
        Ok(())
    }

    /// Append several records to a table, stopping at the first rejected one
    pub fn insert_all(
        &self,
        table: &str,
        records: impl IntoIterator<Item = MemoryRecord>,
    ) -> Result<()> {
        records.into_iter().try_for_each(|record| self.insert(table, record))
    }

    /// Number of records held for a table
    pub fn row_count(&self, table: &str) -> usize {
        let tables = self.tables.read().unwrap();
        tables.get(table).map(|t| t.records.len()).unwrap_or(0)
    }
}

const POINT_TABLES: [&str; 2] = [HOMICIDES_TABLE, STATIONS_TABLE];

fn geometry_kind(geometry: &Geometry<f64>) -> &'static str {
    match geometry {
        Geometry::Point(_) => "Point",
        Geometry::Line(_) => "Line",
        Geometry::LineString(_) => "LineString",
        Geometry::Polygon(_) => "Polygon",
        Geometry::MultiPoint(_) => "MultiPoint",
        Geometry::MultiLineString(_) => "MultiLineString",
        Geometry::MultiPolygon(_) => "MultiPolygon",
        Geometry::GeometryCollection(_) => "GeometryCollection",
        Geometry::Rect(_) => "Rect",
        Geometry::Triangle(_) => "Triangle",
    }
}

/// SQL-like equality between a stored value and a raw filter string
fn value_matches(value: &JsonValue, raw: &str) -> bool {
    match value {
        JsonValue::Null => false,
        JsonValue::String(s) => s == raw,
        JsonValue::Number(n) => match (n.as_f64(), raw.trim().parse::<f64>()) {
            (Some(stored), Ok(wanted)) => stored == wanted,
            _ => false,
        },
        JsonValue::Bool(b) => raw.trim().parse::<bool>().map(|wanted| wanted == *b).unwrap_or(false),
        other => other.to_string() == raw,
    }
}

/// Primary key ordering: numbers numerically, everything else as text, NULLs last
fn compare_keys(a: Option<&JsonValue>, b: Option<&JsonValue>) -> Ordering {
    match (a, b) {
        (Some(JsonValue::Number(x)), Some(JsonValue::Number(y))) => {
            let (x, y) = (x.as_f64().unwrap_or(f64::NAN), y.as_f64().unwrap_or(f64::NAN));
            x.partial_cmp(&y).unwrap_or(Ordering::Equal)
        }
        (None | Some(JsonValue::Null), None | Some(JsonValue::Null)) => Ordering::Equal,
        (None | Some(JsonValue::Null), _) => Ordering::Greater,
        (_, None | Some(JsonValue::Null)) => Ordering::Less,
        (Some(x), Some(y)) => x.to_string().cmp(&y.to_string()),
    }
}

fn record_gid(table: &str, record: &MemoryRecord) -> Result<i32> {
    record
        .attributes
        .get("gid")
        .and_then(JsonValue::as_i64)
        .and_then(|gid| i32::try_from(gid).ok())
        .ok_or_else(|| GeoappError::Store(format!("{} record without an integer gid", table)))
}

fn record_text(record: &MemoryRecord, column: &str) -> Option<String> {
    record.attributes.get(column).and_then(JsonValue::as_str).map(str::to_string)
}

#[async_trait]
impl FeatureStore for MemoryStore {
    async fn select_features(&self, query: &FeatureQuery<'_>) -> Result<Vec<FeatureRow>> {
        let table = query.table;
        let tables = self.tables.read().unwrap();
        let Some(stored) = tables.get(table.name) else {
            return Ok(Vec::new());
        };

        let mut matching: Vec<&MemoryRecord> = stored
            .records
            .iter()
            .filter(|record| {
                query.filters.iter().all(|filter| {
                    record
                        .attributes
                        .get(filter.column.name)
                        .is_some_and(|value| value_matches(value, &filter.value))
                })
            })
            .collect();
        matching.sort_by(|a, b| {
            compare_keys(a.attributes.get(table.primary_key), b.attributes.get(table.primary_key))
        });

        matching
            .into_iter()
            .map(|record| {
                let attributes: Map<String, JsonValue> = table
                    .attribute_columns()
                    .map(|column| {
                        let value = record.attributes.get(column.name).cloned();
                        (column.name.to_string(), value.unwrap_or(JsonValue::Null))
                    })
                    .collect();

                let geometry = match (&table.geometry_column, &record.geometry) {
                    (Some(_), Some(geometry)) => {
                        let projected =
                            reproject_geometry(geometry, table.srid, query.options.target_srid)?;
                        let rounded = round_coordinates(&projected, query.options.precision);
                        Some(to_geojson_text(&rounded)?)
                    }
                    _ => None,
                };

                Ok(FeatureRow::new(attributes, geometry))
            })
            .collect()
    }
}

#[async_trait]
impl PointAnalysisStore for MemoryStore {
    async fn analyze_point(&self, query: &PointQuery) -> Result<SpatialPointResult> {
        let options = query.options;
        let (x, y) = reproject_point(query.x, query.y, options.source_srid, options.native_srid)?;
        let point = Point::new(x, y);

        let tables = self.tables.read().unwrap();
        let mut result = SpatialPointResult::default();

        if let Some(neighborhoods) = tables.get(NEIGHBORHOODS_TABLE) {
            let mut matches = Vec::new();
            for record in &neighborhoods.records {
                let contains = record.geometry.as_ref().is_some_and(|g| intersects_point(g, point));
                if contains {
                    matches.push(NeighborhoodMatch {
                        neighborhood_gid: record_gid(NEIGHBORHOODS_TABLE, record)?,
                        name: record_text(record, "name"),
                        boroname: record_text(record, "boroname"),
                    });
                }
            }
            matches.sort_by_key(|m| m.neighborhood_gid);
            result.neighborhoods = matches;
        }

        if let Some(homicides) = tables.get(HOMICIDES_TABLE) {
            result.number_of_homicides =
                homicides.points.within_distance(point, options.radius_meters).len() as i64;
        }

        if let Some(stations) = tables.get(STATIONS_TABLE) {
            if let Some((index, distance)) = stations.points.nearest(point) {
                let record = &stations.records[index];
                result.subway = Some(NearestStation {
                    subway_gid: record_gid(STATIONS_TABLE, record)?,
                    name: record_text(record, "name"),
                    subway_distance: distance,
                });
            }
        }

        Ok(result)
    }
}

#[async_trait]
impl HealthCheck for MemoryStore {
    async fn health_check(&self) -> Result<()> {
        Ok(())
    }
}
