//! Conversion of query rows into a GeoJSON FeatureCollection

use geojson::{Feature, FeatureCollection, Geometry, JsonObject};

use crate::error::{GeoappError, Result};
use crate::models::FeatureRow;

/// Whether a column holds the feature geometry or one of its variants
/// (`geom`, `geom_invalid`, ...). Such columns never become properties.
pub fn is_geometry_column(name: &str, geometry_column: &str) -> bool {
    name == geometry_column
        || name
            .strip_prefix(geometry_column)
            .is_some_and(|rest| rest.starts_with('_'))
}

/// Build a FeatureCollection from query rows.
///
/// Row order and attribute order are preserved. A missing or empty geometry
/// text becomes a `null` geometry.
pub fn rows_to_feature_collection(
    rows: Vec<FeatureRow>,
    geometry_column: &str,
) -> Result<FeatureCollection> {
    let features = rows
        .into_iter()
        .map(|row| row_to_feature(row, geometry_column))
        .collect::<Result<Vec<_>>>()?;

    Ok(FeatureCollection {
        bbox: None,
        features,
        foreign_members: None,
    })
}

fn row_to_feature(row: FeatureRow, geometry_column: &str) -> Result<Feature> {
    let geometry = match row.geometry.as_deref().map(str::trim) {
        Some(text) if !text.is_empty() => Some(parse_geometry(text)?),
        _ => None,
    };

    let properties: JsonObject = row
        .attributes
        .into_iter()
        .filter(|(key, _)| !is_geometry_column(key, geometry_column))
        .collect();

    Ok(Feature {
        bbox: None,
        geometry,
        id: None,
        properties: Some(properties),
        foreign_members: None,
    })
}

fn parse_geometry(text: &str) -> Result<Geometry> {
    serde_json::from_str(text)
        .map_err(|e| GeoappError::Serialization(format!("Invalid GeoJSON geometry: {}", e)))
}
