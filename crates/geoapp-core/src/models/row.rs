use serde_json::{Map, Value as JsonValue};

/// One materialized row of a feature query.
///
/// Attribute values and the serialized geometry are carried separately, so
/// nothing downstream depends on column positions.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FeatureRow {
    /// Column name to value, in column declaration order
    pub attributes: Map<String, JsonValue>,

    /// Geometry as GeoJSON text, already reprojected and rounded by the store
    pub geometry: Option<String>,
}

impl FeatureRow {
    pub fn new(attributes: Map<String, JsonValue>, geometry: Option<String>) -> Self {
        Self { attributes, geometry }
    }
}
