//! Integration tests for catalogue resolution, filter validation and
//! serialization working together

use geoapp_core::models::FeatureRow;
use geoapp_core::{rows_to_feature_collection, validate_filters, FeatureCatalogue, GeoappError};
use serde_json::{json, Map, Value as JsonValue};

#[test]
fn test_every_catalogue_table_accepts_its_own_columns() {
    let catalogue = FeatureCatalogue::nyc();

    for table in catalogue.list() {
        let candidates: Vec<(String, String)> =
            table.columns.iter().map(|c| (c.name.to_string(), "1".to_string())).collect();
        let filters = validate_filters(table, candidates).unwrap();
        assert_eq!(filters.len(), table.columns.len(), "table {}", table.name);
    }
}

#[test]
fn test_column_of_another_table_is_rejected() {
    let catalogue = FeatureCatalogue::nyc();
    let streets = catalogue.resolve("nyc_streets").unwrap();

    // `weapon` exists on nyc_homicides only
    let err = validate_filters(streets, vec![("weapon", "gun"), ("oneway", "yes")]).unwrap_err();
    assert_eq!(err.to_string(), "Invalid filter parameters: weapon.");
}

#[test]
fn test_unknown_table_message() {
    let err = FeatureCatalogue::nyc().resolve("nyc_bike_lanes").unwrap_err();
    assert!(matches!(err, GeoappError::UnknownTable { .. }));
    assert_eq!(err.to_string(), "Model 'nyc_bike_lanes' not found.");
}

#[test]
fn test_neighborhood_rows_never_expose_geometry() {
    let catalogue = FeatureCatalogue::nyc();
    let neighborhoods = catalogue.resolve("nyc_neighborhoods").unwrap();

    let mut attributes: Map<String, JsonValue> = Map::new();
    for column in neighborhoods.columns {
        attributes.insert(column.name.to_string(), json!("value"));
    }

    let collection = rows_to_feature_collection(
        vec![FeatureRow::new(attributes, None)],
        neighborhoods.geometry_column.unwrap(),
    )
    .unwrap();

    let properties = collection.features[0].properties.as_ref().unwrap();
    assert!(!properties.contains_key("geom"));
    assert!(!properties.contains_key("geom_invalid"));
    let keys: Vec<_> = properties.keys().cloned().collect();
    assert_eq!(keys, vec!["gid", "boroname", "name"]);
}
