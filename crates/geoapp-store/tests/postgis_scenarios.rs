//! Scenario tests against a PostGIS database loaded with the NYC sample data.
//!
//! Run with `DATABASE_URL=postgres://... cargo test -p geoapp-store -- --ignored`.

use geoapp_core::models::{AnalyzeOptions, FeatureQuery, FetchOptions, PointQuery};
use geoapp_core::{validate_filters, FeatureCatalogue};
use geoapp_store::ports::{FeatureStore, HealthCheck, PointAnalysisStore};
use geoapp_store::postgres::{PostgresConfig, PostgresStore};

async fn connect() -> PostgresStore {
    let config = PostgresConfig::from_env().expect("DATABASE_URL must be set");
    PostgresStore::new(config).await.expect("Failed to connect to PostGIS")
}

#[tokio::test]
#[ignore]
async fn test_health_check() {
    let store = connect().await;
    assert!(store.health_check().await.is_ok());
}

#[tokio::test]
#[ignore]
async fn test_station_by_gid() {
    let store = connect().await;
    let catalogue = FeatureCatalogue::nyc();
    let table = catalogue.resolve("nyc_subway_stations").unwrap();
    let filters = validate_filters(table, vec![("gid", "1")]).unwrap();

    let rows = store
        .select_features(&FeatureQuery { table, filters: &filters, options: FetchOptions::default() })
        .await
        .unwrap();

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].attributes["gid"], 1);
    assert!(!rows[0].attributes.contains_key("geom"));
    assert!(rows[0].geometry.as_deref().unwrap().contains("Point"));
}

#[tokio::test]
#[ignore]
async fn test_filter_matching_nothing() {
    let store = connect().await;
    let catalogue = FeatureCatalogue::nyc();
    let table = catalogue.resolve("nyc_subway_stations").unwrap();
    let filters = validate_filters(table, vec![("gid", "-1")]).unwrap();

    let rows = store
        .select_features(&FeatureQuery { table, filters: &filters, options: FetchOptions::default() })
        .await
        .unwrap();

    assert!(rows.is_empty());
}

#[tokio::test]
#[ignore]
async fn test_events_table_without_geometry() {
    let store = connect().await;
    let catalogue = FeatureCatalogue::nyc();
    let table = catalogue.resolve("nyc_subway_station_events").unwrap();
    let filters = validate_filters(table, Vec::<(String, String)>::new()).unwrap();

    let rows = store
        .select_features(&FeatureQuery { table, filters: &filters, options: FetchOptions::default() })
        .await
        .unwrap();

    assert!(rows.iter().all(|row| row.geometry.is_none()));
}

#[tokio::test]
#[ignore]
async fn test_analyze_dyker_heights() {
    let store = connect().await;
    let query = PointQuery {
        x: -8239434.211335423,
        y: 4955524.41983333,
        options: AnalyzeOptions::default(),
    };

    let result = store.analyze_point(&query).await.unwrap();

    assert_eq!(result.neighborhoods.len(), 1);
    assert_eq!(result.neighborhoods[0].name.as_deref(), Some("Dyker Heights"));
    assert_eq!(result.neighborhoods[0].boroname.as_deref(), Some("Brooklyn"));
    assert_eq!(result.number_of_homicides, 0);

    let subway = result.subway.unwrap();
    assert_eq!(subway.name.as_deref(), Some("95th St"));
    assert!((subway.subway_distance - 1293.1).abs() < 0.5);
}
