use std::sync::Arc;

use geoapp_core::catalogue::FeatureCatalogue;
use geoapp_core::error::Result;
use geoapp_core::models::{FeatureQuery, FetchOptions};
use geoapp_core::{rows_to_feature_collection, validate_filters};
use geoapp_store::ports::FeatureStore;
use geojson::FeatureCollection;

/// Geometry column name used when a table declares none
const DEFAULT_GEOMETRY_COLUMN: &str = "geom";

/// Filtered feature retrieval over the catalogue
#[derive(Clone)]
pub struct FeatureQueryEngine {
    catalogue: Arc<FeatureCatalogue>,
    store: Arc<dyn FeatureStore>,
}

impl FeatureQueryEngine {
    /// Create a new engine
    pub fn new(catalogue: Arc<FeatureCatalogue>, store: Arc<dyn FeatureStore>) -> Self {
        Self { catalogue, store }
    }

    pub fn catalogue(&self) -> &FeatureCatalogue {
        &self.catalogue
    }

    /// Fetch the features of a table matching every candidate filter.
    ///
    /// The table, the filter keys and the options are all checked before the
    /// store is touched.
    pub async fn fetch<K, V>(
        &self,
        identifier: &str,
        candidates: impl IntoIterator<Item = (K, V)>,
        options: FetchOptions,
    ) -> Result<FeatureCollection>
    where
        K: AsRef<str>,
        V: Into<String>,
    {
        let table = self.catalogue.resolve(identifier)?;
        let filters = validate_filters(table, candidates)?;
        options.validate()?;

        let query = FeatureQuery { table, filters: &filters, options };
        let rows = self.store.select_features(&query).await?;

        tracing::info!(
            table = table.name,
            filters = filters.len(),
            rows = rows.len(),
            srid = options.target_srid,
            "Fetched features"
        );

        rows_to_feature_collection(rows, table.geometry_column.unwrap_or(DEFAULT_GEOMETRY_COLUMN))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use geoapp_core::error::GeoappError;
    use geoapp_core::models::FeatureRow;
    use serde_json::{json, Map};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    /// Store double recording every query it receives
    #[derive(Default)]
    struct RecordingStore {
        calls: AtomicUsize,
        last: Mutex<Option<(String, Vec<(String, String)>, FetchOptions)>>,
    }

    #[async_trait]
    impl FeatureStore for RecordingStore {
        async fn select_features(&self, query: &FeatureQuery<'_>) -> Result<Vec<FeatureRow>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let filters =
                query.filters.iter().map(|f| (f.column.name.to_string(), f.value.clone())).collect();
            *self.last.lock().unwrap() = Some((query.table.name.to_string(), filters, query.options));

            let mut attributes = Map::new();
            attributes.insert("gid".to_string(), json!(1));
            attributes.insert("name".to_string(), json!("Cortlandt St"));
            Ok(vec![FeatureRow::new(
                attributes,
                Some(r#"{"type":"Point","coordinates":[-74.0,40.7]}"#.to_string()),
            )])
        }
    }

    fn engine() -> (FeatureQueryEngine, Arc<RecordingStore>) {
        let store = Arc::new(RecordingStore::default());
        let engine = FeatureQueryEngine::new(Arc::new(FeatureCatalogue::nyc()), store.clone());
        (engine, store)
    }

    #[tokio::test]
    async fn test_fetch_passes_validated_query() {
        let (engine, store) = engine();

        let collection = engine
            .fetch("nyc_subway_stations", vec![("gid", "1")], FetchOptions::default())
            .await
            .unwrap();

        assert_eq!(collection.features.len(), 1);
        assert_eq!(store.calls.load(Ordering::SeqCst), 1);
        let (table, filters, options) = store.last.lock().unwrap().clone().unwrap();
        assert_eq!(table, "nyc_subway_stations");
        assert_eq!(filters, vec![("gid".to_string(), "1".to_string())]);
        assert_eq!(options, FetchOptions::default());
    }

    #[tokio::test]
    async fn test_unknown_table_issues_no_query() {
        let (engine, store) = engine();

        let result = engine.fetch("pizza_shops", vec![("gid", "1")], FetchOptions::default()).await;

        assert!(matches!(result, Err(GeoappError::UnknownTable { .. })));
        assert_eq!(store.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_invalid_filters_issue_no_query() {
        let (engine, store) = engine();

        let result = engine
            .fetch(
                "nyc_subway_stations",
                vec![("colour", "red"), ("gid", "1"), ("size", "L")],
                FetchOptions::default(),
            )
            .await;

        match result {
            Err(e @ GeoappError::InvalidFilters { .. }) => {
                assert_eq!(e.to_string(), "Invalid filter parameters: colour, size.");
            }
            other => panic!("Expected InvalidFilters, got {:?}", other),
        }
        assert_eq!(store.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_excessive_precision_issues_no_query() {
        let (engine, store) = engine();

        let result = engine
            .fetch(
                "nyc_subway_stations",
                Vec::<(String, String)>::new(),
                FetchOptions::default().with_precision(40),
            )
            .await;

        assert!(matches!(result, Err(GeoappError::InvalidParameter { .. })));
        assert_eq!(store.calls.load(Ordering::SeqCst), 0);
    }
}
