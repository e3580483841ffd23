use async_trait::async_trait;
use geoapp_core::error::{GeoappError, Result};
use geoapp_core::models::{FeatureQuery, FeatureRow};
use serde_json::Value as JsonValue;
use sqlx::Row;

use super::query::feature_query_builder;
use super::PostgresStore;
use crate::ports::FeatureStore;

#[async_trait]
impl FeatureStore for PostgresStore {
    async fn select_features(&self, query: &FeatureQuery<'_>) -> Result<Vec<FeatureRow>> {
        let mut builder = feature_query_builder(query);
        let mut conn = self.acquire().await?;

        let rows = builder
            .build()
            .fetch_all(&mut *conn)
            .await
            .map_err(|e| {
                GeoappError::Store(format!("Failed to query {}: {}", query.table.name, e))
            })?;

        tracing::debug!(table = query.table.name, rows = rows.len(), "Feature query completed");

        rows.into_iter()
            .map(|row| {
                let properties: JsonValue = row.try_get("properties").map_err(|e| {
                    GeoappError::Store(format!("Failed to read properties: {}", e))
                })?;
                let geometry: Option<String> = row.try_get("geometry").map_err(|e| {
                    GeoappError::Store(format!("Failed to read geometry: {}", e))
                })?;

                match properties {
                    JsonValue::Object(attributes) => Ok(FeatureRow::new(attributes, geometry)),
                    other => Err(GeoappError::Serialization(format!(
                        "Expected a JSON object of properties, got {}",
                        other
                    ))),
                }
            })
            .collect()
    }
}
