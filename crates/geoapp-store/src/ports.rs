use async_trait::async_trait;
use geoapp_core::error::Result;
use geoapp_core::models::{FeatureQuery, FeatureRow, PointQuery, SpatialPointResult};

/// Port for filtered feature retrieval
#[async_trait]
pub trait FeatureStore: Send + Sync {
    /// Run a validated feature query.
    ///
    /// Geometry is reprojected to the query's target SRID and rendered as
    /// GeoJSON text at its precision. Rows come back in primary key order.
    async fn select_features(&self, query: &FeatureQuery<'_>) -> Result<Vec<FeatureRow>>;
}

/// Port for point-based spatial analytics
#[async_trait]
pub trait PointAnalysisStore: Send + Sync {
    /// Reproject the query point to the native SRID and answer the
    /// containment, radius count and nearest-station questions.
    ///
    /// The nearest-station distance is returned unrounded.
    async fn analyze_point(&self, query: &PointQuery) -> Result<SpatialPointResult>;
}

/// Port for backend liveness checks
#[async_trait]
pub trait HealthCheck: Send + Sync {
    async fn health_check(&self) -> Result<()>;
}
