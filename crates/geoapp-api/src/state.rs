use std::sync::Arc;

use geoapp_core::catalogue::FeatureCatalogue;
use geoapp_core::config::QueryConfig;
use geoapp_core::models::FetchOptions;
use geoapp_query::{FeatureQueryEngine, SpatialPointAnalyzer};
use geoapp_store::ports::{FeatureStore, HealthCheck, PointAnalysisStore};

/// Shared handler state
#[derive(Clone)]
pub struct AppState {
    pub features: FeatureQueryEngine,
    pub analyzer: SpatialPointAnalyzer,
    pub health: Arc<dyn HealthCheck>,
    pub fetch_options: FetchOptions,
    pub backend: &'static str,
}

impl AppState {
    /// Wire the engines over one store
    pub fn new<S>(store: Arc<S>, config: &QueryConfig, backend: &'static str) -> Self
    where
        S: FeatureStore + PointAnalysisStore + HealthCheck + 'static,
    {
        let catalogue = Arc::new(FeatureCatalogue::nyc());
        Self {
            features: FeatureQueryEngine::new(catalogue, store.clone()),
            analyzer: SpatialPointAnalyzer::with_options(store.clone(), config.analyze_options()),
            health: store,
            fetch_options: config.fetch_options(),
            backend,
        }
    }
}
