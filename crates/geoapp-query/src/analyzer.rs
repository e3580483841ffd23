use std::sync::Arc;

use geoapp_core::error::{GeoappError, Result};
use geoapp_core::models::{AnalyzeOptions, PointQuery, SpatialPointResult};
use geoapp_store::ports::PointAnalysisStore;

/// Parse a raw coordinate parameter into a finite float
pub fn parse_coordinate(name: &str, raw: Option<&str>) -> Result<f64> {
    let raw = raw.map(str::trim).filter(|s| !s.is_empty()).ok_or_else(|| {
        GeoappError::InvalidCoordinates { reason: format!("Missing '{}' parameter", name) }
    })?;

    match raw.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(GeoappError::InvalidCoordinates {
            reason: format!("'{}' must be a finite number, got '{}'", name, raw),
        }),
    }
}

fn round_distance(distance: f64) -> f64 {
    (distance * 100.0).round() / 100.0
}

/// Containment, radius count and nearest-station lookups for one point
#[derive(Clone)]
pub struct SpatialPointAnalyzer {
    store: Arc<dyn PointAnalysisStore>,
    options: AnalyzeOptions,
}

impl SpatialPointAnalyzer {
    /// Create an analyzer with default options
    pub fn new(store: Arc<dyn PointAnalysisStore>) -> Self {
        Self::with_options(store, AnalyzeOptions::default())
    }

    pub fn with_options(store: Arc<dyn PointAnalysisStore>, options: AnalyzeOptions) -> Self {
        Self { store, options }
    }

    pub fn options(&self) -> AnalyzeOptions {
        self.options
    }

    /// Analyze a point given in the source SRID
    pub async fn analyze(&self, x: f64, y: f64) -> Result<SpatialPointResult> {
        if !x.is_finite() || !y.is_finite() {
            return Err(GeoappError::InvalidCoordinates {
                reason: format!("Coordinates must be finite numbers, got ({}, {})", x, y),
            });
        }
        self.options.validate()?;

        let query = PointQuery { x, y, options: self.options };
        let mut result = self.store.analyze_point(&query).await?;
        if let Some(subway) = result.subway.as_mut() {
            subway.subway_distance = round_distance(subway.subway_distance);
        }

        tracing::info!(
            x,
            y,
            neighborhoods = result.neighborhoods.len(),
            number_of_homicides = result.number_of_homicides,
            "Analyzed point"
        );

        Ok(result)
    }

    /// Analyze a point from raw request parameters
    pub async fn analyze_raw(&self, x: Option<&str>, y: Option<&str>) -> Result<SpatialPointResult> {
        let x = parse_coordinate("x", x)?;
        let y = parse_coordinate("y", y)?;
        self.analyze(x, y).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use geoapp_core::models::NearestStation;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct CountingStore {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl PointAnalysisStore for CountingStore {
        async fn analyze_point(&self, _query: &PointQuery) -> Result<SpatialPointResult> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(SpatialPointResult {
                neighborhoods: vec![],
                number_of_homicides: 3,
                subway: Some(NearestStation {
                    subway_gid: 9,
                    name: Some("95th St".to_string()),
                    subway_distance: 1293.14159,
                }),
            })
        }
    }

    struct FailingStore;

    #[async_trait]
    impl PointAnalysisStore for FailingStore {
        async fn analyze_point(&self, _query: &PointQuery) -> Result<SpatialPointResult> {
            Err(GeoappError::Store("connection reset".to_string()))
        }
    }

    #[test]
    fn test_parse_coordinate() {
        assert_eq!(parse_coordinate("x", Some("4507520.0")).unwrap(), 4507520.0);
        assert_eq!(parse_coordinate("x", Some(" -12.5 ")).unwrap(), -12.5);
        assert!(matches!(
            parse_coordinate("x", Some("abc")),
            Err(GeoappError::InvalidCoordinates { .. })
        ));
        assert!(parse_coordinate("x", Some("NaN")).is_err());
        assert!(parse_coordinate("x", Some("inf")).is_err());
        assert!(parse_coordinate("x", Some("")).is_err());
        assert!(parse_coordinate("y", None).unwrap_err().to_string().contains("'y'"));
    }

    #[tokio::test]
    async fn test_distance_rounded_to_two_decimals() {
        let analyzer = SpatialPointAnalyzer::new(Arc::new(CountingStore::default()));

        let result = analyzer.analyze(0.0, 0.0).await.unwrap();

        assert_eq!(result.subway.unwrap().subway_distance, 1293.14);
        assert_eq!(result.number_of_homicides, 3);
        assert!(result.neighborhoods.is_empty());
    }

    #[tokio::test]
    async fn test_invalid_x_issues_no_query() {
        let store = Arc::new(CountingStore::default());
        let analyzer = SpatialPointAnalyzer::new(store.clone());

        let result = analyzer.analyze_raw(Some("abc"), Some("4507520.0")).await;

        assert!(matches!(result, Err(GeoappError::InvalidCoordinates { .. })));
        assert_eq!(store.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_non_finite_point_rejected() {
        let store = Arc::new(CountingStore::default());
        let analyzer = SpatialPointAnalyzer::new(store.clone());

        assert!(analyzer.analyze(f64::NAN, 1.0).await.is_err());
        assert!(analyzer.analyze(1.0, f64::INFINITY).await.is_err());
        assert_eq!(store.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_negative_radius_rejected() {
        let store = Arc::new(CountingStore::default());
        let options = AnalyzeOptions { radius_meters: -1.0, ..AnalyzeOptions::default() };
        let analyzer = SpatialPointAnalyzer::with_options(store.clone(), options);

        let result = analyzer.analyze(0.0, 0.0).await;

        assert!(matches!(result, Err(GeoappError::InvalidParameter { .. })));
        assert_eq!(store.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_store_failure_propagates() {
        let analyzer = SpatialPointAnalyzer::new(Arc::new(FailingStore));

        match analyzer.analyze(0.0, 0.0).await {
            Err(GeoappError::Store(message)) => assert_eq!(message, "connection reset"),
            other => panic!("Expected Store error, got {:?}", other),
        }
    }
}
