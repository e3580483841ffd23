//! Spatial predicates and point indexing

use geo::algorithm::intersects::Intersects;
use geo::{Coord, Distance, Euclidean, Geometry, MapCoords, Point};
use geoapp_core::error::{GeoappError, Result};
use rstar::primitives::GeomWithData;
use rstar::{RTree, AABB};

/// Round every coordinate to `precision` decimal digits
pub fn round_coordinates(geometry: &Geometry<f64>, precision: u32) -> Geometry<f64> {
    let factor = 10f64.powi(precision as i32);
    geometry.map_coords(|Coord { x, y }| Coord {
        x: (x * factor).round() / factor,
        y: (y * factor).round() / factor,
    })
}

/// Serialize a geometry as GeoJSON text
pub fn to_geojson_text(geometry: &Geometry<f64>) -> Result<String> {
    let geojson = geojson::Geometry::new(geojson::Value::from(geometry));
    serde_json::to_string(&geojson)
        .map_err(|e| GeoappError::Serialization(format!("Failed to serialize geometry: {}", e)))
}

/// Check if a geometry intersects a point
pub fn intersects_point(geometry: &Geometry<f64>, point: Point<f64>) -> bool {
    geometry.intersects(&point)
}

type IndexedPoint = GeomWithData<[f64; 2], usize>;

/// R-tree over point features, keyed by the caller's record index
#[derive(Debug)]
pub struct PointIndex {
    tree: RTree<IndexedPoint>,
}

impl Default for PointIndex {
    fn default() -> Self {
        Self::new()
    }
}

impl PointIndex {
    pub fn new() -> Self {
        Self { tree: RTree::new() }
    }

    /// Bulk load an index from `(record, point)` pairs
    pub fn from_points(points: impl IntoIterator<Item = (usize, Point<f64>)>) -> Self {
        let items: Vec<IndexedPoint> = points
            .into_iter()
            .map(|(id, p)| GeomWithData::new([p.x(), p.y()], id))
            .collect();
        Self { tree: RTree::bulk_load(items) }
    }

    pub fn insert(&mut self, id: usize, point: Point<f64>) {
        self.tree.insert(GeomWithData::new([point.x(), point.y()], id));
    }

    pub fn len(&self) -> usize {
        self.tree.size()
    }

    pub fn is_empty(&self) -> bool {
        self.tree.size() == 0
    }

    /// Nearest indexed point and its Euclidean distance
    pub fn nearest(&self, point: Point<f64>) -> Option<(usize, f64)> {
        self.tree.nearest_neighbor(&[point.x(), point.y()]).map(|item| {
            let [x, y] = *item.geom();
            (item.data, Euclidean.distance(point, Point::new(x, y)))
        })
    }

    /// Records with an indexed point within `radius` of `point` (inclusive),
    /// each record reported once
    pub fn within_distance(&self, point: Point<f64>, radius: f64) -> Vec<usize> {
        let envelope = AABB::from_corners(
            [point.x() - radius, point.y() - radius],
            [point.x() + radius, point.y() + radius],
        );

        let mut ids: Vec<usize> = self
            .tree
            .locate_in_envelope(&envelope)
            .filter(|item| {
                let [x, y] = *item.geom();
                Euclidean.distance(point, Point::new(x, y)) <= radius
            })
            .map(|item| item.data)
            .collect();
        ids.sort_unstable();
        ids.dedup();
        ids
    }
}
