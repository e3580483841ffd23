//! CRS transformation

use geo::{Coord, Geometry, MapCoords};
use geoapp_core::error::{GeoappError, Result};
use proj::Proj;

fn projection(from_srid: i32, to_srid: i32) -> Result<Proj> {
    let from_proj = format!("EPSG:{}", from_srid);
    let to_proj = format!("EPSG:{}", to_srid);

    Proj::new_known_crs(&from_proj, &to_proj, None).map_err(|e| GeoappError::InvalidParameter {
        name: "srid".to_string(),
        reason: format!("Failed to create projection from {} to {}: {}", from_proj, to_proj, e),
    })
}

fn projection_failed(e: proj::ProjError) -> GeoappError {
    GeoappError::InvalidCoordinates {
        reason: format!("Projection failed: {}", e),
    }
}

/// Reproject a single coordinate pair
pub fn reproject_point(x: f64, y: f64, from_srid: i32, to_srid: i32) -> Result<(f64, f64)> {
    if from_srid == to_srid {
        return Ok((x, y));
    }

    let proj = projection(from_srid, to_srid)?;
    proj.convert((x, y)).map_err(projection_failed)
}

/// Reproject every coordinate of a geometry
pub fn reproject_geometry(
    geometry: &Geometry<f64>,
    from_srid: i32,
    to_srid: i32,
) -> Result<Geometry<f64>> {
    if from_srid == to_srid {
        return Ok(geometry.clone());
    }

    let proj = projection(from_srid, to_srid)?;
    let proj = &proj;
    geometry.try_map_coords(|coord| {
        proj.convert((coord.x, coord.y))
            .map(|(x, y)| Coord { x, y })
            .map_err(projection_failed)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::{point, Point};

    #[test]
    fn test_same_srid_is_identity() {
        assert_eq!(reproject_point(583571.9, 4506714.3, 26918, 26918).unwrap(), (583571.9, 4506714.3));

        let geom = Geometry::Point(point!(x: 1.5, y: -2.5));
        assert_eq!(reproject_geometry(&geom, 4326, 4326).unwrap(), geom);
    }

    #[test]
    fn test_web_mercator_to_wgs84() {
        let (lon, lat) = reproject_point(-8239434.211335423, 4955524.41983333, 3857, 4326).unwrap();
        assert!((lon - -74.0155).abs() < 0.01, "lon {}", lon);
        assert!((lat - 40.6185).abs() < 0.01, "lat {}", lat);
    }

    #[test]
    fn test_geometry_reprojection_round_trip() {
        let original = Geometry::Point(Point::new(583571.9, 4506714.3));
        let wgs84 = reproject_geometry(&original, 26918, 4326).unwrap();
        let back = reproject_geometry(&wgs84, 4326, 26918).unwrap();

        match (original, back) {
            (Geometry::Point(a), Geometry::Point(b)) => {
                assert!((a.x() - b.x()).abs() < 1e-3);
                assert!((a.y() - b.y()).abs() < 1e-3);
            }
            _ => panic!("Expected points"),
        }
    }
}
