use async_trait::async_trait;
use geoapp_core::error::{GeoappError, Result};
use geoapp_core::models::{NearestStation, NeighborhoodMatch, PointQuery, SpatialPointResult};
use sqlx::Row;

use super::PostgresStore;
use crate::ports::PointAnalysisStore;

const REPROJECT_POINT: &str = r#"
    SELECT ST_X(p.geom) AS x, ST_Y(p.geom) AS y
    FROM (SELECT ST_Transform(ST_SetSRID(ST_MakePoint($1, $2), $3), $4) AS geom) AS p
"#;

const CONTAINING_NEIGHBORHOODS: &str = r#"
    SELECT gid, name, boroname
    FROM nyc_neighborhoods
    WHERE ST_Intersects(geom, ST_SetSRID(ST_MakePoint($1, $2), $3))
    ORDER BY gid
"#;

const HOMICIDES_WITHIN: &str = r#"
    SELECT COUNT(*)
    FROM nyc_homicides
    WHERE ST_DWithin(geom, ST_SetSRID(ST_MakePoint($1, $2), $3), $4)
"#;

// KNN ordering through the `<->` operator
const NEAREST_STATION: &str = r#"
    SELECT gid, name, ST_Distance(geom, ST_SetSRID(ST_MakePoint($1, $2), $3)) AS distance
    FROM nyc_subway_stations
    ORDER BY geom <-> ST_SetSRID(ST_MakePoint($1, $2), $3)
    LIMIT 1
"#;

fn store_error(step: &str) -> impl Fn(sqlx::Error) -> GeoappError + '_ {
    move |e| GeoappError::Store(format!("Failed to {}: {}", step, e))
}

#[async_trait]
impl PointAnalysisStore for PostgresStore {
    async fn analyze_point(&self, query: &PointQuery) -> Result<SpatialPointResult> {
        let options = query.options;
        let mut conn = self.acquire().await?;

        let row = sqlx::query(REPROJECT_POINT)
            .bind(query.x)
            .bind(query.y)
            .bind(options.source_srid)
            .bind(options.native_srid)
            .fetch_one(&mut *conn)
            .await
            .map_err(store_error("reproject point"))?;
        let x: f64 = row.try_get("x").map_err(store_error("read projected x"))?;
        let y: f64 = row.try_get("y").map_err(store_error("read projected y"))?;

        let neighborhoods = sqlx::query(CONTAINING_NEIGHBORHOODS)
            .bind(x)
            .bind(y)
            .bind(options.native_srid)
            .fetch_all(&mut *conn)
            .await
            .map_err(store_error("find containing neighborhoods"))?
            .into_iter()
            .map(|row| {
                Ok::<_, sqlx::Error>(NeighborhoodMatch {
                    neighborhood_gid: row.try_get("gid")?,
                    name: row.try_get("name")?,
                    boroname: row.try_get("boroname")?,
                })
            })
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(store_error("read neighborhood"))?;

        let number_of_homicides: i64 = sqlx::query_scalar(HOMICIDES_WITHIN)
            .bind(x)
            .bind(y)
            .bind(options.native_srid)
            .bind(options.radius_meters)
            .fetch_one(&mut *conn)
            .await
            .map_err(store_error("count homicides"))?;

        let subway = sqlx::query(NEAREST_STATION)
            .bind(x)
            .bind(y)
            .bind(options.native_srid)
            .fetch_optional(&mut *conn)
            .await
            .map_err(store_error("find nearest station"))?
            .map(|row| {
                Ok::<_, sqlx::Error>(NearestStation {
                    subway_gid: row.try_get("gid")?,
                    name: row.try_get("name")?,
                    subway_distance: row.try_get("distance")?,
                })
            })
            .transpose()
            .map_err(store_error("read nearest station"))?;

        tracing::debug!(
            x,
            y,
            srid = options.native_srid,
            neighborhoods = neighborhoods.len(),
            number_of_homicides,
            "Point analysis completed"
        );

        Ok(SpatialPointResult { neighborhoods, number_of_homicides, subway })
    }
}
