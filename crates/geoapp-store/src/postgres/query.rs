//! SQL construction for feature retrieval
//!
//! Identifiers only ever come from a catalogue descriptor and are quoted;
//! filter values, the target SRID and the precision are bind parameters.

use geoapp_core::models::FeatureQuery;
use sqlx::{Postgres, QueryBuilder};

/// Quote an SQL identifier
pub fn quote_identifier(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

/// Quote an SQL string literal
pub fn quote_literal(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}

/// Build the single statement answering a feature query.
///
/// Selected columns:
/// - `properties`: `json_build_object` over the attribute columns, in
///   declaration order
/// - `geometry`: `ST_AsGeoJSON(ST_Transform(geom, srid), precision)`, or
///   NULL when the table has no geometry column
pub fn feature_query_builder<'args>(query: &FeatureQuery<'_>) -> QueryBuilder<'args, Postgres> {
    let table = query.table;
    let mut builder = QueryBuilder::new("SELECT json_build_object(");

    for (i, column) in table.attribute_columns().enumerate() {
        if i > 0 {
            builder.push(", ");
        }
        builder
            .push(quote_literal(column.name))
            .push(", t.")
            .push(quote_identifier(column.name));
    }
    builder.push(") AS properties, ");

    match table.geometry_column {
        Some(geometry_column) => {
            builder
                .push("ST_AsGeoJSON(ST_Transform(t.")
                .push(quote_identifier(geometry_column))
                .push(", ");
            builder.push_bind(query.options.target_srid);
            builder.push("), ");
            builder.push_bind(query.options.precision as i32);
            builder.push(") AS geometry");
        }
        None => {
            builder.push("NULL::text AS geometry");
        }
    }

    builder.push(" FROM ").push(quote_identifier(table.name)).push(" AS t");

    for (i, filter) in query.filters.iter().enumerate() {
        builder
            .push(if i == 0 { " WHERE t." } else { " AND t." })
            .push(quote_identifier(filter.column.name))
            .push(" = CAST(");
        builder.push_bind(filter.value.clone());
        builder.push(" AS ").push(filter.column.column_type.sql_name()).push(")");
    }

    builder.push(" ORDER BY t.").push(quote_identifier(table.primary_key));
    builder
}

#[cfg(test)]
mod tests {
    use super::*;
    use geoapp_core::models::FetchOptions;
    use geoapp_core::{validate_filters, FeatureCatalogue};

    #[test]
    fn test_quote_identifier() {
        assert_eq!(quote_identifier("gid"), "\"gid\"");
        assert_eq!(quote_identifier("we\"ird"), "\"we\"\"ird\"");
        assert_eq!(quote_literal("o'neil"), "'o''neil'");
    }

    #[test]
    fn test_stations_query_with_filter() {
        let catalogue = FeatureCatalogue::nyc();
        let table = catalogue.resolve("nyc_subway_stations").unwrap();
        let filters = validate_filters(table, vec![("gid", "1")]).unwrap();
        let query = FeatureQuery { table, filters: &filters, options: FetchOptions::default() };

        let builder = feature_query_builder(&query);
        let sql = builder.sql();

        assert!(sql.starts_with("SELECT json_build_object('gid', t.\"gid\", 'objectid', t.\"objectid\""));
        assert!(sql.contains("ST_AsGeoJSON(ST_Transform(t.\"geom\", $1), $2) AS geometry"));
        assert!(sql.contains(" FROM \"nyc_subway_stations\" AS t"));
        assert!(sql.contains(" WHERE t.\"gid\" = CAST($3 AS integer)"));
        assert!(sql.ends_with(" ORDER BY t.\"gid\""));
        assert!(!sql.contains("'geom'"));
    }

    #[test]
    fn test_filters_are_anded_and_bound() {
        let catalogue = FeatureCatalogue::nyc();
        let table = catalogue.resolve("nyc_homicides").unwrap();
        let filters =
            validate_filters(table, vec![("weapon", "gun'); DROP TABLE x; --"), ("year", "2003")])
                .unwrap();
        let query = FeatureQuery { table, filters: &filters, options: FetchOptions::default() };

        let builder = feature_query_builder(&query);
        let sql = builder.sql();

        assert!(sql.contains("WHERE t.\"weapon\" = CAST($3 AS varchar) AND t.\"year\" = CAST($4 AS double precision)"));
        assert!(!sql.contains("DROP TABLE"));
    }

    #[test]
    fn test_invalid_geometry_variant_never_selected() {
        let catalogue = FeatureCatalogue::nyc();
        let table = catalogue.resolve("nyc_neighborhoods").unwrap();
        let filters = validate_filters(table, Vec::<(String, String)>::new()).unwrap();
        let query = FeatureQuery { table, filters: &filters, options: FetchOptions::default() };

        let builder = feature_query_builder(&query);
        assert!(!builder.sql().contains("geom_invalid"));
        assert!(!builder.sql().contains("WHERE"));
    }

    #[test]
    fn test_table_without_geometry() {
        let catalogue = FeatureCatalogue::nyc();
        let table = catalogue.resolve("nyc_subway_station_events").unwrap();
        let filters = validate_filters(table, vec![("streets_gid", "12")]).unwrap();
        let query = FeatureQuery { table, filters: &filters, options: FetchOptions::default() };

        let builder = feature_query_builder(&query);
        let sql = builder.sql();

        assert!(sql.contains("NULL::text AS geometry"));
        assert!(!sql.contains("ST_Transform"));
        // no SRID/precision binds, so the filter is the first parameter
        assert!(sql.contains("t.\"streets_gid\" = CAST($1 AS integer)"));
        assert!(sql.ends_with("ORDER BY t.\"subways_gid\""));
    }
}
