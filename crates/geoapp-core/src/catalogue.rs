//! Feature catalogue
//!
//! Static descriptors for every feature table the service exposes. The
//! descriptors are plain literals: column sets are never discovered from a
//! live schema, and the catalogue does not change after construction.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::error::{GeoappError, Result};

/// Store-side type of a column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    Integer,
    Double,
    Numeric,
    Varchar,
    Date,
    Boolean,
    TstzRange,
    Geometry,
}

impl ColumnType {
    /// SQL type name used to cast bound filter values
    pub fn sql_name(&self) -> &'static str {
        match self {
            ColumnType::Integer => "integer",
            ColumnType::Double => "double precision",
            ColumnType::Numeric => "numeric",
            ColumnType::Varchar => "varchar",
            ColumnType::Date => "date",
            ColumnType::Boolean => "boolean",
            ColumnType::TstzRange => "tstzrange",
            ColumnType::Geometry => "geometry",
        }
    }

    pub fn is_geometry(&self) -> bool {
        matches!(self, ColumnType::Geometry)
    }
}

/// A declared table column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Column {
    pub name: &'static str,
    #[serde(rename = "type")]
    pub column_type: ColumnType,
}

impl Column {
    pub const fn new(name: &'static str, column_type: ColumnType) -> Self {
        Self { name, column_type }
    }
}

/// Descriptor of one feature table
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableDescriptor {
    /// Stable identifier, also the store table name
    pub name: &'static str,

    /// Columns in declaration order
    pub columns: &'static [Column],

    /// Primary key column, used for deterministic ordering
    pub primary_key: &'static str,

    /// Geometry column emitted as the feature geometry
    pub geometry_column: Option<&'static str>,

    /// Native SRID of the geometry column
    pub srid: i32,
}

impl TableDescriptor {
    /// Look up a declared column (exact, case-sensitive)
    pub fn column(&self, name: &str) -> Option<&'static Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column(name).is_some()
    }

    /// Columns emitted as feature properties, in declaration order
    pub fn attribute_columns(&self) -> impl Iterator<Item = &'static Column> + '_ {
        self.columns.iter().filter(|c| !c.column_type.is_geometry())
    }

    pub fn geometry_columns(&self) -> impl Iterator<Item = &'static Column> + '_ {
        self.columns.iter().filter(|c| c.column_type.is_geometry())
    }
}

use ColumnType::*;

const NYC_CENSUS_BLOCKS: &[Column] = &[
    Column::new("gid", Integer),
    Column::new("blkid", Varchar),
    Column::new("popn_total", Double),
    Column::new("popn_white", Double),
    Column::new("popn_black", Double),
    Column::new("popn_nativ", Double),
    Column::new("popn_asian", Double),
    Column::new("popn_other", Double),
    Column::new("boroname", Varchar),
    Column::new("geom", Geometry),
];

const NYC_HOMICIDES: &[Column] = &[
    Column::new("gid", Integer),
    Column::new("incident_d", Date),
    Column::new("boroname", Varchar),
    Column::new("num_victim", Varchar),
    Column::new("primary_mo", Varchar),
    Column::new("id", Double),
    Column::new("weapon", Varchar),
    Column::new("light_dark", Varchar),
    Column::new("year", Double),
    Column::new("geom", Geometry),
];

const NYC_NEIGHBORHOODS: &[Column] = &[
    Column::new("gid", Integer),
    Column::new("boroname", Varchar),
    Column::new("name", Varchar),
    Column::new("geom", Geometry),
    Column::new("geom_invalid", Geometry),
];

const NYC_STREETS: &[Column] = &[
    Column::new("gid", Integer),
    Column::new("id", Double),
    Column::new("name", Varchar),
    Column::new("oneway", Varchar),
    Column::new("type", Varchar),
    Column::new("geom", Geometry),
];

const NYC_STREETS_HISTORY: &[Column] = &[
    Column::new("hid", Integer),
    Column::new("gid", Integer),
    Column::new("id", Double),
    Column::new("name", Varchar),
    Column::new("oneway", Varchar),
    Column::new("type", Varchar),
    Column::new("geom", Geometry),
    Column::new("valid_range", TstzRange),
    Column::new("created_by", Varchar),
    Column::new("deleted_by", Varchar),
];

const NYC_SUBWAY_STATION_EVENTS: &[Column] = &[
    Column::new("subways_gid", Integer),
    Column::new("streets_gid", Integer),
    Column::new("measure", Double),
    Column::new("distance", Double),
];

const NYC_SUBWAY_STATIONS: &[Column] = &[
    Column::new("gid", Integer),
    Column::new("objectid", Numeric),
    Column::new("id", Numeric),
    Column::new("name", Varchar),
    Column::new("alt_name", Varchar),
    Column::new("cross_st", Varchar),
    Column::new("long_name", Varchar),
    Column::new("label", Varchar),
    Column::new("borough", Varchar),
    Column::new("nghbhd", Varchar),
    Column::new("routes", Varchar),
    Column::new("transfers", Varchar),
    Column::new("color", Varchar),
    Column::new("express", Varchar),
    Column::new("closed", Varchar),
    Column::new("geom", Geometry),
];

/// Native SRID of the NYC sample data (UTM zone 18N)
pub const NYC_SRID: i32 = 26918;

/// Descriptors for the NYC sample tables
pub fn nyc_tables() -> Vec<TableDescriptor> {
    fn table(
        name: &'static str,
        columns: &'static [Column],
        primary_key: &'static str,
        geometry_column: Option<&'static str>,
    ) -> TableDescriptor {
        TableDescriptor { name, columns, primary_key, geometry_column, srid: NYC_SRID }
    }

    vec![
        table("nyc_census_blocks", NYC_CENSUS_BLOCKS, "gid", Some("geom")),
        table("nyc_homicides", NYC_HOMICIDES, "gid", Some("geom")),
        table("nyc_neighborhoods", NYC_NEIGHBORHOODS, "gid", Some("geom")),
        table("nyc_streets", NYC_STREETS, "gid", Some("geom")),
        table("nyc_streets_history", NYC_STREETS_HISTORY, "hid", Some("geom")),
        table("nyc_subway_station_events", NYC_SUBWAY_STATION_EVENTS, "subways_gid", None),
        table("nyc_subway_stations", NYC_SUBWAY_STATIONS, "gid", Some("geom")),
    ]
}

/// Registry of feature tables keyed by identifier
#[derive(Debug, Clone)]
pub struct FeatureCatalogue {
    tables: BTreeMap<&'static str, TableDescriptor>,
}

impl FeatureCatalogue {
    /// Build a catalogue from explicit descriptors
    pub fn from_descriptors(descriptors: impl IntoIterator<Item = TableDescriptor>) -> Self {
        let tables = descriptors.into_iter().map(|d| (d.name, d)).collect();
        Self { tables }
    }

    /// Catalogue of the NYC sample tables
    pub fn nyc() -> Self {
        Self::from_descriptors(nyc_tables())
    }

    /// Resolve an identifier to its descriptor
    pub fn resolve(&self, identifier: &str) -> Result<&TableDescriptor> {
        self.tables.get(identifier).ok_or_else(|| GeoappError::UnknownTable {
            identifier: identifier.to_string(),
        })
    }

    /// All descriptors in identifier order
    pub fn list(&self) -> impl Iterator<Item = &TableDescriptor> {
        self.tables.values()
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}

impl Default for FeatureCatalogue {
    fn default() -> Self {
        Self::nyc()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_resolve_known_table() {
        let catalogue = FeatureCatalogue::nyc();
        let table = catalogue.resolve("nyc_subway_stations").unwrap();
        assert_eq!(table.primary_key, "gid");
        assert_eq!(table.geometry_column, Some("geom"));
        assert_eq!(table.srid, 26918);
    }

    #[test]
    fn test_resolve_is_case_sensitive() {
        let catalogue = FeatureCatalogue::nyc();
        match catalogue.resolve("NYC_SUBWAY_STATIONS") {
            Err(GeoappError::UnknownTable { identifier }) => {
                assert_eq!(identifier, "NYC_SUBWAY_STATIONS")
            }
            other => panic!("Expected UnknownTable, got {:?}", other),
        }
    }

    #[test]
    fn test_list_is_sorted() {
        let catalogue = FeatureCatalogue::nyc();
        let names: Vec<_> = catalogue.list().map(|t| t.name).collect();
        let mut sorted = names.clone();
        sorted.sort();
        assert_eq!(names, sorted);
        assert_eq!(catalogue.len(), 7);
    }

    #[test]
    fn test_column_names_unique_and_key_declared() {
        for table in nyc_tables() {
            let names: HashSet<_> = table.columns.iter().map(|c| c.name).collect();
            assert_eq!(names.len(), table.columns.len(), "{} repeats a column", table.name);
            assert!(table.has_column(table.primary_key));
            if let Some(geom) = table.geometry_column {
                assert!(table.column(geom).unwrap().column_type.is_geometry());
            }
        }
    }

    #[test]
    fn test_attribute_columns_skip_geometry() {
        let catalogue = FeatureCatalogue::nyc();
        let neighborhoods = catalogue.resolve("nyc_neighborhoods").unwrap();
        let attrs: Vec<_> = neighborhoods.attribute_columns().map(|c| c.name).collect();
        assert_eq!(attrs, vec!["gid", "boroname", "name"]);
        assert_eq!(neighborhoods.geometry_columns().count(), 2);
    }

    #[test]
    fn test_events_table_has_no_geometry() {
        let catalogue = FeatureCatalogue::nyc();
        let events = catalogue.resolve("nyc_subway_station_events").unwrap();
        assert!(events.geometry_column.is_none());
        assert_eq!(events.geometry_columns().count(), 0);
    }
}
