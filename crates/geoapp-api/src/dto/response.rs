use geoapp_core::catalogue::{Column, TableDescriptor};
use serde::Serialize;

/// Catalogue table listing entry
#[derive(Debug, Serialize)]
pub struct TableInfo {
    pub name: &'static str,
    pub primary_key: &'static str,
    pub geometry_column: Option<&'static str>,
    pub srid: i32,
    pub columns: Vec<Column>,
}

impl From<&TableDescriptor> for TableInfo {
    fn from(table: &TableDescriptor) -> Self {
        Self {
            name: table.name,
            primary_key: table.primary_key,
            geometry_column: table.geometry_column,
            srid: table.srid,
            columns: table.columns.to_vec(),
        }
    }
}

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub backend: &'static str,
}

impl HealthResponse {
    pub fn ok(backend: &'static str) -> Self {
        Self { status: "ok", service: "geoapp-api", backend }
    }
}
