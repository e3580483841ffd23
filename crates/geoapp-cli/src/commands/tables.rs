//! Tables command implementation

use crate::output::OutputWriter;
use anyhow::Result;
use geoapp_core::catalogue::FeatureCatalogue;
use serde::Serialize;
use tabled::Tabled;

#[derive(Debug, Serialize, Tabled)]
struct TableRow {
    #[tabled(rename = "Table")]
    name: &'static str,
    #[tabled(rename = "Key")]
    primary_key: &'static str,
    #[tabled(rename = "Geometry")]
    geometry: String,
    #[tabled(rename = "Columns")]
    columns: String,
}

pub fn execute(output: &OutputWriter) -> Result<()> {
    let catalogue = FeatureCatalogue::nyc();

    let rows: Vec<TableRow> = catalogue
        .list()
        .map(|table| TableRow {
            name: table.name,
            primary_key: table.primary_key,
            geometry: table
                .geometry_column
                .map(|column| format!("{} (EPSG:{})", column, table.srid))
                .unwrap_or_else(|| "-".to_string()),
            columns: table.columns.iter().map(|c| c.name).collect::<Vec<_>>().join(", "),
        })
        .collect();

    output.table(rows)
}
