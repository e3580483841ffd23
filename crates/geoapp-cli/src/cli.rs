use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// geoapp - Geospatial feature queries and point analytics
#[derive(Parser, Debug)]
#[command(name = "geoapp")]
#[command(about = "Geospatial feature queries and point analytics", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Output results in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Storage backend to use (postgres or memory)
    #[arg(long, global = true, default_value = "postgres")]
    pub storage: StorageBackend,

    /// TOML file with query defaults
    #[arg(long, global = true, env = "GEOAPP_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Storage backend selection
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum StorageBackend {
    /// PostGIS database from DATABASE_URL (default)
    Postgres,
    /// Empty in-memory storage, for checking requests without a database
    Memory,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List the feature tables and their columns
    Tables,

    /// Fetch the features of a table as GeoJSON
    Fetch(FetchArgs),

    /// Analyze a point: neighborhoods, nearby homicides, nearest station
    Analyze(AnalyzeArgs),

    /// Show the resolved query configuration and where each value comes from
    Config,
}

#[derive(Parser, Debug)]
pub struct FetchArgs {
    /// Feature table identifier (e.g. nyc_subway_stations)
    pub table: String,

    /// Equality filter as column=value (repeatable, AND-ed)
    #[arg(short, long = "filter", value_parser = parse_filter)]
    pub filters: Vec<(String, String)>,

    /// Target SRID for the output geometry
    #[arg(long)]
    pub srid: Option<i32>,

    /// Decimal digits kept in coordinates
    #[arg(long)]
    pub precision: Option<u32>,
}

#[derive(Parser, Debug)]
pub struct AnalyzeArgs {
    /// X coordinate in the source SRID
    #[arg(allow_negative_numbers = true)]
    pub x: String,

    /// Y coordinate in the source SRID
    #[arg(allow_negative_numbers = true)]
    pub y: String,

    /// Search radius for the homicide count, in meters
    #[arg(long)]
    pub radius: Option<f64>,
}

/// Parse a `column=value` pair
fn parse_filter(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key.to_string(), value.to_string())),
        _ => Err(format!("expected column=value, got '{}'", raw)),
    }
}
