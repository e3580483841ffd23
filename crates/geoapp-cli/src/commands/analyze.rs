//! Analyze command implementation

use crate::cli::{AnalyzeArgs, StorageBackend};
use crate::output::OutputWriter;
use crate::storage::Storage;
use anyhow::Result;
use geoapp_core::config::{CliConfigOverrides, QueryConfig};
use geoapp_query::SpatialPointAnalyzer;

pub async fn execute(
    args: AnalyzeArgs,
    mut config: QueryConfig,
    backend: StorageBackend,
    output: &OutputWriter,
) -> Result<()> {
    config.update_from_cli(CliConfigOverrides {
        target_srid: None,
        precision: None,
        radius_meters: args.radius,
    });
    let options = config.analyze_options();

    let storage = Storage::new(backend).await?;
    let analyzer = SpatialPointAnalyzer::with_options(storage.analysis, options);

    let result = analyzer.analyze_raw(Some(&args.x), Some(&args.y)).await?;

    if output.is_json() {
        return output.document(&result);
    }

    output.section("Neighborhoods");
    if result.neighborhoods.is_empty() {
        output.note("No neighborhood contains this point");
    }
    for neighborhood in &result.neighborhoods {
        output.kv(
            neighborhood.neighborhood_gid,
            format!(
                "{} ({})",
                neighborhood.name.as_deref().unwrap_or("unnamed"),
                neighborhood.boroname.as_deref().unwrap_or("unknown borough")
            ),
        );
    }

    output.section(format!("Homicides within {} m", options.radius_meters));
    output.kv("Count", result.number_of_homicides);

    output.section("Nearest subway station");
    match &result.subway {
        Some(station) => {
            output.kv("Station", station.name.as_deref().unwrap_or("unnamed"));
            output.kv("Gid", station.subway_gid);
            output.kv("Distance", format!("{:.2} m", station.subway_distance));
        }
        None => output.note("No stations loaded"),
    }

    Ok(())
}
