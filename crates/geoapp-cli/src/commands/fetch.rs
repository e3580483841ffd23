//! Fetch command implementation

use crate::cli::{FetchArgs, StorageBackend};
use crate::output::OutputWriter;
use crate::storage::Storage;
use anyhow::Result;
use geoapp_core::catalogue::FeatureCatalogue;
use geoapp_core::config::{CliConfigOverrides, QueryConfig};
use geoapp_query::FeatureQueryEngine;
use std::sync::Arc;

pub async fn execute(
    args: FetchArgs,
    mut config: QueryConfig,
    backend: StorageBackend,
    output: &OutputWriter,
) -> Result<()> {
    config.update_from_cli(CliConfigOverrides {
        target_srid: args.srid,
        precision: args.precision,
        radius_meters: None,
    });

    let storage = Storage::new(backend).await?;
    let engine = FeatureQueryEngine::new(Arc::new(FeatureCatalogue::nyc()), storage.features);

    let collection = engine.fetch(&args.table, args.filters, config.fetch_options()).await?;

    output.document(&collection)
}
