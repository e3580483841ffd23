//! Command implementations

mod analyze;
mod config;
mod fetch;
mod tables;

use crate::cli::{Cli, Commands};
use crate::output::OutputWriter;
use anyhow::{Context, Result};
use geoapp_core::config::QueryConfig;
use std::path::Path;

/// Execute a CLI command
pub async fn execute(cli: Cli) -> Result<()> {
    let output = OutputWriter::new(cli.json);
    let query_config = load_query_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Tables => tables::execute(&output),
        Commands::Fetch(args) => fetch::execute(args, query_config, cli.storage, &output).await,
        Commands::Analyze(args) => {
            analyze::execute(args, query_config, cli.storage, &output).await
        }
        Commands::Config => config::execute(&query_config, &output),
    }
}

/// Query defaults from the optional file, then the environment
fn load_query_config(path: Option<&Path>) -> Result<QueryConfig> {
    let mut config = QueryConfig::with_defaults();
    if let Some(path) = path {
        config = config
            .load_from_file(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?;
    }
    Ok(config.load_from_env())
}
