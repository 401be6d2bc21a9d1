use anyhow::{Context, Result};
use clap::Args;

use crate::cli::formatters::print_search_results;
use crate::config::AppConfig;
use crate::search::QueryExecutor;

#[derive(Args, Debug)]
pub struct QueryArgs {
    /// The search query, in the index's query syntax (e.g. `beta AND gamma`, `"exact phrase"`, `#tag`)
    #[arg(required = true)]
    pub query: String,

    /// Maximum number of results to return (overrides `result_limit` from config)
    #[arg(short, long)]
    pub limit: Option<usize>,

    /// Print results as JSON instead of one path per line
    #[arg(long)]
    pub json: bool,
}

/// Handles the `search` command.
pub fn handle_query(args: &QueryArgs, mut config: AppConfig) -> Result<()> {
    if let Some(limit) = args.limit {
        config.result_limit = limit;
    }
    log::info!("Searching for \"{}\" (limit {})", args.query, config.result_limit);

    let executor = QueryExecutor::from_config(&config).context("Failed to set up search")?;
    let results = executor.search(&args.query)?;
    log::info!("Query returned {} results", results.len());

    print_search_results(&args.query, &results, args.json).context("Failed to write search results")?;
    Ok(())
}
