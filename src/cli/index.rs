use anyhow::{Context, Result};
use clap::Args;
use colored::*;
use std::path::PathBuf;

use crate::config::AppConfig;
use crate::indexing::index_directory;

#[derive(Args, Debug)]
pub struct IndexArgs {
    /// Directory containing the notes to index
    #[arg(required = true)]
    pub dir: PathBuf,
}

/// Handles the `index` command. Rebuilds the configured index from `args.dir`.
pub fn handle_index(args: &IndexArgs, config: &AppConfig) -> Result<()> {
    config.validate()?;
    let location = config.index_location()?;

    let stats = index_directory(config, &args.dir)
        .with_context(|| format!("Failed to index {}", args.dir.display()))?;

    if stats.skipped > 0 {
        eprintln!(
            "{}",
            format!("Skipped {} files that could not be read as text", stats.skipped).yellow()
        );
    }
    println!(
        "Indexed {} notes from {} into {}",
        stats.indexed,
        args.dir.display(),
        location.display()
    );
    Ok(())
}
