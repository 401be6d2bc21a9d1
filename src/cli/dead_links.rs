use anyhow::{Context, Result};
use clap::Args;
use std::io::{self, Write};
use std::path::PathBuf;

use crate::cli::formatters::write_dead_links;
use crate::config::AppConfig;
use crate::links::dead_links_in_directory;

#[derive(Args, Debug)]
pub struct DeadLinksArgs {
    /// Directory containing the notes to check
    #[arg(required = true)]
    pub dir: PathBuf,

    /// Print dead links as JSON
    #[arg(long)]
    pub json: bool,
}

/// Handles the `dead-links` command. Reading the notes does not need an index.
pub fn handle_dead_links(args: &DeadLinksArgs, config: &AppConfig) -> Result<()> {
    config.validate()?;
    let dead = dead_links_in_directory(config, &args.dir)
        .with_context(|| format!("Failed to check links in {}", args.dir.display()))?;

    let stdout = io::stdout();
    let mut handle = stdout.lock();
    write_dead_links(&mut handle, &args.dir.display().to_string(), &dead, args.json)
        .context("Failed to write dead links")?;
    handle.flush()?;
    Ok(())
}
