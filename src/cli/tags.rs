use anyhow::{Context, Result};
use clap::Args;
use std::io::{self, Write};

use crate::cli::formatters::write_tags;
use crate::config::AppConfig;
use crate::engine::{IndexEngine, TantivyEngine};

#[derive(Args, Debug)]
pub struct TagsArgs {
    /// Print tags as a JSON array
    #[arg(long)]
    pub json: bool,
}

/// Handles the `tags` command: lists every tag in the index once.
pub fn handle_tags(args: &TagsArgs, config: &AppConfig) -> Result<()> {
    config.validate()?;
    let engine = TantivyEngine::from_config(config)?;
    let tags = engine.open()?.all_tags()?;
    log::info!("Index holds {} tags", tags.len());

    let stdout = io::stdout();
    let mut handle = stdout.lock();
    write_tags(&mut handle, &tags, args.json).context("Failed to write tags")?;
    handle.flush()?;
    Ok(())
}
