use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::config::{load_config, save_config, AppConfig};
use super::dead_links::{handle_dead_links, DeadLinksArgs};
use super::index::{handle_index, IndexArgs};
use super::query::{handle_query, QueryArgs};
use super::tags::{handle_tags, TagsArgs};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to the configuration file (defaults to the platform config directory)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Directory of the search index (overrides `index_path` from config)
    #[arg(long = "index-dir", global = true)]
    pub index_dir: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Search the index and print the matching note paths, best match first
    Search(QueryArgs),
    /// Build (or rebuild) the index from a directory of notes
    Index(IndexArgs),
    /// List every tag in the index, in the order notes were indexed
    Tags(TagsArgs),
    /// Report markdown links between notes whose target file is missing
    DeadLinks(DeadLinksArgs),
    /// Write a default configuration file
    Init,
}

/// Writes the default configuration (with any `--index-dir` override) and
/// prints where it went.
pub fn execute_init_command(args: &CliArgs) -> Result<()> {
    let mut config = AppConfig::default();
    apply_overrides(args, &mut config);
    let path = save_config(&config, args.config.as_ref())?;
    println!("Wrote default configuration to {}", path.display());
    Ok(())
}

/// Applies command-line overrides on top of the loaded configuration.
pub fn apply_overrides(args: &CliArgs, config: &mut AppConfig) {
    if let Some(index_dir) = &args.index_dir {
        config.index_path = Some(index_dir.to_string_lossy().into_owned());
    }
}

/// Loads the configuration file and applies command-line overrides.
fn effective_config(args: &CliArgs) -> Result<AppConfig> {
    let mut config = load_config(args.config.as_ref()).context("Failed to load configuration")?;
    apply_overrides(args, &mut config);
    Ok(config)
}

/// Runs a parsed command. `init` writes a fresh config, so it never loads the
/// existing one.
pub fn handle_command(args: CliArgs) -> Result<()> {
    match &args.command {
        Commands::Init => execute_init_command(&args),
        Commands::Search(query_args) => handle_query(query_args, effective_config(&args)?),
        Commands::Index(index_args) => handle_index(index_args, &effective_config(&args)?),
        Commands::Tags(tags_args) => handle_tags(tags_args, &effective_config(&args)?),
        Commands::DeadLinks(dead_links_args) => handle_dead_links(dead_links_args, &effective_config(&args)?),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        CliArgs::command().debug_assert();
    }

    #[test]
    fn test_parse_search() {
        let args = CliArgs::parse_from(["note-searcher", "search", "beta AND gamma", "--limit", "3", "--json"]);
        match args.command {
            Commands::Search(query) => {
                assert_eq!(query.query, "beta AND gamma");
                assert_eq!(query.limit, Some(3));
                assert!(query.json);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_index_dir_override() {
        let args = CliArgs::parse_from(["note-searcher", "--index-dir", "/tmp/idx", "index", "/notes"]);
        let mut config = AppConfig::default();
        apply_overrides(&args, &mut config);
        assert_eq!(config.index_path.as_deref(), Some("/tmp/idx"));
        match args.command {
            Commands::Index(index) => assert_eq!(index.dir, PathBuf::from("/notes")),
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_parse_tags_and_dead_links() {
        let args = CliArgs::parse_from(["note-searcher", "tags", "--json"]);
        assert!(matches!(args.command, Commands::Tags(TagsArgs { json: true })));

        let args = CliArgs::parse_from(["note-searcher", "dead-links", "/notes"]);
        match args.command {
            Commands::DeadLinks(dead) => {
                assert_eq!(dead.dir, PathBuf::from("/notes"));
                assert!(!dead.json);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_search_requires_query() {
        assert!(CliArgs::try_parse_from(["note-searcher", "search"]).is_err());
    }
}
