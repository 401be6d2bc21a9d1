//! `note_searcher` is the library behind the `note-searcher` command-line tool.
//!
//! It answers free-text queries over a pre-built full-text index of notes:
//! - Configuration management (`config`)
//! - The index engine boundary and its tantivy implementation (`engine`)
//! - Query execution (`search`)
//! - Building the index from a directory of notes (`indexing`, `tags`)
//! - Finding links to missing notes (`links`)
//! - The command-line interface and result reporting (`cli`)
//! - Error handling (`error`)
//!
//! ## Usage
//!
//! ```no_run
//! use note_searcher::{AppConfig, QueryExecutor};
//!
//! let config = AppConfig {
//!     index_path: Some("/path/to/index".to_string()),
//!     ..AppConfig::default()
//! };
//! let executor = QueryExecutor::from_config(&config)?;
//! for result in executor.search("beta AND gamma")? {
//!     println!("{}", result.path);
//! }
//! # Ok::<(), note_searcher::NoteSearchError>(())
//! ```

/// Configuration management for the application.
pub mod config;
/// Shared constants: schema field names and defaults.
pub mod constants;
/// Defines the core error types and Result alias.
pub mod error;
/// The index engine traits and the tantivy-backed implementation.
pub mod engine;
/// Query execution against the index.
pub mod search;
/// Building the index from a directory of notes.
pub mod indexing;
/// `#tag` extraction and query rewriting.
pub mod tags;
/// Dead-link detection between notes.
pub mod links;
/// Command-line interface: argument parsing, command handlers, formatters.
pub mod cli;

#[cfg(test)]
/// Utilities specific to testing within the library.
pub mod test_utils;

pub use config::{load_config, save_config, get_config_path_or_default, AppConfig, IndexingConfig};
pub use engine::{AnalyzerProfile, DocRef, Hit, IndexEngine, IndexSession, TantivyEngine};
pub use error::{NoteSearchError, Result};
pub use indexing::{collect_notes, index_directory, write_index, IndexStats, NoteDocument, NoteFile, NoteScan};
pub use links::{dead_links_in_directory, find_dead_links, DeadLink};
pub use search::{QueryExecutor, SearchResult};
pub use cli::formatters::{print_search_results, write_dead_links, write_search_results, write_tags};
