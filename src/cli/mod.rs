//! This module defines the command-line interface structure and handlers.

pub mod commands;
pub mod formatters;

// Command handlers
pub mod dead_links;
pub mod index;
pub mod query;
pub mod tags;

// Re-export the main handler and the command enum
pub use commands::{handle_command, CliArgs, Commands};

// Re-export the Args structs for use in the main binary
pub use dead_links::DeadLinksArgs;
pub use index::IndexArgs;
pub use query::QueryArgs;
pub use tags::TagsArgs;
