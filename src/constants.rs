// Constants shared between the indexer and the query executor

// Fields of the note index schema
/// The stored field holding a note's file path.
pub const FIELD_PATH: &str = "path";
/// The full-text field holding a note's body. Default search field.
pub const FIELD_CONTENTS: &str = "contents";
/// The field holding `#tags` extracted from a note.
pub const FIELD_TAGS: &str = "tags";

// Defaults, overridable via config.toml
// See crate::config::AppConfig for the configuration options

/// Default maximum number of results returned per query.
pub const DEFAULT_RESULT_LIMIT: usize = 10;
/// Default memory budget handed to the index writer.
pub const DEFAULT_WRITER_HEAP_BYTES: usize = 50_000_000;
/// Tokens longer than this (in bytes) are dropped by the analyzers.
pub const MAX_TOKEN_LENGTH: usize = 40;
/// File extensions picked up by the indexer when none are configured.
pub const DEFAULT_EXTENSIONS: &[&str] = &["md", "txt", "log"];
