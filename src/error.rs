use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type for note-searcher operations
pub type Result<T> = std::result::Result<T, NoteSearchError>;

/// Errors that can occur while searching or indexing notes
#[derive(Error, Debug)]
pub enum NoteSearchError {
    /// The index location is missing, unreadable or corrupt.
    #[error("Failed to access index at {path}: {reason}")]
    IndexAccess {
        path: PathBuf,
        reason: String,
    },

    /// The query string does not conform to the query grammar.
    #[error("Failed to parse query '{query}': {reason}")]
    QueryParse {
        query: String,
        reason: String,
    },

    /// The index was built with a different analyzer than the one configured.
    #[error("Field '{field}' was indexed with analyzer '{index}' but '{configured}' is configured")]
    AnalyzerMismatch {
        field: String,
        index: String,
        configured: String,
    },

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Indexing error: {0}")]
    Indexing(String),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

impl NoteSearchError {
    /// Builds an [`NoteSearchError::IndexAccess`] from any engine error.
    pub fn index_access(path: impl Into<PathBuf>, err: impl std::fmt::Display) -> Self {
        NoteSearchError::IndexAccess {
            path: path.into(),
            reason: err.to_string(),
        }
    }

    /// Builds an [`NoteSearchError::QueryParse`] from any engine error.
    pub fn query_parse(query: &str, err: impl std::fmt::Display) -> Self {
        NoteSearchError::QueryParse {
            query: query.to_string(),
            reason: err.to_string(),
        }
    }

    /// True when the index could not be opened or read.
    pub fn is_index_access(&self) -> bool {
        matches!(self, NoteSearchError::IndexAccess { .. })
    }

    /// True when the query string was rejected by the parser.
    pub fn is_query_parse(&self) -> bool {
        matches!(self, NoteSearchError::QueryParse { .. })
    }
}
