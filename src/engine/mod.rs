//! Interface to the full-text index engine.
//!
//! The query executor only talks to [`IndexEngine`] and [`IndexSession`];
//! [`TantivyEngine`] is the concrete implementation backed by an on-disk
//! tantivy index.

pub mod analyzer;
pub mod tantivy_engine;

pub use analyzer::AnalyzerProfile;
pub use tantivy_engine::{TantivyEngine, TantivySession};

use crate::error::Result;

/// Engine-neutral reference to a matched document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DocRef {
    /// Segment (or shard) the document lives in.
    pub segment: u32,
    /// Document id within that segment.
    pub doc: u32,
}

/// One raw match returned by the engine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hit {
    /// Relevance score as computed by the engine (higher is more relevant).
    pub score: f32,
    /// Where to find the document's stored fields.
    pub doc: DocRef,
}

/// Opens read-only sessions over a pre-built index.
#[cfg_attr(test, mockall::automock)]
pub trait IndexEngine {
    /// Opens a fresh session. Every resource it holds is released when the
    /// returned session is dropped.
    fn open(&self) -> Result<Box<dyn IndexSession>>;
}

/// A reader, searcher and query parser scoped to a single query.
#[cfg_attr(test, mockall::automock)]
pub trait IndexSession {
    /// Parses `query` against the default field and returns at most `limit`
    /// hits in descending relevance order.
    fn search(&self, query: &str, limit: usize) -> Result<Vec<Hit>>;

    /// Reads the stored path of a hit's document.
    fn stored_path(&self, hit: &Hit) -> Result<String>;

    /// Every distinct tag in the index, in the order the notes were indexed.
    fn all_tags(&self) -> Result<Vec<String>>;
}
