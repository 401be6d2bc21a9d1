// Helpers for building small on-disk indexes in unit tests
use std::path::Path;

use crate::engine::AnalyzerProfile;
use crate::indexing::{write_index, NoteDocument};

/// Writer budget large enough for tantivy's per-thread minimum.
pub const TEST_WRITER_HEAP_BYTES: usize = 20_000_000;

/// Builds an index at `location` from `(path, contents)` pairs.
pub fn build_index(location: &Path, analyzer: AnalyzerProfile, notes: &[(&str, &str)]) {
    let documents = notes
        .iter()
        .map(|(path, contents)| NoteDocument::from_text(*path, *contents));
    write_index(location, analyzer, TEST_WRITER_HEAP_BYTES, documents).expect("failed to build test index");
}
