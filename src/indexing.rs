//! Builds the note index from a directory of text files.

use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, info, warn};
use tantivy::schema::Schema;
use tantivy::{doc, Index, IndexWriter, TantivyDocument};
use walkdir::WalkDir;

use crate::config::AppConfig;
use crate::constants::{FIELD_CONTENTS, FIELD_PATH, FIELD_TAGS};
use crate::engine::analyzer::register_analyzers;
use crate::engine::tantivy_engine::build_schema;
use crate::engine::AnalyzerProfile;
use crate::error::{NoteSearchError, Result};
use crate::tags::extract_tags;

/// One note as written to the index.
#[derive(Debug, Clone, PartialEq)]
pub struct NoteDocument {
    /// Path reported back by searches.
    pub path: String,
    /// Full text of the note.
    pub contents: String,
    /// `#tags` found in the note, without the `#`.
    pub tags: Vec<String>,
}

impl NoteDocument {
    /// Builds a document from a note's text, extracting its tags.
    pub fn from_text(path: impl Into<String>, contents: impl Into<String>) -> Self {
        let contents = contents.into();
        let tags = extract_tags(&contents);
        Self {
            path: path.into(),
            contents,
            tags,
        }
    }
}

/// A note file read from disk.
#[derive(Debug, Clone, PartialEq)]
pub struct NoteFile {
    pub path: PathBuf,
    pub text: String,
}

/// Note files found under a directory, in walk order.
#[derive(Debug, Default)]
pub struct NoteScan {
    pub notes: Vec<NoteFile>,
    /// Matching files that could not be read as UTF-8 text.
    pub skipped: usize,
}

/// Outcome of an indexing run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct IndexStats {
    /// Files written to the index.
    pub indexed: usize,
    /// Matching files that could not be read as UTF-8 text.
    pub skipped: usize,
}

fn indexing_err(err: impl std::fmt::Display) -> NoteSearchError {
    NoteSearchError::Indexing(err.to_string())
}

fn has_indexed_extension(path: &Path, extensions: &[String]) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| extensions.iter().any(|wanted| wanted.eq_ignore_ascii_case(ext)))
        .unwrap_or(false)
}

/// Opens the index at `location` for rebuilding, creating it if absent.
///
/// An existing index must carry the note schema with the same analyzer;
/// anything else is reported rather than silently overwritten.
fn open_or_create(location: &Path, analyzer: AnalyzerProfile) -> Result<Index> {
    fs::create_dir_all(location)?;
    let schema = build_schema(analyzer);

    let index = if location.join("meta.json").exists() {
        let existing = Index::open_in_dir(location).map_err(|e| NoteSearchError::index_access(location, e))?;
        ensure_same_schema(&existing.schema(), &schema)?;
        existing
    } else {
        info!("Creating new index at {}", location.display());
        Index::create_in_dir(location, schema).map_err(|e| NoteSearchError::index_access(location, e))?
    };
    register_analyzers(&index);
    Ok(index)
}

fn ensure_same_schema(existing: &Schema, wanted: &Schema) -> Result<()> {
    for field_name in [FIELD_PATH, FIELD_CONTENTS, FIELD_TAGS] {
        let existing_entry = existing
            .get_field(field_name)
            .map(|field| existing.get_field_entry(field));
        let wanted_entry = wanted.get_field(field_name).map(|field| wanted.get_field_entry(field));
        match (existing_entry, wanted_entry) {
            (Ok(a), Ok(b)) if a == b => {}
            _ => {
                return Err(NoteSearchError::Indexing(format!(
                    "Existing index has an incompatible '{}' field; remove it or pick another index_path",
                    field_name
                )))
            }
        }
    }
    Ok(())
}

/// Replaces the contents of the index at `location` with `documents`, in a
/// single commit. Returns the number of documents written.
pub fn write_index<I>(location: &Path, analyzer: AnalyzerProfile, writer_heap_bytes: usize, documents: I) -> Result<usize>
where
    I: IntoIterator<Item = NoteDocument>,
{
    let index = open_or_create(location, analyzer)?;
    let schema = index.schema();
    let field = |name: &str| schema.get_field(name).map_err(indexing_err);
    let path_field = field(FIELD_PATH)?;
    let contents_field = field(FIELD_CONTENTS)?;
    let tags_field = field(FIELD_TAGS)?;

    // One thread keeps documents in insertion order, which the tag list relies on
    let mut writer: IndexWriter<TantivyDocument> =
        index.writer_with_num_threads(1, writer_heap_bytes).map_err(indexing_err)?;
    writer.delete_all_documents().map_err(indexing_err)?;

    let mut written = 0;
    for note in documents {
        debug!("Adding {} ({} tags)", note.path, note.tags.len());
        writer
            .add_document(doc!(
                path_field => note.path,
                contents_field => note.contents,
                tags_field => note.tags.join(" "),
            ))
            .map_err(indexing_err)?;
        written += 1;
    }

    writer.commit().map_err(indexing_err)?;
    writer.wait_merging_threads().map_err(indexing_err)?;
    Ok(written)
}

/// Reads every file under `dir` whose extension is in `extensions`, sorted by
/// file name within each directory. Symlinks are followed.
pub fn collect_notes(dir: &Path, extensions: &[String]) -> Result<NoteScan> {
    if !dir.is_dir() {
        return Err(NoteSearchError::Indexing(format!("{} is not a directory", dir.display())));
    }

    let mut scan = NoteScan::default();
    for entry in WalkDir::new(dir).follow_links(true).sort_by_file_name() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!("Skipping unreadable directory entry: {}", e);
                continue;
            }
        };
        if !entry.file_type().is_file() || !has_indexed_extension(entry.path(), extensions) {
            continue;
        }

        match fs::read_to_string(entry.path()) {
            Ok(text) => scan.notes.push(NoteFile {
                path: entry.path().to_path_buf(),
                text,
            }),
            Err(e) => {
                warn!("Skipping {}: {}", entry.path().display(), e);
                scan.skipped += 1;
            }
        }
    }
    Ok(scan)
}

/// Indexes every note under `dir` whose extension is listed in the config.
/// The index at the configured location is rebuilt from scratch.
pub fn index_directory(config: &AppConfig, dir: &Path) -> Result<IndexStats> {
    let scan = collect_notes(dir, &config.indexing.extensions)?;
    let location = config.index_location()?;
    info!("Indexing {} into {}", dir.display(), location.display());

    let documents = scan
        .notes
        .into_iter()
        .map(|note| NoteDocument::from_text(note.path.to_string_lossy(), note.text));
    let stats = IndexStats {
        indexed: write_index(&location, config.analyzer, config.indexing.writer_heap_bytes, documents)?,
        skipped: scan.skipped,
    };
    info!("Indexed {} notes ({} skipped)", stats.indexed, stats.skipped);
    Ok(stats)
}
