// Tantivy-backed implementation of the index engine traits.
use std::path::PathBuf;

use log::debug;
use tantivy::collector::TopDocs;
use tantivy::query::QueryParser;
use tantivy::schema::{
    Field, FieldType, IndexRecordOption, OwnedValue, Schema, TextFieldIndexing, TextOptions, STORED, STRING,
};
use tantivy::{DocAddress, Index, IndexReader, ReloadPolicy, Searcher, TantivyDocument};

use super::analyzer::{register_analyzers, AnalyzerProfile};
use super::{DocRef, Hit, IndexEngine, IndexSession};
use crate::config::AppConfig;
use crate::constants::{FIELD_CONTENTS, FIELD_PATH, FIELD_TAGS};
use crate::error::{NoteSearchError, Result};

/// Builds the note index schema. `contents` uses the given analyzer, `tags`
/// always uses the whitespace analyzer and is stored so the tag list can be
/// read back.
pub fn build_schema(analyzer: AnalyzerProfile) -> Schema {
    let mut schema_builder = Schema::builder();
    let text_with = |profile: AnalyzerProfile| {
        TextOptions::default().set_indexing_options(
            TextFieldIndexing::default()
                .set_tokenizer(profile.tokenizer_name())
                .set_index_option(IndexRecordOption::WithFreqsAndPositions),
        )
    };

    schema_builder.add_text_field(FIELD_PATH, STRING | STORED);
    schema_builder.add_text_field(FIELD_CONTENTS, text_with(analyzer));
    schema_builder.add_text_field(FIELD_TAGS, text_with(AnalyzerProfile::Whitespace).set_stored());
    schema_builder.build()
}

/// Opens sessions over an on-disk tantivy index.
#[derive(Debug, Clone)]
pub struct TantivyEngine {
    location: PathBuf,
    default_field: String,
    analyzer: AnalyzerProfile,
}

impl TantivyEngine {
    pub fn new(location: impl Into<PathBuf>, default_field: impl Into<String>, analyzer: AnalyzerProfile) -> Self {
        Self {
            location: location.into(),
            default_field: default_field.into(),
            analyzer,
        }
    }

    /// Engine for the index location, default field and analyzer in `config`.
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        Ok(Self::new(config.index_location()?, config.default_field.clone(), config.analyzer))
    }

    fn resolve_default_field(&self, schema: &Schema) -> Result<Field> {
        let field = schema.get_field(&self.default_field).map_err(|_| {
            NoteSearchError::Configuration(format!(
                "Index at {} has no field '{}'",
                self.location.display(),
                self.default_field
            ))
        })?;

        let indexing = match schema.get_field_entry(field).field_type() {
            FieldType::Str(options) => options.get_indexing_options(),
            _ => None,
        };
        let indexing = indexing.ok_or_else(|| {
            NoteSearchError::Configuration(format!("Field '{}' is not an indexed text field", self.default_field))
        })?;

        let index_tokenizer = indexing.tokenizer();
        if index_tokenizer != self.analyzer.tokenizer_name() {
            let index = AnalyzerProfile::from_tokenizer_name(index_tokenizer)
                .map(|p| p.to_string())
                .unwrap_or_else(|| index_tokenizer.to_string());
            return Err(NoteSearchError::AnalyzerMismatch {
                field: self.default_field.clone(),
                index,
                configured: self.analyzer.to_string(),
            });
        }
        Ok(field)
    }
}

impl IndexEngine for TantivyEngine {
    fn open(&self) -> Result<Box<dyn IndexSession>> {
        debug!("Opening index at {}", self.location.display());
        let index = Index::open_in_dir(&self.location)
            .map_err(|e| NoteSearchError::index_access(&self.location, e))?;
        register_analyzers(&index);

        let schema = index.schema();
        let stored_field = |name: &str| {
            schema
                .get_field(name)
                .map_err(|_| NoteSearchError::index_access(&self.location, format!("schema has no '{}' field", name)))
        };
        let path_field = stored_field(FIELD_PATH)?;
        let tags_field = stored_field(FIELD_TAGS)?;
        let default_field = self.resolve_default_field(&schema)?;

        let reader: IndexReader = index
            .reader_builder()
            .reload_policy(ReloadPolicy::Manual)
            .try_into()
            .map_err(|e| NoteSearchError::index_access(&self.location, e))?;
        let searcher = reader.searcher();
        debug!("Index has {} documents", searcher.num_docs());

        let parser = QueryParser::for_index(&index, vec![default_field]);

        Ok(Box::new(TantivySession {
            location: self.location.clone(),
            searcher,
            parser,
            path_field,
            tags_field,
        }))
    }
}

/// A searcher and query parser over one snapshot of the index.
pub struct TantivySession {
    location: PathBuf,
    searcher: Searcher,
    parser: QueryParser,
    path_field: Field,
    tags_field: Field,
}

impl IndexSession for TantivySession {
    fn search(&self, query: &str, limit: usize) -> Result<Vec<Hit>> {
        let parsed = self
            .parser
            .parse_query(query)
            .map_err(|e| NoteSearchError::query_parse(query, e))?;
        debug!("Parsed query {:?}", parsed);

        // TopDocs preallocates `limit` slots and panics on zero
        let num_docs = usize::try_from(self.searcher.num_docs()).unwrap_or(usize::MAX);
        let limit = limit.min(num_docs);
        if limit == 0 {
            return Ok(Vec::new());
        }

        let top_docs = self
            .searcher
            .search(&*parsed, &TopDocs::with_limit(limit))
            .map_err(|e| NoteSearchError::index_access(&self.location, e))?;

        Ok(top_docs
            .into_iter()
            .map(|(score, address)| Hit {
                score,
                doc: DocRef {
                    segment: address.segment_ord,
                    doc: address.doc_id,
                },
            })
            .collect())
    }

    fn stored_path(&self, hit: &Hit) -> Result<String> {
        let address = DocAddress::new(hit.doc.segment, hit.doc.doc);
        let document: TantivyDocument = self
            .searcher
            .doc(address)
            .map_err(|e| NoteSearchError::index_access(&self.location, e))?;

        match document.get_first(self.path_field) {
            Some(OwnedValue::Str(path)) => Ok(path.clone()),
            _ => Err(NoteSearchError::index_access(
                &self.location,
                format!("document {:?} has no stored '{}'", address, FIELD_PATH),
            )),
        }
    }

    fn all_tags(&self) -> Result<Vec<String>> {
        let mut tags: Vec<String> = Vec::new();
        for (segment_ord, segment_reader) in self.searcher.segment_readers().iter().enumerate() {
            for doc_id in segment_reader.doc_ids_alive() {
                let address = DocAddress::new(segment_ord as u32, doc_id);
                let document: TantivyDocument = self
                    .searcher
                    .doc(address)
                    .map_err(|e| NoteSearchError::index_access(&self.location, e))?;
                if let Some(OwnedValue::Str(joined)) = document.get_first(self.tags_field) {
                    for tag in joined.split_whitespace() {
                        if !tags.iter().any(|t| t == tag) {
                            tags.push(tag.to_string());
                        }
                    }
                }
            }
        }
        debug!("Index holds {} distinct tags", tags.len());
        Ok(tags)
    }
}
