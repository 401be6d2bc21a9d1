//! Text analyzers shared by the indexer and the query executor.
//!
//! The tokenizer name chosen for a field is persisted in the tantivy schema,
//! so the same names must be registered whenever an index is opened.

use std::fmt;

use serde::{Deserialize, Serialize};
use tantivy::tokenizer::{LowerCaser, RemoveLongFilter, SimpleTokenizer, TextAnalyzer, WhitespaceTokenizer};
use tantivy::Index;

use crate::constants::MAX_TOKEN_LENGTH;

/// Tokenization rules applied to note text at build time and query time.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum AnalyzerProfile {
    /// Split on any non-alphanumeric character, then lowercase.
    #[default]
    Standard,
    /// Split on whitespace only, so hyphenated words stay whole, then lowercase.
    Whitespace,
}

impl AnalyzerProfile {
    /// Name under which this profile is registered with tantivy.
    pub fn tokenizer_name(self) -> &'static str {
        match self {
            AnalyzerProfile::Standard => "note_standard",
            AnalyzerProfile::Whitespace => "note_whitespace",
        }
    }

    /// Maps a tokenizer name found in an index schema back to a profile.
    pub fn from_tokenizer_name(name: &str) -> Option<Self> {
        match name {
            "note_standard" => Some(AnalyzerProfile::Standard),
            "note_whitespace" => Some(AnalyzerProfile::Whitespace),
            _ => None,
        }
    }

    fn build(self) -> TextAnalyzer {
        match self {
            AnalyzerProfile::Standard => TextAnalyzer::builder(SimpleTokenizer::default())
                .filter(RemoveLongFilter::limit(MAX_TOKEN_LENGTH))
                .filter(LowerCaser)
                .build(),
            AnalyzerProfile::Whitespace => TextAnalyzer::builder(WhitespaceTokenizer::default())
                .filter(RemoveLongFilter::limit(MAX_TOKEN_LENGTH))
                .filter(LowerCaser)
                .build(),
        }
    }
}

impl fmt::Display for AnalyzerProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnalyzerProfile::Standard => write!(f, "standard"),
            AnalyzerProfile::Whitespace => write!(f, "whitespace"),
        }
    }
}

/// Registers every profile on the index. Tags always use the whitespace profile,
/// so both must be available regardless of the configured one.
pub fn register_analyzers(index: &Index) {
    for profile in [AnalyzerProfile::Standard, AnalyzerProfile::Whitespace] {
        index
            .tokenizers()
            .register(profile.tokenizer_name(), profile.build());
    }
}
