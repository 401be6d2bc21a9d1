use serde::{Deserialize, Serialize};

/// One matched note, as surfaced to the caller.
///
/// Its rank is its position in the result list; the engine's score is not kept.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct SearchResult {
    /// Stored path of the matching note.
    pub path: String,
}
