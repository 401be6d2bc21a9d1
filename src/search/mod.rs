//! Query execution: turns a free-text query into a bounded, ranked list of notes.

pub mod result;

pub use result::SearchResult;

use log::debug;

use crate::config::AppConfig;
use crate::engine::{IndexEngine, TantivyEngine};
use crate::error::{NoteSearchError, Result};
use crate::tags::expand_query_tags;

/// Runs queries against an [`IndexEngine`], at most `limit` results per query.
///
/// Nothing is cached between calls: every [`search`](QueryExecutor::search)
/// opens its own session and drops it before returning, on success and on
/// every error path.
#[derive(Debug)]
pub struct QueryExecutor<E: IndexEngine> {
    engine: E,
    limit: usize,
    expand_tags: bool,
}

impl<E: IndexEngine> QueryExecutor<E> {
    /// Creates an executor returning at most `limit` results. `limit` must be positive.
    pub fn new(engine: E, limit: usize) -> Result<Self> {
        if limit == 0 {
            return Err(NoteSearchError::Configuration(
                "result limit must be a positive integer".to_string(),
            ));
        }
        Ok(Self {
            engine,
            limit,
            expand_tags: false,
        })
    }

    /// Enables rewriting of `#tag` terms to `tags:tag` before parsing.
    pub fn with_tag_expansion(mut self, enabled: bool) -> Self {
        self.expand_tags = enabled;
        self
    }

    /// Executes `query` and returns the matching notes in the engine's
    /// relevance order.
    ///
    /// Fails with [`NoteSearchError::IndexAccess`] when the index cannot be
    /// opened or read and with [`NoteSearchError::QueryParse`] when the query
    /// is malformed. There is no retry and no fallback query.
    pub fn search(&self, query: &str) -> Result<Vec<SearchResult>> {
        let query = if self.expand_tags {
            expand_query_tags(query)
        } else {
            query.to_string()
        };
        debug!("Executing query \"{}\" limit={}", query, self.limit);

        let session = self.engine.open()?;
        let mut hits = session.search(&query, self.limit)?;
        hits.truncate(self.limit);
        debug!("Engine returned {} hits", hits.len());

        hits.iter()
            .map(|hit| session.stored_path(hit).map(|path| SearchResult { path }))
            .collect()
    }
}

impl QueryExecutor<TantivyEngine> {
    /// Builds a tantivy-backed executor from validated configuration.
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        config.validate()?;
        let engine = TantivyEngine::from_config(config)?;
        Ok(Self::new(engine, config.result_limit)?.with_tag_expansion(config.expand_tags))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{DocRef, Hit, MockIndexEngine, MockIndexSession};

    fn hits(count: u32) -> Vec<Hit> {
        (0..count)
            .map(|i| Hit {
                score: 10.0 - i as f32 * 0.5,
                doc: DocRef { segment: 0, doc: i },
            })
            .collect()
    }

    fn session_returning(result: Vec<Hit>) -> MockIndexSession {
        let mut session = MockIndexSession::new();
        session.expect_search().returning(move |_, _| Ok(result.clone()));
        session
            .expect_stored_path()
            .returning(|hit| Ok(format!("note-{}.md", hit.doc.doc)));
        session
    }

    #[test]
    fn test_zero_limit_rejected() {
        let err = QueryExecutor::new(MockIndexEngine::new(), 0).unwrap_err();
        assert!(matches!(err, NoteSearchError::Configuration(_)));
    }

    #[test]
    fn test_results_follow_engine_order() {
        let mut engine = MockIndexEngine::new();
        engine
            .expect_open()
            .times(1)
            .returning(|| Ok(Box::new(session_returning(hits(3)))));

        let executor = QueryExecutor::new(engine, 10).unwrap();
        let results = executor.search("beta").unwrap();
        let paths: Vec<&str> = results.iter().map(|r| r.path.as_str()).collect();
        assert_eq!(paths, vec!["note-0.md", "note-1.md", "note-2.md"]);
    }

    #[test]
    fn test_limit_passed_to_engine_and_enforced() {
        let mut engine = MockIndexEngine::new();
        engine.expect_open().returning(|| {
            let mut session = MockIndexSession::new();
            // Misbehaving engine that ignores the limit
            session
                .expect_search()
                .withf(|_, limit| *limit == 10)
                .returning(|_, _| Ok(hits(25)));
            session
                .expect_stored_path()
                .returning(|hit| Ok(format!("note-{}.md", hit.doc.doc)));
            Ok(Box::new(session))
        });

        let executor = QueryExecutor::new(engine, 10).unwrap();
        let results = executor.search("note").unwrap();
        assert_eq!(results.len(), 10);
        assert_eq!(results[9].path, "note-9.md");
    }

    #[test]
    fn test_empty_result() {
        let mut engine = MockIndexEngine::new();
        engine
            .expect_open()
            .returning(|| Ok(Box::new(session_returning(Vec::new()))));

        let executor = QueryExecutor::new(engine, 10).unwrap();
        assert!(executor.search("zeta").unwrap().is_empty());
    }

    #[test]
    fn test_session_opened_per_query() {
        let mut engine = MockIndexEngine::new();
        engine
            .expect_open()
            .times(2)
            .returning(|| Ok(Box::new(session_returning(hits(2)))));

        let executor = QueryExecutor::new(engine, 10).unwrap();
        let first = executor.search("beta").unwrap();
        let second = executor.search("beta").unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_parse_failure_propagates_without_retry() {
        let mut engine = MockIndexEngine::new();
        engine.expect_open().times(1).returning(|| {
            let mut session = MockIndexSession::new();
            session
                .expect_search()
                .times(1)
                .returning(|query, _| Err(NoteSearchError::query_parse(query, "unterminated phrase")));
            session.expect_stored_path().never();
            Ok(Box::new(session))
        });

        let executor = QueryExecutor::new(engine, 10).unwrap();
        let err = executor.search("\"beta").unwrap_err();
        assert!(err.is_query_parse());
    }

    #[test]
    fn test_index_access_failure_propagates() {
        let mut engine = MockIndexEngine::new();
        engine
            .expect_open()
            .times(1)
            .returning(|| Err(NoteSearchError::index_access("/missing", "directory does not exist")));

        let executor = QueryExecutor::new(engine, 10).unwrap();
        let err = executor.search("beta").unwrap_err();
        assert!(err.is_index_access());
    }

    #[test]
    fn test_tag_expansion_applied_when_enabled() {
        let mut engine = MockIndexEngine::new();
        engine.expect_open().returning(|| {
            let mut session = MockIndexSession::new();
            session
                .expect_search()
                .withf(|query, _| query == "meeting tags:work")
                .returning(|_, _| Ok(Vec::new()));
            Ok(Box::new(session))
        });

        let executor = QueryExecutor::new(engine, 10).unwrap().with_tag_expansion(true);
        assert!(executor.search("meeting #work").unwrap().is_empty());
    }

    #[test]
    fn test_tag_expansion_off_by_default() {
        let mut engine = MockIndexEngine::new();
        engine.expect_open().returning(|| {
            let mut session = MockIndexSession::new();
            session
                .expect_search()
                .withf(|query, _| query == "#work")
                .returning(|_, _| Ok(Vec::new()));
            Ok(Box::new(session))
        });

        let executor = QueryExecutor::new(engine, 10).unwrap();
        assert!(executor.search("#work").unwrap().is_empty());
    }
}
