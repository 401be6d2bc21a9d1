use anyhow::Result;
use std::path::Path;
use tempfile::{tempdir, TempDir};

use note_searcher::{write_index, AnalyzerProfile, AppConfig, NoteDocument, QueryExecutor};

const WRITER_HEAP_BYTES: usize = 20_000_000;

fn build_index(location: &Path, notes: &[(&str, &str)]) -> Result<()> {
    let documents = notes.iter().map(|(path, text)| NoteDocument::from_text(*path, *text));
    write_index(location, AnalyzerProfile::Standard, WRITER_HEAP_BYTES, documents)?;
    Ok(())
}

fn config_for(location: &Path, limit: usize) -> AppConfig {
    AppConfig {
        index_path: Some(location.to_string_lossy().to_string()),
        result_limit: limit,
        ..AppConfig::default()
    }
}

fn scenario_index() -> Result<TempDir> {
    let temp = tempdir()?;
    build_index(
        temp.path(),
        &[("first.md", "alpha beta"), ("second.md", "beta gamma"), ("third.md", "gamma delta")],
    )?;
    Ok(temp)
}

fn paths(executor: &QueryExecutor<note_searcher::TantivyEngine>, query: &str) -> Result<Vec<String>> {
    Ok(executor.search(query)?.into_iter().map(|r| r.path).collect())
}

#[test]
fn test_single_term_matches_both_documents() -> Result<()> {
    let temp = scenario_index()?;
    let executor = QueryExecutor::from_config(&config_for(temp.path(), 10))?;

    let mut found = paths(&executor, "beta")?;
    found.sort();
    assert_eq!(found, vec!["first.md", "second.md"]);
    Ok(())
}

#[test]
fn test_no_match_is_empty() -> Result<()> {
    let temp = scenario_index()?;
    let executor = QueryExecutor::from_config(&config_for(temp.path(), 10))?;
    assert!(executor.search("zeta")?.is_empty());
    Ok(())
}

#[test]
fn test_boolean_and() -> Result<()> {
    let temp = scenario_index()?;
    let executor = QueryExecutor::from_config(&config_for(temp.path(), 10))?;
    assert_eq!(paths(&executor, "beta AND gamma")?, vec!["second.md"]);
    Ok(())
}

#[test]
fn test_phrase_query() -> Result<()> {
    let temp = scenario_index()?;
    let executor = QueryExecutor::from_config(&config_for(temp.path(), 10))?;
    assert_eq!(paths(&executor, "\"gamma delta\"")?, vec!["third.md"]);
    assert!(executor.search("\"delta gamma\"")?.is_empty());
    Ok(())
}

#[test]
fn test_more_relevant_document_ranks_first() -> Result<()> {
    let temp = tempdir()?;
    build_index(
        temp.path(),
        &[
            ("weak.md", "beta alpha gamma delta epsilon zeta eta theta"),
            ("strong.md", "beta beta beta"),
        ],
    )?;
    let executor = QueryExecutor::from_config(&config_for(temp.path(), 10))?;
    assert_eq!(paths(&executor, "beta")?, vec!["strong.md", "weak.md"]);
    Ok(())
}

#[test]
fn test_limit_caps_results() -> Result<()> {
    let temp = tempdir()?;
    let names: Vec<String> = (0..15).map(|i| format!("note-{:02}.md", i)).collect();
    let notes: Vec<(&str, &str)> = names.iter().map(|n| (n.as_str(), "weekly review note")).collect();
    build_index(temp.path(), &notes)?;

    let capped = QueryExecutor::from_config(&config_for(temp.path(), 10))?;
    assert_eq!(capped.search("review")?.len(), 10);

    let roomy = QueryExecutor::from_config(&config_for(temp.path(), 20))?;
    assert_eq!(roomy.search("review")?.len(), 15);
    Ok(())
}

#[test]
fn test_repeated_query_is_stable() -> Result<()> {
    let temp = scenario_index()?;
    let executor = QueryExecutor::from_config(&config_for(temp.path(), 10))?;
    let first = executor.search("beta OR gamma")?;
    let second = executor.search("beta OR gamma")?;
    assert_eq!(first.len(), 3);
    assert_eq!(first, second);
    Ok(())
}

#[test]
fn test_invalid_field_is_parse_failure() -> Result<()> {
    let temp = scenario_index()?;
    let executor = QueryExecutor::from_config(&config_for(temp.path(), 10))?;
    let err = executor.search("nosuchfield:beta").unwrap_err();
    assert!(err.is_query_parse(), "unexpected error: {:?}", err);
    Ok(())
}

#[test]
fn test_malformed_queries_are_parse_failures() -> Result<()> {
    let temp = scenario_index()?;
    let executor = QueryExecutor::from_config(&config_for(temp.path(), 10))?;
    for query in ["\"beta", "(beta", "beta AND"] {
        let err = executor.search(query).unwrap_err();
        assert!(err.is_query_parse(), "{} gave {:?}", query, err);
    }
    Ok(())
}

#[test]
fn test_huge_limit_returns_every_match() -> Result<()> {
    let temp = scenario_index()?;
    for limit in [usize::MAX / 4, 1_000_000_000_000] {
        let executor = QueryExecutor::from_config(&config_for(temp.path(), limit))?;
        let mut found = paths(&executor, "beta")?;
        found.sort();
        assert_eq!(found, vec!["first.md", "second.md"]);
    }
    Ok(())
}

#[test]
fn test_missing_index_is_access_failure() -> Result<()> {
    let temp = tempdir()?;
    let executor = QueryExecutor::from_config(&config_for(&temp.path().join("missing"), 10))?;
    let err = executor.search("beta").unwrap_err();
    assert!(err.is_index_access(), "unexpected error: {:?}", err);
    Ok(())
}

#[test]
fn test_tag_query() -> Result<()> {
    let temp = tempdir()?;
    build_index(
        temp.path(),
        &[("tagged.md", "standup notes #meeting"), ("untagged.md", "the meeting ran long")],
    )?;
    let executor = QueryExecutor::from_config(&config_for(temp.path(), 10))?;
    assert_eq!(paths(&executor, "#meeting")?, vec!["tagged.md"]);

    let mut both = paths(&executor, "meeting")?;
    both.sort();
    assert_eq!(both, vec!["tagged.md", "untagged.md"]);
    Ok(())
}

#[test]
fn test_index_rebuilt_between_queries_is_seen() -> Result<()> {
    let temp = scenario_index()?;
    let executor = QueryExecutor::from_config(&config_for(temp.path(), 10))?;
    assert!(executor.search("omega")?.is_empty());

    build_index(temp.path(), &[("fourth.md", "omega")])?;
    assert_eq!(paths(&executor, "omega")?, vec!["fourth.md"]);
    assert!(executor.search("beta")?.is_empty());
    Ok(())
}
