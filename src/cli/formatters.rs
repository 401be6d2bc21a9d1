// Formatters for displaying search results
use std::io::{self, Write};

use crate::links::DeadLink;
use crate::search::SearchResult;

/// Writes a query's outcome to `out`.
///
/// Text mode emits exactly `No results for query '<q>'` when `results` is
/// empty, otherwise a header line followed by one path per line in rank order.
/// JSON mode emits a pretty-printed array (`[]` when empty).
pub fn write_search_results<W: Write>(
    out: &mut W,
    query_text: &str,
    results: &[SearchResult],
    json_output: bool,
) -> io::Result<()> {
    if json_output {
        let json_string = serde_json::to_string_pretty(results)?;
        return writeln!(out, "{}", json_string);
    }

    if results.is_empty() {
        return writeln!(out, "No results for query '{}'", query_text);
    }

    writeln!(out, "Top results for query '{}':", query_text)?;
    for result in results {
        writeln!(out, "{}", result.path)?;
    }
    Ok(())
}

/// Prints a query's outcome to standard output.
pub fn print_search_results(query_text: &str, results: &[SearchResult], json_output: bool) -> io::Result<()> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    write_search_results(&mut handle, query_text, results, json_output)?;
    handle.flush()
}

/// Writes the tag list, one tag per line (nothing when there are none), or a
/// JSON array of strings.
pub fn write_tags<W: Write>(out: &mut W, tags: &[String], json_output: bool) -> io::Result<()> {
    if json_output {
        return writeln!(out, "{}", serde_json::to_string_pretty(tags)?);
    }
    for tag in tags {
        writeln!(out, "{}", tag)?;
    }
    Ok(())
}

/// Writes dead links as `<source> -> <target>` lines, or a JSON array.
pub fn write_dead_links<W: Write>(out: &mut W, dir: &str, links: &[DeadLink], json_output: bool) -> io::Result<()> {
    if json_output {
        return writeln!(out, "{}", serde_json::to_string_pretty(links)?);
    }
    if links.is_empty() {
        return writeln!(out, "No dead links in {}", dir);
    }
    for link in links {
        writeln!(out, "{} -> {}", link.source.display(), link.target.display())?;
    }
    Ok(())
}
