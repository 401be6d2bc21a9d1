//! `#tag` handling: extraction at index time and query rewriting at search time.

use lazy_static::lazy_static;
use regex::Regex;

use crate::constants::FIELD_TAGS;

lazy_static! {
    static ref TAG_IN_TEXT: Regex = Regex::new(r"(?:^|\s)#([\w-]+)").unwrap();
    static ref TAG_IN_QUERY: Regex = Regex::new(r"(^|[\s+\-])#([\w-]+)").unwrap();
}

/// Extracts `#tags` from note text, without the leading `#`.
///
/// A tag must start the text or follow whitespace, so `a#b` and markdown
/// headings (`# Title`) are ignored. Duplicates are dropped, first-seen order
/// kept.
pub fn extract_tags(text: &str) -> Vec<String> {
    let mut tags: Vec<String> = Vec::new();
    for captures in TAG_IN_TEXT.captures_iter(text) {
        let tag = &captures[1];
        if !tags.iter().any(|t| t == tag) {
            tags.push(tag.to_string());
        }
    }
    tags
}

/// Rewrites `#tag` query terms into `tags:tag` field queries. The `#` may be
/// preceded by the start of the query, whitespace, `+` or `-`.
pub fn expand_query_tags(query: &str) -> String {
    let replacement = format!("${{1}}{}:${{2}}", FIELD_TAGS);
    TAG_IN_QUERY.replace_all(query, replacement.as_str()).into_owned()
}
