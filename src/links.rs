//! Markdown link checking: finds links between notes whose target file is missing.

use std::path::{Component, Path, PathBuf};

use lazy_static::lazy_static;
use log::debug;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::config::AppConfig;
use crate::error::Result;
use crate::indexing::{collect_notes, NoteFile};

lazy_static! {
    static ref MARKDOWN_LINK: Regex = Regex::new(r"\[[^\]]*\]\(([^)\s]+)\)").unwrap();
    static ref URL_SCHEME: Regex = Regex::new(r"^[A-Za-z][A-Za-z0-9+.\-]*:").unwrap();
}

/// A link in `source` pointing at a `target` that does not exist.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct DeadLink {
    pub source: PathBuf,
    pub target: PathBuf,
}

/// Link targets in `text` that refer to local files, with any `#fragment`
/// removed. URLs (`https:`, `mailto:`, ...) and same-note anchors are skipped.
pub fn local_link_targets(text: &str) -> Vec<&str> {
    MARKDOWN_LINK
        .captures_iter(text)
        .filter_map(|captures| captures.get(1))
        .map(|target| target.as_str())
        .map(|target| target.split('#').next().unwrap_or(target))
        .filter(|target| !target.is_empty())
        .filter(|target| Path::new(target).is_absolute() || !URL_SCHEME.is_match(target))
        .collect()
}

/// Resolves `target` as seen from the note at `source`. Absolute targets are
/// kept; relative ones are joined to the note's directory. `.` and `..` are
/// folded without touching the filesystem.
pub fn resolve_link(source: &Path, target: &str) -> PathBuf {
    let target = Path::new(target);
    let joined = if target.is_absolute() {
        target.to_path_buf()
    } else {
        source.parent().unwrap_or_else(|| Path::new("")).join(target)
    };
    normalize(&joined)
}

fn normalize(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if matches!(normalized.components().next_back(), Some(Component::Normal(_))) {
                    normalized.pop();
                } else if !normalized.has_root() {
                    normalized.push("..");
                }
            }
            other => normalized.push(other.as_os_str()),
        }
    }
    normalized
}

/// Checks every local link in `notes` and returns those whose target is
/// missing, in note order then link order.
pub fn find_dead_links(notes: &[NoteFile]) -> Vec<DeadLink> {
    let mut dead = Vec::new();
    for note in notes {
        for target in local_link_targets(&note.text) {
            let resolved = resolve_link(&note.path, target);
            if !resolved.exists() {
                debug!("Dead link in {}: {}", note.path.display(), target);
                dead.push(DeadLink {
                    source: note.path.clone(),
                    target: resolved,
                });
            }
        }
    }
    dead
}

/// Scans the notes under `dir` (same file selection as indexing) for dead links.
pub fn dead_links_in_directory(config: &AppConfig, dir: &Path) -> Result<Vec<DeadLink>> {
    let scan = collect_notes(dir, &config.indexing.extensions)?;
    Ok(find_dead_links(&scan.notes))
}
