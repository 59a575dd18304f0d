//! Note references: `[[target]]` markers in note bodies.

use crate::domain::NoteId;
use regex::Regex;
use serde::Serialize;
use std::collections::BTreeSet;
use std::fmt;
use std::sync::LazyLock;

/// Matches `[[target]]` and `[[target|label]]`.
static REFERENCE_MARKER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\[\[([^\[\]|]+)(?:\|[^\[\]]*)?\]\]").expect("reference marker regex is valid")
});

/// A directed reference from one note to another.
///
/// The target may not exist yet. Dangling references are kept so that a
/// note written before its target still resolves once the target is created.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Reference {
    source: NoteId,
    target: NoteId,
}

impl Reference {
    /// Creates a reference from `source` to `target`.
    pub fn new(source: NoteId, target: NoteId) -> Self {
        Self { source, target }
    }

    /// Returns the referencing note.
    pub fn source(&self) -> &NoteId {
        &self.source
    }

    /// Returns the referenced note.
    pub fn target(&self) -> &NoteId {
        &self.target
    }
}

impl fmt::Display for Reference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.source.prefix(), self.target.prefix())
    }
}

/// Extracts every referenced note identifier from a note body.
///
/// Recognizes `[[id]]` and `[[id|label]]`. Whitespace around the id is
/// ignored. Markers whose id is not a valid [`NoteId`] are skipped.
///
/// # Examples
///
/// ```
/// use quill::domain::extract_references;
///
/// let refs = extract_references("see [[B]] and [[B|again]], not [[bad id]]");
/// let ids: Vec<&str> = refs.iter().map(|id| id.as_str()).collect();
/// assert_eq!(ids, vec!["B"]);
/// ```
pub fn extract_references(body: &str) -> BTreeSet<NoteId> {
    REFERENCE_MARKER
        .captures_iter(body)
        .filter_map(|caps| caps.get(1))
        .filter_map(|m| m.as_str().trim().parse::<NoteId>().ok())
        .collect()
}
