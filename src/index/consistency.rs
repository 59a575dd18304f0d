//! Disagreements between derived structures and the store.

use crate::domain::{NoteId, Tag};
use serde::Serialize;
use thiserror::Error;

/// A single disagreement found when comparing derived state with a store scan.
///
/// These are never returned to callers as failures. They are logged and
/// repaired by rebuilding from the store.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ConsistencyError {
    #[error("tag index is missing {tag} for note {id}")]
    MissingTagEntry { tag: Tag, id: NoteId },

    #[error("tag index lists note {id} under {tag}, which it does not carry")]
    StaleTagEntry { tag: Tag, id: NoteId },

    #[error("reference graph is missing {from} -> {to}")]
    MissingReference { from: NoteId, to: NoteId },

    #[error("reference graph has stale edge {from} -> {to}")]
    StaleReference { from: NoteId, to: NoteId },

    #[error("backlink map is missing {to} <- {from}")]
    MissingBacklink { from: NoteId, to: NoteId },

    #[error("backlink map has stale entry {to} <- {from}")]
    StaleBacklink { from: NoteId, to: NoteId },

    #[error("cached copy of note {id} differs from the stored record")]
    CachedNoteMismatch { id: NoteId },
}

/// Result of a consistency check.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ConsistencyReport {
    /// Number of notes scanned from the store.
    pub notes_scanned: usize,
    /// Disagreements found.
    pub issues: Vec<ConsistencyError>,
    /// Whether derived state was rebuilt.
    pub repaired: bool,
}

impl ConsistencyReport {
    /// Returns true if no issues were found.
    pub fn is_consistent(&self) -> bool {
        self.issues.is_empty()
    }
}
