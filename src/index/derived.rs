//! Derived state: tag index plus reference graph, rebuildable from notes.

use super::consistency::ConsistencyError;
use super::{ReferenceGraph, TagIndex};
use crate::domain::Note;
use crate::infra::Fingerprint;
use serde::Serialize;
use std::collections::BTreeSet;

/// Everything that is computed from note records rather than stored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DerivedState {
    tags: TagIndex,
    graph: ReferenceGraph,
}

impl DerivedState {
    /// Creates empty derived state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds derived state from a full scan of notes.
    pub fn from_notes<'a>(notes: impl IntoIterator<Item = &'a Note> + Clone) -> Self {
        Self {
            tags: TagIndex::from_notes(notes.clone()),
            graph: ReferenceGraph::from_edges(
                notes
                    .into_iter()
                    .map(|note| (note.id().clone(), note.references())),
            ),
        }
    }

    /// Returns the tag index.
    pub fn tags(&self) -> &TagIndex {
        &self.tags
    }

    /// Returns the reference graph.
    pub fn graph(&self) -> &ReferenceGraph {
        &self.graph
    }

    /// Indexes a new or changed note. `previous` is the version being replaced.
    pub fn apply_put(&mut self, previous: Option<&Note>, note: &Note) {
        let old_tags = previous.map(Note::tags).unwrap_or_default();
        self.tags.reindex(note.id(), old_tags, note.tags());
        self.graph.update_edges(note.id(), note.references());
    }

    /// Drops a deleted note's tag entries and outgoing references.
    pub fn apply_delete(&mut self, note: &Note) {
        self.tags.remove_note(note.id(), note.tags());
        self.graph.remove_source(note.id());
    }

    /// Lists every way this state differs from `expected`.
    pub fn diff(&self, expected: &DerivedState) -> Vec<ConsistencyError> {
        let mut issues = Vec::new();

        let actual_pairs: BTreeSet<_> = self.tags.pairs().collect();
        let expected_pairs: BTreeSet<_> = expected.tags.pairs().collect();
        for (tag, id) in expected_pairs.difference(&actual_pairs) {
            issues.push(ConsistencyError::MissingTagEntry {
                tag: (*tag).clone(),
                id: (*id).clone(),
            });
        }
        for (tag, id) in actual_pairs.difference(&expected_pairs) {
            issues.push(ConsistencyError::StaleTagEntry {
                tag: (*tag).clone(),
                id: (*id).clone(),
            });
        }

        let actual_refs: BTreeSet<_> = self.graph.references().collect();
        let expected_refs: BTreeSet<_> = expected.graph.references().collect();
        for r in expected_refs.difference(&actual_refs) {
            issues.push(ConsistencyError::MissingReference {
                from: r.source().clone(),
                to: r.target().clone(),
            });
        }
        for r in actual_refs.difference(&expected_refs) {
            issues.push(ConsistencyError::StaleReference {
                from: r.source().clone(),
                to: r.target().clone(),
            });
        }

        // `backlinks` reads only the inverted map.
        let actual_back: BTreeSet<_> = self.graph.backlink_entries().collect();
        let expected_back: BTreeSet<_> = expected.graph.backlink_entries().collect();
        for r in expected_back.difference(&actual_back) {
            issues.push(ConsistencyError::MissingBacklink {
                from: r.source().clone(),
                to: r.target().clone(),
            });
        }
        for r in actual_back.difference(&expected_back) {
            issues.push(ConsistencyError::StaleBacklink {
                from: r.source().clone(),
                to: r.target().clone(),
            });
        }

        issues
    }

    /// Returns a SHA-256 fingerprint of the canonical serialization.
    ///
    /// Two states have the same fingerprint exactly when they hold the same
    /// tag entries, edges and backlink entries.
    pub fn fingerprint(&self) -> Fingerprint {
        // Serializing ordered maps of strings cannot fail.
        let bytes = serde_json::to_vec(self).unwrap_or_default();
        Fingerprint::compute(&bytes)
    }

    #[cfg(test)]
    pub(crate) fn tags_mut(&mut self) -> &mut TagIndex {
        &mut self.tags
    }

    #[cfg(test)]
    pub(crate) fn graph_mut(&mut self) -> &mut ReferenceGraph {
        &mut self.graph
    }
}
