//! Directed reference graph between notes, with backlink lookup.

use crate::domain::{NoteId, Reference};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

/// Note-to-note references extracted from note bodies.
///
/// Keeps both directions: `outgoing` is the source of truth for a note's
/// edges and `incoming` is maintained alongside it for backlink queries.
/// Targets do not need to exist; a backlink to a missing note resolves as
/// soon as that note is created, without touching the referencing note.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReferenceGraph {
    outgoing: BTreeMap<NoteId, BTreeSet<NoteId>>,
    incoming: BTreeMap<NoteId, BTreeSet<NoteId>>,
}

impl ReferenceGraph {
    /// Creates an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the graph from `(source, targets)` pairs.
    pub fn from_edges(edges: impl IntoIterator<Item = (NoteId, BTreeSet<NoteId>)>) -> Self {
        let mut graph = Self::new();
        for (source, targets) in edges {
            graph.update_edges(&source, targets);
        }
        graph
    }

    /// Replaces the outgoing edge set of `source`.
    pub fn update_edges(&mut self, source: &NoteId, targets: BTreeSet<NoteId>) {
        self.remove_source(source);

        if targets.is_empty() {
            return;
        }
        for target in &targets {
            self.incoming
                .entry(target.clone())
                .or_default()
                .insert(source.clone());
        }
        self.outgoing.insert(source.clone(), targets);
    }

    /// Removes every outgoing edge of `source`. Incoming edges are kept.
    pub fn remove_source(&mut self, source: &NoteId) {
        let Some(old) = self.outgoing.remove(source) else {
            return;
        };
        for target in old {
            if let Some(sources) = self.incoming.get_mut(&target) {
                sources.remove(source);
                if sources.is_empty() {
                    self.incoming.remove(&target);
                }
            }
        }
    }

    /// Returns the notes that `source` references.
    pub fn outgoing(&self, source: &NoteId) -> BTreeSet<NoteId> {
        self.outgoing.get(source).cloned().unwrap_or_default()
    }

    /// Returns the notes that reference `target`.
    pub fn backlinks(&self, target: &NoteId) -> BTreeSet<NoteId> {
        self.incoming.get(target).cloned().unwrap_or_default()
    }

    /// Iterates over every reference, ordered by source then target.
    pub fn references(&self) -> impl Iterator<Item = Reference> + '_ {
        self.outgoing.iter().flat_map(|(source, targets)| {
            targets
                .iter()
                .map(move |target| Reference::new(source.clone(), target.clone()))
        })
    }

    /// Iterates over the backlink map as references, ordered by target then source.
    pub fn backlink_entries(&self) -> impl Iterator<Item = Reference> + '_ {
        self.incoming.iter().flat_map(|(target, sources)| {
            sources
                .iter()
                .map(move |source| Reference::new(source.clone(), target.clone()))
        })
    }

    /// Returns references whose target does not satisfy `exists`.
    pub fn dangling(&self, exists: impl Fn(&NoteId) -> bool) -> Vec<Reference> {
        self.references().filter(|r| !exists(r.target())).collect()
    }

    /// Returns the total number of edges.
    pub fn edge_count(&self) -> usize {
        self.outgoing.values().map(BTreeSet::len).sum()
    }

    #[cfg(test)]
    pub(crate) fn incoming_mut(&mut self) -> &mut BTreeMap<NoteId, BTreeSet<NoteId>> {
        &mut self.incoming
    }
}
