//! In-memory view of all notes together with their derived state.

use super::DerivedState;
use crate::domain::{Note, NoteId};
use std::collections::BTreeMap;

/// A self-consistent copy of every active note plus the derived tag index
/// and reference graph.
///
/// The note service keeps one of these behind its lock and updates it in
/// the same critical section as the store write, so any copy taken under
/// the lock never shows a note without its index entries.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Snapshot {
    notes: BTreeMap<NoteId, Note>,
    derived: DerivedState,
}

impl Snapshot {
    /// Creates an empty snapshot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a snapshot from a full store scan.
    pub fn from_notes(notes: Vec<Note>) -> Self {
        let derived = DerivedState::from_notes(notes.iter());
        let notes = notes
            .into_iter()
            .map(|note| (note.id().clone(), note))
            .collect();
        Self { notes, derived }
    }

    /// Returns a note by identifier.
    pub fn get(&self, id: &NoteId) -> Option<&Note> {
        self.notes.get(id)
    }

    /// Returns true if the note is active.
    pub fn contains(&self, id: &NoteId) -> bool {
        self.notes.contains_key(id)
    }

    /// Iterates over notes in identifier order.
    pub fn notes(&self) -> impl Iterator<Item = &Note> {
        self.notes.values()
    }

    /// Returns the number of notes.
    pub fn len(&self) -> usize {
        self.notes.len()
    }

    /// Returns true if there are no notes.
    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    /// Returns the derived tag index and reference graph.
    pub fn derived(&self) -> &DerivedState {
        &self.derived
    }

    /// Inserts or replaces a note and updates derived state.
    pub fn put(&mut self, note: Note) {
        let previous = self.notes.remove(note.id());
        self.derived.apply_put(previous.as_ref(), &note);
        self.notes.insert(note.id().clone(), note);
    }

    /// Removes a note and its derived entries, returning it.
    pub fn remove(&mut self, id: &NoteId) -> Option<Note> {
        let note = self.notes.remove(id)?;
        self.derived.apply_delete(&note);
        Some(note)
    }

    #[cfg(test)]
    pub(crate) fn derived_mut(&mut self) -> &mut DerivedState {
        &mut self.derived
    }
}
