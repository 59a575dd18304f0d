//! In-memory note store.

use super::{NoteStore, PutOutcome, StoreResult};
use crate::domain::{Note, NoteId};
use std::collections::{BTreeMap, BTreeSet};

/// Volatile store backed by ordered maps.
///
/// Used for tests and for embedding the core without persistence.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    notes: BTreeMap<NoteId, Note>,
    retired: BTreeSet<NoteId>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-populated with notes (last-writer-wins applies).
    pub fn with_notes(notes: impl IntoIterator<Item = Note>) -> Self {
        let mut store = Self::new();
        for note in notes {
            store.put_note(note);
        }
        store
    }

    /// Returns the number of stored notes.
    pub fn len(&self) -> usize {
        self.notes.len()
    }

    /// Returns true if no notes are stored.
    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    fn put_note(&mut self, note: Note) -> PutOutcome {
        if self.retired.contains(note.id()) {
            return PutOutcome::Retired;
        }
        if let Some(existing) = self.notes.get(note.id())
            && existing.modified() > note.modified()
        {
            return PutOutcome::Superseded;
        }
        self.notes.insert(note.id().clone(), note);
        PutOutcome::Applied
    }
}

impl NoteStore for MemoryStore {
    fn put(&mut self, note: &Note) -> StoreResult<PutOutcome> {
        Ok(self.put_note(note.clone()))
    }

    fn get(&self, id: &NoteId) -> StoreResult<Option<Note>> {
        Ok(self.notes.get(id).cloned())
    }

    fn delete(&mut self, id: &NoteId) -> StoreResult<bool> {
        if self.notes.remove(id).is_some() {
            self.retired.insert(id.clone());
            Ok(true)
        } else {
            Ok(false)
        }
    }

    fn list(&self) -> StoreResult<Vec<Note>> {
        Ok(self.notes.values().cloned().collect())
    }

    fn is_retired(&self, id: &NoteId) -> StoreResult<bool> {
        Ok(self.retired.contains(id))
    }
}
