//! Inverted index from tag to the notes carrying it.

use crate::domain::{Note, NoteId, Tag};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

/// A tag with its note count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TagWithCount {
    tag: Tag,
    count: usize,
}

impl TagWithCount {
    /// Creates a new TagWithCount.
    pub fn new(tag: Tag, count: usize) -> Self {
        Self { tag, count }
    }

    /// Returns the tag.
    pub fn tag(&self) -> &Tag {
        &self.tag
    }

    /// Returns the number of notes carrying this tag.
    pub fn count(&self) -> usize {
        self.count
    }
}

/// Maps each tag to the set of notes that currently carry it.
///
/// An identifier appears under a tag exactly when that note's tag list
/// contains the tag. Tags with no notes are dropped, so two indexes built
/// from the same notes compare equal regardless of their history.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct TagIndex {
    entries: BTreeMap<Tag, BTreeSet<NoteId>>,
}

impl TagIndex {
    /// Creates an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the index from a full scan of notes.
    pub fn from_notes<'a>(notes: impl IntoIterator<Item = &'a Note>) -> Self {
        let mut index = Self::new();
        for note in notes {
            index.reindex(note.id(), &[], note.tags());
        }
        index
    }

    /// Moves a note from its old tag set to its new one.
    ///
    /// The note is removed from tags present only in `old_tags` and added to
    /// tags present only in `new_tags`. Tags in both are left untouched.
    pub fn reindex(&mut self, id: &NoteId, old_tags: &[Tag], new_tags: &[Tag]) {
        let old: BTreeSet<&Tag> = old_tags.iter().collect();
        let new: BTreeSet<&Tag> = new_tags.iter().collect();

        for tag in old.difference(&new) {
            if let Some(ids) = self.entries.get_mut(*tag) {
                ids.remove(id);
                if ids.is_empty() {
                    self.entries.remove(*tag);
                }
            }
        }

        for tag in new.difference(&old) {
            self.entries
                .entry((*tag).clone())
                .or_default()
                .insert(id.clone());
        }
    }

    /// Removes a note from every tag it carries.
    pub fn remove_note(&mut self, id: &NoteId, tags: &[Tag]) {
        self.reindex(id, tags, &[]);
    }

    /// Returns the notes carrying `tag`.
    pub fn notes_for_tag(&self, tag: &Tag) -> BTreeSet<NoteId> {
        self.entries.get(tag).cloned().unwrap_or_default()
    }

    /// Returns the notes carrying every tag in `tags`.
    ///
    /// An empty tag list matches nothing; callers handle the unfiltered case.
    pub fn notes_with_all(&self, tags: &[Tag]) -> BTreeSet<NoteId> {
        let mut sets = tags.iter().map(|t| self.entries.get(t));

        let Some(Some(first)) = sets.next() else {
            return BTreeSet::new();
        };

        let mut result = first.clone();
        for set in sets {
            match set {
                Some(ids) => result.retain(|id| ids.contains(id)),
                None => return BTreeSet::new(),
            }
        }
        result
    }

    /// Returns every tag in use.
    pub fn all_tags(&self) -> BTreeSet<Tag> {
        self.entries.keys().cloned().collect()
    }

    /// Returns every tag in use with its note count, ordered by tag.
    pub fn tags_with_counts(&self) -> Vec<TagWithCount> {
        self.entries
            .iter()
            .map(|(tag, ids)| TagWithCount::new(tag.clone(), ids.len()))
            .collect()
    }

    /// Iterates over `(tag, note)` pairs in tag order.
    pub(crate) fn pairs(&self) -> impl Iterator<Item = (&Tag, &NoteId)> {
        self.entries
            .iter()
            .flat_map(|(tag, ids)| ids.iter().map(move |id| (tag, id)))
    }

    /// Returns the number of distinct tags.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no tags are indexed.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
