//! Builder for test notes with sensible defaults.

use chrono::{DateTime, Duration, Utc};
use quill::domain::{Note, NoteId, Tag};

/// Builder for creating test notes with sensible defaults.
///
/// Automatically generates an ID and timestamps, with a fluent API
/// for setting optional fields.
#[derive(Debug)]
pub struct TestNote {
    id: NoteId,
    title: String,
    body: String,
    tags: Vec<Tag>,
    created: DateTime<Utc>,
    modified: DateTime<Utc>,
}

impl TestNote {
    /// Creates a new test note with the given title.
    pub fn new(title: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: NoteId::new(),
            title: title.into(),
            body: String::new(),
            tags: Vec::new(),
            created: now,
            modified: now,
        }
    }

    /// Sets an explicit ID for the note.
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into().parse().expect("Invalid NoteId");
        self
    }

    /// Adds a tag to the note.
    pub fn tag(mut self, tag: impl AsRef<str>) -> Self {
        self.tags.push(Tag::new(tag.as_ref()).expect("Invalid tag"));
        self
    }

    /// Sets the body content.
    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.body = body.into();
        self
    }

    /// Moves the modification time back by `days`, keeping `created <= modified`.
    pub fn days_old(mut self, days: i64) -> Self {
        self.modified = Utc::now() - Duration::days(days);
        self.created = self.modified;
        self
    }

    /// Returns the title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the ID.
    pub fn note_id(&self) -> &NoteId {
        &self.id
    }

    /// Converts this TestNote to a domain Note.
    pub fn to_note(&self) -> Note {
        Note::builder(self.id.clone(), &self.title, self.created, self.modified)
            .body(&self.body)
            .tags(self.tags.clone())
            .build()
            .expect("TestNote should always produce valid Note")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_note_new_with_title() {
        let note = TestNote::new("My Test Note");
        assert_eq!(note.title(), "My Test Note");
        assert_eq!(note.note_id().as_str().len(), 26);
    }

    #[test]
    fn test_note_builder_fluent() {
        let note = TestNote::new("Architecture Decisions")
            .id("adr-001")
            .tag("ADR")
            .body("We chose Rust. See [[adr-000]].");

        let domain_note = note.to_note();
        assert_eq!(domain_note.id().as_str(), "adr-001");
        assert_eq!(domain_note.tags()[0].as_str(), "#adr");
        assert_eq!(domain_note.references().len(), 1);
    }

    #[test]
    fn test_note_days_old() {
        let note = TestNote::new("Old").days_old(3).to_note();
        assert!(note.modified() < Utc::now() - Duration::days(2));
        assert_eq!(note.created(), note.modified());
    }
}
