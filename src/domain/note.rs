//! Note record: title, markup body, tags and timestamps.

use crate::domain::tag::deduplicate_tags;
use crate::domain::{NoteId, Tag, extract_references};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// The kind of error that occurred when constructing a note.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ParseNoteErrorKind {
    EmptyTitle,
    ModifiedBeforeCreated,
}

/// Error returned when constructing an invalid note.
#[derive(Debug, Clone)]
pub struct ParseNoteError {
    kind: ParseNoteErrorKind,
}

impl fmt::Display for ParseNoteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            ParseNoteErrorKind::EmptyTitle => write!(f, "invalid note: title cannot be empty"),
            ParseNoteErrorKind::ModifiedBeforeCreated => {
                write!(f, "invalid note: modified timestamp precedes created")
            }
        }
    }
}

impl std::error::Error for ParseNoteError {}

/// A user-authored note.
///
/// The body is an opaque markup string (HTML from a rich-text editor, or
/// markdown). It is stored verbatim; only reference markers are interpreted.
///
/// # Required Fields
/// - `id`: Unique identifier
/// - `title`: Human-readable title (non-empty, trimmed)
/// - `created`: When the note was created (immutable)
/// - `modified`: When the note was last modified
///
/// # Optional Fields
/// - `body`: Markup content, empty by default
/// - `tags`: Ordered, deduplicated tags
///
/// # Examples
///
/// ```
/// use quill::domain::{Note, NoteId, Tag};
/// use chrono::Utc;
///
/// let now = Utc::now();
/// let note = Note::builder(NoteId::new(), "API Design", now, now)
///     .body("see [[B]]")
///     .tags(vec![Tag::new("#design").unwrap()])
///     .build()
///     .unwrap();
/// assert_eq!(note.title(), "API Design");
/// assert_eq!(note.references().len(), 1);
/// ```
#[derive(Clone, PartialEq)]
pub struct Note {
    id: NoteId,
    title: String,
    body: String,
    tags: Vec<Tag>,
    created: DateTime<Utc>,
    modified: DateTime<Utc>,
}

impl Note {
    /// Creates a new Note with an empty body and no tags.
    ///
    /// # Errors
    ///
    /// Returns `ParseNoteError` if the title is empty or whitespace-only.
    pub fn new(
        id: NoteId,
        title: impl Into<String>,
        created: DateTime<Utc>,
        modified: DateTime<Utc>,
    ) -> Result<Self, ParseNoteError> {
        NoteBuilder::new(id, title, created, modified).build()
    }

    /// Creates a builder for constructing a Note with optional fields.
    pub fn builder(
        id: NoteId,
        title: impl Into<String>,
        created: DateTime<Utc>,
        modified: DateTime<Utc>,
    ) -> NoteBuilder {
        NoteBuilder::new(id, title, created, modified)
    }

    /// Returns the note's unique identifier.
    pub fn id(&self) -> &NoteId {
        &self.id
    }

    /// Returns the note's title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the note's markup body.
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Returns the note's tags in their original order.
    pub fn tags(&self) -> &[Tag] {
        &self.tags
    }

    /// Returns true if the note carries the given tag.
    pub fn has_tag(&self, tag: &Tag) -> bool {
        self.tags.contains(tag)
    }

    /// Returns when the note was created.
    pub fn created(&self) -> DateTime<Utc> {
        self.created
    }

    /// Returns when the note was last modified.
    pub fn modified(&self) -> DateTime<Utc> {
        self.modified
    }

    /// Returns the identifiers referenced from this note's body.
    pub fn references(&self) -> BTreeSet<NoteId> {
        extract_references(&self.body)
    }

    /// Returns a new version of this note with the patch applied.
    ///
    /// The identifier and creation time are preserved; `modified` is set to
    /// the given timestamp.
    ///
    /// # Errors
    ///
    /// Returns `ParseNoteError` if the patched title is empty.
    pub fn apply(&self, patch: &NotePatch, modified: DateTime<Utc>) -> Result<Note, ParseNoteError> {
        let title = patch.title.clone().unwrap_or_else(|| self.title.clone());
        let body = patch.body.clone().unwrap_or_else(|| self.body.clone());
        let tags = patch.tags.clone().unwrap_or_else(|| self.tags.clone());

        Note::builder(self.id.clone(), title, self.created, modified)
            .body(body)
            .tags(tags)
            .build()
    }
}

impl fmt::Display for Note {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}]", self.title, self.id.prefix())
    }
}

impl fmt::Debug for Note {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Note")
            .field("id", &self.id)
            .field("title", &self.title)
            .field("body", &self.body)
            .field("tags", &self.tags)
            .field("created", &self.created)
            .field("modified", &self.modified)
            .finish()
    }
}

/// Builder for constructing a Note with optional fields.
pub struct NoteBuilder {
    id: NoteId,
    title: String,
    body: String,
    tags: Vec<Tag>,
    created: DateTime<Utc>,
    modified: DateTime<Utc>,
}

impl NoteBuilder {
    fn new(
        id: NoteId,
        title: impl Into<String>,
        created: DateTime<Utc>,
        modified: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            body: String::new(),
            tags: Vec::new(),
            created,
            modified,
        }
    }

    /// Sets the note's body.
    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.body = body.into();
        self
    }

    /// Sets the note's tags.
    ///
    /// Duplicates are removed (first occurrence kept).
    pub fn tags(mut self, tags: Vec<Tag>) -> Self {
        self.tags = deduplicate_tags(tags);
        self
    }

    /// Builds the Note.
    ///
    /// # Errors
    ///
    /// Returns `ParseNoteError` if:
    /// - The title is empty or whitespace-only
    /// - `modified` is earlier than `created`
    pub fn build(self) -> Result<Note, ParseNoteError> {
        let trimmed = self.title.trim();

        if trimmed.is_empty() {
            return Err(ParseNoteError {
                kind: ParseNoteErrorKind::EmptyTitle,
            });
        }
        if self.modified < self.created {
            return Err(ParseNoteError {
                kind: ParseNoteErrorKind::ModifiedBeforeCreated,
            });
        }

        Ok(Note {
            id: self.id,
            title: trimmed.to_string(),
            body: self.body,
            tags: self.tags,
            created: self.created,
            modified: self.modified,
        })
    }
}

/// A partial update to a note. `None` fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NotePatch {
    pub title: Option<String>,
    pub body: Option<String>,
    pub tags: Option<Vec<Tag>>,
}

impl NotePatch {
    /// Creates an empty patch.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the title.
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Replaces the body.
    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Replaces the full tag list.
    pub fn tags(mut self, tags: Vec<Tag>) -> Self {
        self.tags = Some(tags);
        self
    }

    /// Returns true if the patch changes nothing.
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.body.is_none() && self.tags.is_none()
    }
}

impl Serialize for Note {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeMap;

        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("id", &self.id)?;
        map.serialize_entry("title", &self.title)?;
        map.serialize_entry("body", &self.body)?;
        map.serialize_entry("tags", &self.tags)?;
        map.serialize_entry("created", &self.created)?;
        map.serialize_entry("modified", &self.modified)?;
        map.end()
    }
}

impl<'de> Deserialize<'de> for Note {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct NoteHelper {
            id: NoteId,
            title: String,
            #[serde(default)]
            body: String,
            #[serde(default)]
            tags: Vec<Tag>,
            created: DateTime<Utc>,
            modified: DateTime<Utc>,
        }

        let helper = NoteHelper::deserialize(deserializer)?;

        Note::builder(helper.id, helper.title, helper.created, helper.modified)
            .body(helper.body)
            .tags(helper.tags)
            .build()
            .map_err(serde::de::Error::custom)
    }
}
