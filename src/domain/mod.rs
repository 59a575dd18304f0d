//! Core types: Note, NotePatch, Tag, NoteId, Reference

mod note;
mod note_id;
mod reference;
mod tag;

pub use note::{Note, NoteBuilder, NotePatch, ParseNoteError};
pub use note_id::{MAX_ID_LEN, NoteId, ParseNoteIdError};
pub use reference::{Reference, extract_references};
pub use tag::{ParseTagError, Tag, parse_tags};
