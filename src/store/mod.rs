//! Note storage: the `NoteStore` trait and its backends.
//!
//! The store is the single source of truth for note records. Everything
//! else (tag index, reference graph, service-side cache) is derived from a
//! full scan of it.

mod memory;
mod sqlite;

pub use memory::MemoryStore;
pub use sqlite::{SqliteStore, Transaction};

use crate::domain::{Note, NoteId};
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A database error occurred.
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// A stored record could not be decoded.
    #[error("corrupt record: {0}")]
    Corrupt(String),

    /// An I/O error occurred.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Outcome of a [`NoteStore::put`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PutOutcome {
    /// The record was written.
    Applied,
    /// A record with a newer `modified` timestamp was already stored; nothing changed.
    Superseded,
    /// The identifier belongs to a deleted note; nothing changed.
    Retired,
}

/// Keyed storage for note records.
///
/// Writes to one identifier resolve last-writer-wins by the note's
/// `modified` timestamp rather than by arrival order: a `put` carrying an
/// older timestamp than the stored record is discarded. Equal timestamps
/// overwrite. Deletion is terminal: a `put` for a retired identifier is
/// refused, whatever its timestamp.
pub trait NoteStore {
    /// Inserts or replaces a note record as a whole.
    fn put(&mut self, note: &Note) -> StoreResult<PutOutcome>;

    /// Retrieves a single note by ID.
    fn get(&self, id: &NoteId) -> StoreResult<Option<Note>>;

    /// Removes a note and marks its identifier as retired.
    ///
    /// Returns `false` if no such note was stored.
    fn delete(&mut self, id: &NoteId) -> StoreResult<bool>;

    /// Lists all notes ordered by identifier.
    fn list(&self) -> StoreResult<Vec<Note>>;

    /// Returns true if the identifier belonged to a note that was deleted.
    fn is_retired(&self, id: &NoteId) -> StoreResult<bool>;
}
