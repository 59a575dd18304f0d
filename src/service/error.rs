//! Errors reported by the note service.

use crate::domain::NoteId;
use crate::query::QueryError;
use crate::store::StoreError;
use thiserror::Error;

/// Errors returned by [`NoteService`](super::NoteService) operations.
///
/// `Validation` and `NotFound` never change state.
#[derive(Debug, Error)]
pub enum NoteError {
    /// The input was malformed (empty title, invalid tag or identifier).
    #[error("validation failed: {0}")]
    Validation(String),

    /// The operation referenced a note that is not active.
    #[error("note not found: {id}")]
    NotFound { id: NoteId },

    /// The store already held a newer version of the note.
    #[error("note {id} has a newer stored version; reload and retry")]
    Superseded { id: NoteId },

    /// The storage backend failed.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// A query failed.
    #[error(transparent)]
    Query(#[from] QueryError),
}

/// Result type for note service operations.
pub type NoteResult<T> = Result<T, NoteError>;

impl NoteError {
    pub(crate) fn validation(err: impl std::fmt::Display) -> Self {
        NoteError::Validation(err.to_string())
    }

    pub(crate) fn not_found(id: &NoteId) -> Self {
        NoteError::NotFound { id: id.clone() }
    }
}
