//! Query engine: full-text and tag-filtered search over a snapshot.

mod cancel;
mod search;

pub use cancel::CancelFlag;
pub use search::{SearchQuery, search, search_with_cancel};

use thiserror::Error;

/// Errors that can occur while running a query.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    /// The query was cancelled before it finished.
    #[error("search cancelled")]
    Cancelled,
}

/// Result type for query operations.
pub type QueryResult<T> = Result<T, QueryError>;
