//! SQLite-backed note store.

mod connection;
mod repo_impl;
mod schema;
mod transaction;


use rusqlite::Connection;

pub use transaction::Transaction;

// ===========================================
// SqliteStore Struct
// ===========================================

/// SQLite-backed note store.
///
/// Holds one row per note keyed by identifier, plus the set of retired
/// identifiers. Tags are stored as a JSON array column.
pub struct SqliteStore {
    pub(crate) conn: Connection,
}
