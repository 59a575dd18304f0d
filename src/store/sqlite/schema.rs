//! SQLite schema for the note store.

use rusqlite::Connection;

/// Current schema version, recorded in `schema_version`.
pub const SCHEMA_VERSION: i64 = 1;

/// Creates the database schema for the note store.
///
/// Idempotent: calling it on an existing database is safe.
///
/// # Tables Created
/// - `notes` - One record per note; tags as a JSON array
/// - `retired_notes` - Identifiers of deleted notes
/// - `schema_version` - Schema version tracking
pub fn create_schema(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS notes (
            id TEXT PRIMARY KEY,
            title TEXT NOT NULL,
            body TEXT NOT NULL DEFAULT '',
            tags TEXT NOT NULL DEFAULT '[]',
            created TEXT NOT NULL,
            modified TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS retired_notes (
            id TEXT PRIMARY KEY,
            retired_at TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS schema_version (
            version INTEGER NOT NULL
        );",
    )?;

    let has_version: bool = conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM schema_version)",
        [],
        |row| row.get(0),
    )?;
    if !has_version {
        conn.execute(
            "INSERT INTO schema_version (version) VALUES (?)",
            [SCHEMA_VERSION],
        )?;
    }

    Ok(())
}
