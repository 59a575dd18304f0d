//! NoteStore trait implementation for SqliteStore.

use super::SqliteStore;
use crate::domain::{Note, NoteId, Tag};
use crate::store::{NoteStore, PutOutcome, StoreError, StoreResult};
use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::{OptionalExtension, Row, params};

const NOTE_COLUMNS: &str = "id, title, body, tags, created, modified";

/// Raw column values of a `notes` row.
struct NoteRow {
    id: String,
    title: String,
    body: String,
    tags: String,
    created: String,
    modified: String,
}

impl NoteRow {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            title: row.get(1)?,
            body: row.get(2)?,
            tags: row.get(3)?,
            created: row.get(4)?,
            modified: row.get(5)?,
        })
    }

    fn decode(self) -> StoreResult<Note> {
        let id: NoteId = self
            .id
            .parse()
            .map_err(|e| StoreError::Corrupt(format!("invalid note ID in database: {}", e)))?;
        let tags: Vec<Tag> = serde_json::from_str(&self.tags)
            .map_err(|e| StoreError::Corrupt(format!("invalid tags for {}: {}", id, e)))?;
        let created = parse_timestamp(&self.created, "created")?;
        let modified = parse_timestamp(&self.modified, "modified")?;

        Note::builder(id, self.title, created, modified)
            .body(self.body)
            .tags(tags)
            .build()
            .map_err(|e| StoreError::Corrupt(e.to_string()))
    }
}

/// Formats a timestamp with fixed nanosecond width so stored values sort lexically.
fn format_timestamp(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Nanos, true)
}

fn parse_timestamp(value: &str, field: &str) -> StoreResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| StoreError::Corrupt(format!("invalid {} timestamp '{}': {}", field, value, e)))
}

impl NoteStore for SqliteStore {
    fn put(&mut self, note: &Note) -> StoreResult<PutOutcome> {
        let tags = serde_json::to_string(note.tags())
            .map_err(|e| StoreError::Corrupt(format!("cannot encode tags: {}", e)))?;

        let tx = self.transaction()?;

        let retired: bool = tx.conn().query_row(
            "SELECT EXISTS(SELECT 1 FROM retired_notes WHERE id = ?)",
            [note.id().as_str()],
            |row| row.get(0),
        )?;
        if retired {
            tx.rollback()?;
            return Ok(PutOutcome::Retired);
        }

        let existing: Option<String> = tx
            .conn()
            .query_row(
                "SELECT modified FROM notes WHERE id = ?",
                [note.id().as_str()],
                |row| row.get(0),
            )
            .optional()?;

        if let Some(existing) = existing
            && parse_timestamp(&existing, "modified")? > note.modified()
        {
            tx.rollback()?;
            return Ok(PutOutcome::Superseded);
        }

        tx.execute(
            "INSERT INTO notes (id, title, body, tags, created, modified)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)
             ON CONFLICT(id) DO UPDATE SET
                title = excluded.title,
                body = excluded.body,
                tags = excluded.tags,
                created = excluded.created,
                modified = excluded.modified",
            params![
                note.id().as_str(),
                note.title(),
                note.body(),
                tags,
                format_timestamp(note.created()),
                format_timestamp(note.modified()),
            ],
        )?;
        tx.commit()?;

        Ok(PutOutcome::Applied)
    }

    fn get(&self, id: &NoteId) -> StoreResult<Option<Note>> {
        let row = self
            .conn
            .query_row(
                &format!("SELECT {} FROM notes WHERE id = ?", NOTE_COLUMNS),
                [id.as_str()],
                NoteRow::from_row,
            )
            .optional()?;

        row.map(NoteRow::decode).transpose()
    }

    fn delete(&mut self, id: &NoteId) -> StoreResult<bool> {
        let tx = self.transaction()?;

        let removed = tx.execute("DELETE FROM notes WHERE id = ?", [id.as_str()])?;
        if removed == 0 {
            tx.rollback()?;
            return Ok(false);
        }

        tx.execute(
            "INSERT OR IGNORE INTO retired_notes (id, retired_at) VALUES (?, ?)",
            params![id.as_str(), format_timestamp(Utc::now())],
        )?;
        tx.commit()?;

        Ok(true)
    }

    fn list(&self) -> StoreResult<Vec<Note>> {
        let mut stmt = self
            .conn
            .prepare(&format!("SELECT {} FROM notes ORDER BY id", NOTE_COLUMNS))?;

        let rows = stmt
            .query_map([], NoteRow::from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        rows.into_iter().map(NoteRow::decode).collect()
    }

    fn is_retired(&self, id: &NoteId) -> StoreResult<bool> {
        Ok(self.conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM retired_notes WHERE id = ?)",
            [id.as_str()],
            |row| row.get(0),
        )?)
    }
}
