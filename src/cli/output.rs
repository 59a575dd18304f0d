//! Output format types for CLI commands.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::domain::{Note, NoteId};
use crate::index::TagWithCount;

/// Output format for command results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable output (default)
    #[default]
    Human,
    /// JSON output for programmatic consumption
    Json,
}

/// Wrapper for serializable command output.
#[derive(Debug, Serialize)]
pub struct Output<T: Serialize> {
    pub data: T,
}

impl<T: Serialize> Output<T> {
    pub fn new(data: T) -> Self {
        Self { data }
    }
}

/// Prints `data` as pretty JSON wrapped in [`Output`].
pub fn print_json<T: Serialize>(data: T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(&Output::new(data))?);
    Ok(())
}

/// A single note in listing output.
#[derive(Debug, Serialize)]
pub struct NoteListing {
    pub id: String,
    pub title: String,
    pub tags: Vec<String>,
    pub modified: String,
}

impl From<&Note> for NoteListing {
    fn from(note: &Note) -> Self {
        Self {
            id: note.id().to_string(),
            title: note.title().to_string(),
            tags: note.tags().iter().map(|t| t.to_string()).collect(),
            modified: note.modified().to_rfc3339(),
        }
    }
}

/// A note with its references, for `show`.
#[derive(Debug, Serialize)]
pub struct NoteDetail<'a> {
    #[serde(flatten)]
    pub note: &'a Note,
    pub references: Vec<NoteId>,
    pub backlinks: Vec<NoteId>,
}

/// A tag with optional count.
#[derive(Debug, Serialize)]
pub struct TagListing {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
}

impl TagListing {
    pub fn new(tag: &TagWithCount, with_count: bool) -> Self {
        Self {
            name: tag.tag().to_string(),
            count: with_count.then(|| tag.count()),
        }
    }
}
