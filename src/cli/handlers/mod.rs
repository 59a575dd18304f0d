//! Command handlers for the CLI.

mod check;
mod links;
mod list;
mod new;
mod resolve;
mod search;
mod show_edit;

#[cfg(test)]
pub(crate) mod tests;

use anyhow::{Context, Result};
use clap::CommandFactory;
use std::path::{Path, PathBuf};

use crate::cli::{Cli, CompletionsArgs};
use crate::domain::Note;
use crate::service::NoteService;
use crate::store::SqliteStore;

// Re-export public items
pub use check::handle_check;
pub use links::handle_backlinks;
pub use list::{handle_list, handle_tags};
pub use new::handle_new;
pub use resolve::{ResolveResult, resolve_note};
pub use search::handle_search;
pub use show_edit::{handle_edit, handle_rm, handle_show};

#[cfg(test)]
pub(crate) use show_edit::{EditorLauncher, handle_edit_impl};

// ===========================================
// Shared Utilities
// ===========================================

/// Returns the database path for a notes directory.
pub(crate) fn store_db_path(notes_dir: &Path) -> PathBuf {
    notes_dir.join(".quill").join("notes.db")
}

/// Opens the note service over the notes directory's database.
pub fn open_service(notes_dir: &Path) -> Result<NoteService<SqliteStore>> {
    let db_path = store_db_path(notes_dir);
    let store = SqliteStore::open(&db_path)
        .with_context(|| format!("failed to open database at {}", db_path.display()))?;
    NoteService::open(store).with_context(|| "failed to load notes")
}

pub fn handle_completions(args: &CompletionsArgs) -> Result<()> {
    let mut cmd = Cli::command();
    clap_complete::generate(args.shell, &mut cmd, "quill", &mut std::io::stdout());
    Ok(())
}

/// Prints notes as an ID / title / modified table.
pub(crate) fn print_note_table(notes: &[Note]) {
    if notes.is_empty() {
        println!("No notes found.");
        return;
    }

    println!("{:<10}  {:<50}  {:>10}", "ID", "Title", "Modified");
    println!(
        "{:<10}  {:<50}  {:>10}",
        "----------",
        "--------------------------------------------------",
        "----------"
    );

    for note in notes {
        let title = truncate_str(note.title(), 50);
        let modified = note.modified().format("%Y-%m-%d").to_string();
        println!("{:<10}  {:<50}  {:>10}", note.id().prefix(), title, modified);
    }

    println!();
    println!("{} note(s)", notes.len());
}

/// Truncates a string to a maximum display width, adding ellipsis if needed.
pub(crate) fn truncate_str(s: &str, max_width: usize) -> String {
    if s.chars().count() <= max_width {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max_width.saturating_sub(1)).collect();
        format!("{}…", truncated)
    }
}
