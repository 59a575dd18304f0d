//! Show, Edit and Rm command handlers.

use anyhow::{Context, Result, bail};
use std::path::Path;
use std::process::Command;

use super::resolve::require_note;
use crate::cli::config::Config;
use crate::cli::output::{NoteDetail, OutputFormat, print_json};
use crate::cli::{EditArgs, RmArgs, ShowArgs};
use crate::domain::{NotePatch, parse_tags};
use crate::service::NoteService;
use crate::store::NoteStore;

pub fn handle_show<S: NoteStore>(
    args: &ShowArgs,
    service: &NoteService<S>,
    format: OutputFormat,
) -> Result<()> {
    let note = require_note(service, &args.note)?;
    let references = service.outgoing_references(note.id())?;
    let backlinks = service.backlinks_for(note.id());

    match format {
        OutputFormat::Human => {
            println!("# {}", note.title());
            println!();
            println!(
                "ID: {}  Created: {}  Modified: {}",
                note.id(),
                note.created().format("%Y-%m-%d %H:%M"),
                note.modified().format("%Y-%m-%d %H:%M")
            );

            if !note.tags().is_empty() {
                let tags: Vec<_> = note.tags().iter().map(|t| t.as_str()).collect();
                println!("Tags: {}", tags.join(", "));
            }
            if !references.is_empty() {
                let ids: Vec<_> = references.iter().map(|id| id.to_string()).collect();
                println!("References: {}", ids.join(", "));
            }
            if !backlinks.is_empty() {
                let ids: Vec<_> = backlinks.iter().map(|id| id.to_string()).collect();
                println!("Backlinks: {}", ids.join(", "));
            }

            println!();
            if !note.body().is_empty() {
                println!("{}", note.body());
            }
        }
        OutputFormat::Json => print_json(NoteDetail {
            note: &note,
            references,
            backlinks,
        })?,
    }

    Ok(())
}

/// Trait for launching an editor (allows mocking in tests).
pub(crate) trait EditorLauncher {
    fn open(&self, path: &Path) -> Result<()>;
}

/// Builds the patch for `edit`, launching the editor on the body when no
/// field options are given.
pub(crate) fn handle_edit_impl<S: NoteStore, E: EditorLauncher>(
    args: &EditArgs,
    service: &NoteService<S>,
    editor: &E,
) -> Result<()> {
    let note = require_note(service, &args.note)?;

    let patch = if args.has_changes() {
        let mut patch = NotePatch::new();
        if let Some(title) = &args.title {
            patch = patch.title(title);
        }
        if let Some(body) = &args.body {
            patch = patch.body(body);
        }
        if args.clear_tags {
            patch = patch.tags(Vec::new());
        } else if !args.tags.is_empty() {
            patch = patch.tags(parse_tags(&args.tags)?);
        }
        patch
    } else {
        let file = tempfile::Builder::new()
            .prefix("quill-")
            .suffix(".md")
            .tempfile()
            .with_context(|| "failed to create temporary file for editing")?;
        std::fs::write(file.path(), note.body())
            .with_context(|| format!("failed to write {}", file.path().display()))?;

        editor.open(file.path())?;

        let body = std::fs::read_to_string(file.path())
            .with_context(|| format!("failed to read {}", file.path().display()))?;
        if body == note.body() {
            println!("No changes: {} [{}]", note.title(), note.id());
            return Ok(());
        }
        NotePatch::new().body(body)
    };

    service.update_note(note.id(), patch)?;
    let edited = service.get_note(note.id())?;
    println!("Edited: {} [{}]", edited.title(), edited.id());
    Ok(())
}

pub fn handle_edit<S: NoteStore>(
    args: &EditArgs,
    service: &NoteService<S>,
    config: &Config,
) -> Result<()> {
    struct RealEditor<'a>(&'a Config);
    impl EditorLauncher for RealEditor<'_> {
        fn open(&self, path: &Path) -> Result<()> {
            open_in_editor(path, self.0)
        }
    }
    handle_edit_impl(args, service, &RealEditor(config))
}

/// Opens a file in the user's configured editor.
fn open_in_editor(path: &Path, config: &Config) -> Result<()> {
    let editor = config.editor();

    // Editor command may include args like "code --wait"
    let mut parts = editor.split_whitespace();
    let Some(cmd) = parts.next() else {
        bail!("editor command is empty");
    };

    let status = Command::new(cmd)
        .args(parts)
        .arg(path)
        .status()
        .with_context(|| format!("failed to launch editor '{}'", editor))?;

    if !status.success() {
        bail!("editor '{}' exited with non-zero status", editor);
    }

    Ok(())
}

pub fn handle_rm<S: NoteStore>(args: &RmArgs, service: &NoteService<S>) -> Result<()> {
    let note = require_note(service, &args.note)?;
    let backlinks = service.backlinks_for(note.id());

    service.delete_note(note.id())?;

    println!("Deleted: {} [{}]", note.title(), note.id());
    if !backlinks.is_empty() {
        println!(
            "  {} note(s) still reference it: {}",
            backlinks.len(),
            backlinks
                .iter()
                .map(|id| id.to_string())
                .collect::<Vec<_>>()
                .join(", ")
        );
    }
    Ok(())
}
