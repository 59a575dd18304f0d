//! Backlinks command handler.

use anyhow::Result;
use serde::Serialize;

use super::resolve::{ResolveResult, print_ambiguous_notes, resolve_note};
use crate::cli::BacklinksArgs;
use crate::cli::output::{OutputFormat, print_json};
use crate::domain::NoteId;
use crate::service::NoteService;
use crate::store::NoteStore;

/// A note that references the target, for JSON output.
#[derive(Debug, Serialize)]
struct BacklinkListing {
    id: String,
    title: String,
}

/// Resolves the backlinks target.
///
/// An identifier with no active note is still a valid target, since notes
/// may reference one that has not been created yet or was deleted.
fn target_id<S: NoteStore>(service: &NoteService<S>, identifier: &str) -> Result<NoteId> {
    match resolve_note(service, identifier) {
        ResolveResult::Unique(note) => Ok(note.id().clone()),
        ResolveResult::Ambiguous(notes) => {
            print_ambiguous_notes(identifier, &notes);
            anyhow::bail!("ambiguous note identifier");
        }
        ResolveResult::NotFound => Ok(identifier.trim().parse()?),
    }
}

pub fn handle_backlinks<S: NoteStore>(
    args: &BacklinksArgs,
    service: &NoteService<S>,
    format: OutputFormat,
) -> Result<()> {
    let target = target_id(service, &args.note)?;

    let listings: Vec<BacklinkListing> = service
        .backlinks_for(&target)
        .into_iter()
        .map(|id| {
            let title = service
                .get_note(&id)
                .map(|n| n.title().to_string())
                .unwrap_or_default();
            BacklinkListing {
                id: id.to_string(),
                title,
            }
        })
        .collect();

    match format {
        OutputFormat::Human => {
            if listings.is_empty() {
                println!("No backlinks to {}.", target);
            } else {
                println!("Notes referencing {}:", target);
                for listing in &listings {
                    println!("  {}  {}", listing.id, listing.title);
                }
            }
        }
        OutputFormat::Json => print_json(listings)?,
    }

    Ok(())
}
