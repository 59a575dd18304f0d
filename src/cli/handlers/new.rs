//! New note command handler.

use anyhow::{Context, Result};

use crate::cli::NewArgs;
use crate::cli::output::{NoteListing, OutputFormat, print_json};
use crate::domain::{Note, NoteId};
use crate::service::NoteService;
use crate::store::NoteStore;

/// Creates a note from the given arguments and returns it.
pub(crate) fn create_new_note<S: NoteStore>(
    service: &NoteService<S>,
    args: &NewArgs,
) -> Result<Note> {
    let id = match &args.id {
        Some(raw) => {
            let id: NoteId = raw.parse()?;
            service.create_note_with_id(id, &args.title, &args.body, &args.tags)?
        }
        None => service.create_note(&args.title, &args.body, &args.tags)?,
    };

    service
        .get_note(&id)
        .with_context(|| format!("note {} vanished after creation", id))
}

pub fn handle_new<S: NoteStore>(
    args: &NewArgs,
    service: &NoteService<S>,
    format: OutputFormat,
) -> Result<()> {
    let note = create_new_note(service, args)?;

    match format {
        OutputFormat::Human => {
            println!("Created: {} [{}]", note.title(), note.id());
            let dangling: Vec<_> = note
                .references()
                .into_iter()
                .filter(|target| service.get_note(target).is_err())
                .map(|target| target.to_string())
                .collect();
            if !dangling.is_empty() {
                println!("  references notes not yet created: {}", dangling.join(", "));
            }
        }
        OutputFormat::Json => print_json(NoteListing::from(&note))?,
    }

    Ok(())
}
