//! Search command handler.

use anyhow::{Result, bail};

use super::print_note_table;
use crate::cli::SearchArgs;
use crate::cli::output::{NoteListing, OutputFormat, print_json};
use crate::service::NoteService;
use crate::store::NoteStore;

pub fn handle_search<S: NoteStore>(
    args: &SearchArgs,
    service: &NoteService<S>,
    format: OutputFormat,
) -> Result<()> {
    if args.query.trim().is_empty() {
        bail!("search query cannot be empty; use `quill ls` to list notes");
    }

    let notes = service.search(&args.query, &args.tags)?;

    match format {
        OutputFormat::Human => print_note_table(&notes),
        OutputFormat::Json => {
            let listings: Vec<NoteListing> = notes.iter().map(NoteListing::from).collect();
            print_json(listings)?;
        }
    }

    Ok(())
}
