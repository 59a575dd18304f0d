//! List and Tags command handlers.

use anyhow::Result;

use super::print_note_table;
use crate::cli::output::{NoteListing, OutputFormat, TagListing, print_json};
use crate::cli::{ListArgs, TagsArgs};
use crate::service::NoteService;
use crate::store::NoteStore;

pub fn handle_list<S: NoteStore>(
    args: &ListArgs,
    service: &NoteService<S>,
    format: OutputFormat,
) -> Result<()> {
    // Empty query text: every note, or those carrying all the given tags,
    // most recently modified first.
    let notes = service.search("", &args.tags)?;

    match format {
        OutputFormat::Human => print_note_table(&notes),
        OutputFormat::Json => {
            let listings: Vec<NoteListing> = notes.iter().map(NoteListing::from).collect();
            print_json(listings)?;
        }
    }

    Ok(())
}

pub fn handle_tags<S: NoteStore>(
    args: &TagsArgs,
    service: &NoteService<S>,
    format: OutputFormat,
) -> Result<()> {
    let tags = service.all_tags();

    match format {
        OutputFormat::Human => {
            if tags.is_empty() {
                println!("No tags found.");
            }
            for tag in &tags {
                if args.counts {
                    println!("{:<30}  {:>5}", tag.tag().as_str(), tag.count());
                } else {
                    println!("{}", tag.tag());
                }
            }
        }
        OutputFormat::Json => {
            let listings: Vec<TagListing> = tags
                .iter()
                .map(|t| TagListing::new(t, args.counts))
                .collect();
            print_json(listings)?;
        }
    }

    Ok(())
}
