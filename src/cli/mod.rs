//! CLI command definitions and handlers

pub mod config;
pub mod handlers;
pub mod output;

use clap::{ArgAction, Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

use output::OutputFormat;

/// quill - notes organized by tags and [[references]]
#[derive(Parser, Debug)]
#[command(name = "quill", version, about, long_about = None)]
pub struct Cli {
    /// Notes directory (overrides config file)
    #[arg(short = 'd', long, global = true)]
    pub dir: Option<PathBuf>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create a new note
    New(NewArgs),

    /// Show a note's contents
    Show(ShowArgs),

    /// Edit a note's title, body or tags
    Edit(EditArgs),

    /// Delete a note
    Rm(RmArgs),

    /// List notes, optionally filtered by tags
    #[command(name = "ls")]
    List(ListArgs),

    /// Full-text search across notes
    Search(SearchArgs),

    /// List all tags
    Tags(TagsArgs),

    /// Show notes that reference a given note
    Backlinks(BacklinksArgs),

    /// Verify the tag index and reference graph against stored notes
    Check(CheckArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Arguments for the `new` command
#[derive(Parser, Debug)]
pub struct NewArgs {
    /// Note title
    pub title: String,

    /// Note body; may contain [[id]] references
    #[arg(short, long, default_value = "")]
    pub body: String,

    /// Tag for the note (can be specified multiple times)
    #[arg(short, long = "tag", action = ArgAction::Append)]
    pub tags: Vec<String>,

    /// Use this identifier instead of a generated one
    #[arg(long)]
    pub id: Option<String>,

    /// Output format
    #[arg(short = 'f', long, value_enum)]
    pub format: Option<OutputFormat>,
}

/// Arguments for the `show` command
#[derive(Parser, Debug)]
pub struct ShowArgs {
    /// Note ID, ID prefix or title
    pub note: String,

    /// Output format
    #[arg(short = 'f', long, value_enum)]
    pub format: Option<OutputFormat>,
}

/// Arguments for the `edit` command
///
/// With no field options, the body is opened in the configured editor.
#[derive(Parser, Debug)]
pub struct EditArgs {
    /// Note ID, ID prefix or title
    pub note: String,

    /// New title
    #[arg(long)]
    pub title: Option<String>,

    /// New body
    #[arg(short, long)]
    pub body: Option<String>,

    /// Replace all tags (can be specified multiple times)
    #[arg(short, long = "tag", action = ArgAction::Append)]
    pub tags: Vec<String>,

    /// Remove all tags
    #[arg(long, conflicts_with = "tags")]
    pub clear_tags: bool,
}

impl EditArgs {
    /// Returns true if any field option was given.
    pub fn has_changes(&self) -> bool {
        self.title.is_some() || self.body.is_some() || !self.tags.is_empty() || self.clear_tags
    }
}

/// Arguments for the `rm` command
#[derive(Parser, Debug)]
pub struct RmArgs {
    /// Note ID, ID prefix or title
    pub note: String,
}

/// Arguments for the `ls` (list) command
#[derive(Parser, Debug)]
pub struct ListArgs {
    /// Filter by tag (can be specified multiple times; all must match)
    #[arg(short, long = "tag", action = ArgAction::Append)]
    pub tags: Vec<String>,

    /// Output format
    #[arg(short = 'f', long, value_enum)]
    pub format: Option<OutputFormat>,
}

/// Arguments for the `search` command
#[derive(Parser, Debug)]
pub struct SearchArgs {
    /// Search query (every word must match)
    pub query: String,

    /// Restrict results to notes with any of these tags
    #[arg(short, long = "tag", action = ArgAction::Append)]
    pub tags: Vec<String>,

    /// Output format
    #[arg(short = 'f', long, value_enum)]
    pub format: Option<OutputFormat>,
}

/// Arguments for the `tags` command
#[derive(Parser, Debug)]
pub struct TagsArgs {
    /// Show note counts for each tag
    #[arg(long)]
    pub counts: bool,

    /// Output format
    #[arg(short = 'f', long, value_enum)]
    pub format: Option<OutputFormat>,
}

/// Arguments for the `backlinks` command
#[derive(Parser, Debug)]
pub struct BacklinksArgs {
    /// Note ID, ID prefix or title; a not-yet-created ID also works
    pub note: String,

    /// Output format
    #[arg(short = 'f', long, value_enum)]
    pub format: Option<OutputFormat>,
}

/// Arguments for the `check` command
#[derive(Parser, Debug)]
pub struct CheckArgs {
    /// Rebuild the index if issues are found
    #[arg(long)]
    pub fix: bool,

    /// Output format
    #[arg(short = 'f', long, value_enum)]
    pub format: Option<OutputFormat>,
}

/// Arguments for the `completions` command
#[derive(Parser, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for (bash, zsh, fish)
    #[arg(value_enum)]
    pub shell: Shell,
}
