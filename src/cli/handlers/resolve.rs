//! Note resolution utilities.

use crate::domain::{Note, NoteId};
use crate::service::NoteService;
use crate::store::NoteStore;

/// Shortest input treated as an ID prefix.
const MIN_PREFIX_LEN: usize = 4;

/// Result of resolving a note identifier.
#[derive(Debug)]
pub enum ResolveResult {
    /// Exactly one note matched.
    Unique(Note),
    /// Multiple notes matched (ambiguous).
    Ambiguous(Vec<Note>),
    /// No notes matched.
    NotFound,
}

/// Prints the candidates of an ambiguous match to stderr.
pub(crate) fn print_ambiguous_notes(identifier: &str, notes: &[Note]) {
    eprintln!("Ambiguous: '{}' matches {} notes:", identifier, notes.len());
    for note in notes {
        eprintln!("  {} - {}", note.id(), note.title());
        if !note.tags().is_empty() {
            let tags: Vec<_> = note.tags().iter().map(|t| t.as_str()).collect();
            eprintln!("      tags: {}", tags.join(", "));
        }
    }
    eprintln!();
    eprintln!("Use the full ID to specify which note you mean.");
}

/// Resolves user input to a unique active note.
///
/// Resolution order:
/// 1. Exact ID match
/// 2. ID prefix match (4+ characters)
/// 3. Case-insensitive exact title match
///
/// An exact ID always wins; otherwise prefix and title matches are pooled.
pub fn resolve_note<S: NoteStore>(service: &NoteService<S>, identifier: &str) -> ResolveResult {
    let identifier = identifier.trim();

    if let Ok(id) = identifier.parse::<NoteId>()
        && let Ok(note) = service.get_note(&id)
    {
        return ResolveResult::Unique(note);
    }

    let snapshot = service.snapshot();
    let by_prefix = identifier.len() >= MIN_PREFIX_LEN;
    let mut candidates: Vec<Note> = snapshot
        .notes()
        .filter(|n| {
            (by_prefix && n.id().as_str().starts_with(identifier))
                || n.title().eq_ignore_ascii_case(identifier)
        })
        .cloned()
        .collect();

    match candidates.len() {
        0 => ResolveResult::NotFound,
        1 => candidates
            .pop()
            .map_or(ResolveResult::NotFound, ResolveResult::Unique),
        _ => ResolveResult::Ambiguous(candidates),
    }
}

/// Resolves `identifier` or fails with a user-facing error.
pub(crate) fn require_note<S: NoteStore>(
    service: &NoteService<S>,
    identifier: &str,
) -> anyhow::Result<Note> {
    match resolve_note(service, identifier) {
        ResolveResult::Unique(note) => Ok(note),
        ResolveResult::Ambiguous(notes) => {
            print_ambiguous_notes(identifier, &notes);
            anyhow::bail!("ambiguous note identifier");
        }
        ResolveResult::NotFound => anyhow::bail!("note not found: '{}'", identifier),
    }
}
