//! Ranked search over notes and the tag index.

use super::{CancelFlag, QueryError, QueryResult};
use crate::domain::{Note, Tag};
use crate::index::Snapshot;
use crate::infra::plain_text;
use std::cmp::Reverse;

/// A search request: free text plus a tag filter.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchQuery {
    text: String,
    tags: Vec<Tag>,
}

impl SearchQuery {
    /// Creates a query. Surrounding whitespace in `text` is ignored and
    /// duplicate tags are dropped.
    pub fn new(text: impl Into<String>, tags: Vec<Tag>) -> Self {
        let text = text.into().trim().to_string();
        let mut unique = Vec::new();
        for tag in tags {
            if !unique.contains(&tag) {
                unique.push(tag);
            }
        }
        Self { text, tags: unique }
    }

    /// Returns the query text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns the tag filter.
    pub fn tags(&self) -> &[Tag] {
        &self.tags
    }

    fn terms(&self) -> Vec<String> {
        self.text
            .split_whitespace()
            .map(str::to_lowercase)
            .collect()
    }
}

/// Runs a query against a snapshot.
///
/// - Empty text, no tags: every note.
/// - Empty text with tags: notes carrying all of the tags.
/// - Text: notes whose title or body contains every term
///   (case-insensitive). With tags, a note must carry at least one of them.
///
/// Ordering: exact title match first, then number of filter tags carried,
/// then most recently modified, then identifier.
pub fn search(snapshot: &Snapshot, query: &SearchQuery) -> Vec<Note> {
    match run(snapshot, query, None) {
        Ok(notes) => notes,
        Err(QueryError::Cancelled) => Vec::new(),
    }
}

/// Like [`search`], but checks `cancel` between notes.
///
/// # Errors
///
/// Returns `QueryError::Cancelled` if the flag is set before the scan finishes.
pub fn search_with_cancel(
    snapshot: &Snapshot,
    query: &SearchQuery,
    cancel: &CancelFlag,
) -> QueryResult<Vec<Note>> {
    run(snapshot, query, Some(cancel))
}

struct Ranked<'a> {
    note: &'a Note,
    exact_title: bool,
    tag_hits: usize,
}

fn run(
    snapshot: &Snapshot,
    query: &SearchQuery,
    cancel: Option<&CancelFlag>,
) -> QueryResult<Vec<Note>> {
    let check = || match cancel {
        Some(flag) if flag.is_cancelled() => Err(QueryError::Cancelled),
        _ => Ok(()),
    };

    let mut ranked: Vec<Ranked<'_>> = Vec::new();

    if query.text().is_empty() {
        if query.tags().is_empty() {
            for note in snapshot.notes() {
                check()?;
                ranked.push(Ranked { note, exact_title: false, tag_hits: 0 });
            }
        } else {
            let ids = snapshot.derived().tags().notes_with_all(query.tags());
            for id in &ids {
                check()?;
                if let Some(note) = snapshot.get(id) {
                    ranked.push(Ranked {
                        note,
                        exact_title: false,
                        tag_hits: query.tags().len(),
                    });
                }
            }
        }
    } else {
        let terms = query.terms();
        let wanted_title = query.text().to_lowercase();

        for note in snapshot.notes() {
            check()?;

            let tag_hits = query.tags().iter().filter(|t| note.has_tag(t)).count();
            if !query.tags().is_empty() && tag_hits == 0 {
                continue;
            }

            let title = note.title().to_lowercase();
            let haystack = format!("{} {}", title, plain_text(note.body()).to_lowercase());
            if !terms.iter().all(|term| haystack.contains(term.as_str())) {
                continue;
            }

            ranked.push(Ranked {
                note,
                exact_title: title == wanted_title,
                tag_hits,
            });
        }
    }

    ranked.sort_by(|a, b| {
        let key = |r: &Ranked<'_>| {
            (
                Reverse(r.exact_title),
                Reverse(r.tag_hits),
                Reverse(r.note.modified()),
            )
        };
        key(a).cmp(&key(b)).then_with(|| a.note.id().cmp(b.note.id()))
    });

    Ok(ranked.into_iter().map(|r| r.note.clone()).collect())
}
