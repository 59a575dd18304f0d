//! NoteService: orchestrates store writes with tag index and graph updates.

use super::clock::{Clock, SystemClock};
use super::error::{NoteError, NoteResult};
use crate::domain::{Note, NoteId, NotePatch, Reference, parse_tags};
use crate::index::{ConsistencyError, ConsistencyReport, DerivedState, Snapshot, TagWithCount};
use crate::infra::Fingerprint;
use crate::query::{self, CancelFlag, SearchQuery};
use crate::store::{NoteStore, PutOutcome};
use chrono::{DateTime, Duration, Utc};
use std::collections::{BTreeMap, BTreeSet};
use std::sync::{Mutex, MutexGuard, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Entry point for every note operation.
///
/// Owns the store and an in-memory [`Snapshot`] (notes, tag index,
/// reference graph). All mutations take the snapshot's write lock, write
/// the store, and only then update the snapshot, so a failed store write
/// leaves everything unchanged and readers never observe a note without its
/// index entries. Reads take the read lock and return owned copies.
///
/// Lock order is always snapshot first, then store.
///
/// # Examples
///
/// ```
/// use quill::service::NoteService;
/// use quill::store::MemoryStore;
///
/// let service = NoteService::open(MemoryStore::new()).unwrap();
/// let a = service.create_note("A", "see [[B]]", &["#idea"]).unwrap();
///
/// let backlinks = service.backlinks_for(&"B".parse().unwrap());
/// assert_eq!(backlinks, vec![a]);
/// ```
pub struct NoteService<S> {
    state: RwLock<Snapshot>,
    store: Mutex<S>,
    clock: Box<dyn Clock>,
}

impl<S: NoteStore> NoteService<S> {
    // ===========================================
    // Construction
    // ===========================================

    /// Opens the service over a store, rebuilding derived state from a full scan.
    pub fn open(store: S) -> NoteResult<Self> {
        Self::with_clock(store, SystemClock)
    }

    /// Opens the service with a custom time source.
    pub fn with_clock(store: S, clock: impl Clock + 'static) -> NoteResult<Self> {
        let snapshot = Snapshot::from_notes(store.list()?);
        tracing::info!(
            notes = snapshot.len(),
            tags = snapshot.derived().tags().len(),
            references = snapshot.derived().graph().edge_count(),
            "rebuilt derived state from store"
        );

        Ok(Self {
            state: RwLock::new(snapshot),
            store: Mutex::new(store),
            clock: Box::new(clock),
        })
    }

    // ===========================================
    // Mutations
    // ===========================================

    /// Creates a note with a fresh identifier.
    ///
    /// # Errors
    ///
    /// `NoteError::Validation` if the title is empty or a tag is invalid.
    pub fn create_note<T: AsRef<str>>(
        &self,
        title: &str,
        body: &str,
        tags: &[T],
    ) -> NoteResult<NoteId> {
        self.insert(NoteId::new(), title, body, tags)
    }

    /// Creates a note under a caller-chosen identifier.
    ///
    /// This is how a dangling reference such as `[[B]]` gets its target.
    ///
    /// # Errors
    ///
    /// `NoteError::Validation` if the input is invalid, the identifier is
    /// already active, or it belonged to a deleted note.
    pub fn create_note_with_id<T: AsRef<str>>(
        &self,
        id: NoteId,
        title: &str,
        body: &str,
        tags: &[T],
    ) -> NoteResult<NoteId> {
        self.insert(id, title, body, tags)
    }

    fn insert<T: AsRef<str>>(
        &self,
        id: NoteId,
        title: &str,
        body: &str,
        tags: &[T],
    ) -> NoteResult<NoteId> {
        let tags = parse_tags(tags).map_err(NoteError::validation)?;
        let now = self.clock.now();
        let note = Note::builder(id.clone(), title, now, now)
            .body(body)
            .tags(tags)
            .build()
            .map_err(NoteError::validation)?;

        let mut state = self.write_state();
        let mut store = self.lock_store();

        if state.contains(&id) || store.get(&id)?.is_some() {
            return Err(NoteError::Validation(format!("note {} already exists", id)));
        }
        if store.is_retired(&id)? {
            return Err(NoteError::Validation(format!(
                "note {} was deleted and its identifier cannot be reused",
                id
            )));
        }
        match store.put(&note)? {
            PutOutcome::Applied => {}
            PutOutcome::Superseded => return Err(NoteError::Superseded { id }),
            PutOutcome::Retired => {
                return Err(NoteError::Validation(format!(
                    "note {} was deleted and its identifier cannot be reused",
                    id
                )));
            }
        }
        drop(store);

        tracing::debug!(id = %id, tags = note.tags().len(), "created note");
        state.put(note);
        Ok(id)
    }

    /// Applies a partial update to an active note.
    ///
    /// `modified` always moves strictly forward; `created` never changes.
    ///
    /// # Errors
    ///
    /// - `NoteError::NotFound` if the note is not active, including when
    ///   another writer deleted it; the cached copy is then dropped
    /// - `NoteError::Validation` if the patched title is empty
    /// - `NoteError::Superseded` if the store holds a newer version, in
    ///   which case the cached copy is refreshed from the store
    pub fn update_note(&self, id: &NoteId, patch: NotePatch) -> NoteResult<()> {
        let mut state = self.write_state();

        let current = state.get(id).ok_or_else(|| NoteError::not_found(id))?;
        let modified = self.next_modified(current.modified());
        let updated = current
            .apply(&patch, modified)
            .map_err(NoteError::validation)?;

        let mut store = self.lock_store();
        match store.put(&updated)? {
            PutOutcome::Applied => {}
            PutOutcome::Superseded => {
                tracing::warn!(id = %id, "update superseded by newer stored version");
                if let Some(stored) = store.get(id)? {
                    state.put(stored);
                }
                return Err(NoteError::Superseded { id: id.clone() });
            }
            PutOutcome::Retired => {
                tracing::warn!(id = %id, "update targets a note deleted by another writer");
                state.remove(id);
                return Err(NoteError::not_found(id));
            }
        }
        drop(store);

        tracing::debug!(id = %id, "updated note");
        state.put(updated);
        Ok(())
    }

    /// Deletes an active note.
    ///
    /// Its tag entries and outgoing references go away. References from
    /// other notes stay in place and become dangling.
    ///
    /// # Errors
    ///
    /// `NoteError::NotFound` if the note is not active.
    pub fn delete_note(&self, id: &NoteId) -> NoteResult<()> {
        let mut state = self.write_state();
        if !state.contains(id) {
            return Err(NoteError::not_found(id));
        }

        let removed = self.lock_store().delete(id)?;
        if !removed {
            tracing::warn!(id = %id, "deleted note was cached but missing from store");
        }

        state.remove(id);
        tracing::debug!(id = %id, "deleted note");
        Ok(())
    }

    // ===========================================
    // Reads
    // ===========================================

    /// Returns a copy of an active note.
    ///
    /// # Errors
    ///
    /// `NoteError::NotFound` if the note is not active.
    pub fn get_note(&self, id: &NoteId) -> NoteResult<Note> {
        self.read_state()
            .get(id)
            .cloned()
            .ok_or_else(|| NoteError::not_found(id))
    }

    /// Lists all notes, most recently modified first.
    pub fn list_notes(&self) -> Vec<Note> {
        query::search(&self.read_state(), &SearchQuery::default())
    }

    /// Searches notes by text and tags. See [`query::search`] for ranking.
    ///
    /// # Errors
    ///
    /// `NoteError::Validation` if a tag is invalid.
    pub fn search<T: AsRef<str>>(&self, text: &str, tags: &[T]) -> NoteResult<Vec<Note>> {
        let query = SearchQuery::new(text, parse_tags(tags).map_err(NoteError::validation)?);
        Ok(query::search(&self.read_state(), &query))
    }

    /// Searches like [`search`](Self::search), stopping early if `cancel` is set.
    ///
    /// # Errors
    ///
    /// `NoteError::Validation` for invalid tags, `NoteError::Query` if cancelled.
    pub fn search_with_cancel<T: AsRef<str>>(
        &self,
        text: &str,
        tags: &[T],
        cancel: &CancelFlag,
    ) -> NoteResult<Vec<Note>> {
        let query = SearchQuery::new(text, parse_tags(tags).map_err(NoteError::validation)?);
        Ok(query::search_with_cancel(&self.read_state(), &query, cancel)?)
    }

    /// Returns the notes whose bodies reference `id`, ordered by identifier.
    ///
    /// `id` need not exist: references to notes not yet created resolve too.
    pub fn backlinks_for(&self, id: &NoteId) -> Vec<NoteId> {
        self.read_state()
            .derived()
            .graph()
            .backlinks(id)
            .into_iter()
            .collect()
    }

    /// Returns the identifiers an active note references.
    ///
    /// # Errors
    ///
    /// `NoteError::NotFound` if the note is not active.
    pub fn outgoing_references(&self, id: &NoteId) -> NoteResult<Vec<NoteId>> {
        let state = self.read_state();
        if !state.contains(id) {
            return Err(NoteError::not_found(id));
        }
        Ok(state.derived().graph().outgoing(id).into_iter().collect())
    }

    /// Returns every reference whose target is not an active note.
    pub fn dangling_references(&self) -> Vec<Reference> {
        let state = self.read_state();
        state
            .derived()
            .graph()
            .dangling(|target| state.contains(target))
    }

    /// Returns the notes carrying `tag`.
    ///
    /// # Errors
    ///
    /// `NoteError::Validation` if the tag is invalid.
    pub fn notes_for_tag(&self, tag: &str) -> NoteResult<BTreeSet<NoteId>> {
        let tag = tag.parse().map_err(NoteError::validation)?;
        Ok(self.read_state().derived().tags().notes_for_tag(&tag))
    }

    /// Returns every tag in use with its note count.
    pub fn all_tags(&self) -> Vec<TagWithCount> {
        self.read_state().derived().tags().tags_with_counts()
    }

    /// Returns an owned copy of the current notes and derived state.
    pub fn snapshot(&self) -> Snapshot {
        self.read_state().clone()
    }

    /// Returns the fingerprint of the current derived state.
    pub fn fingerprint(&self) -> Fingerprint {
        self.read_state().derived().fingerprint()
    }

    // ===========================================
    // Consistency
    // ===========================================

    /// Compares the in-memory state with a fresh store scan without changing anything.
    pub fn check(&self) -> NoteResult<ConsistencyReport> {
        let state = self.read_state();
        let stored = self.lock_store().list()?;
        Ok(compare(&state, &stored))
    }

    /// Checks consistency and, if anything disagrees, discards the in-memory
    /// state and rebuilds it from the store.
    ///
    /// Each issue is logged at `warn`; none is returned as an error.
    pub fn repair(&self) -> NoteResult<ConsistencyReport> {
        let mut state = self.write_state();
        let stored = self.lock_store().list()?;

        let mut report = compare(&state, &stored);
        if !report.is_consistent() {
            for issue in &report.issues {
                tracing::warn!(%issue, "consistency error");
            }
            *state = Snapshot::from_notes(stored);
            report.repaired = true;
            tracing::info!(
                notes = state.len(),
                issues = report.issues.len(),
                "rebuilt derived state from store"
            );
        }

        Ok(report)
    }

    // ===========================================
    // Internals
    // ===========================================

    fn next_modified(&self, previous: DateTime<Utc>) -> DateTime<Utc> {
        let now = self.clock.now();
        if now > previous {
            now
        } else {
            previous + Duration::milliseconds(1)
        }
    }

    // Mutations stage the fallible store write before touching the
    // snapshot, so a poisoned lock still guards consistent data.
    fn read_state(&self) -> RwLockReadGuard<'_, Snapshot> {
        self.state.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write_state(&self) -> RwLockWriteGuard<'_, Snapshot> {
        self.state.write().unwrap_or_else(|e| e.into_inner())
    }

    fn lock_store(&self) -> MutexGuard<'_, S> {
        self.store.lock().unwrap_or_else(|e| e.into_inner())
    }

    #[cfg(test)]
    pub(crate) fn stored_notes(&self) -> NoteResult<Vec<Note>> {
        Ok(self.lock_store().list()?)
    }

    #[cfg(test)]
    pub(crate) fn corrupt_state(&self, f: impl FnOnce(&mut Snapshot)) {
        f(&mut self.write_state());
    }
}

/// Diffs a snapshot against the notes currently in the store.
fn compare(state: &Snapshot, stored: &[Note]) -> ConsistencyReport {
    let mut issues = Vec::new();

    let by_id: BTreeMap<&NoteId, &Note> = stored.iter().map(|n| (n.id(), n)).collect();
    let ids: BTreeSet<&NoteId> = state.notes().map(Note::id).chain(by_id.keys().copied()).collect();
    for id in ids {
        if state.get(id) != by_id.get(id).copied() {
            issues.push(ConsistencyError::CachedNoteMismatch { id: id.clone() });
        }
    }

    let expected = DerivedState::from_notes(stored.iter());
    issues.extend(state.derived().diff(&expected));

    ConsistencyReport {
        notes_scanned: stored.len(),
        issues,
        repaired: false,
    }
}
