//! Persistent notes store.
//!
//! # Responsibility
//! - Restore the snapshot from durable storage once at open.
//! - Apply store commands to the in-memory state.
//! - Write the full snapshot back after every applied mutation.
//!
//! # Invariants
//! - A missing or malformed record never fails `open`; the seed state is used.
//! - A record that could not be read is left in place; `open` never writes
//!   over it.
//! - Persistence failures are logged and swallowed; in-memory state stands.
//! - Commands that change nothing do not write.
//!
//! Log events carry counts and error codes only, never note text.

use super::{Clock, NotesStore, SystemClock};
use crate::model::category::{Category, CategoryPatch, NewCategory};
use crate::model::ids::EntityId;
use crate::model::note::{NewNote, Note, NotePatch};
use crate::model::tag::{NewTag, Tag, TagPatch};
use crate::state::NotesState;
use crate::storage::{
    decode_state, encode_state, StateCodecError, StateStorage, StorageError, STORAGE_KEY,
};
use log::{debug, error, info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// How the startup state was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// Decoded from the durable record.
    Restored,
    /// No record existed; seed state used.
    Seeded,
    /// The record could not be decoded; seed state used.
    RecoveredFromMalformed,
    /// Storage failed to read the record; seed state used, record untouched.
    ReadFailed,
}

/// Swallowed persistence failure, kept for diagnostics.
#[derive(Debug)]
pub enum PersistError {
    Codec(StateCodecError),
    Storage(StorageError),
}

impl Display for PersistError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Codec(err) => write!(f, "{err}"),
            Self::Storage(err) => write!(f, "{err}"),
        }
    }
}

impl Error for PersistError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Codec(err) => Some(err),
            Self::Storage(err) => Some(err),
        }
    }
}

/// Notes store backed by a [`StateStorage`] record.
pub struct PersistentNotesStore<S: StateStorage, C: Clock = SystemClock> {
    state: NotesState,
    storage: S,
    clock: C,
    key: String,
    load_outcome: LoadOutcome,
    last_persist_error: Option<PersistError>,
}

impl<S: StateStorage> PersistentNotesStore<S, SystemClock> {
    /// Opens the store under the default key using the wall clock.
    pub fn open(storage: S) -> Self {
        Self::open_with(storage, SystemClock, STORAGE_KEY)
    }
}

impl<S: StateStorage, C: Clock> PersistentNotesStore<S, C> {
    /// Opens the store, restoring state stored under `key`.
    ///
    /// A seeded or recovered state is written back immediately so a malformed
    /// record is replaced by the seed. After a read failure nothing is written.
    pub fn open_with(storage: S, clock: C, key: impl Into<String>) -> Self {
        let key = key.into();
        let (state, load_outcome) = load_initial_state(&storage, &key);
        let mut store = Self {
            state,
            storage,
            clock,
            key,
            load_outcome,
            last_persist_error: None,
        };
        match load_outcome {
            LoadOutcome::Seeded | LoadOutcome::RecoveredFromMalformed => {
                store.persist("state_seed");
            }
            LoadOutcome::Restored | LoadOutcome::ReadFailed => {}
        }
        store
    }

    pub fn snapshot(&self) -> &NotesState {
        &self.state
    }

    pub fn load_outcome(&self) -> LoadOutcome {
        self.load_outcome
    }

    /// Returns the most recent swallowed write failure, cleared by the next
    /// successful write.
    pub fn last_persist_error(&self) -> Option<&PersistError> {
        self.last_persist_error.as_ref()
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn storage_key(&self) -> &str {
        &self.key
    }

    /// Consumes the store and returns its storage.
    pub fn into_storage(self) -> S {
        self.storage
    }

    fn persist(&mut self, event: &'static str) {
        let encoded = match encode_state(&self.state) {
            Ok(encoded) => encoded,
            Err(err) => {
                error!(
                    "event=state_persist module=store status=error trigger={} error_code=encode_failed error={}",
                    event, err
                );
                self.last_persist_error = Some(PersistError::Codec(err));
                return;
            }
        };

        match self.storage.write(&self.key, &encoded) {
            Ok(()) => {
                debug!(
                    "event=state_persist module=store status=ok trigger={} bytes={}",
                    event,
                    encoded.len()
                );
                self.last_persist_error = None;
            }
            Err(err) => {
                warn!(
                    "event=state_persist module=store status=error trigger={} bytes={} error_code=write_failed error={}",
                    event,
                    encoded.len(),
                    err
                );
                self.last_persist_error = Some(PersistError::Storage(err));
            }
        }
    }

    fn commit(&mut self, event: &'static str, applied: bool) -> bool {
        if applied {
            self.persist(event);
        } else {
            debug!(
                "event={} module=store status=skipped reason=unknown_id",
                event
            );
        }
        applied
    }
}

impl<S: StateStorage, C: Clock> NotesStore for PersistentNotesStore<S, C> {
    fn notes(&self) -> &[Note] {
        &self.state.notes
    }

    fn tags(&self) -> &[Tag] {
        &self.state.tags
    }

    fn categories(&self) -> &[Category] {
        &self.state.categories
    }

    fn add_note(&mut self, fields: NewNote) -> EntityId {
        let id = EntityId::generate();
        let note = Note::from_new(id.clone(), fields, self.clock.now());
        self.state.insert_note(note);
        self.persist("note_add");
        id
    }

    fn update_note(&mut self, id: &EntityId, patch: NotePatch) -> bool {
        let now = self.clock.now();
        let applied = self.state.update_note(id, patch, now);
        self.commit("note_update", applied)
    }

    fn delete_note(&mut self, id: &EntityId) -> bool {
        let applied = self.state.remove_note(id);
        self.commit("note_delete", applied)
    }

    fn add_tag(&mut self, fields: NewTag) -> EntityId {
        let id = EntityId::generate();
        self.state.insert_tag(Tag::from_new(id.clone(), fields));
        self.persist("tag_add");
        id
    }

    fn update_tag(&mut self, id: &EntityId, patch: TagPatch) -> bool {
        let applied = self.state.update_tag(id, patch);
        self.commit("tag_update", applied)
    }

    fn delete_tag(&mut self, id: &EntityId) -> bool {
        let repaired = self.state.remove_tag(id);
        if let Some(notes_touched) = repaired {
            info!(
                "event=tag_delete module=store status=ok notes_touched={}",
                notes_touched
            );
        }
        self.commit("tag_delete", repaired.is_some())
    }

    fn add_category(&mut self, fields: NewCategory) -> EntityId {
        let id = EntityId::generate();
        self.state
            .insert_category(Category::from_new(id.clone(), fields));
        self.persist("category_add");
        id
    }

    fn update_category(&mut self, id: &EntityId, patch: CategoryPatch) -> bool {
        let applied = self.state.update_category(id, patch);
        self.commit("category_update", applied)
    }

    fn delete_category(&mut self, id: &EntityId) -> bool {
        let repointed = self.state.remove_category(id);
        if let Some(notes_touched) = repointed {
            info!(
                "event=category_delete module=store status=ok notes_touched={}",
                notes_touched
            );
        }
        self.commit("category_delete", repointed.is_some())
    }

    fn load_state(&mut self, state: NotesState) {
        self.state = state;
        info!(
            "event=state_replace module=store status=ok notes={} tags={} categories={}",
            self.state.notes.len(),
            self.state.tags.len(),
            self.state.categories.len()
        );
        self.persist("state_replace");
    }
}

fn load_initial_state<S: StateStorage>(storage: &S, key: &str) -> (NotesState, LoadOutcome) {
    let raw = match storage.read(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => {
            info!("event=state_load module=store status=ok source=seed reason=absent");
            return (NotesState::seed(), LoadOutcome::Seeded);
        }
        Err(err) => {
            error!(
                "event=state_load module=store status=error source=seed error_code=storage_read_failed error={}",
                err
            );
            return (NotesState::seed(), LoadOutcome::ReadFailed);
        }
    };

    match decode_state(&raw) {
        Ok(state) => {
            info!(
                "event=state_load module=store status=ok source=storage notes={} tags={} categories={}",
                state.notes.len(),
                state.tags.len(),
                state.categories.len()
            );
            (state, LoadOutcome::Restored)
        }
        Err(err) => {
            error!(
                "event=state_load module=store status=error source=seed error_code=state_malformed bytes={} error={}",
                raw.len(),
                err
            );
            (NotesState::seed(), LoadOutcome::RecoveredFromMalformed)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{LoadOutcome, PersistentNotesStore};
    use crate::model::note::NewNote;
    use crate::state::NotesState;
    use crate::storage::{MemoryStorage, StateStorage, STORAGE_KEY};
    use crate::store::{ManualClock, NotesStore};
    use chrono::{TimeZone, Utc};

    fn clock() -> ManualClock {
        ManualClock::new(Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap())
    }

    #[test]
    fn open_on_empty_storage_writes_seed() {
        let store = PersistentNotesStore::open_with(MemoryStorage::new(), clock(), STORAGE_KEY);

        assert_eq!(store.load_outcome(), LoadOutcome::Seeded);
        assert_eq!(store.snapshot(), &NotesState::seed());
        assert!(store.storage().read(STORAGE_KEY).unwrap().is_some());
    }

    #[test]
    fn unknown_id_does_not_write() {
        let mut store =
            PersistentNotesStore::open_with(MemoryStorage::new(), clock(), STORAGE_KEY);
        let id = store.add_note(NewNote::new("a", "b"));
        let before = store.storage().read(STORAGE_KEY).unwrap();

        assert!(!store.delete_note(&crate::model::ids::EntityId::from("nope")));

        assert_eq!(store.storage().read(STORAGE_KEY).unwrap(), before);
        assert!(store.notes().iter().any(|note| note.id == id));
    }

    #[test]
    fn custom_key_is_used_for_reads_and_writes() {
        let mut store = PersistentNotesStore::open_with(MemoryStorage::new(), clock(), "alt");
        store.add_note(NewNote::new("a", "b"));

        assert_eq!(store.storage_key(), "alt");
        assert!(store.storage().read(STORAGE_KEY).unwrap().is_none());
        assert!(store.storage().read("alt").unwrap().is_some());
    }
}
