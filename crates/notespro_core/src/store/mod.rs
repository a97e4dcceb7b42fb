//! Notes store contract and its persistent implementation.
//!
//! # Responsibility
//! - Define the injectable store interface consumed by services and front ends.
//! - Synchronize the in-memory snapshot with durable storage.
//!
//! # Invariants
//! - No store operation fails; unknown ids are no-ops.
//! - A persisted snapshot always reflects a fully applied mutation.

mod clock;
mod persistent;

pub use clock::{Clock, ManualClock, SystemClock};
pub use persistent::{LoadOutcome, PersistError, PersistentNotesStore};

use crate::model::category::{Category, CategoryPatch, NewCategory};
use crate::model::ids::EntityId;
use crate::model::note::{NewNote, Note, NotePatch};
use crate::model::tag::{NewTag, Tag, TagPatch};
use crate::state::NotesState;

/// Store interface: three read accessors plus the mutation commands.
///
/// Mutations returning `bool` report whether the id was found; `false` means
/// nothing changed.
pub trait NotesStore {
    fn notes(&self) -> &[Note];
    fn tags(&self) -> &[Tag];
    fn categories(&self) -> &[Category];

    /// Appends a new note with a fresh id and `created_at == updated_at == now`.
    fn add_note(&mut self, fields: NewNote) -> EntityId;
    /// Merges `patch` into the note and refreshes `updated_at`.
    fn update_note(&mut self, id: &EntityId, patch: NotePatch) -> bool;
    fn delete_note(&mut self, id: &EntityId) -> bool;

    fn add_tag(&mut self, fields: NewTag) -> EntityId;
    /// Renames do not rewrite notes that reference the old name.
    fn update_tag(&mut self, id: &EntityId, patch: TagPatch) -> bool;
    /// Removes the tag and its name from every note.
    fn delete_tag(&mut self, id: &EntityId) -> bool;

    fn add_category(&mut self, fields: NewCategory) -> EntityId;
    /// Renames do not rewrite notes that reference the old name.
    fn update_category(&mut self, id: &EntityId, patch: CategoryPatch) -> bool;
    /// Removes the category and re-points its notes to the fallback category.
    fn delete_category(&mut self, id: &EntityId) -> bool;

    /// Replaces the entire state at once.
    fn load_state(&mut self, state: NotesState);
}
