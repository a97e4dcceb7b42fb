//! In-memory notes state and its pure mutations.
//!
//! # Responsibility
//! - Hold the three entity collections as one snapshot value.
//! - Apply mutations, including the delete cascades that repair notes.
//!
//! # Invariants
//! - Collections keep insertion order.
//! - Mutations addressing an unknown id change nothing and report `false`/`None`.
//! - Name uniqueness and default-tag exclusivity are not enforced here.
//!
//! Identity and time are supplied by the caller so every mutation here is
//! deterministic.

pub mod refs;
pub mod seed;

use crate::model::category::{Category, CategoryPatch};
use crate::model::ids::EntityId;
use crate::model::note::{Note, NotePatch};
use crate::model::tag::{Tag, TagPatch};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Full notes snapshot; also the durable record layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotesState {
    pub notes: Vec<Note>,
    pub tags: Vec<Tag>,
    pub categories: Vec<Category>,
}

impl Default for NotesState {
    fn default() -> Self {
        Self::seed()
    }
}

impl NotesState {
    pub fn new(notes: Vec<Note>, tags: Vec<Tag>, categories: Vec<Category>) -> Self {
        Self {
            notes,
            tags,
            categories,
        }
    }

    /// Returns the seed state: four tags, four categories and no notes.
    pub fn seed() -> Self {
        Self::new(Vec::new(), seed::seed_tags(), seed::seed_categories())
    }

    pub fn insert_note(&mut self, note: Note) {
        self.notes.push(note);
    }

    pub fn update_note(&mut self, id: &EntityId, patch: NotePatch, now: DateTime<Utc>) -> bool {
        match self.notes.iter_mut().find(|note| &note.id == id) {
            Some(note) => {
                note.apply_patch(patch, now);
                true
            }
            None => false,
        }
    }

    pub fn remove_note(&mut self, id: &EntityId) -> bool {
        let before = self.notes.len();
        self.notes.retain(|note| &note.id != id);
        self.notes.len() != before
    }

    pub fn insert_tag(&mut self, tag: Tag) {
        self.tags.push(tag);
    }

    pub fn update_tag(&mut self, id: &EntityId, patch: TagPatch) -> bool {
        match self.tags.iter_mut().find(|tag| &tag.id == id) {
            Some(tag) => {
                tag.apply_patch(patch);
                true
            }
            None => false,
        }
    }

    /// Removes a tag and strips its name from every note.
    ///
    /// Returns the number of notes repaired, or `None` when the id is unknown.
    /// Repaired notes keep their `updated_at`.
    pub fn remove_tag(&mut self, id: &EntityId) -> Option<usize> {
        let position = self.tags.iter().position(|tag| &tag.id == id)?;
        let removed = self.tags.remove(position);
        Some(refs::strip_tag_name(&mut self.notes, &removed.name))
    }

    pub fn insert_category(&mut self, category: Category) {
        self.categories.push(category);
    }

    pub fn update_category(&mut self, id: &EntityId, patch: CategoryPatch) -> bool {
        match self.categories.iter_mut().find(|category| &category.id == id) {
            Some(category) => {
                category.apply_patch(patch);
                true
            }
            None => false,
        }
    }

    /// Removes a category and re-points its notes to the fallback category.
    ///
    /// The fallback name is resolved before removal. Returns the number of
    /// notes re-pointed, or `None` when the id is unknown.
    pub fn remove_category(&mut self, id: &EntityId) -> Option<usize> {
        let position = self
            .categories
            .iter()
            .position(|category| &category.id == id)?;
        let fallback = refs::fallback_category_name(&self.categories);
        let removed = self.categories.remove(position);
        Some(refs::repoint_category(
            &mut self.notes,
            &removed.name,
            &fallback,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::NotesState;
    use crate::model::category::FALLBACK_CATEGORY_NAME;
    use crate::model::ids::EntityId;
    use crate::model::note::{NewNote, Note};
    use crate::model::tag::TagPatch;
    use chrono::Utc;

    #[test]
    fn seed_has_four_tags_four_categories_and_no_notes() {
        let state = NotesState::seed();
        assert!(state.notes.is_empty());
        assert_eq!(state.tags.len(), 4);
        assert_eq!(state.categories.len(), 4);
        assert_eq!(state.tags.iter().filter(|tag| tag.is_default).count(), 1);
        assert_eq!(state.tags[0].name, "Untagged");
        assert_eq!(state.categories[0].name, FALLBACK_CATEGORY_NAME);
    }

    #[test]
    fn deleting_fallback_category_keeps_notes_on_fallback_name() {
        let mut state = NotesState::seed();
        state.insert_note(Note::from_new(
            EntityId::generate(),
            NewNote::new("t", "c"),
            Utc::now(),
        ));

        let touched = state.remove_category(&EntityId::from("1")).unwrap();

        assert_eq!(touched, 1);
        assert_eq!(state.notes[0].category, FALLBACK_CATEGORY_NAME);
        assert_eq!(state.categories.len(), 3);
    }

    #[test]
    fn unknown_ids_report_no_change() {
        let mut state = NotesState::seed();
        let missing = EntityId::from("missing");
        assert!(!state.update_tag(&missing, TagPatch::default()));
        assert!(state.remove_tag(&missing).is_none());
        assert!(state.remove_category(&missing).is_none());
        assert!(!state.remove_note(&missing));
        assert_eq!(state, NotesState::seed());
    }
}
