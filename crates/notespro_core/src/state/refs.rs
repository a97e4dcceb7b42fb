//! Name-based reference helpers between notes, tags and categories.
//!
//! Notes point at tags and categories by name. Every lookup or rewrite that
//! depends on that convention lives here so an id-based scheme only has to
//! change this module.
//!
//! Renaming a tag or category does not touch notes; only deletion repairs
//! references.

use crate::model::category::{Category, FALLBACK_CATEGORY_NAME};
use crate::model::ids::EntityId;
use crate::model::note::Note;
use crate::model::tag::Tag;

pub fn find_tag<'a>(tags: &'a [Tag], id: &EntityId) -> Option<&'a Tag> {
    tags.iter().find(|tag| &tag.id == id)
}

pub fn find_category<'a>(categories: &'a [Category], id: &EntityId) -> Option<&'a Category> {
    categories.iter().find(|category| &category.id == id)
}

pub fn find_note<'a>(notes: &'a [Note], id: &EntityId) -> Option<&'a Note> {
    notes.iter().find(|note| &note.id == id)
}

/// Resolves the category name orphaned notes are moved to.
///
/// Looked up by name at call time; falls back to the literal name when no
/// such category exists.
pub fn fallback_category_name(categories: &[Category]) -> String {
    categories
        .iter()
        .find(|category| category.is_fallback())
        .map(|category| category.name.clone())
        .unwrap_or_else(|| FALLBACK_CATEGORY_NAME.to_string())
}

/// Returns whether `note` carries a tag with exactly this name.
pub fn note_has_tag(note: &Note, tag_name: &str) -> bool {
    note.tags.iter().any(|name| name == tag_name)
}

/// Removes every occurrence of `tag_name` from all notes.
///
/// Returns the number of notes whose tag list changed.
pub fn strip_tag_name(notes: &mut [Note], tag_name: &str) -> usize {
    let mut touched = 0;
    for note in notes.iter_mut() {
        let before = note.tags.len();
        note.tags.retain(|name| name != tag_name);
        if note.tags.len() != before {
            touched += 1;
        }
    }
    touched
}

/// Re-points notes filed under `from` to `to`.
///
/// Returns the number of notes rewritten.
pub fn repoint_category(notes: &mut [Note], from: &str, to: &str) -> usize {
    let mut touched = 0;
    for note in notes.iter_mut().filter(|note| note.category == from) {
        note.category = to.to_string();
        touched += 1;
    }
    touched
}

/// Case-insensitive tag name collision check, optionally ignoring one tag.
pub fn tag_name_taken(tags: &[Tag], name: &str, except: Option<&EntityId>) -> bool {
    let wanted = name.trim().to_lowercase();
    tags.iter()
        .filter(|tag| Some(&tag.id) != except)
        .any(|tag| tag.name.trim().to_lowercase() == wanted)
}

/// Case-insensitive category name collision check, optionally ignoring one category.
pub fn category_name_taken(categories: &[Category], name: &str, except: Option<&EntityId>) -> bool {
    let wanted = name.trim().to_lowercase();
    categories
        .iter()
        .filter(|category| Some(&category.id) != except)
        .any(|category| category.name.trim().to_lowercase() == wanted)
}
