//! Notebook use-case service.
//!
//! # Responsibility
//! - Apply the caller-side rules that guard store commands: required fields,
//!   case-insensitive name uniqueness and protected records.
//! - Maintain single-default tag selection, which the store leaves to callers.
//!
//! # Invariants
//! - Every accepted command reaches the store exactly once per entity touched.
//! - Rejected commands leave the store untouched.
//! - Unknown ids are reported as `NotFound` here even though the store
//!   itself treats them as no-ops.

use crate::model::category::{CategoryPatch, NewCategory, FALLBACK_CATEGORY_NAME};
use crate::model::ids::EntityId;
use crate::model::note::{Difficulty, NewNote, NotePatch};
use crate::model::tag::{NewTag, TagPatch};
use crate::state::refs;
use crate::store::NotesStore;
use log::info;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Colors assigned to new tags and categories, round-robin.
pub const PALETTE: [&str; 8] = [
    "#3B82F6", "#10B981", "#8B5CF6", "#F59E0B", "#EF4444", "#06B6D4", "#84CC16", "#F97316",
];

/// Description stored when a category is saved without one.
pub const EMPTY_DESCRIPTION_PLACEHOLDER: &str = "No description provided";

/// Kind of record named in service errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Note,
    Tag,
    Category,
}

impl Display for EntityKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Note => "note",
            Self::Tag => "tag",
            Self::Category => "category",
        })
    }
}

/// Service error for notebook use-cases.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotebookError {
    TitleRequired,
    ContentRequired,
    NameRequired(EntityKind),
    DuplicateName { kind: EntityKind, name: String },
    NotFound { kind: EntityKind, id: EntityId },
    /// The default tag cannot be deleted.
    DefaultTagProtected(EntityId),
    /// The fallback category cannot be deleted.
    FallbackCategoryProtected(EntityId),
}

impl Display for NotebookError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TitleRequired => write!(f, "title is required"),
            Self::ContentRequired => write!(f, "content is required"),
            Self::NameRequired(kind) => write!(f, "{kind} name is required"),
            Self::DuplicateName { kind, name } => write!(f, "{kind} `{name}` already exists"),
            Self::NotFound { kind, id } => write!(f, "{kind} not found: {id}"),
            Self::DefaultTagProtected(id) => write!(f, "cannot delete default tag {id}"),
            Self::FallbackCategoryProtected(id) => {
                write!(f, "cannot delete fallback category {id}")
            }
        }
    }
}

impl Error for NotebookError {}

pub type NotebookResult<T> = Result<T, NotebookError>;

/// Notebook service facade over an injected store.
pub struct NotebookService<T: NotesStore> {
    store: T,
}

impl<T: NotesStore> NotebookService<T> {
    pub fn new(store: T) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &T {
        &self.store
    }

    /// Creates a note after trimming and validating title and content.
    ///
    /// A blank category files the note under the fallback category.
    pub fn create_note(&mut self, mut fields: NewNote) -> NotebookResult<EntityId> {
        fields.title = required_text(&fields.title, NotebookError::TitleRequired)?;
        fields.content = required_text(&fields.content, NotebookError::ContentRequired)?;
        if fields.category.trim().is_empty() {
            fields.category = FALLBACK_CATEGORY_NAME.to_string();
        }
        Ok(self.store.add_note(fields))
    }

    /// Edits a note. Supplied title/content are trimmed and must stay non-blank.
    ///
    /// An empty patch is accepted without touching the note.
    pub fn edit_note(&mut self, id: &EntityId, mut patch: NotePatch) -> NotebookResult<()> {
        self.require_note(id)?;
        if patch.is_empty() {
            return Ok(());
        }
        if let Some(title) = patch.title.take() {
            patch.title = Some(required_text(&title, NotebookError::TitleRequired)?);
        }
        if let Some(content) = patch.content.take() {
            patch.content = Some(required_text(&content, NotebookError::ContentRequired)?);
        }
        if let Some(category) = patch.category.as_mut() {
            if category.trim().is_empty() {
                *category = FALLBACK_CATEGORY_NAME.to_string();
            }
        }
        self.store.update_note(id, patch);
        Ok(())
    }

    /// Flips the reveal flag and returns the new value.
    pub fn toggle_reveal(&mut self, id: &EntityId) -> NotebookResult<bool> {
        let revealed = !self.require_note(id)?;
        self.store.update_note(
            id,
            NotePatch {
                is_revealed: Some(revealed),
                ..NotePatch::default()
            },
        );
        Ok(revealed)
    }

    pub fn set_difficulty(&mut self, id: &EntityId, difficulty: Difficulty) -> NotebookResult<()> {
        self.require_note(id)?;
        self.store.update_note(
            id,
            NotePatch {
                difficulty: Some(difficulty),
                ..NotePatch::default()
            },
        );
        Ok(())
    }

    pub fn delete_note(&mut self, id: &EntityId) -> NotebookResult<()> {
        self.require_note(id)?;
        self.store.delete_note(id);
        Ok(())
    }

    /// Creates a non-default tag with the next palette color.
    pub fn create_tag(&mut self, name: &str) -> NotebookResult<EntityId> {
        let name = required_text(name, NotebookError::NameRequired(EntityKind::Tag))?;
        if refs::tag_name_taken(self.store.tags(), &name, None) {
            return Err(NotebookError::DuplicateName {
                kind: EntityKind::Tag,
                name,
            });
        }
        let color = palette_color(self.store.tags().len());
        Ok(self.store.add_tag(NewTag::new(name, color)))
    }

    /// Renames a tag. Notes keep referencing the old name.
    pub fn rename_tag(&mut self, id: &EntityId, name: &str) -> NotebookResult<()> {
        self.require_tag(id)?;
        let name = required_text(name, NotebookError::NameRequired(EntityKind::Tag))?;
        if refs::tag_name_taken(self.store.tags(), &name, Some(id)) {
            return Err(NotebookError::DuplicateName {
                kind: EntityKind::Tag,
                name,
            });
        }
        self.store.update_tag(
            id,
            TagPatch {
                name: Some(name),
                ..TagPatch::default()
            },
        );
        Ok(())
    }

    /// Toggles the default flag and returns the new value.
    ///
    /// Turning a tag on clears the flag on every other tag first.
    pub fn toggle_default_tag(&mut self, id: &EntityId) -> NotebookResult<bool> {
        let is_default = !self.require_tag(id)?;
        if is_default {
            let previous: Vec<EntityId> = self
                .store
                .tags()
                .iter()
                .filter(|tag| tag.is_default && &tag.id != id)
                .map(|tag| tag.id.clone())
                .collect();
            for other in &previous {
                self.store.update_tag(
                    other,
                    TagPatch {
                        is_default: Some(false),
                        ..TagPatch::default()
                    },
                );
            }
            info!(
                "event=default_tag_switch module=service status=ok cleared={}",
                previous.len()
            );
        }
        self.store.update_tag(
            id,
            TagPatch {
                is_default: Some(is_default),
                ..TagPatch::default()
            },
        );
        Ok(is_default)
    }

    pub fn delete_tag(&mut self, id: &EntityId) -> NotebookResult<()> {
        if self.require_tag(id)? {
            return Err(NotebookError::DefaultTagProtected(id.clone()));
        }
        self.store.delete_tag(id);
        Ok(())
    }

    /// Creates a category with the next palette color.
    pub fn create_category(&mut self, name: &str, description: &str) -> NotebookResult<EntityId> {
        let name = required_text(name, NotebookError::NameRequired(EntityKind::Category))?;
        if refs::category_name_taken(self.store.categories(), &name, None) {
            return Err(NotebookError::DuplicateName {
                kind: EntityKind::Category,
                name,
            });
        }
        let color = palette_color(self.store.categories().len());
        Ok(self.store.add_category(NewCategory::new(
            name,
            description_or_placeholder(description),
            color,
        )))
    }

    /// Renames and re-describes a category. Notes keep referencing the old name.
    pub fn edit_category(
        &mut self,
        id: &EntityId,
        name: &str,
        description: &str,
    ) -> NotebookResult<()> {
        if refs::find_category(self.store.categories(), id).is_none() {
            return Err(NotebookError::NotFound {
                kind: EntityKind::Category,
                id: id.clone(),
            });
        }
        let name = required_text(name, NotebookError::NameRequired(EntityKind::Category))?;
        if refs::category_name_taken(self.store.categories(), &name, Some(id)) {
            return Err(NotebookError::DuplicateName {
                kind: EntityKind::Category,
                name,
            });
        }
        self.store.update_category(
            id,
            CategoryPatch {
                name: Some(name),
                description: Some(description_or_placeholder(description)),
                ..CategoryPatch::default()
            },
        );
        Ok(())
    }

    pub fn delete_category(&mut self, id: &EntityId) -> NotebookResult<()> {
        let is_fallback = refs::find_category(self.store.categories(), id)
            .map(|category| category.is_fallback())
            .ok_or_else(|| NotebookError::NotFound {
                kind: EntityKind::Category,
                id: id.clone(),
            })?;
        if is_fallback {
            return Err(NotebookError::FallbackCategoryProtected(id.clone()));
        }
        self.store.delete_category(id);
        Ok(())
    }

    /// Returns the note's current reveal flag.
    fn require_note(&self, id: &EntityId) -> NotebookResult<bool> {
        refs::find_note(self.store.notes(), id)
            .map(|note| note.revealed())
            .ok_or_else(|| NotebookError::NotFound {
                kind: EntityKind::Note,
                id: id.clone(),
            })
    }

    /// Returns the tag's current default flag.
    fn require_tag(&self, id: &EntityId) -> NotebookResult<bool> {
        refs::find_tag(self.store.tags(), id)
            .map(|tag| tag.is_default)
            .ok_or_else(|| NotebookError::NotFound {
                kind: EntityKind::Tag,
                id: id.clone(),
            })
    }
}

/// Picks the palette color for the `index`-th record of a collection.
pub fn palette_color(index: usize) -> &'static str {
    PALETTE[index % PALETTE.len()]
}

fn required_text(value: &str, missing: NotebookError) -> NotebookResult<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(missing)
    } else {
        Ok(trimmed.to_string())
    }
}

fn description_or_placeholder(description: &str) -> String {
    let trimmed = description.trim();
    if trimmed.is_empty() {
        EMPTY_DESCRIPTION_PLACEHOLDER.to_string()
    } else {
        trimmed.to_string()
    }
}
