//! Category domain model.

use crate::model::ids::EntityId;
use serde::{Deserialize, Serialize};

/// Name of the seeded fallback category that orphaned notes are moved to.
pub const FALLBACK_CATEGORY_NAME: &str = "Uncategorized";

/// Named, colored grouping for notes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: EntityId,
    pub name: String,
    pub description: String,
    /// Display color, opaque to core.
    pub color: String,
}

impl Category {
    pub fn from_new(id: EntityId, fields: NewCategory) -> Self {
        Self {
            id,
            name: fields.name,
            description: fields.description,
            color: fields.color,
        }
    }

    pub fn apply_patch(&mut self, patch: CategoryPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(color) = patch.color {
            self.color = color;
        }
    }

    /// Returns whether this is the fallback category, matched by exact name.
    pub fn is_fallback(&self) -> bool {
        self.name == FALLBACK_CATEGORY_NAME
    }
}

/// Creation input for a category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCategory {
    pub name: String,
    pub description: String,
    pub color: String,
}

impl NewCategory {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        color: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            color: color.into(),
        }
    }
}

/// Partial category update.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub color: Option<String>,
}
