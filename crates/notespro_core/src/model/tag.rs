//! Tag domain model.

use crate::model::ids::EntityId;
use serde::{Deserialize, Serialize};

/// Name of the seeded default tag.
pub const DEFAULT_TAG_NAME: &str = "Untagged";

/// Named, colored label attached to notes by name.
///
/// `is_default` is a caller-maintained flag; the store never checks how many
/// tags carry it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tag {
    pub id: EntityId,
    pub name: String,
    pub is_default: bool,
    /// Display color, opaque to core.
    pub color: String,
}

impl Tag {
    pub fn from_new(id: EntityId, fields: NewTag) -> Self {
        Self {
            id,
            name: fields.name,
            is_default: fields.is_default,
            color: fields.color,
        }
    }

    pub fn apply_patch(&mut self, patch: TagPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(is_default) = patch.is_default {
            self.is_default = is_default;
        }
        if let Some(color) = patch.color {
            self.color = color;
        }
    }
}

/// Creation input for a tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTag {
    pub name: String,
    pub is_default: bool,
    pub color: String,
}

impl NewTag {
    pub fn new(name: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_default: false,
            color: color.into(),
        }
    }
}

/// Partial tag update.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagPatch {
    pub name: Option<String>,
    pub is_default: Option<bool>,
    pub color: Option<String>,
}
