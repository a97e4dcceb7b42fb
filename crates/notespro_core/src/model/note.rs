//! Note domain model.
//!
//! # Responsibility
//! - Define the canonical note record and its creation/patch inputs.
//! - Own the field-by-field merge used by partial updates.
//!
//! # Invariants
//! - `id` and `created_at` never change after creation.
//! - `created_at <= updated_at`.
//! - `category` and `tags` hold names, not ids.

use crate::model::category::FALLBACK_CATEGORY_NAME;
use crate::model::ids::EntityId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Difficulty rating attached to every note.
///
/// Ordering follows `Easy < Medium < Difficult`.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum Difficulty {
    #[default]
    Easy,
    Medium,
    Difficult,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Self::Easy, Self::Medium, Self::Difficult];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Easy => "Easy",
            Self::Medium => "Medium",
            Self::Difficult => "Difficult",
        }
    }
}

impl Display for Difficulty {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown difficulty label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseDifficultyError(pub String);

impl Display for ParseDifficultyError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "unknown difficulty `{}`; expected easy|medium|difficult",
            self.0
        )
    }
}

impl Error for ParseDifficultyError {}

impl FromStr for Difficulty {
    type Err = ParseDifficultyError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "easy" => Ok(Self::Easy),
            "medium" => Ok(Self::Medium),
            "difficult" => Ok(Self::Difficult),
            _ => Err(ParseDifficultyError(value.to_string())),
        }
    }
}

/// Canonical note record.
///
/// Serialized with camelCase field names to match the durable record layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: EntityId,
    pub title: String,
    pub content: String,
    /// Category name. Weak reference; may dangle.
    pub category: String,
    pub difficulty: Difficulty,
    /// Tag names in association order.
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Transient visibility flag owned by the caller; persisted when set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_revealed: Option<bool>,
}

impl Note {
    /// Builds a note from creation input with both timestamps set to `now`.
    pub fn from_new(id: EntityId, fields: NewNote, now: DateTime<Utc>) -> Self {
        Self {
            id,
            title: fields.title,
            content: fields.content,
            category: fields.category,
            difficulty: fields.difficulty,
            tags: fields.tags,
            created_at: now,
            updated_at: now,
            is_revealed: fields.is_revealed,
        }
    }

    /// Merges `patch` into this note and refreshes `updated_at`.
    ///
    /// `updated_at` never moves backwards, so a clock that steps back cannot
    /// break `created_at <= updated_at`.
    pub fn apply_patch(&mut self, patch: NotePatch, now: DateTime<Utc>) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(content) = patch.content {
            self.content = content;
        }
        if let Some(category) = patch.category {
            self.category = category;
        }
        if let Some(difficulty) = patch.difficulty {
            self.difficulty = difficulty;
        }
        if let Some(tags) = patch.tags {
            self.tags = tags;
        }
        if let Some(is_revealed) = patch.is_revealed {
            self.is_revealed = Some(is_revealed);
        }
        self.updated_at = now.max(self.updated_at);
    }

    /// Returns whether the note is currently revealed (unset counts as hidden).
    pub fn revealed(&self) -> bool {
        self.is_revealed.unwrap_or(false)
    }
}

/// Creation input for a note. Identity and timestamps are assigned by the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewNote {
    pub title: String,
    pub content: String,
    pub category: String,
    pub difficulty: Difficulty,
    pub tags: Vec<String>,
    pub is_revealed: Option<bool>,
}

impl NewNote {
    /// Creates input filed under the fallback category with `Easy` difficulty.
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            category: FALLBACK_CATEGORY_NAME.to_string(),
            difficulty: Difficulty::default(),
            tags: Vec::new(),
            is_revealed: None,
        }
    }
}

/// Partial note update. `Some` overwrites (empty values included), `None` keeps.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NotePatch {
    pub title: Option<String>,
    pub content: Option<String>,
    pub category: Option<String>,
    pub difficulty: Option<Difficulty>,
    pub tags: Option<Vec<String>>,
    pub is_revealed: Option<bool>,
}

impl NotePatch {
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}
