//! Seed collections used when no durable state exists.

use crate::model::category::{Category, FALLBACK_CATEGORY_NAME};
use crate::model::ids::EntityId;
use crate::model::tag::{Tag, DEFAULT_TAG_NAME};

const SEED_TAGS: [(&str, &str, bool, &str); 4] = [
    ("1", DEFAULT_TAG_NAME, true, "#6B7280"),
    ("2", "Work", false, "#3B82F6"),
    ("3", "Personal", false, "#10B981"),
    ("4", "Ideas", false, "#8B5CF6"),
];

const SEED_CATEGORIES: [(&str, &str, &str, &str); 4] = [
    (
        "1",
        FALLBACK_CATEGORY_NAME,
        "Default category for new notes",
        "#6B7280",
    ),
    (
        "2",
        "Work Projects",
        "Professional and work-related notes",
        "#3B82F6",
    ),
    (
        "3",
        "Learning",
        "Educational content and study materials",
        "#F59E0B",
    ),
    ("4", "Personal", "Personal thoughts and ideas", "#10B981"),
];

pub fn seed_tags() -> Vec<Tag> {
    SEED_TAGS
        .iter()
        .map(|(id, name, is_default, color)| Tag {
            id: EntityId::from(*id),
            name: (*name).to_string(),
            is_default: *is_default,
            color: (*color).to_string(),
        })
        .collect()
}

pub fn seed_categories() -> Vec<Category> {
    SEED_CATEGORIES
        .iter()
        .map(|(id, name, description, color)| Category {
            id: EntityId::from(*id),
            name: (*name).to_string(),
            description: (*description).to_string(),
            color: (*color).to_string(),
        })
        .collect()
}
