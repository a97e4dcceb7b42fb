//! Stable identifiers shared by every entity collection.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Opaque identifier for notes, tags and categories.
///
/// Seeded records use short fixed ids (`"1"`, `"2"`, ...) while generated
/// records use random UUID v4 strings, so the wrapped value is kept as text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(String);

impl EntityId {
    /// Generates a fresh random identifier.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Returns the identifier text.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl Display for EntityId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for EntityId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for EntityId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

#[cfg(test)]
mod tests {
    use super::EntityId;
    use std::collections::HashSet;

    #[test]
    fn generated_ids_are_uuid_shaped_and_distinct() {
        let ids: HashSet<EntityId> = (0..256).map(|_| EntityId::generate()).collect();
        assert_eq!(ids.len(), 256);
        let sample = ids.iter().next().expect("set should not be empty");
        assert!(uuid::Uuid::parse_str(sample.as_str()).is_ok());
    }

    #[test]
    fn serializes_as_plain_string() {
        let json = serde_json::to_string(&EntityId::from("4")).unwrap();
        assert_eq!(json, "\"4\"");
    }
}
