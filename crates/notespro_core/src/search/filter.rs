//! Filter, sort and count helpers over note slices.
//!
//! # Invariants
//! - Results borrow from the input slice and never reorder it in place.
//! - Sorting is stable; ties keep collection order.
//! - Empty criteria match every note. The search term is used as given,
//!   so a term of spaces only matches notes containing those spaces.

use crate::model::note::{Difficulty, Note};
use crate::state::refs::note_has_tag;
use std::cmp::Ordering;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Filter criteria combined with logical AND.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoteFilter {
    /// Case-insensitive substring matched against title or content.
    pub search: String,
    /// Exact category name.
    pub category: Option<String>,
    pub difficulty: Option<Difficulty>,
    /// Matches notes carrying at least one of these tag names.
    pub tags: Vec<String>,
}

impl NoteFilter {
    pub fn is_active(&self) -> bool {
        !self.search.is_empty()
            || self.category.is_some()
            || self.difficulty.is_some()
            || !self.tags.is_empty()
    }

    pub fn matches(&self, note: &Note) -> bool {
        self.matches_search(note)
            && self
                .category
                .as_ref()
                .map_or(true, |category| &note.category == category)
            && self
                .difficulty
                .map_or(true, |difficulty| note.difficulty == difficulty)
            && (self.tags.is_empty() || self.tags.iter().any(|tag| note_has_tag(note, tag)))
    }

    fn matches_search(&self, note: &Note) -> bool {
        let needle = self.search.to_lowercase();
        if needle.is_empty() {
            return true;
        }
        note.title.to_lowercase().contains(&needle) || note.content.to_lowercase().contains(&needle)
    }
}

/// List ordering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum NoteSort {
    /// Most recently created first.
    #[default]
    Newest,
    Oldest,
    /// Case-insensitive title order.
    Title,
    /// `Easy`, then `Medium`, then `Difficult`.
    Difficulty,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseNoteSortError(pub String);

impl Display for ParseNoteSortError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "unknown sort `{}`; expected newest|oldest|title|difficulty",
            self.0
        )
    }
}

impl Error for ParseNoteSortError {}

impl FromStr for NoteSort {
    type Err = ParseNoteSortError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "newest" => Ok(Self::Newest),
            "oldest" => Ok(Self::Oldest),
            "title" => Ok(Self::Title),
            "difficulty" => Ok(Self::Difficulty),
            _ => Err(ParseNoteSortError(value.to_string())),
        }
    }
}

fn compare(sort: NoteSort, a: &Note, b: &Note) -> Ordering {
    match sort {
        NoteSort::Newest => b.created_at.cmp(&a.created_at),
        NoteSort::Oldest => a.created_at.cmp(&b.created_at),
        NoteSort::Title => a
            .title
            .to_lowercase()
            .cmp(&b.title.to_lowercase())
            .then_with(|| a.title.cmp(&b.title)),
        NoteSort::Difficulty => a.difficulty.cmp(&b.difficulty),
    }
}

/// Returns the notes matching `filter`, ordered by `sort`.
pub fn query_notes<'a>(notes: &'a [Note], filter: &NoteFilter, sort: NoteSort) -> Vec<&'a Note> {
    let mut hits: Vec<&Note> = notes.iter().filter(|note| filter.matches(note)).collect();
    hits.sort_by(|a, b| compare(sort, a, b));
    hits
}

/// Per-difficulty note counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DifficultyStats {
    pub total: usize,
    pub easy: usize,
    pub medium: usize,
    pub difficult: usize,
}

impl DifficultyStats {
    pub fn count(&self, difficulty: Difficulty) -> usize {
        match difficulty {
            Difficulty::Easy => self.easy,
            Difficulty::Medium => self.medium,
            Difficulty::Difficult => self.difficult,
        }
    }
}

pub fn difficulty_stats<'a>(notes: impl IntoIterator<Item = &'a Note>) -> DifficultyStats {
    let mut stats = DifficultyStats::default();
    for note in notes {
        stats.total += 1;
        match note.difficulty {
            Difficulty::Easy => stats.easy += 1,
            Difficulty::Medium => stats.medium += 1,
            Difficulty::Difficult => stats.difficult += 1,
        }
    }
    stats
}

#[cfg(test)]
mod tests {
    use super::{difficulty_stats, query_notes, NoteFilter, NoteSort};
    use crate::model::ids::EntityId;
    use crate::model::note::{Difficulty, NewNote, Note};
    use chrono::{Duration, TimeZone, Utc};

    fn sample() -> Vec<Note> {
        let base = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let rows = [
            ("Rust ownership", "borrowing rules", "Learning", Difficulty::Difficult, vec!["Ideas"]),
            ("groceries", "milk and RUST remover", "Personal", Difficulty::Easy, vec![]),
            ("Standup", "daily notes", "Work Projects", Difficulty::Medium, vec!["Work"]),
        ];
        rows.into_iter()
            .enumerate()
            .map(|(idx, (title, content, category, difficulty, tags))| {
                let mut fields = NewNote::new(title, content);
                fields.category = category.to_string();
                fields.difficulty = difficulty;
                fields.tags = tags.into_iter().map(str::to_string).collect();
                Note::from_new(
                    EntityId::from(format!("n{idx}")),
                    fields,
                    base + Duration::minutes(idx as i64),
                )
            })
            .collect()
    }

    fn titles(notes: &[&Note]) -> Vec<String> {
        notes.iter().map(|note| note.title.clone()).collect()
    }

    #[test]
    fn search_is_case_insensitive_over_title_and_content() {
        let notes = sample();
        let filter = NoteFilter {
            search: "rust".to_string(),
            ..NoteFilter::default()
        };
        let hits = query_notes(&notes, &filter, NoteSort::Oldest);
        assert_eq!(titles(&hits), vec!["Rust ownership", "groceries"]);
    }

    #[test]
    fn search_term_is_not_trimmed() {
        let notes = sample();
        let padded = NoteFilter {
            search: " notes".to_string(),
            ..NoteFilter::default()
        };
        assert_eq!(
            titles(&query_notes(&notes, &padded, NoteSort::Oldest)),
            vec!["Standup"]
        );

        let spaces = NoteFilter {
            search: "   ".to_string(),
            ..NoteFilter::default()
        };
        assert!(spaces.is_active());
        assert!(query_notes(&notes, &spaces, NoteSort::Oldest).is_empty());
    }

    #[test]
    fn criteria_combine_with_and_and_tags_match_any() {
        let notes = sample();
        let filter = NoteFilter {
            tags: vec!["Work".to_string(), "Ideas".to_string()],
            difficulty: Some(Difficulty::Medium),
            ..NoteFilter::default()
        };
        let hits = query_notes(&notes, &filter, NoteSort::Newest);
        assert_eq!(titles(&hits), vec!["Standup"]);
        assert!(filter.is_active());
        assert!(!NoteFilter::default().is_active());
    }

    #[test]
    fn sort_orders() {
        let notes = sample();
        let all = NoteFilter::default();
        assert_eq!(
            titles(&query_notes(&notes, &all, NoteSort::Newest)),
            vec!["Standup", "groceries", "Rust ownership"]
        );
        assert_eq!(
            titles(&query_notes(&notes, &all, NoteSort::Title)),
            vec!["groceries", "Rust ownership", "Standup"]
        );
        assert_eq!(
            titles(&query_notes(&notes, &all, NoteSort::Difficulty)),
            vec!["groceries", "Standup", "Rust ownership"]
        );
    }

    #[test]
    fn stats_count_each_difficulty() {
        let notes = sample();
        let stats = difficulty_stats(&notes);
        assert_eq!(stats.total, 3);
        assert_eq!(stats.count(Difficulty::Easy), 1);
        assert_eq!(stats.medium, 1);
        assert_eq!(stats.difficult, 1);
    }
}
