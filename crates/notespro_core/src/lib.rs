//! Core domain logic for NotesPro.
//! This crate owns the notes store and is the single source of truth for its
//! referential-integrity rules.

pub mod config;
pub mod logging;
pub mod model;
pub mod search;
pub mod service;
pub mod state;
pub mod storage;
pub mod store;

pub use config::{ConfigError, NotesConfig};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::category::{Category, CategoryPatch, NewCategory, FALLBACK_CATEGORY_NAME};
pub use model::ids::EntityId;
pub use model::note::{Difficulty, NewNote, Note, NotePatch, ParseDifficultyError};
pub use model::tag::{NewTag, Tag, TagPatch, DEFAULT_TAG_NAME};
pub use search::filter::{
    difficulty_stats, query_notes, DifficultyStats, NoteFilter, NoteSort, ParseNoteSortError,
};
pub use service::notebook_service::{
    EntityKind, NotebookError, NotebookResult, NotebookService,
};
pub use state::NotesState;
pub use storage::{
    MemoryStorage, SqliteStateStorage, StateStorage, StorageError, StorageResult, STORAGE_KEY,
};
pub use store::{
    Clock, LoadOutcome, ManualClock, NotesStore, PersistError, PersistentNotesStore, SystemClock,
};

/// Minimal health-check API for front-end wiring.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
