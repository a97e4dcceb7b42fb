//! Durable key/value storage for the notes snapshot.
//!
//! # Responsibility
//! - Define the storage contract the persistent store writes through.
//! - Provide in-memory and SQLite-backed implementations.
//! - Encode/decode the snapshot record (`codec`).
//!
//! # Invariants
//! - A key holds one complete serialized snapshot; writes replace it whole.
//! - Storage never interprets the stored value.

pub mod codec;
mod memory;
mod sqlite;

pub use codec::{decode_state, encode_state, StateCodecError};
pub use memory::MemoryStorage;
pub use sqlite::SqliteStateStorage;

use std::error::Error;
use std::fmt::{Display, Formatter};

/// Default record key of the notes snapshot.
pub const STORAGE_KEY: &str = "notesProData";

pub type StorageResult<T> = Result<T, StorageError>;

/// Storage-layer failure.
#[derive(Debug)]
pub enum StorageError {
    Sqlite(rusqlite::Error),
    /// The database was written by a newer build with a different layout.
    UnsupportedSchemaVersion { found: u32, supported: u32 },
    /// Write would grow the store beyond its byte quota.
    QuotaExceeded {
        key: String,
        required_bytes: usize,
        quota_bytes: usize,
    },
    MissingRequiredTable(&'static str),
}

impl Display for StorageError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "{err}"),
            Self::UnsupportedSchemaVersion { found, supported } => write!(
                f,
                "storage schema version {found} is newer than supported {supported}"
            ),
            Self::QuotaExceeded {
                key,
                required_bytes,
                quota_bytes,
            } => write!(
                f,
                "storage quota exceeded writing `{key}`: need {required_bytes} bytes, quota {quota_bytes}"
            ),
            Self::MissingRequiredTable(table) => {
                write!(f, "storage table `{table}` is missing")
            }
        }
    }
}

impl Error for StorageError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
            Self::UnsupportedSchemaVersion { .. }
            | Self::QuotaExceeded { .. }
            | Self::MissingRequiredTable(_) => None,
        }
    }
}

impl From<rusqlite::Error> for StorageError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}

/// Durable string key/value store.
pub trait StateStorage {
    /// Returns the value stored under `key`, or `None` when absent.
    fn read(&self, key: &str) -> StorageResult<Option<String>>;
    /// Stores `value` under `key`, replacing any previous value.
    fn write(&mut self, key: &str, value: &str) -> StorageResult<()>;
    /// Removes `key`. Removing an absent key is not an error.
    fn remove(&mut self, key: &str) -> StorageResult<()>;
}
