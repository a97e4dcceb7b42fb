use super::{StateStorage, StorageError, StorageResult};
use std::collections::HashMap;

/// In-process storage with an optional byte quota.
///
/// The quota counts key and value bytes across all entries, mirroring how
/// browser local storage rejects writes once its budget is spent.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    entries: HashMap<String, String>,
    quota_bytes: Option<usize>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_quota(quota_bytes: usize) -> Self {
        Self {
            entries: HashMap::new(),
            quota_bytes: Some(quota_bytes),
        }
    }

    /// Seeds a raw value, bypassing the quota. Used to stage startup records.
    pub fn with_entry(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.entries.insert(key.into(), value.into());
        self
    }

    fn used_bytes_without(&self, key: &str) -> usize {
        self.entries
            .iter()
            .filter(|(existing, _)| existing.as_str() != key)
            .map(|(existing, value)| existing.len() + value.len())
            .sum()
    }
}

impl StateStorage for MemoryStorage {
    fn read(&self, key: &str) -> StorageResult<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn write(&mut self, key: &str, value: &str) -> StorageResult<()> {
        if let Some(quota_bytes) = self.quota_bytes {
            let required_bytes = self.used_bytes_without(key) + key.len() + value.len();
            if required_bytes > quota_bytes {
                return Err(StorageError::QuotaExceeded {
                    key: key.to_string(),
                    required_bytes,
                    quota_bytes,
                });
            }
        }
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> StorageResult<()> {
        self.entries.remove(key);
        Ok(())
    }
}
