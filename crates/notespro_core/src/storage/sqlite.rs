//! SQLite-backed key/value storage.
//!
//! # Invariants
//! - Every connection handed out has the `kv_store` table at
//!   [`SqliteStateStorage::SCHEMA_VERSION`], mirrored in `PRAGMA user_version`.
//! - A database stamped with a newer version is refused, never read.
//! - Each open emits one `storage_open` ok/error event.

use super::{StateStorage, StorageError, StorageResult};
use log::{error, info};
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;
use std::time::{Duration, Instant};

const KV_TABLE: &str = "kv_store";
const KV_STORE_SQL: &str = include_str!("kv_store.sql");
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Key/value storage over the `kv_store` table.
pub struct SqliteStateStorage {
    conn: Connection,
}

impl SqliteStateStorage {
    /// Layout version written to `PRAGMA user_version`.
    pub const SCHEMA_VERSION: u32 = 1;

    /// Wraps a prepared connection, rejecting schemas without `kv_store`.
    pub fn try_new(conn: Connection) -> StorageResult<Self> {
        if !table_exists(&conn, KV_TABLE)? {
            return Err(StorageError::MissingRequiredTable(KV_TABLE));
        }
        Ok(Self { conn })
    }

    /// Opens a database file, creating the table on first use.
    pub fn open(path: impl AsRef<Path>) -> StorageResult<Self> {
        let started_at = Instant::now();
        let result = Connection::open(path)
            .map_err(StorageError::from)
            .and_then(prepare);
        Self::finish_open(result, "file", started_at)
    }

    pub fn open_in_memory() -> StorageResult<Self> {
        let started_at = Instant::now();
        let result = Connection::open_in_memory()
            .map_err(StorageError::from)
            .and_then(prepare);
        Self::finish_open(result, "memory", started_at)
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    fn finish_open(
        prepared: StorageResult<Connection>,
        mode: &str,
        started_at: Instant,
    ) -> StorageResult<Self> {
        match prepared.and_then(Self::try_new) {
            Ok(storage) => {
                info!(
                    "event=storage_open module=storage status=ok mode={} duration_ms={}",
                    mode,
                    started_at.elapsed().as_millis()
                );
                Ok(storage)
            }
            Err(err) => {
                error!(
                    "event=storage_open module=storage status=error mode={} duration_ms={} error={}",
                    mode,
                    started_at.elapsed().as_millis(),
                    err
                );
                Err(err)
            }
        }
    }
}

impl StateStorage for SqliteStateStorage {
    fn read(&self, key: &str) -> StorageResult<Option<String>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM kv_store WHERE key = ?1;",
                [key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    fn write(&mut self, key: &str, value: &str) -> StorageResult<()> {
        self.conn.execute(
            "INSERT INTO kv_store (key, value)
             VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = (CAST(strftime('%s', 'now') AS INTEGER) * 1000);",
            params![key, value],
        )?;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> StorageResult<()> {
        self.conn
            .execute("DELETE FROM kv_store WHERE key = ?1;", [key])?;
        Ok(())
    }
}

/// Sets the busy timeout and brings the schema to the supported version.
fn prepare(mut conn: Connection) -> StorageResult<Connection> {
    conn.busy_timeout(BUSY_TIMEOUT)?;
    let found = conn.query_row("PRAGMA user_version;", [], |row| row.get::<_, u32>(0))?;
    if found > SqliteStateStorage::SCHEMA_VERSION {
        return Err(StorageError::UnsupportedSchemaVersion {
            found,
            supported: SqliteStateStorage::SCHEMA_VERSION,
        });
    }
    if found < SqliteStateStorage::SCHEMA_VERSION {
        let tx = conn.transaction()?;
        tx.execute_batch(KV_STORE_SQL)?;
        tx.execute_batch(&format!(
            "PRAGMA user_version = {};",
            SqliteStateStorage::SCHEMA_VERSION
        ))?;
        tx.commit()?;
        info!(
            "event=storage_schema module=storage status=ok from_version={} to_version={}",
            found,
            SqliteStateStorage::SCHEMA_VERSION
        );
    }
    Ok(conn)
}

fn table_exists(conn: &Connection, table: &str) -> StorageResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = ?1
        );",
        [table],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}
