//! Durable key-value storage for store snapshots

use std::collections::HashMap;
use std::sync::Mutex;

use rusqlite::{params, OptionalExtension};
use thiserror::Error;

use crate::db::{Database, DbError};

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage database error: {0}")]
    Database(#[from] DbError),

    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

impl From<rusqlite::Error> for StorageError {
    fn from(e: rusqlite::Error) -> Self {
        StorageError::Database(DbError::Sqlite(e))
    }
}

/// String values under string keys
pub trait KeyValueStorage: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    fn remove(&self, key: &str) -> Result<(), StorageError>;

    /// Remove every key
    fn clear(&self) -> Result<(), StorageError>;
}

/// Storage in the `kv_store` table
#[derive(Clone)]
pub struct SqliteStorage {
    db: Database,
}

impl SqliteStorage {
    pub fn new(db: Database) -> Self {
        Self { db }
    }
}

impl KeyValueStorage for SqliteStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let value = self.db.with_conn(|conn| {
            Ok(conn
                .query_row(
                    "SELECT value FROM kv_store WHERE key = ?",
                    params![key],
                    |row| row.get::<_, String>(0),
                )
                .optional()?)
        })?;
        Ok(value)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.db.with_conn(|conn| {
            conn.execute(
                "INSERT INTO kv_store (key, value, updated_at) VALUES (?1, ?2, datetime('now'))
                 ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
                params![key, value],
            )?;
            Ok(())
        })?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.db.with_conn(|conn| {
            conn.execute("DELETE FROM kv_store WHERE key = ?", params![key])?;
            Ok(())
        })?;
        Ok(())
    }

    fn clear(&self) -> Result<(), StorageError> {
        self.db.with_conn(|conn| {
            conn.execute("DELETE FROM kv_store", [])?;
            Ok(())
        })?;
        Ok(())
    }
}

/// Process-local storage
#[derive(Default)]
pub struct MemoryStorage {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    fn entries(&self) -> Result<std::sync::MutexGuard<'_, HashMap<String, String>>, StorageError> {
        self.entries
            .lock()
            .map_err(|_| StorageError::Unavailable("memory storage lock poisoned".to_string()))
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries()?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries()?.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.entries()?.remove(key);
        Ok(())
    }

    fn clear(&self) -> Result<(), StorageError> {
        self.entries()?.clear();
        Ok(())
    }
}

/// Storage whose writes can be switched off
#[cfg(test)]
#[derive(Default)]
pub(crate) struct FlakyStorage {
    inner: MemoryStorage,
    failing: Mutex<bool>,
}

#[cfg(test)]
impl FlakyStorage {
    pub(crate) fn fail(&self, failing: bool) {
        *self.failing.lock().unwrap() = failing;
    }
}

#[cfg(test)]
impl KeyValueStorage for FlakyStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.inner.get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        if *self.failing.lock().unwrap() {
            return Err(StorageError::Unavailable("disk full".to_string()));
        }
        self.inner.set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.inner.remove(key)
    }

    fn clear(&self) -> Result<(), StorageError> {
        self.inner.clear()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db;

    fn exercise(storage: &dyn KeyValueStorage) {
        assert_eq!(storage.get("auth-storage").unwrap(), None);
        storage.set("auth-storage", "{\"a\":1}").unwrap();
        storage.set("auth-storage", "{\"a\":2}").unwrap();
        storage.set("settings-storage", "{}").unwrap();
        assert_eq!(storage.get("auth-storage").unwrap().as_deref(), Some("{\"a\":2}"));

        storage.remove("auth-storage").unwrap();
        assert_eq!(storage.get("auth-storage").unwrap(), None);
        storage.clear().unwrap();
        assert_eq!(storage.get("settings-storage").unwrap(), None);
    }

    #[test]
    fn test_memory_storage() {
        exercise(&MemoryStorage::new());
    }

    #[test]
    fn test_sqlite_storage() {
        exercise(&SqliteStorage::new(db::in_memory_migrated().unwrap()));
    }

    #[test]
    fn test_sqlite_storage_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fitfam.db");
        {
            let storage = SqliteStorage::new(db::open_migrated(&path).unwrap());
            storage.set("progress-storage", "[1,2,3]").unwrap();
        }
        let storage = SqliteStorage::new(db::open_migrated(&path).unwrap());
        assert_eq!(storage.get("progress-storage").unwrap().as_deref(), Some("[1,2,3]"));
    }
}
