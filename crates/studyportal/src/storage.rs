//! Persisted key-value storage for the access credential.
//!
//! The portal treats persistence as an opaque get/set/remove capability; the
//! shipped implementation is a single sqlite table, tests use an in-memory
//! map.

use crate::error::PortalError;
use rusqlite::{Connection, OptionalExtension};
use std::collections::HashMap;
use std::sync::Mutex;

/// Well-known key under which the bearer token is persisted.
pub const ACCESS_TOKEN_KEY: &str = "accessToken";

const SCHEMA_SQL: &str = "CREATE TABLE IF NOT EXISTS kv_store (
    key   TEXT PRIMARY KEY,
    value TEXT NOT NULL
);";

/// Opaque key-value persistence capability.
pub trait TokenStore: Send + Sync {
    /// Returns the stored value, or `None` when the key is absent.
    fn get(&self, key: &str) -> Result<Option<String>, PortalError>;
    /// Stores the value, overwriting any previous value for the key.
    fn set(&self, key: &str, value: &str) -> Result<(), PortalError>;
    /// Removes the key; removing an absent key is not an error.
    fn remove(&self, key: &str) -> Result<(), PortalError>;
}

/// Sqlite-backed token store.
pub struct SqliteTokenStore {
    db: Mutex<Connection>,
}

impl SqliteTokenStore {
    /// Opens (or creates) the store at the given path.
    pub fn open(db_path: &str) -> Result<Self, PortalError> {
        let conn = Connection::open(db_path)?;
        conn.execute_batch(SCHEMA_SQL)?;
        Ok(Self {
            db: Mutex::new(conn),
        })
    }

    /// An in-memory store, used by tests and throwaway sessions.
    pub fn open_in_memory() -> Result<Self, PortalError> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch(SCHEMA_SQL)?;
        Ok(Self {
            db: Mutex::new(conn),
        })
    }

    fn conn(&self) -> Result<std::sync::MutexGuard<'_, Connection>, PortalError> {
        self.db.lock().map_err(|_| PortalError::Storage {
            message: "Token store lock poisoned".to_string(),
        })
    }
}

impl TokenStore for SqliteTokenStore {
    fn get(&self, key: &str) -> Result<Option<String>, PortalError> {
        let db = self.conn()?;
        let value = db
            .query_row("SELECT value FROM kv_store WHERE key = ?1", [key], |row| {
                row.get::<_, String>(0)
            })
            .optional()?;
        Ok(value)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), PortalError> {
        let db = self.conn()?;
        // Upsert: a fresh login replaces the previous credential.
        db.execute(
            "INSERT INTO kv_store (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            (key, value),
        )?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), PortalError> {
        let db = self.conn()?;
        db.execute("DELETE FROM kv_store WHERE key = ?1", [key])?;
        Ok(())
    }
}

/// In-memory token store for tests.
#[derive(Default)]
pub struct MemoryTokenStore {
    entries: Mutex<HashMap<String, String>>,
    /// When true, every operation fails; exercises the fail-closed path.
    fail: bool,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store whose every operation errors.
    pub fn failing() -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            fail: true,
        }
    }

    fn check(&self) -> Result<(), PortalError> {
        if self.fail {
            Err(PortalError::Storage {
                message: "storage unavailable".to_string(),
            })
        } else {
            Ok(())
        }
    }
}

impl TokenStore for MemoryTokenStore {
    fn get(&self, key: &str) -> Result<Option<String>, PortalError> {
        self.check()?;
        Ok(self.entries.lock().unwrap().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), PortalError> {
        self.check()?;
        self.entries
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), PortalError> {
        self.check()?;
        self.entries.lock().unwrap().remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sqlite_set_overwrites_previous_value() {
        let store = SqliteTokenStore::open_in_memory().unwrap();
        store.set(ACCESS_TOKEN_KEY, "tok-old").unwrap();
        store.set(ACCESS_TOKEN_KEY, "tok-new").unwrap();
        assert_eq!(
            store.get(ACCESS_TOKEN_KEY).unwrap().as_deref(),
            Some("tok-new")
        );
    }

    #[test]
    fn sqlite_remove_is_idempotent() {
        let store = SqliteTokenStore::open_in_memory().unwrap();
        store.set(ACCESS_TOKEN_KEY, "tok").unwrap();
        store.remove(ACCESS_TOKEN_KEY).unwrap();
        store.remove(ACCESS_TOKEN_KEY).unwrap();
        assert_eq!(store.get(ACCESS_TOKEN_KEY).unwrap(), None);
    }

    #[test]
    fn failing_store_errors_on_get() {
        let store = MemoryTokenStore::failing();
        assert!(matches!(
            store.get(ACCESS_TOKEN_KEY),
            Err(PortalError::Storage { .. })
        ));
    }
}
