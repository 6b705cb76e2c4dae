//! Persistent storage for column preferences.
//!
//! Uses a small SQLite file, one row per store key, with the visible
//! accessor sequence stored as a JSON array. The concrete representation
//! stays behind the [`ColumnPrefs`] trait so tests and embedders can
//! substitute their own key-value store.

use crate::error::{ColumnError, ColumnResult};
use rusqlite::{Connection, OptionalExtension, params};
use std::sync::{Arc, Mutex};
use tracing::{debug, warn};

/// Key-value boundary for persisted column preferences.
///
/// `load` returns `None` when no usable preference exists under the key;
/// callers then fall back to their defaults. `save` always writes the full
/// current sequence.
pub trait ColumnPrefs: Send + Sync {
    fn load(&self, store_key: &str) -> ColumnResult<Option<Vec<String>>>;
    fn save(&self, store_key: &str, accessors: &[String]) -> ColumnResult<()>;
}

/// Column-preference store backed by SQLite.
pub struct SqliteColumnStore {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteColumnStore {
    /// Opens (or creates) a preference store at the given path.
    pub fn new(path: &str) -> ColumnResult<Self> {
        let conn = Connection::open(path)
            .map_err(|e| ColumnError::Storage(format!("failed to open preference store: {e}")))?;
        let store = Self {
            conn: Arc::new(Mutex::new(conn)),
        };
        store.init_schema()?;
        Ok(store)
    }

    /// Opens an in-memory preference store (for testing).
    pub fn open_in_memory() -> ColumnResult<Self> {
        let conn = Connection::open_in_memory().map_err(|e| {
            ColumnError::Storage(format!("failed to open in-memory preference store: {e}"))
        })?;
        let store = Self {
            conn: Arc::new(Mutex::new(conn)),
        };
        store.init_schema()?;
        Ok(store)
    }

    fn init_schema(&self) -> ColumnResult<()> {
        let conn = self.conn.lock().unwrap();
        conn.execute_batch(
            "
            CREATE TABLE IF NOT EXISTS column_prefs (
                store_key TEXT PRIMARY KEY,
                accessors TEXT NOT NULL
            );
            ",
        )
        .map_err(|e| ColumnError::Storage(format!("failed to init preference schema: {e}")))?;
        Ok(())
    }
}

impl ColumnPrefs for SqliteColumnStore {
    fn load(&self, store_key: &str) -> ColumnResult<Option<Vec<String>>> {
        let conn = self.conn.lock().unwrap();
        let cell: Option<String> = conn
            .query_row(
                "SELECT accessors FROM column_prefs WHERE store_key = ?1",
                params![store_key],
                |row| row.get(0),
            )
            .optional()
            .map_err(|e| ColumnError::Storage(format!("failed to load preference: {e}")))?;

        let Some(cell) = cell else {
            return Ok(None);
        };

        // An unreadable cell counts as "no preference": the merge above
        // this layer must stay total.
        match serde_json::from_str::<Vec<String>>(&cell) {
            Ok(accessors) => Ok(Some(accessors)),
            Err(e) => {
                warn!(store_key, error = %e, "ignoring corrupt column preference");
                Ok(None)
            }
        }
    }

    fn save(&self, store_key: &str, accessors: &[String]) -> ColumnResult<()> {
        let cell = serde_json::to_string(accessors)
            .map_err(|e| ColumnError::Storage(format!("failed to encode preference: {e}")))?;
        let conn = self.conn.lock().unwrap();
        conn.execute(
            "INSERT OR REPLACE INTO column_prefs (store_key, accessors) VALUES (?1, ?2)",
            params![store_key, cell],
        )
        .map_err(|e| ColumnError::Storage(format!("failed to save preference: {e}")))?;
        debug!(store_key, columns = accessors.len(), "saved column preference");
        Ok(())
    }
}
