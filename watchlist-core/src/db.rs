use rusqlite::{Connection, OptionalExtension};
use std::path::Path;
use std::sync::Mutex;
use tracing::info;

use crate::error::{WatchlistError, WatchlistResult};
use crate::kv::KvStore;

/// SQLite-backed key-value store.
pub struct SqliteKv(Mutex<Connection>);

impl SqliteKv {
    pub fn open(path: &Path) -> WatchlistResult<Self> {
        let conn = Connection::open(path)?;
        info!(path = %path.display(), "Opened watchlist database");
        Self::init(conn)
    }

    pub fn open_in_memory() -> WatchlistResult<Self> {
        Self::init(Connection::open_in_memory()?)
    }

    fn init(conn: Connection) -> WatchlistResult<Self> {
        conn.execute_batch(
            "
            CREATE TABLE IF NOT EXISTS kv_store (
                key TEXT PRIMARY KEY,
                value BLOB NOT NULL,
                updated_at INTEGER NOT NULL
            );
            ",
        )?;
        Ok(Self(Mutex::new(conn)))
    }

    fn conn(&self) -> WatchlistResult<std::sync::MutexGuard<'_, Connection>> {
        self.0
            .lock()
            .map_err(|e| WatchlistError::Upstream(e.to_string()))
    }
}

impl KvStore for SqliteKv {
    fn get(&self, key: &str) -> WatchlistResult<Option<Vec<u8>>> {
        let conn = self.conn()?;
        let value = conn
            .query_row("SELECT value FROM kv_store WHERE key = ?1", [key], |row| {
                row.get::<_, Vec<u8>>(0)
            })
            .optional()?;
        Ok(value)
    }

    fn set(&self, key: &str, value: &[u8]) -> WatchlistResult<()> {
        let conn = self.conn()?;
        conn.execute(
            "INSERT INTO kv_store (key, value, updated_at) VALUES (?1, ?2, ?3)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
            (key, value, chrono::Utc::now().timestamp_millis()),
        )?;
        Ok(())
    }
}
