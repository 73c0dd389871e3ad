//! SQLite-backed store

use chrono::Utc;
use parking_lot::Mutex;
use rusqlite::{Connection, OptionalExtension};
use std::path::Path;
use std::sync::Arc;

use crate::migrations::run_migrations;
use crate::store::{KeyValueStore, WriteGuard};
use crate::Result;

pub struct SqliteStore {
    conn: Arc<Mutex<Connection>>,
    writer: Arc<Mutex<()>>,
}

impl SqliteStore {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let conn = Connection::open(path)?;

        // WAL mode for better concurrent performance
        let _: String =
            conn.pragma_update_and_check(None, "journal_mode", "WAL", |row| row.get(0))?;

        run_migrations(&conn)?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
            writer: Arc::new(Mutex::new(())),
        })
    }

    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        run_migrations(&conn)?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
            writer: Arc::new(Mutex::new(())),
        })
    }

    fn with_connection<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Connection) -> Result<T>,
    {
        let conn = self.conn.lock();
        f(&conn)
    }

    fn transaction<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Connection) -> Result<T>,
    {
        let mut conn = self.conn.lock();
        let tx = conn.transaction()?;
        let result = f(&tx)?;
        tx.commit()?;
        Ok(result)
    }
}

fn upsert(conn: &Connection, key: &str, value: &str, updated_at: &str) -> Result<()> {
    conn.execute(
        "INSERT OR REPLACE INTO kv (key, value, updated_at) VALUES (?1, ?2, ?3)",
        rusqlite::params![key, value, updated_at],
    )?;
    Ok(())
}

impl KeyValueStore for SqliteStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        self.with_connection(|conn| {
            let value = conn
                .query_row("SELECT value FROM kv WHERE key = ?1", [key], |row| {
                    row.get(0)
                })
                .optional()?;
            Ok(value)
        })
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let updated_at = Utc::now().to_rfc3339();
        self.with_connection(|conn| upsert(conn, key, value, &updated_at))
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.with_connection(|conn| {
            conn.execute("DELETE FROM kv WHERE key = ?1", [key])?;
            Ok(())
        })
    }

    fn set_many(&self, entries: &[(String, String)]) -> Result<()> {
        let updated_at = Utc::now().to_rfc3339();
        self.transaction(|conn| {
            for (key, value) in entries {
                upsert(conn, key, value, &updated_at)?;
            }
            Ok(())
        })
    }

    fn keys_with_prefix(&self, prefix: &str) -> Result<Vec<String>> {
        self.with_connection(|conn| {
            let mut stmt = conn.prepare(
                "SELECT key FROM kv WHERE substr(key, 1, length(?1)) = ?1 ORDER BY key",
            )?;
            let keys = stmt
                .query_map([prefix], |row| row.get::<_, String>(0))?
                .collect::<std::result::Result<Vec<_>, _>>()?;
            Ok(keys)
        })
    }

    fn write_guard(&self) -> WriteGuard<'_> {
        self.writer.lock()
    }
}

impl Clone for SqliteStore {
    fn clone(&self) -> Self {
        Self {
            conn: Arc::clone(&self.conn),
            writer: Arc::clone(&self.writer),
        }
    }
}
