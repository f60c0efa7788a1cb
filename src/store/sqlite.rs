//! SQLite-backed dataset storage.

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use super::traits::{CachedBlob, DatasetStore, StoreError};

/// SQLite-based dataset store.
///
/// A single `Mutex<Connection>` serializes writers, and each write is one
/// `INSERT OR REPLACE` statement, so readers observe whole rows only.
pub struct SqliteStore {
  conn: Mutex<Connection>,
}

/// Schema for the dataset table.
const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS datasets (
    name TEXT PRIMARY KEY,
    data BLOB NOT NULL,
    synced_at TEXT NOT NULL DEFAULT (datetime('now'))
);
"#;

impl SqliteStore {
  /// Open or create the store at the default location.
  pub fn open() -> Result<Self, StoreError> {
    Self::open_at(&Self::default_path()?)
  }

  /// Open or create the store at an explicit path.
  pub fn open_at(path: &Path) -> Result<Self, StoreError> {
    // Ensure parent directory exists
    if let Some(parent) = path.parent() {
      std::fs::create_dir_all(parent)?;
    }

    let conn = Connection::open(path)?;
    let store = Self {
      conn: Mutex::new(conn),
    };
    store.run_migrations()?;

    Ok(store)
  }

  /// Open an in-memory store. Used by tests.
  pub fn open_in_memory() -> Result<Self, StoreError> {
    let store = Self {
      conn: Mutex::new(Connection::open_in_memory()?),
    };
    store.run_migrations()?;
    Ok(store)
  }

  /// Get the default database path.
  fn default_path() -> Result<PathBuf, StoreError> {
    let data_dir = dirs::data_dir()
      .or_else(|| dirs::home_dir().map(|p| p.join(".local/share")))
      .ok_or_else(|| {
        StoreError::Io(std::io::Error::new(
          std::io::ErrorKind::NotFound,
          "could not determine data directory",
        ))
      })?;

    Ok(data_dir.join("mezmur").join("cache.db"))
  }

  fn run_migrations(&self) -> Result<(), StoreError> {
    let conn = self.conn.lock().map_err(|_| StoreError::LockPoisoned)?;
    conn.execute_batch(SCHEMA)?;
    Ok(())
  }
}

impl DatasetStore for SqliteStore {
  fn get(&self, name: &str) -> Result<Option<CachedBlob>, StoreError> {
    let conn = self.conn.lock().map_err(|_| StoreError::LockPoisoned)?;

    let row: Option<(Vec<u8>, String)> = conn
      .query_row(
        "SELECT data, synced_at FROM datasets WHERE name = ?",
        params![name],
        |row| Ok((row.get(0)?, row.get(1)?)),
      )
      .optional()?;

    match row {
      Some((data, synced_at)) => Ok(Some(CachedBlob {
        data,
        synced_at: parse_datetime(&synced_at)?,
      })),
      None => Ok(None),
    }
  }

  fn set(&self, name: &str, data: &[u8]) -> Result<(), StoreError> {
    let conn = self.conn.lock().map_err(|_| StoreError::LockPoisoned)?;

    conn.execute(
      "INSERT OR REPLACE INTO datasets (name, data, synced_at)
       VALUES (?, ?, datetime('now'))",
      params![name, data],
    )?;

    Ok(())
  }

  fn clear(&self, name: &str) -> Result<(), StoreError> {
    let conn = self.conn.lock().map_err(|_| StoreError::LockPoisoned)?;
    conn.execute("DELETE FROM datasets WHERE name = ?", params![name])?;
    Ok(())
  }
}

/// Parse a datetime string from SQLite format.
fn parse_datetime(s: &str) -> Result<DateTime<Utc>, StoreError> {
  // SQLite stores as "YYYY-MM-DD HH:MM:SS"
  chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S")
    .map(|dt| dt.and_utc())
    .map_err(|_| {
      StoreError::Sqlite(rusqlite::Error::InvalidColumnType(
        2,
        "synced_at".into(),
        rusqlite::types::Type::Text,
      ))
    })
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_absent_dataset_is_none() {
    let store = SqliteStore::open_in_memory().unwrap();
    assert!(store.get("songs").unwrap().is_none());
  }

  #[test]
  fn test_set_then_get_round_trips() {
    let store = SqliteStore::open_in_memory().unwrap();
    store.set("songs", b"[1,2,3]").unwrap();

    let blob = store.get("songs").unwrap().unwrap();
    assert_eq!(blob.data, b"[1,2,3]");
  }

  #[test]
  fn test_overwrite_replaces_wholesale() {
    let store = SqliteStore::open_in_memory().unwrap();
    store.set("songs", b"old payload").unwrap();
    store.set("songs", b"new").unwrap();

    let blob = store.get("songs").unwrap().unwrap();
    assert_eq!(blob.data, b"new");
  }

  #[test]
  fn test_datasets_are_independent() {
    let store = SqliteStore::open_in_memory().unwrap();
    store.set("songs", b"s").unwrap();
    store.set("albums", b"a").unwrap();

    assert_eq!(store.get("songs").unwrap().unwrap().data, b"s");
    assert_eq!(store.get("albums").unwrap().unwrap().data, b"a");
  }

  #[test]
  fn test_clear_removes_dataset() {
    let store = SqliteStore::open_in_memory().unwrap();
    store.set("songs", b"payload").unwrap();
    store.clear("songs").unwrap();
    assert!(store.get("songs").unwrap().is_none());

    // Clearing again is a no-op
    store.clear("songs").unwrap();
  }

  #[test]
  fn test_synced_at_is_recorded() {
    let store = SqliteStore::open_in_memory().unwrap();
    store.set("songs", b"payload").unwrap();

    let blob = store.get("songs").unwrap().unwrap();
    let age = Utc::now() - blob.synced_at;
    assert!(age.num_minutes() < 1);
  }
}
