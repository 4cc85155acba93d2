//! [`SqliteSlots`]: the SQLite implementation of [`SlotStore`].

use std::path::Path;

use chrono::{DateTime, Utc};
use postulog_core::store::SlotStore;
use rusqlite::OptionalExtension as _;

use crate::{
  Result,
  encode::{decode_dt, encode_dt},
  schema::SCHEMA,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// Named text slots backed by a single SQLite file.
pub struct SqliteSlots {
  conn: rusqlite::Connection,
}

impl SqliteSlots {
  /// Open (or create) a store at `path` and run schema initialisation.
  ///
  /// Missing parent directories are created.
  pub fn open(path: impl AsRef<Path>) -> Result<Self> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
      std::fs::create_dir_all(parent)?;
    }
    let conn = rusqlite::Connection::open(path)?;
    tracing::debug!(path = %path.display(), "opened sqlite store");
    Self::init(conn)
  }

  /// Open an in-memory store, for tests.
  pub fn open_in_memory() -> Result<Self> {
    Self::init(rusqlite::Connection::open_in_memory()?)
  }

  fn init(conn: rusqlite::Connection) -> Result<Self> {
    conn.execute_batch(SCHEMA)?;
    Ok(Self { conn })
  }

  /// When `key` was last written, if ever.
  pub fn updated_at(&self, key: &str) -> Result<Option<DateTime<Utc>>> {
    let raw: Option<String> = self
      .conn
      .query_row(
        "SELECT updated_at FROM slots WHERE key = ?1",
        rusqlite::params![key],
        |r| r.get(0),
      )
      .optional()?;
    raw.as_deref().map(decode_dt).transpose()
  }

  /// Every slot name, sorted.
  pub fn keys(&self) -> Result<Vec<String>> {
    let mut stmt = self.conn.prepare("SELECT key FROM slots ORDER BY key")?;
    let keys = stmt
      .query_map([], |r| r.get(0))?
      .collect::<rusqlite::Result<Vec<String>>>()?;
    Ok(keys)
  }
}

// ─── SlotStore impl ──────────────────────────────────────────────────────────

impl SlotStore for SqliteSlots {
  type Error = crate::Error;

  fn read(&self, key: &str) -> Result<Option<String>> {
    let value = self
      .conn
      .query_row(
        "SELECT value FROM slots WHERE key = ?1",
        rusqlite::params![key],
        |r| r.get(0),
      )
      .optional()?;
    Ok(value)
  }

  fn write(&self, key: &str, value: &str) -> Result<()> {
    self.conn.execute(
      "INSERT INTO slots (key, value, updated_at) VALUES (?1, ?2, ?3)
       ON CONFLICT(key) DO UPDATE SET
         value      = excluded.value,
         updated_at = excluded.updated_at",
      rusqlite::params![key, value, encode_dt(Utc::now())],
    )?;
    tracing::trace!(key, bytes = value.len(), "slot written");
    Ok(())
  }
}
