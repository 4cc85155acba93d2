//! The `SlotStore` trait and the persistence gateway built on it.
//!
//! The whole collection lives in a single named slot of a key-value store,
//! serialised as a JSON array. Backends (e.g. `postulog-store-sqlite`)
//! implement [`SlotStore`]; nothing above this module knows which one is in
//! use.

use std::{cell::RefCell, collections::HashMap};

use crate::{Error, Result, application::Application};

/// Slot name used when none is configured.
pub const DEFAULT_SLOT_KEY: &str = "postulog_apps_v1";

// ─── Trait ───────────────────────────────────────────────────────────────────

/// A durable key-value store holding whole-string values.
///
/// `write` must replace the previous value atomically: a reader never
/// observes a partially written value.
pub trait SlotStore {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Read the value stored under `key`. Returns `None` if the slot is empty.
  fn read(&self, key: &str) -> Result<Option<String>, Self::Error>;

  /// Overwrite the value stored under `key`.
  fn write(&self, key: &str, value: &str) -> Result<(), Self::Error>;
}

impl<S: SlotStore + ?Sized> SlotStore for &S {
  type Error = S::Error;

  fn read(&self, key: &str) -> Result<Option<String>, Self::Error> {
    (**self).read(key)
  }

  fn write(&self, key: &str, value: &str) -> Result<(), Self::Error> {
    (**self).write(key, value)
  }
}

// ─── In-memory backend ───────────────────────────────────────────────────────

/// A process-local [`SlotStore`]; contents are lost on drop.
#[derive(Debug, Default)]
pub struct MemorySlots {
  slots: RefCell<HashMap<String, String>>,
}

impl MemorySlots {
  pub fn new() -> Self { Self::default() }
}

impl SlotStore for MemorySlots {
  type Error = std::convert::Infallible;

  fn read(&self, key: &str) -> Result<Option<String>, Self::Error> {
    Ok(self.slots.borrow().get(key).cloned())
  }

  fn write(&self, key: &str, value: &str) -> Result<(), Self::Error> {
    self
      .slots
      .borrow_mut()
      .insert(key.to_owned(), value.to_owned());
    Ok(())
  }
}

// ─── Gateway ─────────────────────────────────────────────────────────────────

/// Loads and saves the full collection through one slot of a [`SlotStore`].
pub struct Gateway<S> {
  slots: S,
  key:   String,
}

impl<S: SlotStore> Gateway<S> {
  pub fn new(slots: S, key: impl Into<String>) -> Self {
    Self {
      slots,
      key: key.into(),
    }
  }

  /// A gateway over the [`DEFAULT_SLOT_KEY`] slot.
  pub fn with_default_key(slots: S) -> Self {
    Self::new(slots, DEFAULT_SLOT_KEY)
  }

  pub fn key(&self) -> &str { &self.key }

  pub fn slots(&self) -> &S { &self.slots }

  /// Read the stored collection.
  ///
  /// An empty, unreadable or unparseable slot yields an empty collection;
  /// the cause is logged and never returned. An unparseable value is first
  /// copied to [`Self::corrupt_key`].
  pub fn load(&self) -> Vec<Application> {
    let raw = match self.slots.read(&self.key) {
      Ok(Some(raw)) => raw,
      Ok(None) => return Vec::new(),
      Err(e) => {
        tracing::warn!(key = %self.key, error = %e, "storage unavailable, starting empty");
        return Vec::new();
      }
    };
    match serde_json::from_str::<Vec<Application>>(&raw) {
      Ok(apps) => {
        tracing::debug!(key = %self.key, count = apps.len(), "loaded applications");
        apps
      }
      Err(e) => {
        self.set_aside(&raw);
        tracing::warn!(key = %self.key, error = %e, "stored collection is corrupt, starting empty");
        Vec::new()
      }
    }
  }

  /// Slot holding the last unparseable value found under [`Self::key`].
  pub fn corrupt_key(&self) -> String { format!("{}.corrupt", self.key) }

  /// Copy an unparseable value out of the way before a save can replace it.
  fn set_aside(&self, raw: &str) {
    let backup = self.corrupt_key();
    match self.slots.write(&backup, raw) {
      Ok(()) => tracing::warn!(key = %self.key, %backup, "kept a copy of the corrupt collection"),
      Err(e) => tracing::warn!(key = %self.key, %backup, error = %e, "could not keep a copy of the corrupt collection"),
    }
  }

  /// Serialise `apps` and overwrite the slot.
  pub fn save(&self, apps: &[Application]) -> Result<()> {
    let json = serde_json::to_string(apps)?;
    self
      .slots
      .write(&self.key, &json)
      .map_err(|e| Error::Storage(Box::new(e)))?;
    tracing::debug!(key = %self.key, count = apps.len(), "saved applications");
    Ok(())
  }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
