//! [`Tracker`]: the session-owned collection and its mutations.
//!
//! Each mutation computes the next collection, saves it through the
//! [`Gateway`], and only then replaces the in-memory copy. A failed save
//! leaves the session exactly as it was.

use std::collections::HashSet;

use chrono::NaiveDate;
use uuid::Uuid;

use crate::{
  Error, Result,
  agenda::{AgendaDay, group_by_next_action},
  application::{Application, demo_applications},
  query::{ApplicationQuery, StatusCounts, counts_by_status, list_filtered},
  store::{Gateway, SlotStore},
};

pub struct Tracker<S> {
  gateway: Gateway<S>,
  apps:    Vec<Application>,
}

impl<S: SlotStore> Tracker<S> {
  /// Open a session, loading whatever the gateway holds.
  pub fn open(gateway: Gateway<S>) -> Self {
    let apps = gateway.load();
    Self { gateway, apps }
  }

  /// The collection in insertion order.
  pub fn applications(&self) -> &[Application] { &self.apps }

  pub fn gateway(&self) -> &Gateway<S> { &self.gateway }

  pub fn get(&self, id: Uuid) -> Option<&Application> {
    self.apps.iter().find(|a| a.id == id)
  }

  /// Resolve a full id or a unique leading fragment of its hyphenated form.
  pub fn find_by_prefix(&self, prefix: &str) -> Result<&Application> {
    let prefix = prefix.trim().to_ascii_lowercase();
    let hits: Vec<&Application> = self
      .apps
      .iter()
      .filter(|a| a.id.hyphenated().to_string().starts_with(&prefix))
      .collect();
    match hits.as_slice() {
      [one] => Ok(*one),
      [] => Err(Error::NoMatch(prefix)),
      many => Err(Error::AmbiguousPrefix {
        count: many.len(),
        prefix,
      }),
    }
  }

  // ── Derived views ─────────────────────────────────────────────────────────

  pub fn list(&self, query: &ApplicationQuery) -> Vec<&Application> {
    list_filtered(&self.apps, query)
  }

  pub fn counts(&self) -> StatusCounts { counts_by_status(&self.apps) }

  pub fn agenda(&self) -> Vec<AgendaDay<'_>> { group_by_next_action(&self.apps) }

  // ── Mutations ─────────────────────────────────────────────────────────────

  /// Insert a new record at the front.
  pub fn create(&mut self, app: Application) -> Result<&[Application]> {
    if self.get(app.id).is_some() {
      return Err(Error::DuplicateId(app.id));
    }
    let mut next = Vec::with_capacity(self.apps.len() + 1);
    next.push(app);
    next.extend(self.apps.iter().cloned());
    self.commit(next)
  }

  /// Replace the record with the same id.
  pub fn update(&mut self, app: Application) -> Result<&[Application]> {
    let pos = self
      .apps
      .iter()
      .position(|a| a.id == app.id)
      .ok_or(Error::NotFound(app.id))?;
    let mut next = self.apps.clone();
    next[pos] = app;
    self.commit(next)
  }

  /// Update when the id is present, otherwise create.
  pub fn upsert(&mut self, app: Application) -> Result<&[Application]> {
    if self.get(app.id).is_some() {
      self.update(app)
    } else {
      self.create(app)
    }
  }

  pub fn delete(&mut self, id: Uuid) -> Result<&[Application]> {
    if self.get(id).is_none() {
      return Err(Error::NotFound(id));
    }
    let next = self.apps.iter().filter(|a| a.id != id).cloned().collect();
    self.commit(next)
  }

  /// Merge imported records in front of the collection, keeping their order.
  ///
  /// All-or-nothing: any id collision rejects the whole batch.
  pub fn prepend(
    &mut self,
    records: Vec<Application>,
  ) -> Result<&[Application]> {
    let mut seen: HashSet<Uuid> = self.apps.iter().map(|a| a.id).collect();
    for r in &records {
      if !seen.insert(r.id) {
        return Err(Error::DuplicateId(r.id));
      }
    }
    if records.is_empty() {
      return Ok(&self.apps);
    }
    let mut next = records;
    next.extend(self.apps.iter().cloned());
    self.commit(next)
  }

  /// Prepend the two sample applications dated `today`.
  pub fn seed_demo(&mut self, today: NaiveDate) -> Result<&[Application]> {
    self.prepend(demo_applications(today))
  }

  fn commit(&mut self, next: Vec<Application>) -> Result<&[Application]> {
    self.gateway.save(&next)?;
    self.apps = next;
    Ok(&self.apps)
  }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use std::cell::Cell;

  use super::*;
  use crate::{
    application::Status,
    store::{DEFAULT_SLOT_KEY, MemorySlots},
  };

  fn day(d: u32) -> NaiveDate { NaiveDate::from_ymd_opt(2024, 6, d).unwrap() }

  fn named(company: &str) -> Application {
    let mut a = Application::new_on(day(1));
    a.company = company.into();
    a
  }

  fn companies<S: SlotStore>(t: &Tracker<S>) -> Vec<&str> {
    t.applications()
      .iter()
      .map(|a| a.company.as_str())
      .collect()
  }

  /// Accepts a fixed number of writes, then fails.
  struct FlakySlots {
    inner:     MemorySlots,
    remaining: Cell<usize>,
  }

  #[derive(Debug, thiserror::Error)]
  #[error("write budget exhausted")]
  struct Exhausted;

  impl SlotStore for FlakySlots {
    type Error = Exhausted;

    fn read(&self, key: &str) -> Result<Option<String>, Exhausted> {
      Ok(self.inner.read(key).unwrap_or_default())
    }

    fn write(&self, key: &str, value: &str) -> Result<(), Exhausted> {
      if self.remaining.get() == 0 {
        return Err(Exhausted);
      }
      self.remaining.set(self.remaining.get() - 1);
      let _ = self.inner.write(key, value);
      Ok(())
    }
  }

  #[test]
  fn create_prepends_and_persists() {
    let slots = MemorySlots::new();
    let mut t = Tracker::open(Gateway::with_default_key(&slots));
    t.create(named("a")).unwrap();
    t.create(named("b")).unwrap();
    assert_eq!(companies(&t), ["b", "a"]);

    let reopened = Tracker::open(Gateway::with_default_key(&slots));
    assert_eq!(companies(&reopened), ["b", "a"]);
  }

  #[test]
  fn create_rejects_duplicate_id() {
    let mut t = Tracker::open(Gateway::with_default_key(MemorySlots::new()));
    let a = named("a");
    t.create(a.clone()).unwrap();
    assert!(matches!(t.create(a), Err(Error::DuplicateId(_))));
    assert_eq!(t.applications().len(), 1);
  }

  #[test]
  fn update_replaces_in_place() {
    let mut t = Tracker::open(Gateway::with_default_key(MemorySlots::new()));
    let a = named("a");
    t.create(a.clone()).unwrap();
    t.create(named("b")).unwrap();

    let mut changed = a.clone();
    changed.status = Status::Offer;
    t.update(changed).unwrap();
    assert_eq!(companies(&t), ["b", "a"]);
    assert_eq!(t.get(a.id).unwrap().status, Status::Offer);
  }

  #[test]
  fn update_unknown_id_fails() {
    let mut t = Tracker::open(Gateway::with_default_key(MemorySlots::new()));
    assert!(matches!(t.update(named("x")), Err(Error::NotFound(_))));
  }

  #[test]
  fn upsert_creates_then_updates() {
    let mut t = Tracker::open(Gateway::with_default_key(MemorySlots::new()));
    let mut a = named("a");
    t.upsert(a.clone()).unwrap();
    a.role = "Buyer".into();
    t.upsert(a.clone()).unwrap();
    assert_eq!(t.applications().len(), 1);
    assert_eq!(t.applications()[0].role, "Buyer");
  }

  #[test]
  fn delete_removes_by_id() {
    let mut t = Tracker::open(Gateway::with_default_key(MemorySlots::new()));
    let a = named("a");
    t.create(a.clone()).unwrap();
    t.create(named("b")).unwrap();
    t.delete(a.id).unwrap();
    assert_eq!(companies(&t), ["b"]);
    assert!(matches!(t.delete(a.id), Err(Error::NotFound(_))));
  }

  #[test]
  fn prepend_keeps_batch_order() {
    let mut t = Tracker::open(Gateway::with_default_key(MemorySlots::new()));
    t.create(named("old")).unwrap();
    t.prepend(vec![named("x"), named("y")]).unwrap();
    assert_eq!(companies(&t), ["x", "y", "old"]);
  }

  #[test]
  fn prepend_with_collision_applies_nothing() {
    let mut t = Tracker::open(Gateway::with_default_key(MemorySlots::new()));
    let a = named("a");
    t.create(a.clone()).unwrap();
    let err = t.prepend(vec![named("x"), a]).unwrap_err();
    assert!(matches!(err, Error::DuplicateId(_)));
    assert_eq!(companies(&t), ["a"]);
  }

  #[test]
  fn failed_save_leaves_session_unchanged() {
    let slots = FlakySlots {
      inner:     MemorySlots::new(),
      remaining: Cell::new(1),
    };
    let mut t = Tracker::open(Gateway::with_default_key(&slots));
    t.create(named("a")).unwrap();
    assert!(matches!(t.create(named("b")), Err(Error::Storage(_))));
    assert_eq!(companies(&t), ["a"]);

    let stored = slots.inner.read(DEFAULT_SLOT_KEY).unwrap().unwrap();
    assert!(!stored.contains("\"b\""));
  }

  #[test]
  fn find_by_prefix_resolves_unique_fragments() {
    let mut t = Tracker::open(Gateway::with_default_key(MemorySlots::new()));
    let a = named("a");
    t.create(a.clone()).unwrap();
    let full = a.id.to_string();
    assert_eq!(t.find_by_prefix(&full[..8]).unwrap().id, a.id);
    assert_eq!(t.find_by_prefix(&full.to_uppercase()).unwrap().id, a.id);
    assert!(matches!(t.find_by_prefix("zzzz"), Err(Error::NoMatch(_))));

    t.create(named("b")).unwrap();
    assert!(matches!(
      t.find_by_prefix(""),
      Err(Error::AmbiguousPrefix { count: 2, .. })
    ));
  }

  #[test]
  fn seed_demo_prepends_samples() {
    let mut t = Tracker::open(Gateway::with_default_key(MemorySlots::new()));
    t.create(named("mine")).unwrap();
    t.seed_demo(day(3)).unwrap();
    assert_eq!(companies(&t), ["TASA", "Atria Energía", "mine"]);
    assert_eq!(t.agenda().len(), 1);
    assert_eq!(t.counts().get(&Status::Interview), 1);
  }
}
