//! Integration tests for `SqliteSlots`, alone and behind the core gateway.

use chrono::NaiveDate;
use postulog_core::{
  Error as CoreError,
  application::{Application, Status},
  store::{DEFAULT_SLOT_KEY, Gateway, SlotStore},
  tracker::Tracker,
};

use crate::SqliteSlots;

fn store() -> SqliteSlots {
  SqliteSlots::open_in_memory().expect("in-memory store")
}

fn named(company: &str) -> Application {
  let mut a = Application::new_on(NaiveDate::from_ymd_opt(2024, 6, 1).unwrap());
  a.company = company.into();
  a
}

// ─── Slots ───────────────────────────────────────────────────────────────────

#[test]
fn missing_slot_reads_none() {
  assert_eq!(store().read("nope").unwrap(), None);
}

#[test]
fn write_then_read() {
  let s = store();
  s.write("k", "hello").unwrap();
  assert_eq!(s.read("k").unwrap().as_deref(), Some("hello"));
}

#[test]
fn write_overwrites_previous_value() {
  let s = store();
  s.write("k", "one").unwrap();
  s.write("k", "two").unwrap();
  assert_eq!(s.read("k").unwrap().as_deref(), Some("two"));
  assert_eq!(s.keys().unwrap(), ["k"]);
}

#[test]
fn keys_are_sorted_and_independent() {
  let s = store();
  s.write("b", "2").unwrap();
  s.write("a", "1").unwrap();
  assert_eq!(s.keys().unwrap(), ["a", "b"]);
  assert_eq!(s.read("a").unwrap().as_deref(), Some("1"));
}

#[test]
fn updated_at_tracks_writes() {
  let s = store();
  assert!(s.updated_at("k").unwrap().is_none());

  let before = chrono::Utc::now();
  s.write("k", "v").unwrap();
  let stamp = s.updated_at("k").unwrap().unwrap();
  assert!(stamp >= before - chrono::Duration::seconds(1));
}

#[test]
fn data_survives_reopen() {
  let dir = tempfile::tempdir().unwrap();
  let path = dir.path().join("nested").join("postulog.db");

  SqliteSlots::open(&path).unwrap().write("k", "kept").unwrap();

  let reopened = SqliteSlots::open(&path).unwrap();
  assert_eq!(reopened.read("k").unwrap().as_deref(), Some("kept"));
}

// ─── Gateway ─────────────────────────────────────────────────────────────────

#[test]
fn tracker_round_trips_through_sqlite() {
  let dir = tempfile::tempdir().unwrap();
  let path = dir.path().join("postulog.db");

  {
    let mut t = Tracker::open(Gateway::with_default_key(
      SqliteSlots::open(&path).unwrap(),
    ));
    t.create(named("Acme")).unwrap();
    let mut b = named("Globex");
    b.status = Status::Interview;
    t.create(b).unwrap();
  }

  let t = Tracker::open(Gateway::with_default_key(
    SqliteSlots::open(&path).unwrap(),
  ));
  let companies: Vec<&str> =
    t.applications().iter().map(|a| a.company.as_str()).collect();
  assert_eq!(companies, ["Globex", "Acme"]);
  assert_eq!(t.counts().get(&Status::Interview), 1);
}

#[test]
fn corrupt_slot_opens_empty_and_recovers() {
  let s = store();
  s.write(DEFAULT_SLOT_KEY, "[{\"broken\"").unwrap();

  let mut t = Tracker::open(Gateway::with_default_key(&s));
  assert!(t.applications().is_empty());

  t.create(named("Acme")).unwrap();
  assert_eq!(Gateway::with_default_key(&s).load().len(), 1);
}

#[test]
fn delete_of_unknown_id_is_not_found() {
  let s = store();
  let mut t = Tracker::open(Gateway::with_default_key(&s));
  let err = t.delete(named("ghost").id).unwrap_err();
  assert!(matches!(err, CoreError::NotFound(_)));
}
