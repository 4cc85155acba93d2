//! Derived views over the collection: filtering, free-text search, date
//! ordering and per-status counts.
//!
//! Every function here is pure. Inputs are borrowed and never mutated;
//! results borrow from the collection.

use std::{convert::Infallible, fmt, str::FromStr};

use crate::application::{Application, Priority, STATUSES, Status};

// ─── Selection ───────────────────────────────────────────────────────────────

/// A filter selection: either the `All` sentinel or one exact value.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Selection<T> {
  #[default]
  All,
  Only(T),
}

impl<T: PartialEq> Selection<T> {
  pub fn matches(&self, value: &T) -> bool {
    match self {
      Self::All => true,
      Self::Only(wanted) => wanted == value,
    }
  }
}

impl<T: From<String>> FromStr for Selection<T> {
  type Err = Infallible;

  /// `All` (any case) or empty selects everything; anything else is parsed
  /// as an exact value.
  fn from_str(s: &str) -> Result<Self, Self::Err> {
    let s = s.trim();
    if s.is_empty() || s.eq_ignore_ascii_case("all") {
      Ok(Self::All)
    } else {
      Ok(Self::Only(T::from(s.to_owned())))
    }
  }
}

impl<T: fmt::Display> fmt::Display for Selection<T> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::All => f.write_str("All"),
      Self::Only(v) => v.fmt(f),
    }
  }
}

// ─── Query ───────────────────────────────────────────────────────────────────

/// Parameters for [`list_filtered`].
#[derive(Debug, Clone, Default)]
pub struct ApplicationQuery {
  pub status:   Selection<Status>,
  pub priority: Selection<Priority>,
  /// Case-insensitive substring; empty matches everything.
  pub text:     String,
}

pub fn filter_by_status<'a>(
  apps: impl IntoIterator<Item = &'a Application>,
  status: &Selection<Status>,
) -> Vec<&'a Application> {
  apps.into_iter().filter(|a| status.matches(&a.status)).collect()
}

pub fn filter_by_priority<'a>(
  apps: impl IntoIterator<Item = &'a Application>,
  priority: &Selection<Priority>,
) -> Vec<&'a Application> {
  apps
    .into_iter()
    .filter(|a| priority.matches(&a.priority))
    .collect()
}

/// The text searched for `a`: company, role, source, location, contact and
/// notes joined by single spaces. Absent fields contribute nothing.
pub fn search_haystack(a: &Application) -> String {
  [
    Some(a.company.as_str()),
    Some(a.role.as_str()),
    Some(a.source.as_str()),
    a.location.as_deref(),
    a.contact.as_deref(),
    a.notes.as_deref(),
  ]
  .into_iter()
  .flatten()
  .collect::<Vec<_>>()
  .join(" ")
}

pub fn matches_text(a: &Application, text: &str) -> bool {
  if text.is_empty() {
    return true;
  }
  search_haystack(a)
    .to_lowercase()
    .contains(&text.to_lowercase())
}

pub fn search<'a>(
  apps: impl IntoIterator<Item = &'a Application>,
  text: &str,
) -> Vec<&'a Application> {
  apps.into_iter().filter(|a| matches_text(a, text)).collect()
}

/// Sort newest `date_applied` first. Ties keep their input order.
pub fn sort_by_date_desc(apps: &mut [&Application]) {
  apps.sort_by(|a, b| b.date_applied.cmp(&a.date_applied));
}

/// The displayed list: status filter, then priority filter, then search,
/// then newest first.
pub fn list_filtered<'a>(
  apps: &'a [Application],
  query: &ApplicationQuery,
) -> Vec<&'a Application> {
  let by_status = filter_by_status(apps, &query.status);
  let by_priority = filter_by_priority(by_status, &query.priority);
  let mut out = search(by_priority, &query.text);
  sort_by_date_desc(&mut out);
  out
}

// ─── Aggregates ──────────────────────────────────────────────────────────────

/// Record counts per status, in status-table order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusCounts {
  counts: Vec<(Status, usize)>,
  /// Records whose status is outside the table.
  pub other: usize,
}

impl StatusCounts {
  /// Count for `status`; zero for anything outside the table.
  pub fn get(&self, status: &Status) -> usize {
    self
      .counts
      .iter()
      .find(|(s, _)| s == status)
      .map_or(0, |(_, n)| *n)
  }

  pub fn iter(&self) -> impl Iterator<Item = (&Status, usize)> {
    self.counts.iter().map(|(s, n)| (s, *n))
  }

  pub fn len(&self) -> usize { self.counts.len() }

  pub fn is_empty(&self) -> bool { self.counts.is_empty() }

  pub fn total(&self) -> usize {
    self.counts.iter().map(|(_, n)| n).sum::<usize>() + self.other
  }
}

pub fn counts_by_status(apps: &[Application]) -> StatusCounts {
  let mut counts: Vec<(Status, usize)> =
    STATUSES.iter().map(|s| (s.clone(), 0)).collect();
  let mut other = 0;
  for a in apps {
    match counts.iter_mut().find(|(s, _)| *s == a.status) {
      Some((_, n)) => *n += 1,
      None => other += 1,
    }
  }
  StatusCounts { counts, other }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
