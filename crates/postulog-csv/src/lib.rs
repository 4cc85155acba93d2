//! Comma-separated interchange codec for PostuLog.
//!
//! Converts between an ordered slice of [`Application`]s and a delimited-text
//! document with a fixed 14-column header. Pure synchronous; no storage
//! dependencies.
//!
//! # Quick start
//!
//! ```no_run
//! use postulog_csv::{export_document, import_document};
//!
//! let doc = "company,role\nAcme,Buyer\n";
//! let apps = import_document(doc).unwrap();
//! assert_eq!(apps.len(), 1);
//! println!("{}", export_document(&apps));
//! ```

pub mod error;
mod parse;
mod serialize;

use chrono::NaiveDate;
pub use error::{Error, Result};
use postulog_core::application::{Application, today};

// ─── Columns ─────────────────────────────────────────────────────────────────

/// A column of the interchange document. There is deliberately no id column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
  DateApplied,
  Company,
  Role,
  Source,
  Link,
  Location,
  Contact,
  Status,
  SalaryMin,
  SalaryMax,
  Currency,
  NextActionDate,
  Priority,
  Notes,
}

/// Header order used on export.
pub const COLUMNS: [Column; 14] = [
  Column::DateApplied,
  Column::Company,
  Column::Role,
  Column::Source,
  Column::Link,
  Column::Location,
  Column::Contact,
  Column::Status,
  Column::SalaryMin,
  Column::SalaryMax,
  Column::Currency,
  Column::NextActionDate,
  Column::Priority,
  Column::Notes,
];

impl Column {
  /// The header name.
  pub fn name(self) -> &'static str {
    match self {
      Self::DateApplied => "dateApplied",
      Self::Company => "company",
      Self::Role => "role",
      Self::Source => "source",
      Self::Link => "link",
      Self::Location => "location",
      Self::Contact => "contact",
      Self::Status => "status",
      Self::SalaryMin => "salaryMin",
      Self::SalaryMax => "salaryMax",
      Self::Currency => "currency",
      Self::NextActionDate => "nextActionDate",
      Self::Priority => "priority",
      Self::Notes => "notes",
    }
  }
}

// ─── Public API ──────────────────────────────────────────────────────────────

/// Serialize `apps` as a document, in slice order.
pub fn export_document(apps: &[Application]) -> String {
  serialize::serialize(apps)
}

/// Parse a document into fresh records, defaulting empty dates to today
/// (local time). A leading byte-order mark is ignored.
///
/// Every returned record has a newly generated id. On `Err` nothing was
/// produced; callers merge the result only on `Ok`.
pub fn import_document(text: &str) -> Result<Vec<Application>> {
  parse::parse_document(text, today())
}

/// Like [`import_document`], with an explicit date for the
/// `dateApplied` default.
pub fn import_document_on(
  text: &str,
  today: NaiveDate,
) -> Result<Vec<Application>> {
  parse::parse_document(text, today)
}

/// Decode `bytes` as UTF-8 and parse.
pub fn import_bytes(bytes: &[u8]) -> Result<Vec<Application>> {
  import_document(std::str::from_utf8(bytes)?)
}

/// `postulog_2024-05-06.csv` for the given day.
pub fn export_file_name(day: NaiveDate) -> String {
  format!("postulog_{}.csv", day.format("%Y-%m-%d"))
}

// ─── Round-trip tests ────────────────────────────────────────────────────────
