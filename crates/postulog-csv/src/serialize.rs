//! Interchange document serializer.
//!
//! One header row, then one row per record; every row ends with `\n`.

use postulog_core::application::Application;

use crate::{COLUMNS, Column};

// ─── Field escaping ──────────────────────────────────────────────────────────

/// Quote `s` when it holds a comma, a double quote or a newline, doubling
/// every inner quote. Anything else is emitted as is.
pub(crate) fn escape_field(s: &str) -> String {
  if s.contains([',', '"', '\n']) {
    format!("\"{}\"", s.replace('"', "\"\""))
  } else {
    s.to_string()
  }
}

// ─── Field rendering ─────────────────────────────────────────────────────────

fn opt<T: ToString>(value: Option<&T>) -> String {
  value.map(ToString::to_string).unwrap_or_default()
}

fn field(a: &Application, column: Column) -> String {
  match column {
    Column::DateApplied => a.date_applied.format("%Y-%m-%d").to_string(),
    Column::Company => a.company.clone(),
    Column::Role => a.role.clone(),
    Column::Source => a.source.clone(),
    Column::Link => opt(a.link.as_ref()),
    Column::Location => opt(a.location.as_ref()),
    Column::Contact => opt(a.contact.as_ref()),
    Column::Status => a.status.to_string(),
    Column::SalaryMin => opt(a.salary_min.as_ref()),
    Column::SalaryMax => opt(a.salary_max.as_ref()),
    Column::Currency => a.currency.to_string(),
    Column::NextActionDate => a
      .next_action_date
      .map(|d| d.format("%Y-%m-%d").to_string())
      .unwrap_or_default(),
    Column::Priority => a.priority.to_string(),
    Column::Notes => opt(a.notes.as_ref()),
  }
}

fn push_row<I>(out: &mut String, cells: I)
where
  I: IntoIterator<Item = String>,
{
  let mut first = true;
  for cell in cells {
    if !first {
      out.push(',');
    }
    out.push_str(&escape_field(&cell));
    first = false;
  }
  out.push('\n');
}

// ─── Document serializer ─────────────────────────────────────────────────────

pub(crate) fn serialize(apps: &[Application]) -> String {
  let mut out = String::new();
  push_row(&mut out, COLUMNS.iter().map(|c| c.name().to_string()));
  for a in apps {
    push_row(&mut out, COLUMNS.iter().map(|&c| field(a, c)));
  }
  out
}

// ─── Tests ───────────────────────────────────────────────────────────────────
