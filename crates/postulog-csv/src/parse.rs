//! Interchange document parser.
//!
//! Pipeline:
//!   raw &str
//!     └─ split_rows()          → Vec<Row>   (quote-aware)
//!          └─ ColumnIndex::from_header()
//!               └─ build_application() per data row → Vec<Application>

use chrono::NaiveDate;
use postulog_core::application::{Application, Currency, Priority, Status};
use uuid::Uuid;

use crate::{
  COLUMNS, Column,
  error::{Error, Result},
};

// ─── Row splitting ───────────────────────────────────────────────────────────

/// One record of the document.
pub(crate) struct Row {
  pub fields: Vec<String>,
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum State {
  FieldStart,
  Unquoted,
  Quoted,
  AfterQuoted,
}

fn end_field(fields: &mut Vec<String>, cur: &mut String, state: State) {
  let value = std::mem::take(cur);
  if state == State::Unquoted {
    fields.push(value.trim_end().to_owned());
  } else {
    fields.push(value);
  }
}

/// Split `text` into records of fields.
///
/// A field opening with `"` runs to the matching unescaped quote and may span
/// lines; `""` inside it is a literal quote. Unquoted fields end at the next
/// comma or line break and are trimmed. `\n` and `\r\n` both end a record.
/// Blank lines are skipped.
pub(crate) fn split_rows(text: &str) -> Result<Vec<Row>> {
  let mut rows: Vec<Row> = Vec::new();
  let mut fields: Vec<String> = Vec::new();
  let mut cur = String::new();
  let mut state = State::FieldStart;
  let mut line = 1usize;
  let mut quote_line = 1usize;
  let mut chars = text.chars().peekable();

  while let Some(c) = chars.next() {
    if state == State::Quoted {
      match c {
        '"' if chars.peek() == Some(&'"') => {
          chars.next();
          cur.push('"');
        }
        '"' => state = State::AfterQuoted,
        '\n' => {
          line += 1;
          cur.push(c);
        }
        _ => cur.push(c),
      }
      continue;
    }

    match c {
      ',' => {
        end_field(&mut fields, &mut cur, state);
        state = State::FieldStart;
      }
      '\n' => {
        let blank = state == State::FieldStart && fields.is_empty();
        if !blank {
          end_field(&mut fields, &mut cur, state);
          rows.push(Row {
            fields: std::mem::take(&mut fields),
          });
        }
        line += 1;
        state = State::FieldStart;
      }
      // the following '\n' ends the record
      '\r' if chars.peek() == Some(&'\n') => {}
      '"' if state == State::FieldStart => {
        state = State::Quoted;
        quote_line = line;
      }
      ' ' | '\t' if state != State::Unquoted => {}
      _ => {
        cur.push(c);
        if state == State::FieldStart {
          state = State::Unquoted;
        }
      }
    }
  }

  if state == State::Quoted {
    return Err(Error::UnterminatedQuote { line: quote_line });
  }
  if !(state == State::FieldStart && fields.is_empty()) {
    end_field(&mut fields, &mut cur, state);
    rows.push(Row { fields });
  }
  Ok(rows)
}

// ─── Header ──────────────────────────────────────────────────────────────────

/// Position of each known column in the document, if present.
pub(crate) struct ColumnIndex([Option<usize>; COLUMNS.len()]);

impl ColumnIndex {
  /// Map each known column to its first occurrence in `header`. Unknown
  /// header names are ignored.
  pub(crate) fn from_header(header: &[String]) -> Self {
    let mut index = [None; COLUMNS.len()];
    for (slot, column) in index.iter_mut().zip(COLUMNS) {
      *slot = header.iter().position(|h| h.trim() == column.name());
    }
    Self(index)
  }

  fn get<'r>(&self, row: &'r Row, column: Column) -> &'r str {
    self.0[column as usize]
      .and_then(|i| row.fields.get(i))
      .map_or("", String::as_str)
  }
}

// ─── Field coercion ──────────────────────────────────────────────────────────

/// `None` for empty or whitespace-only text.
fn opt_text(s: &str) -> Option<String> {
  if s.trim().is_empty() {
    None
  } else {
    Some(s.to_string())
  }
}

fn non_empty(s: &str) -> Option<&str> {
  let s = s.trim();
  if s.is_empty() { None } else { Some(s) }
}

/// A finite decimal number, or `None` for anything else.
fn parse_number(s: &str) -> Option<f64> {
  non_empty(s)?.parse::<f64>().ok().filter(|n| n.is_finite())
}

fn parse_date(s: &str) -> Option<NaiveDate> {
  NaiveDate::parse_from_str(non_empty(s)?, "%Y-%m-%d").ok()
}

fn build_application(
  index: &ColumnIndex,
  row: &Row,
  today: NaiveDate,
) -> Application {
  let get = |column| index.get(row, column);

  Application {
    id:               Uuid::new_v4(),
    date_applied:     parse_date(get(Column::DateApplied)).unwrap_or(today),
    company:          get(Column::Company).to_string(),
    role:             get(Column::Role).to_string(),
    source:           get(Column::Source).to_string(),
    link:             opt_text(get(Column::Link)),
    location:         opt_text(get(Column::Location)),
    contact:          opt_text(get(Column::Contact)),
    status:           non_empty(get(Column::Status))
      .map(Status::from_text)
      .unwrap_or_default(),
    salary_min:       parse_number(get(Column::SalaryMin)),
    salary_max:       parse_number(get(Column::SalaryMax)),
    currency:         non_empty(get(Column::Currency))
      .map(Currency::from_text)
      .unwrap_or_default(),
    next_action_date: parse_date(get(Column::NextActionDate)),
    priority:         non_empty(get(Column::Priority))
      .map(Priority::from_text)
      .unwrap_or_default(),
    notes:            opt_text(get(Column::Notes)),
  }
}

// ─── Document parser ─────────────────────────────────────────────────────────

/// Parse a whole document into fresh records.
///
/// A leading byte-order mark is ignored. A document of fewer than two lines
/// yields no records. Every record gets a new id; nothing is returned unless
/// the whole document parses.
pub(crate) fn parse_document(
  text: &str,
  today: NaiveDate,
) -> Result<Vec<Application>> {
  let text = text.strip_prefix('\u{feff}').unwrap_or(text);
  if text.trim().lines().count() < 2 {
    return Ok(Vec::new());
  }

  let rows = split_rows(text)?;
  let Some((header, body)) = rows.split_first() else {
    return Ok(Vec::new());
  };
  let index = ColumnIndex::from_header(&header.fields);

  Ok(
    body
      .iter()
      .map(|row| build_application(&index, row, today))
      .collect(),
  )
}

// ─── Tests ───────────────────────────────────────────────────────────────────
