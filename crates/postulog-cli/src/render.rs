//! Plain-text rendering of records, counts and the agenda.
//!
//! Everything returns a `String`; `main` decides where it goes.

use std::{fmt::Write as _, io::IsTerminal as _};

use crossterm::style::{Color, Stylize as _};
use postulog_core::{
  agenda::AgendaDay,
  application::{Application, Tone},
  query::StatusCounts,
};

fn tone_color(tone: Tone) -> Color {
  match tone {
    Tone::Slate => Color::Grey,
    Tone::Blue => Color::Blue,
    Tone::Indigo => Color::DarkBlue,
    Tone::Purple => Color::Magenta,
    Tone::Emerald => Color::Green,
    Tone::Amber => Color::Yellow,
    Tone::Rose => Color::Red,
  }
}

/// Decides whether badges carry ANSI colour.
#[derive(Debug, Clone, Copy)]
pub struct Painter {
  color: bool,
}

impl Painter {
  /// Colour when stdout is a terminal and `NO_COLOR` is unset.
  pub fn detect() -> Self {
    Self {
      color: std::io::stdout().is_terminal()
        && std::env::var_os("NO_COLOR").is_none(),
    }
  }

  pub fn plain() -> Self { Self { color: false } }

  pub fn badge(&self, label: &str, tone: Tone) -> String {
    if self.color {
      label.with(tone_color(tone)).bold().to_string()
    } else {
      format!("[{label}]")
    }
  }

  fn dim(&self, text: &str) -> String {
    if self.color {
      text.dark_grey().to_string()
    } else {
      text.to_owned()
    }
  }
}

/// First block of the hyphenated id.
pub fn short_id(app: &Application) -> String {
  app.id.hyphenated().to_string()[..8].to_owned()
}

fn date(d: chrono::NaiveDate) -> String { d.format("%Y-%m-%d").to_string() }

// ─── Records ─────────────────────────────────────────────────────────────────

pub fn row(p: &Painter, app: &Application) -> String {
  let mut out = format!(
    "{}  {}  {} · {}  {} {}  {}",
    p.dim(&short_id(app)),
    date(app.date_applied),
    app.company,
    app.role,
    p.badge(app.status.label(), app.status.tone()),
    p.badge(app.priority.label(), app.priority.tone()),
    app.salary_display(),
  );
  if let Some(next) = app.next_action_date {
    let _ = write!(out, "  → {}", date(next));
  }
  out
}

pub fn table(p: &Painter, apps: &[&Application]) -> String {
  if apps.is_empty() {
    return "Sin postulaciones.\n".to_owned();
  }
  apps.iter().map(|a| row(p, a) + "\n").collect()
}

pub fn detail(p: &Painter, app: &Application) -> String {
  let mut out = String::new();
  let _ = writeln!(out, "{} · {}", app.company, app.role);
  let _ = writeln!(
    out,
    "{} {}",
    p.badge(app.status.label(), app.status.tone()),
    p.badge(app.priority.label(), app.priority.tone()),
  );
  let mut field = |name: &str, value: Option<String>| {
    if let Some(v) = value.filter(|v| !v.is_empty()) {
      let _ = writeln!(out, "  {:<12} {v}", format!("{name}:"));
    }
  };
  field("id", Some(app.id.to_string()));
  field("aplicado", Some(date(app.date_applied)));
  field("fuente", Some(app.source.clone()));
  field("ubicación", app.location.clone());
  field("contacto", app.contact.clone());
  field("enlace", app.link.clone());
  field("salario", Some(app.salary_display()));
  field("próxima", app.next_action_date.map(date));
  field("notas", app.notes.clone());
  out
}

// ─── Aggregates ──────────────────────────────────────────────────────────────

pub fn stats(p: &Painter, counts: &StatusCounts) -> String {
  let mut out = format!("Total: {}\n", counts.total());
  for (status, n) in counts.iter() {
    let _ = writeln!(out, "  {:>4}  {}", n, p.badge(status.label(), status.tone()));
  }
  if counts.other > 0 {
    let _ = writeln!(out, "  {:>4}  {}", counts.other, p.badge("Otros", Tone::Slate));
  }
  out
}

pub fn agenda(p: &Painter, days: &[AgendaDay<'_>]) -> String {
  if days.is_empty() {
    return "Sin próximas acciones.\n".to_owned();
  }
  let mut out = String::new();
  for day in days {
    let _ = writeln!(out, "{}", date(day.date));
    for a in &day.applications {
      let _ = writeln!(
        out,
        "  {}  {} · {}  {}",
        p.dim(&short_id(a)),
        a.company,
        a.role,
        p.badge(a.status.label(), a.status.tone()),
      );
    }
  }
  out
}
