//! The application record (one tracked job application) and the fixed
//! lookup tables for its status, priority and currency fields.
//!
//! Status, priority and currency are closed enumerations with an explicit
//! passthrough variant. A value this crate does not recognise is kept as raw
//! text, rendered with a neutral tone, and written back verbatim.

use std::fmt;

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use strum::EnumString;
use uuid::Uuid;

// ─── Tone ────────────────────────────────────────────────────────────────────

/// Visual tone of a badge. Presentation layers map it to a colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tone {
  Slate,
  Blue,
  Indigo,
  Purple,
  Emerald,
  Amber,
  Rose,
}

// ─── Status ──────────────────────────────────────────────────────────────────

/// Where an application currently stands.
#[derive(
  Debug, Clone, PartialEq, Eq, Hash, Default, EnumString, Serialize, Deserialize,
)]
#[serde(from = "String", into = "String")]
pub enum Status {
  Draft,
  #[default]
  Applied,
  Screening,
  Interview,
  Offer,
  #[strum(serialize = "On Hold", serialize = "OnHold")]
  OnHold,
  Rejected,
  /// A value outside the table, kept as typed.
  #[strum(disabled)]
  Unknown(String),
}

/// The status table, in display order.
pub const STATUSES: [Status; 7] = [
  Status::Draft,
  Status::Applied,
  Status::Screening,
  Status::Interview,
  Status::Offer,
  Status::OnHold,
  Status::Rejected,
];

impl Status {
  /// The wire value used in the interchange document and the persisted slot.
  pub fn as_str(&self) -> &str {
    match self {
      Self::Draft => "Draft",
      Self::Applied => "Applied",
      Self::Screening => "Screening",
      Self::Interview => "Interview",
      Self::Offer => "Offer",
      Self::OnHold => "On Hold",
      Self::Rejected => "Rejected",
      Self::Unknown(raw) => raw,
    }
  }

  /// Display label. Unknown values are shown as typed.
  pub fn label(&self) -> &str {
    match self {
      Self::Draft => "Borrador",
      Self::Applied => "Postulado",
      Self::Screening => "Screening",
      Self::Interview => "Entrevista",
      Self::Offer => "Oferta",
      Self::OnHold => "En pausa",
      Self::Rejected => "Rechazado",
      Self::Unknown(raw) => raw,
    }
  }

  pub fn tone(&self) -> Tone {
    match self {
      Self::Draft | Self::Unknown(_) => Tone::Slate,
      Self::Applied => Tone::Blue,
      Self::Screening => Tone::Indigo,
      Self::Interview => Tone::Purple,
      Self::Offer => Tone::Emerald,
      Self::OnHold => Tone::Amber,
      Self::Rejected => Tone::Rose,
    }
  }

  pub fn is_known(&self) -> bool { !matches!(self, Self::Unknown(_)) }
}

// ─── Priority ────────────────────────────────────────────────────────────────

#[derive(
  Debug, Clone, PartialEq, Eq, Hash, Default, EnumString, Serialize, Deserialize,
)]
#[serde(from = "String", into = "String")]
pub enum Priority {
  Low,
  #[default]
  Medium,
  High,
  #[strum(disabled)]
  Unknown(String),
}

/// The priority table, in display order.
pub const PRIORITIES: [Priority; 3] =
  [Priority::Low, Priority::Medium, Priority::High];

impl Priority {
  pub fn as_str(&self) -> &str {
    match self {
      Self::Low => "Low",
      Self::Medium => "Medium",
      Self::High => "High",
      Self::Unknown(raw) => raw,
    }
  }

  pub fn label(&self) -> &str {
    match self {
      Self::Low => "Baja",
      Self::Medium => "Media",
      Self::High => "Alta",
      Self::Unknown(raw) => raw,
    }
  }

  pub fn tone(&self) -> Tone {
    match self {
      Self::Low | Self::Unknown(_) => Tone::Slate,
      Self::Medium => Tone::Amber,
      Self::High => Tone::Rose,
    }
  }
}

// ─── Currency ────────────────────────────────────────────────────────────────

#[derive(
  Debug, Clone, PartialEq, Eq, Hash, Default, EnumString, Serialize, Deserialize,
)]
#[serde(from = "String", into = "String")]
pub enum Currency {
  #[default]
  #[strum(serialize = "PEN")]
  Pen,
  #[strum(serialize = "USD")]
  Usd,
  #[strum(serialize = "EUR")]
  Eur,
  #[strum(disabled)]
  Other(String),
}

pub const CURRENCIES: [Currency; 3] = [Currency::Pen, Currency::Usd, Currency::Eur];

impl Currency {
  pub fn as_str(&self) -> &str {
    match self {
      Self::Pen => "PEN",
      Self::Usd => "USD",
      Self::Eur => "EUR",
      Self::Other(raw) => raw,
    }
  }
}

// ─── Text conversions shared by the three tables ─────────────────────────────

macro_rules! text_enum {
  ($ty:ident, $fallback:ident) => {
    impl $ty {
      /// Trim and look `raw` up in the table. Anything outside it is kept
      /// verbatim in the passthrough variant.
      pub fn from_text(raw: &str) -> Self {
        let raw = raw.trim();
        raw.parse().unwrap_or_else(|_| Self::$fallback(raw.to_owned()))
      }
    }

    impl From<String> for $ty {
      fn from(raw: String) -> Self { Self::from_text(&raw) }
    }

    impl From<$ty> for String {
      fn from(value: $ty) -> Self { value.as_str().to_owned() }
    }

    impl fmt::Display for $ty {
      fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
      }
    }
  };
}

text_enum!(Status, Unknown);
text_enum!(Priority, Unknown);
text_enum!(Currency, Other);

// ─── Application ─────────────────────────────────────────────────────────────

/// One tracked job application.
///
/// Optional fields are omitted from the persisted JSON when absent, never
/// written as `null`. No ordering is enforced between `salary_min` and
/// `salary_max`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Application {
  pub id:               Uuid,
  pub date_applied:     NaiveDate,
  #[serde(default)]
  pub company:          String,
  #[serde(default)]
  pub role:             String,
  #[serde(default)]
  pub source:           String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub link:             Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub location:         Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub contact:          Option<String>,
  #[serde(default)]
  pub status:           Status,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub salary_min:       Option<f64>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub salary_max:       Option<f64>,
  #[serde(default)]
  pub currency:         Currency,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub next_action_date: Option<NaiveDate>,
  #[serde(default)]
  pub priority:         Priority,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub notes:            Option<String>,
}

impl Application {
  /// A fresh record dated today (local time) with every default applied.
  pub fn new() -> Self { Self::new_on(today()) }

  /// A fresh record dated `date_applied` with every default applied.
  pub fn new_on(date_applied: NaiveDate) -> Self {
    Self {
      id: Uuid::new_v4(),
      date_applied,
      company: String::new(),
      role: String::new(),
      source: String::new(),
      link: None,
      location: None,
      contact: None,
      status: Status::default(),
      salary_min: None,
      salary_max: None,
      currency: Currency::default(),
      next_action_date: None,
      priority: Priority::default(),
      notes: None,
    }
  }

  /// `"PEN 11000 – 13000"`, `"USD 5000"`, `"EUR  – 900"`, or `"—"` when no
  /// bound is present.
  pub fn salary_display(&self) -> String {
    if self.salary_min.is_none() && self.salary_max.is_none() {
      return "—".to_string();
    }
    let mut out = format!("{} ", self.currency);
    if let Some(min) = self.salary_min {
      out.push_str(&min.to_string());
    }
    if let Some(max) = self.salary_max {
      out.push_str(&format!(" – {max}"));
    }
    out
  }
}

impl Default for Application {
  fn default() -> Self { Self::new() }
}

/// Today's date in local time.
pub fn today() -> NaiveDate { Local::now().date_naive() }

/// Two sample applications dated `today`, used to populate an empty tracker.
pub fn demo_applications(today: NaiveDate) -> Vec<Application> {
  vec![
    Application {
      company: "TASA".into(),
      role: "Coordinador de Compras".into(),
      source: "LinkedIn".into(),
      location: Some("Lima".into()),
      contact: Some("Gabriela Méndez <gmendez@tasa.com.pe>".into()),
      status: Status::Interview,
      salary_min: Some(11000.0),
      salary_max: Some(13000.0),
      next_action_date: Some(today),
      priority: Priority::High,
      notes: Some(
        "Enviar caso de éxito y KPI de reducción de SOLPEDs.".into(),
      ),
      ..Application::new_on(today)
    },
    Application {
      company: "Atria Energía".into(),
      role: "Jefe de Compras".into(),
      source: "Referido".into(),
      location: Some("Lima".into()),
      salary_min: Some(12000.0),
      salary_max: Some(14000.0),
      notes: Some("Adjuntar logros del proyecto de activos y TCO.".into()),
      ..Application::new_on(today)
    },
  ]
}

// ─── Tests ───────────────────────────────────────────────────────────────────
