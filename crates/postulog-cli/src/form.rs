//! Field arguments shared by `add` and `edit`, and how they land on a record.
//!
//! An empty string clears an optional field. Status, priority and currency
//! accept any text; values outside the tables are kept verbatim.

use anyhow::{Context, Result, bail};
use chrono::NaiveDate;
use clap::Args;
use postulog_core::application::{Application, Currency, Priority, Status};

#[derive(Args, Debug, Default, Clone)]
pub struct FieldArgs {
  #[arg(long)]
  pub company:  Option<String>,
  #[arg(long)]
  pub role:     Option<String>,
  /// Where the posting was found (LinkedIn, Referido, ...).
  #[arg(long)]
  pub source:   Option<String>,
  #[arg(long)]
  pub link:     Option<String>,
  #[arg(long)]
  pub location: Option<String>,
  #[arg(long)]
  pub contact:  Option<String>,
  /// Draft, Applied, Screening, Interview, Offer, On Hold, Rejected.
  #[arg(long)]
  pub status:   Option<String>,
  /// Low, Medium, High.
  #[arg(long)]
  pub priority: Option<String>,
  /// PEN, USD, EUR.
  #[arg(long)]
  pub currency: Option<String>,
  #[arg(long, value_name = "AMOUNT")]
  pub salary_min: Option<String>,
  #[arg(long, value_name = "AMOUNT")]
  pub salary_max: Option<String>,
  /// Application date, YYYY-MM-DD.
  #[arg(long, value_name = "DATE")]
  pub date:     Option<String>,
  /// Next follow-up, YYYY-MM-DD.
  #[arg(long, value_name = "DATE")]
  pub next:     Option<String>,
  #[arg(long)]
  pub notes:    Option<String>,
}

impl FieldArgs {
  /// A new record dated `today` unless `--date` says otherwise. Company and
  /// role are mandatory.
  pub fn build(self, today: NaiveDate) -> Result<Application> {
    let has = |v: &Option<String>| v.as_deref().is_some_and(|s| !s.trim().is_empty());
    if !has(&self.company) || !has(&self.role) {
      bail!("--company and --role are required");
    }
    let mut app = Application::new_on(today);
    self.apply(&mut app)?;
    Ok(app)
  }

  /// Overwrite every field that was given.
  pub fn apply(self, app: &mut Application) -> Result<()> {
    set_text(&mut app.company, self.company);
    set_text(&mut app.role, self.role);
    set_text(&mut app.source, self.source);
    set_opt(&mut app.link, self.link);
    set_opt(&mut app.location, self.location);
    set_opt(&mut app.contact, self.contact);
    set_opt(&mut app.notes, self.notes);

    if let Some(s) = self.status {
      app.status = Status::from_text(&s);
    }
    if let Some(p) = self.priority {
      app.priority = Priority::from_text(&p);
    }
    if let Some(c) = self.currency {
      app.currency = Currency::from_text(&c);
    }
    if let Some(raw) = self.salary_min {
      app.salary_min = parse_amount(&raw)?;
    }
    if let Some(raw) = self.salary_max {
      app.salary_max = parse_amount(&raw)?;
    }
    if let Some(raw) = self.date {
      app.date_applied = parse_date(&raw)?
        .context("--date cannot be cleared")?;
    }
    if let Some(raw) = self.next {
      app.next_action_date = parse_date(&raw)?;
    }
    Ok(())
  }
}

fn set_text(target: &mut String, value: Option<String>) {
  if let Some(v) = value {
    *target = v.trim().to_owned();
  }
}

fn set_opt(target: &mut Option<String>, value: Option<String>) {
  if let Some(v) = value {
    let v = v.trim();
    *target = (!v.is_empty()).then(|| v.to_owned());
  }
}

fn parse_amount(raw: &str) -> Result<Option<f64>> {
  let raw = raw.trim();
  if raw.is_empty() {
    return Ok(None);
  }
  let n: f64 = raw
    .parse()
    .with_context(|| format!("not a number: {raw:?}"))?;
  if !n.is_finite() {
    bail!("not a finite amount: {raw:?}");
  }
  Ok(Some(n))
}

fn parse_date(raw: &str) -> Result<Option<NaiveDate>> {
  let raw = raw.trim();
  if raw.is_empty() {
    return Ok(None);
  }
  NaiveDate::parse_from_str(raw, "%Y-%m-%d")
    .map(Some)
    .with_context(|| format!("expected YYYY-MM-DD, got {raw:?}"))
}

#[cfg(test)]
mod tests {
  use super::*;

  fn day() -> NaiveDate { NaiveDate::from_ymd_opt(2024, 6, 1).unwrap() }

  fn named() -> FieldArgs {
    FieldArgs {
      company: Some(" Acme ".into()),
      role: Some("Buyer".into()),
      ..Default::default()
    }
  }

  #[test]
  fn build_requires_company_and_role() {
    assert!(FieldArgs::default().build(day()).is_err());
    let no_role = FieldArgs {
      company: Some("Acme".into()),
      role: Some("  ".into()),
      ..Default::default()
    };
    assert!(no_role.build(day()).is_err());
  }

  #[test]
  fn build_applies_defaults_and_trims() {
    let a = named().build(day()).unwrap();
    assert_eq!(a.company, "Acme");
    assert_eq!(a.date_applied, day());
    assert_eq!(a.status, Status::Applied);
    assert_eq!(a.currency, Currency::Pen);
  }

  #[test]
  fn apply_parses_tables_amounts_and_dates() {
    let mut a = named().build(day()).unwrap();
    FieldArgs {
      status: Some("On Hold".into()),
      priority: Some("High".into()),
      currency: Some("usd".into()),
      salary_min: Some("4500.5".into()),
      next: Some("2024-06-10".into()),
      ..Default::default()
    }
    .apply(&mut a)
    .unwrap();
    assert_eq!(a.status, Status::OnHold);
    assert_eq!(a.priority, Priority::High);
    assert_eq!(a.currency, Currency::Other("usd".into()));
    assert_eq!(a.salary_min, Some(4500.5));
    assert_eq!(a.next_action_date, NaiveDate::from_ymd_opt(2024, 6, 10));
  }

  #[test]
  fn empty_values_clear_optionals() {
    let mut a = named().build(day()).unwrap();
    a.notes = Some("x".into());
    a.salary_max = Some(1.0);
    a.next_action_date = Some(day());
    FieldArgs {
      notes: Some(String::new()),
      salary_max: Some(String::new()),
      next: Some(String::new()),
      ..Default::default()
    }
    .apply(&mut a)
    .unwrap();
    assert_eq!(a.notes, None);
    assert_eq!(a.salary_max, None);
    assert_eq!(a.next_action_date, None);
  }

  #[test]
  fn bad_input_is_rejected() {
    let mut a = named().build(day()).unwrap();
    let bad_amount = FieldArgs { salary_min: Some("lots".into()), ..Default::default() };
    assert!(bad_amount.apply(&mut a).is_err());
    let infinite = FieldArgs { salary_min: Some("inf".into()), ..Default::default() };
    assert!(infinite.apply(&mut a).is_err());
    let bad_date = FieldArgs { next: Some("06/10/2024".into()), ..Default::default() };
    assert!(bad_date.apply(&mut a).is_err());
    let cleared = FieldArgs { date: Some(String::new()), ..Default::default() };
    assert!(cleared.apply(&mut a).is_err());
  }
}
