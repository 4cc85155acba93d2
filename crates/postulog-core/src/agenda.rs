//! Follow-up agenda: applications with a next-action date, bucketed by day.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::application::Application;

/// All applications whose next action falls on `date`, in collection order.
#[derive(Debug, Clone)]
pub struct AgendaDay<'a> {
  pub date:         NaiveDate,
  pub applications: Vec<&'a Application>,
}

/// Group applications by `next_action_date`, earliest day first. Records
/// without a next action are left out.
pub fn group_by_next_action(apps: &[Application]) -> Vec<AgendaDay<'_>> {
  let mut days: BTreeMap<NaiveDate, Vec<&Application>> = BTreeMap::new();
  for a in apps {
    if let Some(date) = a.next_action_date {
      days.entry(date).or_default().push(a);
    }
  }
  days
    .into_iter()
    .map(|(date, applications)| AgendaDay { date, applications })
    .collect()
}

#[cfg(test)]
mod tests {
  use super::*;

  fn with_action(company: &str, date: Option<&str>) -> Application {
    let mut a =
      Application::new_on(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
    a.company = company.to_string();
    a.next_action_date =
      date.map(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d").unwrap());
    a
  }

  #[test]
  fn empty_input_yields_no_days() {
    assert!(group_by_next_action(&[]).is_empty());
  }

  #[test]
  fn groups_sorted_by_date_with_stable_buckets() {
    let apps = vec![
      with_action("first", Some("2024-03-01")),
      with_action("middle", Some("2024-02-15")),
      with_action("none", None),
      with_action("second", Some("2024-03-01")),
    ];
    let days = group_by_next_action(&apps);

    let dates: Vec<String> = days.iter().map(|d| d.date.to_string()).collect();
    assert_eq!(dates, ["2024-02-15", "2024-03-01"]);

    let march: Vec<&str> = days[1]
      .applications
      .iter()
      .map(|a| a.company.as_str())
      .collect();
    assert_eq!(march, ["first", "second"]);
    assert_eq!(days[0].applications.len(), 1);
  }

  #[test]
  fn records_without_next_action_are_excluded() {
    let apps = vec![with_action("a", None), with_action("b", None)];
    assert!(group_by_next_action(&apps).is_empty());
  }
}
