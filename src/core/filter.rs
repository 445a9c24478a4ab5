// DoseWatch - core/filter.rs
//
// Reminder list filtering: medicine-name search AND activity flag.
// Core layer: pure logic, no I/O or UI dependencies.

use crate::core::model::Reminder;
use serde::{Deserialize, Serialize};

/// Tri-state activity filter behind the "Active" / "Inactive" toggles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityFilter {
    #[default]
    All,
    ActiveOnly,
    InactiveOnly,
}

impl ActivityFilter {
    /// Pressing "Active": selects active-only, or clears it if already set.
    pub fn toggle_active(self) -> Self {
        match self {
            ActivityFilter::ActiveOnly => ActivityFilter::All,
            _ => ActivityFilter::ActiveOnly,
        }
    }

    /// Pressing "Inactive": selects inactive-only, or clears it if already set.
    pub fn toggle_inactive(self) -> Self {
        match self {
            ActivityFilter::InactiveOnly => ActivityFilter::All,
            _ => ActivityFilter::InactiveOnly,
        }
    }

    pub fn matches(&self, is_active: bool) -> bool {
        match self {
            ActivityFilter::All => true,
            ActivityFilter::ActiveOnly => is_active,
            ActivityFilter::InactiveOnly => !is_active,
        }
    }

    /// Parse the CLI / config spelling (`all`, `active`, `inactive`).
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "all" => Some(ActivityFilter::All),
            "active" => Some(ActivityFilter::ActiveOnly),
            "inactive" => Some(ActivityFilter::InactiveOnly),
            _ => None,
        }
    }
}

/// Complete filter state for the configuration list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReminderFilter {
    /// Substring matched against the medicine name (case-insensitive).
    pub search: String,

    pub activity: ActivityFilter,
}

impl ReminderFilter {
    /// Hint shown under the "no reminders found" message.
    pub fn empty_hint(&self) -> &'static str {
        if self.search.trim().is_empty() {
            "Create your first reminder"
        } else {
            "Try another search term"
        }
    }
}

/// Apply the filter, returning indices of matching reminders in list order.
///
/// Only reminders with a medicine are listed, even when the search is empty.
pub fn apply_filters(reminders: &[Reminder], filter: &ReminderFilter) -> Vec<usize> {
    let needle = filter.search.trim().to_lowercase();

    reminders
        .iter()
        .enumerate()
        .filter(|(_, r)| matches_all(r, filter, &needle))
        .map(|(idx, _)| idx)
        .collect()
}

fn matches_all(reminder: &Reminder, filter: &ReminderFilter, needle: &str) -> bool {
    filter.activity.matches(reminder.is_active)
        && reminder
            .medicine
            .as_ref()
            .is_some_and(|m| m.name.to_lowercase().contains(needle))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::model::{Medicine, ReminderKind};
    use chrono::NaiveDate;

    fn make_reminder(id: u32, name: Option<&str>, active: bool) -> Reminder {
        Reminder {
            id,
            kind: ReminderKind::Medicine,
            periodicity: Some("Daily".to_string()),
            start_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            end_date: None,
            is_active: active,
            medicine: name.map(|n| Medicine {
                id,
                name: n.to_string(),
                dosage: None,
                total_tablets: Some(30),
                tablets_left: Some(10),
                tablets_per_dose: 1,
                notes: None,
            }),
            executions: Vec::new(),
        }
    }

    fn sample() -> Vec<Reminder> {
        vec![
            make_reminder(1, Some("Aspirin"), true),
            make_reminder(2, Some("Insulin"), true),
            make_reminder(3, Some("Omeprazole"), false),
            make_reminder(4, None, false),
        ]
    }

    #[test]
    fn test_empty_filter_lists_every_medicine_reminder() {
        let result = apply_filters(&sample(), &ReminderFilter::default());
        assert_eq!(result, vec![0, 1, 2]);
    }

    #[test]
    fn test_active_only_excludes_inactive() {
        let reminders = sample();
        let filter = ReminderFilter {
            activity: ActivityFilter::ActiveOnly,
            ..Default::default()
        };
        let result = apply_filters(&reminders, &filter);
        assert_eq!(result, vec![0, 1]);
        assert!(result.iter().all(|&i| reminders[i].is_active));
    }

    #[test]
    fn test_medicine_less_reminder_is_never_listed() {
        let filter = ReminderFilter {
            activity: ActivityFilter::InactiveOnly,
            ..Default::default()
        };
        assert_eq!(apply_filters(&sample(), &filter), vec![2]);

        let appointment_only = vec![make_reminder(9, None, true)];
        let filter = ReminderFilter {
            activity: ActivityFilter::ActiveOnly,
            ..Default::default()
        };
        assert!(apply_filters(&appointment_only, &filter).is_empty());
        assert!(apply_filters(&appointment_only, &ReminderFilter::default()).is_empty());
    }

    #[test]
    fn test_search_is_case_insensitive_substring() {
        let filter = ReminderFilter {
            search: "IN".to_string(),
            ..Default::default()
        };
        // "aspIrIN", "INsulIN"; the medicine-less reminder never matches a search.
        assert_eq!(apply_filters(&sample(), &filter), vec![0, 1]);
    }

    #[test]
    fn test_combined_search_and_activity() {
        let filter = ReminderFilter {
            search: "o".to_string(),
            activity: ActivityFilter::InactiveOnly,
        };
        assert_eq!(apply_filters(&sample(), &filter), vec![2]);
    }

    #[test]
    fn test_toggles_clear_when_pressed_twice() {
        let f = ActivityFilter::All.toggle_active();
        assert_eq!(f, ActivityFilter::ActiveOnly);
        assert_eq!(f.toggle_active(), ActivityFilter::All);
        assert_eq!(f.toggle_inactive(), ActivityFilter::InactiveOnly);
        assert_eq!(
            ActivityFilter::InactiveOnly.toggle_inactive(),
            ActivityFilter::All
        );
    }

    #[test]
    fn test_empty_hint_depends_on_search() {
        let mut filter = ReminderFilter::default();
        assert_eq!(filter.empty_hint(), "Create your first reminder");
        filter.search = "zzz".to_string();
        assert_eq!(filter.empty_hint(), "Try another search term");
    }

    #[test]
    fn test_parse_activity_filter() {
        assert_eq!(ActivityFilter::parse("Active"), Some(ActivityFilter::ActiveOnly));
        assert_eq!(ActivityFilter::parse("all"), Some(ActivityFilter::All));
        assert_eq!(ActivityFilter::parse("paused"), None);
    }
}
