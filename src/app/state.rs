// DoseWatch - app/state.rs
//
// Application view state: the loaded fixture set, the active tab, list
// filters, selection and dialog flags. Owned by the eframe::App
// implementation.
//
// Fixture records are never mutated. User actions on reminders are kept
// in a bounded intended-action log and emitted through tracing.

use crate::app::session::{self, SessionData, SESSION_VERSION};
use crate::core::calendar::{self, CalendarEvent, MonthGrid};
use crate::core::filter::{self, ActivityFilter, ReminderFilter};
use crate::core::fixtures::FixtureSet;
use crate::core::history;
use crate::core::model::{IntendedAction, Reminder, ReminderExecution, ReminderInstance};
use crate::core::supply::SupplyGauge;
use crate::platform::config::AppConfig;
use crate::util::constants;
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Top-level dashboard tabs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tab {
    #[default]
    Today,
    Calendar,
    Config,
}

impl Tab {
    pub fn all() -> &'static [Tab] {
        &[Tab::Today, Tab::Calendar, Tab::Config]
    }

    pub fn label(&self) -> &'static str {
        match self {
            Tab::Today => "Today",
            Tab::Calendar => "Calendar",
            Tab::Config => "Configuration",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "today" => Some(Tab::Today),
            "calendar" => Some(Tab::Calendar),
            "config" | "configuration" => Some(Tab::Config),
            _ => None,
        }
    }
}

/// Top-level application state.
#[derive(Debug)]
pub struct AppState {
    /// Reminders and instances on display.
    pub fixtures: FixtureSet,

    /// Date treated as "today" by the timeline.
    pub reference_date: NaiveDate,

    /// Month shown by the calendar as (year, month).
    pub calendar_month: (i32, u32),

    pub active_tab: Tab,

    /// Configuration-list filter.
    pub filter: ReminderFilter,

    /// Indices into `fixtures.reminders` matching `filter`.
    pub filtered_indices: Vec<usize>,

    /// Reminder the dialogs operate on.
    pub selected_reminder: Option<u32>,

    /// Day of `calendar_month` whose events are listed.
    pub selected_day: Option<u32>,

    pub show_medicine_detail: bool,
    pub show_delete_dialog: bool,
    pub show_activate_dialog: bool,
    pub show_about: bool,

    /// Requests recorded from the UI, oldest first.
    pub intended_actions: Vec<IntendedAction>,

    pub recent_limit: usize,
    pub low_stock_percent: f32,

    /// Status message for the status bar.
    pub status_message: String,

    /// Non-fatal warnings from config and fixture loading.
    pub warnings: Vec<String>,

    pub dark_mode: bool,
    pub font_size: f32,
    pub debug_mode: bool,

    /// Where the session is saved on exit (None disables persistence).
    pub session_file: Option<PathBuf>,
}

impl AppState {
    /// Create initial state for a fixture set.
    ///
    /// The reference date defaults to the latest date with a scheduled
    /// instance, falling back to the local date for an empty set.
    pub fn new(fixtures: FixtureSet, config: &AppConfig, debug_mode: bool) -> Self {
        let reference_date = fixtures
            .anchor_date()
            .unwrap_or_else(|| chrono::Local::now().date_naive());

        let mut state = Self {
            fixtures,
            reference_date,
            calendar_month: (reference_date.year(), reference_date.month()),
            active_tab: config
                .default_tab
                .as_deref()
                .and_then(Tab::parse)
                .unwrap_or_default(),
            filter: ReminderFilter::default(),
            filtered_indices: Vec::new(),
            selected_reminder: None,
            selected_day: None,
            show_medicine_detail: false,
            show_delete_dialog: false,
            show_activate_dialog: false,
            show_about: false,
            intended_actions: Vec::new(),
            recent_limit: config.recent_executions_limit,
            low_stock_percent: config.low_stock_percent,
            status_message: "Ready.".to_string(),
            warnings: Vec::new(),
            dark_mode: config.dark_mode,
            font_size: config.font_size,
            debug_mode,
            session_file: None,
        };
        state.apply_filters();
        state
    }

    // -------------------------------------------------------------------------
    // Filtering
    // -------------------------------------------------------------------------

    /// Recompute filtered indices from the reminders and filter state.
    pub fn apply_filters(&mut self) {
        self.filtered_indices = filter::apply_filters(&self.fixtures.reminders, &self.filter);
        tracing::debug!(
            visible = self.filtered_indices.len(),
            total = self.fixtures.reminders.len(),
            "Reminder filter applied"
        );
    }

    pub fn set_search(&mut self, text: impl Into<String>) {
        self.filter.search = text.into();
        self.apply_filters();
    }

    pub fn set_activity(&mut self, activity: ActivityFilter) {
        self.filter.activity = activity;
        self.apply_filters();
    }

    /// The "Active" toggle button.
    pub fn toggle_active_filter(&mut self) {
        self.set_activity(self.filter.activity.toggle_active());
    }

    /// The "Inactive" toggle button.
    pub fn toggle_inactive_filter(&mut self) {
        self.set_activity(self.filter.activity.toggle_inactive());
    }

    /// Reminders passing the current filter, in list order.
    pub fn visible_reminders(&self) -> impl Iterator<Item = &Reminder> {
        self.filtered_indices
            .iter()
            .filter_map(|&i| self.fixtures.reminders.get(i))
    }

    /// Hint shown when the filtered list is empty.
    pub fn empty_hint(&self) -> &'static str {
        self.filter.empty_hint()
    }

    // -------------------------------------------------------------------------
    // Derived per-reminder views
    // -------------------------------------------------------------------------

    pub fn recent_executions<'a>(&self, reminder: &'a Reminder) -> Vec<&'a ReminderExecution> {
        history::recent_executions(&reminder.executions, self.recent_limit)
    }

    pub fn supply_gauge(&self, reminder: &Reminder) -> SupplyGauge {
        SupplyGauge::new(reminder.medicine.as_ref(), self.low_stock_percent)
    }

    pub fn selected_reminder(&self) -> Option<&Reminder> {
        self.selected_reminder
            .and_then(|id| self.fixtures.reminder(id))
    }

    // -------------------------------------------------------------------------
    // Reminder actions
    // -------------------------------------------------------------------------

    /// Open the medicine detail dialog for a reminder.
    pub fn open_detail(&mut self, reminder_id: u32) {
        if self.fixtures.reminder(reminder_id).is_none() {
            tracing::warn!(reminder = reminder_id, "Detail requested for unknown reminder");
            return;
        }
        self.selected_reminder = Some(reminder_id);
        self.show_medicine_detail = true;
    }

    pub fn close_detail(&mut self) {
        self.show_medicine_detail = false;
    }

    /// Activate/deactivate button.
    ///
    /// An active reminder is deactivated immediately; an inactive one
    /// opens the activation dialog so the user can confirm.
    pub fn toggle_active(&mut self, reminder_id: u32) {
        let Some(reminder) = self.fixtures.reminder(reminder_id) else {
            tracing::warn!(reminder = reminder_id, "Toggle requested for unknown reminder");
            return;
        };
        if reminder.is_active {
            self.record(IntendedAction::Deactivate { reminder_id });
        } else {
            self.selected_reminder = Some(reminder_id);
            self.show_activate_dialog = true;
        }
    }

    /// "Activate" in the activation dialog.
    pub fn confirm_activation(&mut self) {
        if let Some(reminder_id) = self.selected_reminder {
            self.record(IntendedAction::Activate { reminder_id });
        }
        self.show_activate_dialog = false;
    }

    pub fn cancel_activation(&mut self) {
        self.show_activate_dialog = false;
    }

    /// "Delete" in the detail dialog: asks for confirmation.
    pub fn request_delete(&mut self) {
        if self.selected_reminder.is_some() {
            self.show_delete_dialog = true;
        }
    }

    pub fn cancel_delete(&mut self) {
        self.show_delete_dialog = false;
    }

    /// "Delete" in the confirmation dialog. Closes both dialogs.
    pub fn confirm_delete(&mut self) {
        if let Some(reminder_id) = self.selected_reminder {
            self.record(IntendedAction::Delete { reminder_id });
        }
        self.show_delete_dialog = false;
        self.show_medicine_detail = false;
    }

    /// "New" button in the header.
    pub fn request_new_reminder(&mut self) {
        self.record(IntendedAction::Create);
    }

    /// Record an intended action, log it and surface it in the status bar.
    pub fn record(&mut self, action: IntendedAction) {
        tracing::info!(
            action = action.verb(),
            reminder = ?action.reminder_id(),
            "Intended reminder action recorded"
        );
        self.status_message = format!("Requested: {action}");
        self.intended_actions.push(action);
        if self.intended_actions.len() > constants::MAX_INTENDED_ACTIONS {
            let excess = self.intended_actions.len() - constants::MAX_INTENDED_ACTIONS;
            self.intended_actions.drain(..excess);
        }
    }

    // -------------------------------------------------------------------------
    // Timeline and calendar
    // -------------------------------------------------------------------------

    /// Instances scheduled on the reference date, by time.
    pub fn today_timeline(&self) -> Vec<&ReminderInstance> {
        calendar::day_timeline(&self.fixtures.instances, self.reference_date)
    }

    pub fn set_reference_date(&mut self, date: NaiveDate) {
        self.reference_date = date;
        self.calendar_month = (date.year(), date.month());
        self.selected_day = None;
    }

    pub fn calendar_grid(&self) -> MonthGrid {
        let (year, month) = self.calendar_month;
        MonthGrid::new(year, month).unwrap_or_else(|| MonthGrid::containing(self.reference_date))
    }

    pub fn calendar_events(&self) -> Vec<CalendarEvent> {
        let (year, month) = self.calendar_month;
        calendar::month_events(
            &self.fixtures.reminders,
            &self.fixtures.instances,
            year,
            month,
        )
    }

    pub fn show_previous_month(&mut self) {
        self.calendar_month = self.calendar_grid().previous();
        self.selected_day = None;
    }

    pub fn show_next_month(&mut self) {
        self.calendar_month = self.calendar_grid().next();
        self.selected_day = None;
    }

    /// Select a calendar day; selecting it again clears the selection.
    pub fn select_day(&mut self, day: u32) {
        self.selected_day = if self.selected_day == Some(day) {
            None
        } else {
            Some(day)
        };
    }

    // -------------------------------------------------------------------------
    // Session
    // -------------------------------------------------------------------------

    pub fn to_session(&self) -> SessionData {
        SessionData {
            version: SESSION_VERSION,
            active_tab: self.active_tab,
            search: self.filter.search.clone(),
            activity: self.filter.activity,
            selected_day: self.selected_day,
            dark_mode: self.dark_mode,
        }
    }

    /// Restore view settings from a previous session.
    pub fn restore_session(&mut self, data: SessionData) {
        self.active_tab = data.active_tab;
        self.filter.search = data.search;
        self.filter.activity = data.activity;
        let (year, month) = self.calendar_month;
        let last_day = calendar::days_in_month(year, month).unwrap_or(0);
        self.selected_day = data.selected_day.filter(|d| (1..=last_day).contains(d));
        self.dark_mode = data.dark_mode;
        self.apply_filters();
    }

    /// Persist the session if a session file is configured.
    pub fn save_session(&self) {
        let Some(ref path) = self.session_file else {
            return;
        };
        if let Err(e) = session::save(&self.to_session(), path) {
            tracing::warn!(error = %e, "Failed to save session");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::fixtures::load_builtin_fixtures;
    use crate::core::model::ExecutionStatus;

    fn demo_state() -> AppState {
        AppState::new(load_builtin_fixtures(), &AppConfig::default(), false)
    }

    #[test]
    fn test_initial_state_shows_everything() {
        let state = demo_state();
        assert_eq!(state.active_tab, Tab::Today);
        assert_eq!(state.filtered_indices, vec![0, 1, 2]);
        assert_eq!(
            state.reference_date,
            NaiveDate::from_ymd_opt(2024, 11, 22).unwrap()
        );
        assert_eq!(state.calendar_month, (2024, 11));
    }

    #[test]
    fn test_default_tab_from_config() {
        let config = AppConfig {
            default_tab: Some("calendar".to_string()),
            ..AppConfig::default()
        };
        let state = AppState::new(load_builtin_fixtures(), &config, false);
        assert_eq!(state.active_tab, Tab::Calendar);
    }

    #[test]
    fn test_active_toggle_excludes_inactive() {
        let mut state = demo_state();
        state.toggle_active_filter();
        assert!(state.visible_reminders().all(|r| r.is_active));
        assert_eq!(state.visible_reminders().count(), 2);

        state.toggle_active_filter();
        assert_eq!(state.filter.activity, ActivityFilter::All);
        assert_eq!(state.visible_reminders().count(), 3);
    }

    #[test]
    fn test_search_without_match_gives_hint() {
        let mut state = demo_state();
        state.set_search("paracetamol");
        assert_eq!(state.visible_reminders().count(), 0);
        assert_eq!(state.empty_hint(), "Try another search term");
    }

    #[test]
    fn test_deactivating_active_reminder_is_immediate() {
        let mut state = demo_state();
        state.toggle_active(1);
        assert!(!state.show_activate_dialog);
        assert_eq!(
            state.intended_actions,
            vec![IntendedAction::Deactivate { reminder_id: 1 }]
        );
        // Fixture data is untouched.
        assert!(state.fixtures.reminder(1).unwrap().is_active);
    }

    #[test]
    fn test_activating_inactive_reminder_goes_through_dialog() {
        let mut state = demo_state();
        state.toggle_active(3);
        assert!(state.show_activate_dialog);
        assert_eq!(state.selected_reminder, Some(3));
        assert!(state.intended_actions.is_empty());

        state.confirm_activation();
        assert!(!state.show_activate_dialog);
        assert_eq!(
            state.intended_actions,
            vec![IntendedAction::Activate { reminder_id: 3 }]
        );
    }

    #[test]
    fn test_delete_closes_both_dialogs() {
        let mut state = demo_state();
        state.open_detail(2);
        assert!(state.show_medicine_detail);
        state.request_delete();
        assert!(state.show_delete_dialog);

        state.confirm_delete();
        assert!(!state.show_delete_dialog);
        assert!(!state.show_medicine_detail);
        assert_eq!(
            state.intended_actions.last(),
            Some(&IntendedAction::Delete { reminder_id: 2 })
        );
        assert_eq!(state.status_message, "Requested: delete reminder #2");
    }

    #[test]
    fn test_cancel_delete_keeps_detail_open() {
        let mut state = demo_state();
        state.open_detail(1);
        state.request_delete();
        state.cancel_delete();
        assert!(state.show_medicine_detail);
        assert!(state.intended_actions.is_empty());
    }

    #[test]
    fn test_unknown_reminder_is_ignored() {
        let mut state = demo_state();
        state.open_detail(99);
        state.toggle_active(99);
        assert!(!state.show_medicine_detail);
        assert!(state.intended_actions.is_empty());
    }

    #[test]
    fn test_intended_action_log_is_bounded() {
        let mut state = demo_state();
        for _ in 0..constants::MAX_INTENDED_ACTIONS + 5 {
            state.request_new_reminder();
        }
        assert_eq!(state.intended_actions.len(), constants::MAX_INTENDED_ACTIONS);
    }

    #[test]
    fn test_recent_executions_respect_limit() {
        let mut state = demo_state();
        state.recent_limit = 2;
        let aspirin = state.fixtures.reminder(1).unwrap().clone();
        let recent = state.recent_executions(&aspirin);
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].status, ExecutionStatus::Failed);
    }

    #[test]
    fn test_today_timeline_is_chronological() {
        let state = demo_state();
        let ids: Vec<u32> = state.today_timeline().iter().map(|i| i.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_month_navigation_clears_day() {
        let mut state = demo_state();
        state.select_day(22);
        state.show_next_month();
        assert_eq!(state.calendar_month, (2024, 12));
        assert_eq!(state.selected_day, None);
        state.show_previous_month();
        state.show_previous_month();
        assert_eq!(state.calendar_month, (2024, 10));
    }

    #[test]
    fn test_session_round_trip_through_state() {
        let mut state = demo_state();
        state.active_tab = Tab::Config;
        state.set_search("asp");
        state.toggle_inactive_filter();
        state.select_day(22);
        state.dark_mode = false;

        let snapshot = state.to_session();
        let mut fresh = demo_state();
        fresh.restore_session(snapshot);
        assert_eq!(fresh.active_tab, Tab::Config);
        assert_eq!(fresh.filter.search, "asp");
        assert_eq!(fresh.filter.activity, ActivityFilter::InactiveOnly);
        assert_eq!(fresh.selected_day, Some(22));
        assert!(!fresh.dark_mode);
        // "asp" + inactive-only matches nothing in the demo set.
        assert!(fresh.filtered_indices.is_empty());
    }

    #[test]
    fn test_restored_day_out_of_range_is_dropped() {
        let mut state = demo_state();
        let mut snapshot = state.to_session();
        snapshot.selected_day = Some(31); // November has 30 days
        state.restore_session(snapshot);
        assert_eq!(state.selected_day, None);
    }
}
