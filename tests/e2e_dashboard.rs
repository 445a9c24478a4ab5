// DoseWatch - tests/e2e_dashboard.rs
//
// End-to-end tests for the dashboard pipeline.
//
// These tests exercise the real filesystem, real TOML fixture loading,
// real config.toml validation and real session persistence. Each test
// goes from files on disk to the view state the panels render.

use chrono::NaiveDate;
use dosewatch::app::fixture_mgr;
use dosewatch::app::session;
use dosewatch::app::state::{AppState, Tab};
use dosewatch::core::calendar;
use dosewatch::core::export;
use dosewatch::core::filter::ActivityFilter;
use dosewatch::core::fixtures::FixtureSet;
use dosewatch::core::model::{DeliveryChannel, ExecutionStatus, IntendedAction};
use dosewatch::platform::config::{load_config, AppConfig};
use dosewatch::util::error::FixtureError;
use std::path::PathBuf;
use tempfile::TempDir;

// =============================================================================
// Helpers
// =============================================================================

/// Absolute path to an on-disk fixture file.
fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn load_ward() -> FixtureSet {
    let (set, errors) = fixture_mgr::load_fixtures(Some(&fixture("ward.toml")));
    assert_eq!(errors.len(), 1, "unexpected errors: {errors:?}");
    set
}

fn ward_state() -> AppState {
    let mut state = AppState::new(load_ward(), &AppConfig::default(), false);
    state.set_reference_date(date(2025, 2, 28));
    state
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

// =============================================================================
// Fixture loading
// =============================================================================

#[test]
fn e2e_loads_ward_fixture_with_orphan_warning() {
    let (set, errors) = fixture_mgr::load_fixtures(Some(&fixture("ward.toml")));

    assert_eq!(set.reminders.len(), 2);
    assert_eq!(set.instances.len(), 3);
    assert!(matches!(
        errors[0],
        FixtureError::UnknownReminder {
            instance_id: 502,
            reminder_id: 99,
            ..
        }
    ));
    assert!(!errors[0].is_fatal());

    let metformin = set.reminder(10).unwrap();
    assert_eq!(metformin.executions[0].method, DeliveryChannel::Chat);
    assert_eq!(metformin.executions[2].status, ExecutionStatus::Pending);
}

#[test]
fn e2e_bundled_demo_file_matches_builtin() {
    let demo = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("fixtures")
        .join("demo.toml");
    let (from_disk, errors) = fixture_mgr::load_fixtures(Some(&demo));
    assert!(errors.is_empty());

    let (builtin, _) = fixture_mgr::load_fixtures(None);
    assert_eq!(from_disk.reminders, builtin.reminders);
    assert_eq!(from_disk.instances, builtin.instances);
}

#[test]
fn e2e_broken_fixture_falls_back_to_builtin() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("broken.toml");
    std::fs::write(&path, "[[reminders]]\nid = \"not a number\"\n").unwrap();

    let (set, errors) = fixture_mgr::load_fixtures(Some(&path));
    assert!(matches!(errors[0], FixtureError::TomlParse { .. }));
    assert!(errors[0].is_fatal());
    assert_eq!(set.reminders.len(), 3, "built-in demo set expected");
}

// =============================================================================
// Today and calendar
// =============================================================================

#[test]
fn e2e_reference_date_defaults_to_latest_instance() {
    let state = AppState::new(load_ward(), &AppConfig::default(), false);
    assert_eq!(state.reference_date, date(2025, 3, 1));
    assert_eq!(state.calendar_month, (2025, 3));
}

#[test]
fn e2e_today_timeline_sorted_by_time() {
    let state = ward_state();
    let ids: Vec<u32> = state.today_timeline().iter().map(|i| i.id).collect();
    assert_eq!(ids, vec![501, 500]);
}

#[test]
fn e2e_calendar_month_mixes_instances_and_executions() {
    let state = ward_state();
    let events = state.calendar_events();
    assert_eq!(events.len(), 5);

    let on_28 = calendar::events_on(&events, 28);
    assert_eq!(on_28.len(), 3);
    assert_eq!(on_28.last().unwrap().id, "instance-500");

    let grid = state.calendar_grid();
    assert_eq!(grid.title(), "February 2025");
    // 1 Feb 2025 is a Saturday.
    assert_eq!(grid.weeks[0][5], Some(1));
}

// =============================================================================
// Configuration list
// =============================================================================

#[test]
fn e2e_filters_over_ward_reminders() {
    let mut state = ward_state();

    state.set_search("MET");
    assert_eq!(state.filtered_indices, vec![0]);

    // The only inactive reminder is an appointment, which the list never shows.
    state.set_search("");
    state.set_activity(ActivityFilter::InactiveOnly);
    assert!(state.filtered_indices.is_empty());
    assert_eq!(state.empty_hint(), "Create your first reminder");

    state.set_search("met");
    assert!(state.filtered_indices.is_empty());
    assert_eq!(state.empty_hint(), "Try another search term");
}

#[test]
fn e2e_recent_executions_skip_pending() {
    let state = ward_state();
    let metformin = state.fixtures.reminder(10).unwrap();
    let ids: Vec<u32> = state
        .recent_executions(metformin)
        .iter()
        .map(|e| e.id)
        .collect();
    assert_eq!(ids, vec![101, 100]);
}

#[test]
fn e2e_low_supply_flagged() {
    let state = ward_state();
    let gauge = state.supply_gauge(state.fixtures.reminder(10).unwrap());
    assert!(gauge.low_stock);
    assert_eq!(gauge.caption(), "12 of 56");

    let appointment = state.supply_gauge(state.fixtures.reminder(11).unwrap());
    assert_eq!(appointment.percent, 0.0);
}

#[test]
fn e2e_reminder_actions_are_recorded_not_applied() {
    let mut state = ward_state();

    state.toggle_active(10);
    state.toggle_active(11);
    assert!(state.show_activate_dialog);
    state.confirm_activation();

    state.open_detail(10);
    state.request_delete();
    state.confirm_delete();

    assert_eq!(
        state.intended_actions,
        vec![
            IntendedAction::Deactivate { reminder_id: 10 },
            IntendedAction::Activate { reminder_id: 11 },
            IntendedAction::Delete { reminder_id: 10 },
        ]
    );
    assert!(state.fixtures.reminder(10).unwrap().is_active);
    assert!(!state.fixtures.reminder(11).unwrap().is_active);
}

// =============================================================================
// Config, export and session on disk
// =============================================================================

#[test]
fn e2e_config_file_drives_state() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("config.toml"),
        "[ui]\ndefault_tab = \"config\"\n\n[reminders]\nrecent_executions_limit = 1\nlow_stock_percent = 10.0\n",
    )
    .unwrap();

    let (config, warnings) = load_config(dir.path());
    assert!(warnings.is_empty(), "unexpected warnings: {warnings:?}");

    let state = AppState::new(load_ward(), &config, false);
    assert_eq!(state.active_tab, Tab::Config);

    let metformin = state.fixtures.reminder(10).unwrap();
    assert_eq!(state.recent_executions(metformin).len(), 1);
    assert!(!state.supply_gauge(metformin).low_stock);
}

#[test]
fn e2e_history_export_to_disk() {
    let dir = TempDir::new().unwrap();
    let state = ward_state();
    let records = export::execution_records(&state.fixtures.reminders);

    let csv_path = dir.path().join("history.csv");
    let file = std::fs::File::create(&csv_path).unwrap();
    let rows = export::export_csv(&records, file, &csv_path).unwrap();
    assert_eq!(rows, 3);

    let content = std::fs::read_to_string(&csv_path).unwrap();
    assert_eq!(content.lines().count(), 4, "header plus three rows");
    assert!(content.contains("2025-02-28 08:00,pending,chat"));
}

#[test]
fn e2e_session_survives_restart() {
    let dir = TempDir::new().unwrap();
    let path = session::session_path(dir.path());

    let mut state = ward_state();
    state.session_file = Some(path.clone());
    state.active_tab = Tab::Calendar;
    state.set_search("metf");
    state.select_day(28);
    state.save_session();

    let mut restarted = ward_state();
    restarted.restore_session(session::load(&path).expect("session should load"));
    assert_eq!(restarted.active_tab, Tab::Calendar);
    assert_eq!(restarted.filter.search, "metf");
    assert_eq!(restarted.selected_day, Some(28));
    assert_eq!(restarted.filtered_indices, vec![0]);
}
