// DoseWatch - core/fixtures.rs
//
// Fixture set parsing and structural validation.
// Core layer: accepts TOML strings, never touches the filesystem.
// I/O is handled by app::fixture_mgr which feeds content here.

use crate::core::model::{Reminder, ReminderInstance};
use crate::util::constants;
use crate::util::error::FixtureError;
use chrono::NaiveDate;
use serde::Deserialize;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Raw TOML document shape.
#[derive(Debug, Default, Deserialize)]
pub struct FixtureDocument {
    #[serde(default)]
    pub reminders: Vec<Reminder>,
    #[serde(default)]
    pub instances: Vec<ReminderInstance>,
}

/// A validated, ready-to-display fixture set.
#[derive(Debug, Clone, Default)]
pub struct FixtureSet {
    /// Where the set came from (`<builtin>/demo.toml` for the embedded one).
    pub source: PathBuf,
    pub reminders: Vec<Reminder>,
    pub instances: Vec<ReminderInstance>,
}

impl FixtureSet {
    /// Latest date with a scheduled instance, used as the default "today".
    pub fn anchor_date(&self) -> Option<NaiveDate> {
        self.instances.iter().map(|i| i.scheduled_at.date()).max()
    }

    pub fn reminder(&self, id: u32) -> Option<&Reminder> {
        self.reminders.iter().find(|r| r.id == id)
    }
}

/// Source of the embedded demo set.
pub const BUILTIN_FIXTURE_NAME: &str = "demo.toml";

fn builtin_source() -> &'static str {
    include_str!("../../fixtures/demo.toml")
}

/// Parse a TOML string into a `FixtureDocument`.
///
/// `source_path` is used for error messages only (not for I/O).
pub fn parse_fixture_toml(
    content: &str,
    source_path: &Path,
) -> Result<FixtureDocument, FixtureError> {
    toml::from_str(content).map_err(|e| FixtureError::TomlParse {
        path: source_path.to_path_buf(),
        source: e,
    })
}

/// Validate a parsed document.
///
/// Duplicate ids are fatal. Instances pointing at unknown reminders and
/// oversized sets are reported as non-fatal warnings alongside the set.
pub fn validate(
    doc: FixtureDocument,
    source_path: &Path,
) -> Result<(FixtureSet, Vec<FixtureError>), FixtureError> {
    let mut warnings = Vec::new();

    let mut reminder_ids = HashSet::new();
    for r in &doc.reminders {
        if !reminder_ids.insert(r.id) {
            return Err(FixtureError::DuplicateReminderId {
                path: source_path.to_path_buf(),
                id: r.id,
            });
        }
    }

    let mut instance_ids = HashSet::new();
    for i in &doc.instances {
        if !instance_ids.insert(i.id) {
            return Err(FixtureError::DuplicateInstanceId {
                path: source_path.to_path_buf(),
                id: i.id,
            });
        }
        if !reminder_ids.contains(&i.reminder_id) {
            tracing::warn!(
                instance = i.id,
                reminder = i.reminder_id,
                "Instance refers to unknown reminder"
            );
            warnings.push(FixtureError::UnknownReminder {
                path: source_path.to_path_buf(),
                instance_id: i.id,
                reminder_id: i.reminder_id,
            });
        }
    }

    let mut reminders = doc.reminders;
    if reminders.len() > constants::MAX_REMINDERS {
        warnings.push(FixtureError::TooManyReminders {
            count: reminders.len(),
            max: constants::MAX_REMINDERS,
        });
        reminders.truncate(constants::MAX_REMINDERS);
    }

    Ok((
        FixtureSet {
            source: source_path.to_path_buf(),
            reminders,
            instances: doc.instances,
        },
        warnings,
    ))
}

/// Parse and validate in one step.
pub fn load_from_str(
    content: &str,
    source_path: &Path,
) -> Result<(FixtureSet, Vec<FixtureError>), FixtureError> {
    let doc = parse_fixture_toml(content, source_path)?;
    validate(doc, source_path)
}

/// Load the embedded demo set.
///
/// The embedded document is covered by tests; should it ever fail to parse,
/// an empty set is returned and the error logged.
pub fn load_builtin_fixtures() -> FixtureSet {
    let path = PathBuf::from(format!("<builtin>/{BUILTIN_FIXTURE_NAME}"));
    match load_from_str(builtin_source(), &path) {
        Ok((set, warnings)) => {
            for w in &warnings {
                tracing::warn!(error = %w, "Built-in fixture warning");
            }
            tracing::debug!(
                reminders = set.reminders.len(),
                instances = set.instances.len(),
                "Loaded built-in fixtures"
            );
            set
        }
        Err(e) => {
            tracing::error!(error = %e, "Built-in fixtures failed to load");
            FixtureSet {
                source: path,
                ..Default::default()
            }
        }
    }
}
