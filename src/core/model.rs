// DoseWatch - core/model.rs
//
// Core data model types. Pure data definitions with no I/O, no UI,
// no platform dependencies.
//
// Records are flat display fixtures: no value invariants are enforced
// (remaining tablets may exceed the total, retry counts are not checked
// against the maximum).

use crate::util::constants;
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

// =============================================================================
// Reminder
// =============================================================================

/// What a reminder is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ReminderKind {
    #[default]
    Medicine,
    Appointment,
    General,
}

impl ReminderKind {
    pub fn label(&self) -> &'static str {
        match self {
            ReminderKind::Medicine => "Medicine",
            ReminderKind::Appointment => "Appointment",
            ReminderKind::General => "General",
        }
    }
}

/// A scheduled medication-taking rule shown in the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reminder {
    pub id: u32,

    #[serde(default)]
    pub kind: ReminderKind,

    /// Free-text cadence, e.g. "Every 8 hours". See [`PERIODICITY_PRESETS`].
    #[serde(default)]
    pub periodicity: Option<String>,

    pub start_date: NaiveDate,

    #[serde(default)]
    pub end_date: Option<NaiveDate>,

    #[serde(default = "default_true")]
    pub is_active: bool,

    #[serde(default)]
    pub medicine: Option<Medicine>,

    /// Past firings, in the order they were recorded.
    #[serde(default)]
    pub executions: Vec<ReminderExecution>,
}

fn default_true() -> bool {
    true
}

impl Reminder {
    /// Display name: the linked medicine's name, or the reminder kind.
    pub fn display_name(&self) -> &str {
        self.medicine
            .as_ref()
            .map(|m| m.name.as_str())
            .unwrap_or_else(|| self.kind.label())
    }

    /// "Active" / "Inactive" badge text.
    pub fn activity_label(&self) -> &'static str {
        if self.is_active {
            "Active"
        } else {
            "Inactive"
        }
    }
}

/// Cadence choices offered when describing a reminder.
pub const PERIODICITY_PRESETS: &[&str] = &[
    "Every 8 hours",
    "Every 12 hours",
    "Daily",
    "Every 2 days",
    "Weekly",
];

// =============================================================================
// Medicine
// =============================================================================

/// A medicine and its tablet inventory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Medicine {
    pub id: u32,
    pub name: String,

    #[serde(default)]
    pub dosage: Option<String>,

    #[serde(default)]
    pub total_tablets: Option<u32>,

    #[serde(default)]
    pub tablets_left: Option<u32>,

    #[serde(default = "default_tablets_per_dose")]
    pub tablets_per_dose: u32,

    #[serde(default)]
    pub notes: Option<String>,
}

fn default_tablets_per_dose() -> u32 {
    constants::DEFAULT_TABLETS_PER_DOSE
}

// =============================================================================
// Executions and instances
// =============================================================================

/// Outcome of one reminder firing.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "lowercase")]
pub enum ExecutionStatus {
    #[default]
    Pending,
    Success,
    Failed,
}

impl ExecutionStatus {
    pub fn all() -> &'static [ExecutionStatus] {
        &[
            ExecutionStatus::Pending,
            ExecutionStatus::Success,
            ExecutionStatus::Failed,
        ]
    }

    /// Badge text shown next to a dose.
    pub fn label(&self) -> &'static str {
        match self {
            ExecutionStatus::Pending => "Pending",
            ExecutionStatus::Success => "Taken",
            ExecutionStatus::Failed => "Not taken",
        }
    }

    /// Lowercase identifier used in exports and fixture files.
    pub fn key(&self) -> &'static str {
        match self {
            ExecutionStatus::Pending => "pending",
            ExecutionStatus::Success => "success",
            ExecutionStatus::Failed => "failed",
        }
    }

    /// True once the outcome is known.
    pub fn is_settled(&self) -> bool {
        !matches!(self, ExecutionStatus::Pending)
    }
}

impl std::fmt::Display for ExecutionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Channel a reminder is delivered through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum DeliveryChannel {
    /// Chat message. Older fixture files call this `whatsapp`.
    #[default]
    #[serde(alias = "whatsapp")]
    Chat,
    Call,
}

impl DeliveryChannel {
    pub fn label(&self) -> &'static str {
        match self {
            DeliveryChannel::Chat => "Chat",
            DeliveryChannel::Call => "Call",
        }
    }

    pub fn key(&self) -> &'static str {
        match self {
            DeliveryChannel::Chat => "chat",
            DeliveryChannel::Call => "call",
        }
    }
}

/// One past firing of a reminder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReminderExecution {
    pub id: u32,

    #[serde(with = "minute_format")]
    pub executed_at: NaiveDateTime,

    pub status: ExecutionStatus,

    #[serde(default)]
    pub method: DeliveryChannel,

    #[serde(default)]
    pub retries: u32,

    #[serde(default)]
    pub duration_minutes: u32,
}

/// One scheduled dose on the timeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReminderInstance {
    pub id: u32,
    pub reminder_id: u32,

    #[serde(with = "minute_format")]
    pub scheduled_at: NaiveDateTime,

    #[serde(default)]
    pub status: ExecutionStatus,

    #[serde(default, with = "minute_format::option")]
    pub taken_at: Option<NaiveDateTime>,

    #[serde(default)]
    pub retry_count: u32,

    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    #[serde(default)]
    pub method: DeliveryChannel,

    pub medicine_name: String,

    #[serde(default)]
    pub dosage: Option<String>,
}

fn default_max_retries() -> u32 {
    constants::DEFAULT_MAX_RETRIES
}

// =============================================================================
// Intended actions
// =============================================================================

/// A user request that is recorded and logged but never applied to data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "action", rename_all = "lowercase")]
pub enum IntendedAction {
    Create,
    Activate { reminder_id: u32 },
    Deactivate { reminder_id: u32 },
    Delete { reminder_id: u32 },
}

impl IntendedAction {
    pub fn reminder_id(&self) -> Option<u32> {
        match self {
            IntendedAction::Create => None,
            IntendedAction::Activate { reminder_id }
            | IntendedAction::Deactivate { reminder_id }
            | IntendedAction::Delete { reminder_id } => Some(*reminder_id),
        }
    }

    pub fn verb(&self) -> &'static str {
        match self {
            IntendedAction::Create => "create",
            IntendedAction::Activate { .. } => "activate",
            IntendedAction::Deactivate { .. } => "deactivate",
            IntendedAction::Delete { .. } => "delete",
        }
    }
}

impl std::fmt::Display for IntendedAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.reminder_id() {
            Some(id) => write!(f, "{} reminder #{id}", self.verb()),
            None => write!(f, "{} reminder", self.verb()),
        }
    }
}

// =============================================================================
// Minute-precision timestamp serde
// =============================================================================

/// `YYYY-MM-DD HH:MM` (de)serialisation for `NaiveDateTime`.
pub mod minute_format {
    use crate::util::constants::TIMESTAMP_FORMAT;
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &NaiveDateTime, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&value.format(TIMESTAMP_FORMAT).to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<NaiveDateTime, D::Error> {
        let raw = String::deserialize(d)?;
        parse(&raw).map_err(serde::de::Error::custom)
    }

    /// Parse a minute-precision timestamp; seconds are accepted and kept.
    pub fn parse(raw: &str) -> Result<NaiveDateTime, chrono::ParseError> {
        NaiveDateTime::parse_from_str(raw.trim(), TIMESTAMP_FORMAT)
            .or_else(|_| NaiveDateTime::parse_from_str(raw.trim(), "%Y-%m-%d %H:%M:%S"))
    }

    pub mod option {
        use super::*;

        pub fn serialize<S: Serializer>(
            value: &Option<NaiveDateTime>,
            s: S,
        ) -> Result<S::Ok, S::Error> {
            match value {
                Some(v) => super::serialize(v, s),
                None => s.serialize_none(),
            }
        }

        pub fn deserialize<'de, D: Deserializer<'de>>(
            d: D,
        ) -> Result<Option<NaiveDateTime>, D::Error> {
            match Option::<String>::deserialize(d)? {
                Some(raw) if !raw.trim().is_empty() => {
                    parse(&raw).map(Some).map_err(serde::de::Error::custom)
                }
                _ => Ok(None),
            }
        }
    }
}
