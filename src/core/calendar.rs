// DoseWatch - core/calendar.rs
//
// Calendar and timeline projections over reminders and instances.
// Core layer: pure date arithmetic, no UI.

use crate::core::model::{DeliveryChannel, ExecutionStatus, Reminder, ReminderInstance};
use chrono::{Datelike, NaiveDate, NaiveTime};

/// Kind of calendar event. Only medicine doses exist today.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    Medicine,
}

/// One dot on the calendar.
#[derive(Debug, Clone, PartialEq)]
pub struct CalendarEvent {
    /// Stable key, `instance-<id>` or `execution-<id>`.
    pub id: String,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub title: String,
    pub kind: EventKind,
    pub description: String,
    pub status: Option<ExecutionStatus>,
    pub retries: Option<u32>,
    pub max_retries: Option<u32>,
    pub contact_method: Option<DeliveryChannel>,
    pub duration_minutes: Option<u32>,
}

impl CalendarEvent {
    /// Day of month (1-based).
    pub fn day(&self) -> u32 {
        self.date.day()
    }

    /// "HH:MM" caption.
    pub fn time_label(&self) -> String {
        self.time.format("%H:%M").to_string()
    }

    fn from_instance(instance: &ReminderInstance) -> Self {
        Self {
            id: format!("instance-{}", instance.id),
            date: instance.scheduled_at.date(),
            time: instance.scheduled_at.time(),
            title: instance.medicine_name.clone(),
            kind: EventKind::Medicine,
            description: instance.dosage.clone().unwrap_or_default(),
            status: Some(instance.status),
            retries: Some(instance.retry_count),
            max_retries: Some(instance.max_retries),
            contact_method: Some(instance.method),
            duration_minutes: None,
        }
    }
}

/// Events falling in `year`/`month`, built from instances and past executions.
///
/// Instances and executions describing the same dose appear as separate
/// events; the ids keep them distinct.
pub fn month_events(
    reminders: &[Reminder],
    instances: &[ReminderInstance],
    year: i32,
    month: u32,
) -> Vec<CalendarEvent> {
    let in_month = |d: NaiveDate| d.year() == year && d.month() == month;

    let mut events: Vec<CalendarEvent> = instances
        .iter()
        .filter(|i| in_month(i.scheduled_at.date()))
        .map(CalendarEvent::from_instance)
        .collect();

    for reminder in reminders {
        let description = reminder
            .medicine
            .as_ref()
            .and_then(|m| m.dosage.clone())
            .or_else(|| reminder.periodicity.clone())
            .unwrap_or_default();
        for exec in reminder
            .executions
            .iter()
            .filter(|e| in_month(e.executed_at.date()))
        {
            events.push(CalendarEvent {
                id: format!("execution-{}", exec.id),
                date: exec.executed_at.date(),
                time: exec.executed_at.time(),
                title: reminder.display_name().to_string(),
                kind: EventKind::Medicine,
                description: description.clone(),
                status: Some(exec.status),
                retries: Some(exec.retries),
                max_retries: None,
                contact_method: Some(exec.method),
                duration_minutes: Some(exec.duration_minutes),
            });
        }
    }

    events.sort_by(|a, b| (a.date, a.time, &a.id).cmp(&(b.date, b.time, &b.id)));
    events
}

/// Events on a given day of month, ordered by time.
pub fn events_on(events: &[CalendarEvent], day: u32) -> Vec<&CalendarEvent> {
    let mut out: Vec<&CalendarEvent> = events.iter().filter(|e| e.day() == day).collect();
    out.sort_by_key(|e| e.time);
    out
}

/// Instances scheduled on `date`, ordered by scheduled time.
pub fn day_timeline(instances: &[ReminderInstance], date: NaiveDate) -> Vec<&ReminderInstance> {
    let mut out: Vec<&ReminderInstance> = instances
        .iter()
        .filter(|i| i.scheduled_at.date() == date)
        .collect();
    out.sort_by_key(|i| (i.scheduled_at, i.id));
    out
}

/// Number of days in a month, or `None` for an invalid year/month.
pub fn days_in_month(year: i32, month: u32) -> Option<u32> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)?
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)?
    };
    u32::try_from(next.signed_duration_since(first).num_days()).ok()
}

/// A month laid out as Monday-first weeks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthGrid {
    pub year: i32,
    pub month: u32,
    pub weeks: Vec<[Option<u32>; 7]>,
}

impl MonthGrid {
    pub fn new(year: i32, month: u32) -> Option<Self> {
        let first = NaiveDate::from_ymd_opt(year, month, 1)?;
        let days = days_in_month(year, month)?;
        let offset = first.weekday().num_days_from_monday() as usize;

        let mut weeks = Vec::new();
        let mut week = [None; 7];
        let mut slot = offset;
        for day in 1..=days {
            week[slot] = Some(day);
            slot += 1;
            if slot == 7 {
                weeks.push(week);
                week = [None; 7];
                slot = 0;
            }
        }
        if slot != 0 {
            weeks.push(week);
        }

        Some(Self { year, month, weeks })
    }

    /// Grid for the month containing `date`.
    pub fn containing(date: NaiveDate) -> Self {
        // A valid date always yields a valid month.
        Self::new(date.year(), date.month()).unwrap_or(Self {
            year: date.year(),
            month: date.month(),
            weeks: Vec::new(),
        })
    }

    /// "November 2024" style heading.
    pub fn title(&self) -> String {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
            .map(|d| d.format("%B %Y").to_string())
            .unwrap_or_default()
    }

    /// Previous month as (year, month).
    pub fn previous(&self) -> (i32, u32) {
        if self.month == 1 {
            (self.year - 1, 12)
        } else {
            (self.year, self.month - 1)
        }
    }

    /// Next month as (year, month).
    pub fn next(&self) -> (i32, u32) {
        if self.month == 12 {
            (self.year + 1, 1)
        } else {
            (self.year, self.month + 1)
        }
    }
}

/// Weekday column headings matching [`MonthGrid`] order.
pub const WEEKDAY_HEADINGS: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];
