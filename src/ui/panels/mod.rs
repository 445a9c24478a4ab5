// DoseWatch - ui/panels/mod.rs

pub mod about;
pub mod calendar;
pub mod dialogs;
pub mod medicine_detail;
pub mod reminders;
pub mod today;
