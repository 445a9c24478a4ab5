// DoseWatch - ui/theme.rs
//
// Colour scheme, status colour mapping, and layout constants.
// No dependencies on app state or business logic.

use crate::core::model::{DeliveryChannel, ExecutionStatus};
use egui::Color32;

/// Foreground colour for an execution status badge.
pub fn status_colour(status: ExecutionStatus, dark_mode: bool) -> Color32 {
    match (status, dark_mode) {
        (ExecutionStatus::Success, true) => Color32::from_rgb(74, 222, 128), // Green 400
        (ExecutionStatus::Success, false) => Color32::from_rgb(21, 128, 61), // Green 700
        (ExecutionStatus::Failed, true) => Color32::from_rgb(248, 113, 113), // Red 400
        (ExecutionStatus::Failed, false) => Color32::from_rgb(185, 28, 28),  // Red 700
        (ExecutionStatus::Pending, true) => Color32::from_rgb(250, 204, 21), // Yellow 400
        (ExecutionStatus::Pending, false) => Color32::from_rgb(161, 98, 7),  // Yellow 700
    }
}

/// Subtle background behind a status badge.
pub fn status_bg_colour(status: ExecutionStatus) -> Color32 {
    match status {
        ExecutionStatus::Success => Color32::from_rgba_premultiplied(34, 197, 94, 30),
        ExecutionStatus::Failed => Color32::from_rgba_premultiplied(239, 68, 68, 30),
        ExecutionStatus::Pending => Color32::from_rgba_premultiplied(234, 179, 8, 30),
    }
}

/// Glyph shown next to the delivery channel.
pub fn channel_glyph(channel: DeliveryChannel) -> &'static str {
    match channel {
        DeliveryChannel::Chat => "\u{1f4ac}", // speech balloon
        DeliveryChannel::Call => "\u{1f4de}", // telephone receiver
    }
}

/// Fill colour of the supply gauge.
pub fn gauge_colour(low_stock: bool) -> Color32 {
    if low_stock {
        Color32::from_rgb(239, 68, 68) // Red 500
    } else {
        Color32::from_rgb(59, 130, 246) // Blue 500
    }
}

/// Track colour behind the supply gauge.
pub fn gauge_track_colour(dark_mode: bool) -> Color32 {
    if dark_mode {
        Color32::from_rgb(55, 65, 81) // Gray 700
    } else {
        Color32::from_rgb(229, 231, 235) // Gray 200
    }
}

/// Colour of the Active/Inactive chip on reminder cards.
pub fn activity_colour(is_active: bool) -> Color32 {
    if is_active {
        Color32::from_rgb(34, 197, 94) // Green 500
    } else {
        Color32::from_rgb(107, 114, 128) // Gray 500
    }
}

/// Marker colour for calendar days that carry events.
pub const EVENT_DOT: Color32 = Color32::from_rgb(59, 130, 246); // Blue 500

/// Background of the calendar cell holding the reference date.
pub const TODAY_BG: Color32 = Color32::from_rgba_premultiplied(59, 130, 246, 40);

/// Layout constants.
pub const CARD_WIDTH: f32 = 320.0;
pub const GAUGE_HEIGHT: f32 = 10.0;
pub const CALENDAR_CELL: f32 = 44.0;
pub const STATUS_BAR_HEIGHT: f32 = 28.0;
