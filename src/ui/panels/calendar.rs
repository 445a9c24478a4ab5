// DoseWatch - ui/panels/calendar.rs
//
// Calendar tab: Monday-first month grid with an event count per day,
// and the selected day's events listed underneath.

use crate::app::state::AppState;
use crate::core::calendar::{self, WEEKDAY_HEADINGS};
use crate::ui::{theme, widgets};
use chrono::Datelike;

/// Render the calendar tab (central area).
pub fn render(ui: &mut egui::Ui, state: &mut AppState) {
    let grid = state.calendar_grid();
    let events = state.calendar_events();

    let mut go_previous = false;
    let mut go_next = false;
    let mut clicked_day: Option<u32> = None;

    ui.horizontal(|ui| {
        if ui.button("\u{25c0}").on_hover_text("Previous month").clicked() {
            go_previous = true;
        }
        ui.heading(grid.title());
        if ui.button("\u{25b6}").on_hover_text("Next month").clicked() {
            go_next = true;
        }
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            ui.label(egui::RichText::new(format!("{} events", events.len())).weak());
        });
    });
    ui.add_space(6.0);

    let today = state.reference_date;
    let showing_today_month = today.year() == grid.year && today.month() == grid.month;

    egui::Grid::new("month_grid")
        .num_columns(7)
        .spacing([4.0, 4.0])
        .min_col_width(theme::CALENDAR_CELL)
        .show(ui, |ui| {
            for heading in WEEKDAY_HEADINGS {
                ui.vertical_centered(|ui| {
                    ui.strong(heading);
                });
            }
            ui.end_row();

            for week in &grid.weeks {
                for cell in week {
                    let Some(day) = *cell else {
                        ui.label("");
                        continue;
                    };
                    let count = events.iter().filter(|e| e.day() == day).count();
                    let text = if count > 0 {
                        format!("{day}\n\u{25cf} {count}")
                    } else {
                        format!("{day}\n ")
                    };
                    let mut label = egui::RichText::new(text);
                    if count > 0 {
                        label = label.color(theme::EVENT_DOT);
                    }
                    if showing_today_month && today.day() == day {
                        label = label.strong().background_color(theme::TODAY_BG);
                    }
                    let selected = state.selected_day == Some(day);
                    let response = ui.add_sized(
                        [theme::CALENDAR_CELL, theme::CALENDAR_CELL],
                        egui::SelectableLabel::new(selected, label),
                    );
                    if response.clicked() {
                        clicked_day = Some(day);
                    }
                }
                ui.end_row();
            }
        });

    ui.add_space(8.0);
    ui.separator();
    render_day_events(ui, state, &events);

    if go_previous {
        state.show_previous_month();
    } else if go_next {
        state.show_next_month();
    } else if let Some(day) = clicked_day {
        state.select_day(day);
    }
}

fn render_day_events(ui: &mut egui::Ui, state: &AppState, events: &[calendar::CalendarEvent]) {
    let Some(day) = state.selected_day else {
        ui.label(egui::RichText::new("Select a day to see its events.").weak());
        return;
    };

    let day_events = calendar::events_on(events, day);
    ui.strong(format!("{} {}", day, state.calendar_grid().title()));
    if day_events.is_empty() {
        ui.label(egui::RichText::new("Nothing scheduled.").weak());
        return;
    }

    egui::ScrollArea::vertical()
        .id_salt("day_events")
        .auto_shrink([false; 2])
        .show(ui, |ui| {
            egui::Grid::new("day_events_grid")
                .num_columns(5)
                .striped(true)
                .spacing([14.0, 4.0])
                .show(ui, |ui| {
                    for event in day_events {
                        ui.label(egui::RichText::new(event.time_label()).monospace());
                        ui.vertical(|ui| {
                            ui.strong(&event.title);
                            if !event.description.is_empty() {
                                ui.label(egui::RichText::new(&event.description).small().weak());
                            }
                        });
                        match event.status {
                            Some(status) => widgets::status_badge(ui, status, state.dark_mode),
                            None => ui.label(""),
                        };
                        let retries = match (event.retries, event.max_retries) {
                            (Some(r), Some(max)) => format!("retries {r}/{max}"),
                            (Some(r), None) => format!("retries {r}"),
                            _ => String::new(),
                        };
                        ui.label(retries);
                        let mut channel = event
                            .contact_method
                            .map(|m| format!("{} {}", theme::channel_glyph(m), m.label()))
                            .unwrap_or_default();
                        if let Some(minutes) = event.duration_minutes {
                            channel.push_str(&format!(" \u{00b7} {minutes} min"));
                        }
                        ui.label(channel);
                        ui.end_row();
                    }
                });
        });
}
