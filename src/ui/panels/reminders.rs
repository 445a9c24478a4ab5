// DoseWatch - ui/panels/reminders.rs
//
// Configuration tab: search and activity filters over the reminder list,
// one card per reminder with its supply gauge and latest executions.
//
// Card buttons are collected during rendering and applied afterwards so
// `state` is not mutated while a reminder borrowed from it is on screen.

use crate::app::state::AppState;
use crate::ui::{theme, widgets};

enum CardAction {
    Details(u32),
    ToggleActive(u32),
}

/// Render the reminder configuration list.
pub fn render(ui: &mut egui::Ui, state: &mut AppState) {
    render_toolbar(ui, state);
    ui.separator();

    if state.filtered_indices.is_empty() {
        ui.centered_and_justified(|ui| {
            ui.label(egui::RichText::new(state.empty_hint()).size(16.0).weak());
        });
        return;
    }

    let mut action: Option<CardAction> = None;

    egui::ScrollArea::vertical()
        .id_salt("reminder_cards")
        .auto_shrink([false; 2])
        .show(ui, |ui| {
            for reminder in state.visible_reminders() {
                egui::Frame::group(ui.style()).show(ui, |ui| {
                    ui.set_width(ui.available_width());
                    let dosage = reminder.medicine.as_ref().and_then(|m| m.dosage.as_deref());
                    ui.horizontal(|ui| {
                        ui.label(egui::RichText::new(reminder.display_name()).size(17.0).strong());
                        if let Some(dosage) = dosage {
                            ui.label(egui::RichText::new(dosage).weak());
                        }
                        ui.label(
                            egui::RichText::new(reminder.activity_label())
                                .small()
                                .color(theme::activity_colour(reminder.is_active)),
                        );
                    });

                    let start = reminder.start_date;
                    let schedule = match (&reminder.periodicity, reminder.end_date) {
                        (Some(p), Some(end)) => format!("{p} \u{00b7} {start} to {end}"),
                        (Some(p), None) => format!("{p} \u{00b7} from {start}"),
                        (None, Some(end)) => format!("{start} to {end}"),
                        (None, None) => format!("From {start}"),
                    };
                    ui.label(egui::RichText::new(schedule).small().weak());
                    ui.add_space(4.0);

                    ui.horizontal_top(|ui| {
                        let gauge = state.supply_gauge(reminder);
                        widgets::supply_gauge(ui, &gauge, theme::CARD_WIDTH * 0.5, state.dark_mode);

                        ui.add_space(16.0);

                        ui.vertical(|ui| {
                            let recent = state.recent_executions(reminder);
                            if recent.is_empty() {
                                ui.label(egui::RichText::new("No executions yet").small().weak());
                            }
                            for exec in recent {
                                ui.horizontal(|ui| {
                                    ui.label(
                                        egui::RichText::new(
                                            exec.executed_at.format("%d/%m %H:%M").to_string(),
                                        )
                                        .monospace()
                                        .small(),
                                    );
                                    widgets::status_badge(ui, exec.status, state.dark_mode);
                                    ui.label(theme::channel_glyph(exec.method))
                                        .on_hover_text(exec.method.label());
                                });
                            }
                        });
                    });

                    ui.add_space(4.0);
                    ui.horizontal(|ui| {
                        if ui.button("Details").clicked() {
                            action = Some(CardAction::Details(reminder.id));
                        }
                        let toggle_label = if reminder.is_active {
                            "Deactivate"
                        } else {
                            "Activate"
                        };
                        if ui.button(toggle_label).clicked() {
                            action = Some(CardAction::ToggleActive(reminder.id));
                        }
                    });
                });
                ui.add_space(6.0);
            }
        });

    match action {
        Some(CardAction::Details(id)) => state.open_detail(id),
        Some(CardAction::ToggleActive(id)) => state.toggle_active(id),
        None => {}
    }
}

/// Search box, Active/Inactive toggles and the count of visible reminders.
fn render_toolbar(ui: &mut egui::Ui, state: &mut AppState) {
    ui.horizontal(|ui| {
        let search = ui.add(
            egui::TextEdit::singleline(&mut state.filter.search)
                .hint_text("Search medicine\u{2026}")
                .desired_width(220.0),
        );
        if search.changed() {
            state.apply_filters();
        }

        ui.separator();

        let active_on = state.filter.activity == crate::core::filter::ActivityFilter::ActiveOnly;
        if ui.selectable_label(active_on, "Active").clicked() {
            state.toggle_active_filter();
        }
        let inactive_on =
            state.filter.activity == crate::core::filter::ActivityFilter::InactiveOnly;
        if ui.selectable_label(inactive_on, "Inactive").clicked() {
            state.toggle_inactive_filter();
        }

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            ui.label(format!(
                "{}/{} reminders",
                state.filtered_indices.len(),
                state.fixtures.reminders.len()
            ));
        });
    });
}
