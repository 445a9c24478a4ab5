// DoseWatch - ui/panels/medicine_detail.rs
//
// Medicine detail dialog: read-only view of the selected reminder's
// medicine, supply, schedule and full execution history.
// The Delete button hands over to the confirmation dialog.

use crate::app::state::AppState;
use crate::core::history::ExecutionStats;
use crate::core::supply;
use crate::ui::{theme, widgets};

/// Render the detail dialog (if `state.show_medicine_detail` is true).
pub fn render(ctx: &egui::Context, state: &mut AppState) {
    if !state.show_medicine_detail {
        return;
    }
    let Some(reminder) = state.selected_reminder() else {
        state.show_medicine_detail = false;
        return;
    };

    let mut open = true;
    let mut delete_clicked = false;
    let mut close_clicked = false;

    egui::Window::new(format!("{} details", reminder.display_name()))
        .id(egui::Id::new("medicine_detail"))
        .open(&mut open)
        .collapsible(false)
        .resizable(true)
        .min_width(420.0)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            egui::Grid::new("medicine_detail_grid")
                .num_columns(2)
                .spacing([12.0, 4.0])
                .show(ui, |ui| {
                    if let Some(ref medicine) = reminder.medicine {
                        ui.label("Medicine:");
                        ui.strong(&medicine.name);
                        ui.end_row();

                        if let Some(ref dosage) = medicine.dosage {
                            ui.label("Dosage:");
                            ui.label(dosage);
                            ui.end_row();
                        }

                        ui.label("Tablets per dose:");
                        ui.label(medicine.tablets_per_dose.to_string());
                        ui.end_row();

                        ui.label("Doses remaining:");
                        match supply::doses_remaining(medicine) {
                            Some(n) => ui.label(n.to_string()),
                            None => ui.label(egui::RichText::new("unknown").weak()),
                        };
                        ui.end_row();

                        if let Some(ref notes) = medicine.notes {
                            ui.label("Notes:");
                            ui.label(notes);
                            ui.end_row();
                        }
                    } else {
                        ui.label("Kind:");
                        ui.label(reminder.kind.label());
                        ui.end_row();
                    }

                    ui.label("Schedule:");
                    ui.label(reminder.periodicity.as_deref().unwrap_or("--"));
                    ui.end_row();

                    ui.label("Start:");
                    ui.label(reminder.start_date.to_string());
                    ui.end_row();

                    ui.label("End:");
                    match reminder.end_date {
                        Some(end) => ui.label(end.to_string()),
                        None => ui.label(egui::RichText::new("open-ended").weak()),
                    };
                    ui.end_row();

                    ui.label("Status:");
                    ui.colored_label(
                        theme::activity_colour(reminder.is_active),
                        reminder.activity_label(),
                    );
                    ui.end_row();
                });

            ui.add_space(8.0);
            ui.strong("Supply");
            let gauge = state.supply_gauge(reminder);
            let gauge_width = ui.available_width().min(360.0);
            widgets::supply_gauge(ui, &gauge, gauge_width, state.dark_mode);

            ui.add_space(8.0);
            ui.separator();
            render_history(ui, state, reminder);

            ui.add_space(8.0);
            ui.separator();
            ui.horizontal(|ui| {
                if ui
                    .button(egui::RichText::new("Delete").color(theme::status_colour(
                        crate::core::model::ExecutionStatus::Failed,
                        state.dark_mode,
                    )))
                    .clicked()
                {
                    delete_clicked = true;
                }
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.button("Close").clicked() {
                        close_clicked = true;
                    }
                });
            });
        });

    if !open || close_clicked {
        state.close_detail();
    } else if delete_clicked {
        state.request_delete();
    }
}

/// Aggregate counters plus every execution, newest first.
fn render_history(ui: &mut egui::Ui, state: &AppState, reminder: &crate::core::model::Reminder) {
    let stats = ExecutionStats::from_executions(&reminder.executions);
    ui.strong("Execution history");
    ui.horizontal(|ui| {
        ui.label(format!("{} total", stats.total));
        ui.separator();
        ui.label(format!("{} taken", stats.succeeded));
        ui.separator();
        ui.label(format!("{} missed", stats.failed));
        if let Some(rate) = stats.success_rate() {
            ui.separator();
            ui.label(format!("{rate:.0}% success"));
        }
    });

    if reminder.executions.is_empty() {
        ui.label(egui::RichText::new("No executions recorded.").weak());
        return;
    }

    let mut history: Vec<_> = reminder.executions.iter().collect();
    history.sort_by(|a, b| b.executed_at.cmp(&a.executed_at));

    egui::ScrollArea::vertical()
        .id_salt("detail_history")
        .max_height(180.0)
        .show(ui, |ui| {
            egui::Grid::new("detail_history_grid")
                .num_columns(5)
                .striped(true)
                .spacing([12.0, 3.0])
                .show(ui, |ui| {
                    ui.strong("When");
                    ui.strong("Status");
                    ui.strong("Channel");
                    ui.strong("Retries");
                    ui.strong("Duration");
                    ui.end_row();

                    for exec in history {
                        let when = exec.executed_at.format("%Y-%m-%d %H:%M").to_string();
                        ui.label(egui::RichText::new(when).monospace());
                        widgets::status_badge(ui, exec.status, state.dark_mode);
                        ui.label(format!(
                            "{} {}",
                            theme::channel_glyph(exec.method),
                            exec.method.label()
                        ));
                        ui.label(exec.retries.to_string());
                        ui.label(format!("{} min", exec.duration_minutes));
                        ui.end_row();
                    }
                });
        });
}
