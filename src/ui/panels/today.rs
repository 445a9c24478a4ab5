// DoseWatch - ui/panels/today.rs
//
// Today tab: the reference day's scheduled doses in time order, with
// delivery channel, retry progress and status.

use crate::app::state::AppState;
use crate::core::model::ExecutionStatus;
use crate::ui::{theme, widgets};

/// Render the today timeline (central area).
pub fn render(ui: &mut egui::Ui, state: &AppState) {
    ui.heading(state.reference_date.format("%A %-d %B %Y").to_string());
    ui.add_space(4.0);

    let timeline = state.today_timeline();
    if timeline.is_empty() {
        ui.centered_and_justified(|ui| {
            ui.label("No doses scheduled for this day.");
        });
        return;
    }

    let settled = timeline.iter().filter(|i| i.status.is_settled()).count();
    ui.horizontal(|ui| {
        ui.label(
            egui::RichText::new(format!("{settled} of {} doses settled", timeline.len())).weak(),
        );
        for status in ExecutionStatus::all() {
            let count = timeline.iter().filter(|i| i.status == *status).count();
            if count > 0 {
                ui.separator();
                widgets::status_badge(ui, *status, state.dark_mode);
                ui.label(count.to_string());
            }
        }
    });
    ui.separator();

    egui::ScrollArea::vertical()
        .id_salt("today_timeline")
        .auto_shrink([false; 2])
        .show(ui, |ui| {
            egui::Grid::new("today_grid")
                .num_columns(6)
                .striped(true)
                .spacing([16.0, 8.0])
                .show(ui, |ui| {
                    ui.strong("Time");
                    ui.strong("Medicine");
                    ui.strong("Channel");
                    ui.strong("Retries");
                    ui.strong("Taken at");
                    ui.strong("Status");
                    ui.end_row();

                    for instance in timeline {
                        ui.label(
                            egui::RichText::new(instance.scheduled_at.format("%H:%M").to_string())
                                .monospace(),
                        );

                        ui.vertical(|ui| {
                            ui.label(egui::RichText::new(&instance.medicine_name).strong());
                            if let Some(ref dosage) = instance.dosage {
                                ui.label(egui::RichText::new(dosage).small().weak());
                            }
                        });

                        ui.label(format!(
                            "{} {}",
                            theme::channel_glyph(instance.method),
                            instance.method.label()
                        ));

                        let retries = format!("{}/{}", instance.retry_count, instance.max_retries);
                        if instance.retry_count >= instance.max_retries {
                            ui.colored_label(
                                theme::status_colour(ExecutionStatus::Failed, state.dark_mode),
                                retries,
                            );
                        } else {
                            ui.label(retries);
                        }

                        match instance.taken_at {
                            Some(at) => ui.label(at.format("%H:%M").to_string()),
                            None => ui.label(egui::RichText::new("--").weak()),
                        };

                        widgets::status_badge(ui, instance.status, state.dark_mode);
                        ui.end_row();
                    }
                });
        });
}
