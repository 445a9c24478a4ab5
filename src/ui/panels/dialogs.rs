// DoseWatch - ui/panels/dialogs.rs
//
// Confirmation dialogs: delete a reminder, activate an inactive reminder.
// Both show the reminder read-only; confirming records an intended action.

use crate::app::state::AppState;
use crate::core::model::PERIODICITY_PRESETS;

/// Render whichever confirmation dialogs are open.
pub fn render(ctx: &egui::Context, state: &mut AppState) {
    render_delete(ctx, state);
    render_activate(ctx, state);
}

fn render_delete(ctx: &egui::Context, state: &mut AppState) {
    if !state.show_delete_dialog {
        return;
    }
    let name = state
        .selected_reminder()
        .map(|r| r.display_name().to_string())
        .unwrap_or_else(|| "this reminder".to_string());

    let mut confirm = false;
    let mut cancel = false;
    egui::Window::new("Delete reminder")
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .order(egui::Order::Foreground)
        .show(ctx, |ui| {
            ui.label(format!("Delete the reminder for {name}?"));
            ui.label(egui::RichText::new("Its execution history will be removed too.").weak());
            ui.add_space(8.0);
            ui.horizontal(|ui| {
                if ui.button("Delete").clicked() {
                    confirm = true;
                }
                if ui.button("Cancel").clicked() {
                    cancel = true;
                }
            });
        });

    if confirm {
        state.confirm_delete();
    } else if cancel {
        state.cancel_delete();
    }
}

fn render_activate(ctx: &egui::Context, state: &mut AppState) {
    if !state.show_activate_dialog {
        return;
    }
    let Some(reminder) = state.selected_reminder() else {
        state.cancel_activation();
        return;
    };

    let mut confirm = false;
    let mut cancel = false;
    egui::Window::new("Activate reminder")
        .collapsible(false)
        .resizable(false)
        .min_width(320.0)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .order(egui::Order::Foreground)
        .show(ctx, |ui| {
            egui::Grid::new("activate_grid")
                .num_columns(2)
                .spacing([12.0, 4.0])
                .show(ui, |ui| {
                    ui.label("Reminder:");
                    ui.strong(reminder.display_name());
                    ui.end_row();

                    ui.label("Schedule:");
                    match reminder.periodicity.as_deref() {
                        Some(p) if PERIODICITY_PRESETS.contains(&p) => ui.label(p),
                        Some(p) => ui.label(format!("{p} (custom)")),
                        None => ui.label(egui::RichText::new("not set").weak()),
                    };
                    ui.end_row();

                    ui.label("Start:");
                    ui.label(reminder.start_date.to_string());
                    ui.end_row();

                    ui.label("End:");
                    ui.label(
                        reminder
                            .end_date
                            .map(|d| d.to_string())
                            .unwrap_or_else(|| "open-ended".to_string()),
                    );
                    ui.end_row();
                });
            ui.add_space(8.0);
            ui.horizontal(|ui| {
                if ui.button("Activate").clicked() {
                    confirm = true;
                }
                if ui.button("Cancel").clicked() {
                    cancel = true;
                }
            });
        });

    if confirm {
        state.confirm_activation();
    } else if cancel {
        state.cancel_activation();
    }
}
