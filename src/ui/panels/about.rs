// DoseWatch - ui/panels/about.rs
//
// About dialog: opened from View > About.
// Rendered as a centred, non-resizable, non-collapsible window.

use crate::app::state::AppState;

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Render the About dialog (if `state.show_about` is true).
pub fn render(ctx: &egui::Context, state: &mut AppState) {
    if !state.show_about {
        return;
    }

    let mut open = true;
    egui::Window::new("About DoseWatch")
        .open(&mut open)
        .collapsible(false)
        .resizable(false)
        .min_width(340.0)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            ui.add_space(8.0);
            ui.vertical_centered(|ui| {
                ui.label(egui::RichText::new("\u{1f48a}  DoseWatch").size(28.0).strong());
                ui.add_space(4.0);
                ui.label(egui::RichText::new(format!("v{VERSION}")).size(14.0).weak());
            });

            ui.add_space(12.0);
            ui.separator();
            ui.add_space(8.0);

            ui.vertical_centered(|ui| {
                ui.label("Medication reminder dashboard:");
                ui.label("daily timeline, calendar and supply tracking.");
            });

            ui.add_space(8.0);
            ui.separator();
            ui.add_space(6.0);

            egui::Grid::new("about_source")
                .num_columns(2)
                .spacing([8.0, 2.0])
                .show(ui, |ui| {
                    ui.label(egui::RichText::new("Data:").small());
                    ui.label(
                        egui::RichText::new(state.fixtures.source.display().to_string())
                            .small()
                            .monospace(),
                    );
                    ui.end_row();

                    ui.label(egui::RichText::new("Reminders:").small());
                    let count = state.fixtures.reminders.len().to_string();
                    ui.label(egui::RichText::new(count).small());
                    ui.end_row();

                    ui.label(egui::RichText::new("Requests logged:").small());
                    ui.label(
                        egui::RichText::new(state.intended_actions.len().to_string()).small(),
                    );
                    ui.end_row();
                });

            ui.add_space(6.0);
            ui.vertical_centered(|ui| {
                ui.label(egui::RichText::new("Built with Rust & egui").small().weak());
            });
            ui.add_space(8.0);
        });

    if !open {
        state.show_about = false;
    }
}
