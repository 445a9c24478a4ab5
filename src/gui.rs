// DoseWatch - gui.rs
//
// Top-level eframe::App implementation.
// Wires together the tab panels, dialogs, menu bar and status bar.

use crate::app::state::{AppState, Tab};
use crate::core::export;
use crate::ui;
use crate::util::error::{DoseWatchError, Result};
use std::path::Path;

/// Export format offered in the File menu.
#[derive(Debug, Clone, Copy)]
enum ExportFormat {
    Csv,
    Json,
}

impl ExportFormat {
    fn extension(self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
        }
    }

    fn label(self) -> &'static str {
        match self {
            ExportFormat::Csv => "CSV",
            ExportFormat::Json => "JSON",
        }
    }
}

/// The DoseWatch application.
pub struct DoseWatchApp {
    pub state: AppState,
    /// Theme last pushed to egui, so visuals are only reset on change.
    applied_dark_mode: Option<bool>,
}

impl DoseWatchApp {
    /// Create a new application instance with the given state.
    pub fn new(state: AppState) -> Self {
        Self {
            state,
            applied_dark_mode: None,
        }
    }

    /// Ask for a destination and write the execution history there.
    fn export_history(&mut self, format: ExportFormat) {
        let Some(dest) = rfd::FileDialog::new()
            .add_filter(format.label(), &[format.extension()])
            .set_file_name(format!("history.{}", format.extension()))
            .save_file()
        else {
            return;
        };

        match write_history(&self.state, &dest, format) {
            Ok(n) => {
                tracing::info!(path = %dest.display(), rows = n, "History exported");
                self.state.status_message =
                    format!("Exported {n} executions to {}.", format.label());
            }
            Err(e) => {
                tracing::warn!(error = %e, "History export failed");
                self.state.status_message = format!("{} export failed: {e}", format.label());
            }
        }
    }

    fn apply_theme(&mut self, ctx: &egui::Context) {
        if self.applied_dark_mode == Some(self.state.dark_mode) {
            return;
        }
        ctx.set_visuals(if self.state.dark_mode {
            egui::Visuals::dark()
        } else {
            egui::Visuals::light()
        });
        self.applied_dark_mode = Some(self.state.dark_mode);
    }
}

/// Flatten every execution and write it to `dest` in `format`.
fn write_history(state: &AppState, dest: &Path, format: ExportFormat) -> Result<usize> {
    let records = export::execution_records(&state.fixtures.reminders);
    let file = std::fs::File::create(dest).map_err(|e| DoseWatchError::Io {
        path: dest.to_path_buf(),
        operation: "create export file",
        source: e,
    })?;
    let written = match format {
        ExportFormat::Csv => export::export_csv(&records, file, dest)?,
        ExportFormat::Json => export::export_json(&records, file, dest)?,
    };
    Ok(written)
}

impl eframe::App for DoseWatchApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.apply_theme(ctx);

        let mut export_request: Option<ExportFormat> = None;

        // Top menu bar
        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                ui.menu_button("File", |ui| {
                    let has_history = self
                        .state
                        .fixtures
                        .reminders
                        .iter()
                        .any(|r| !r.executions.is_empty());
                    ui.add_enabled_ui(has_history, |ui| {
                        ui.menu_button("Export history", |ui| {
                            if ui.button("CSV\u{2026}").clicked() {
                                export_request = Some(ExportFormat::Csv);
                                ui.close_menu();
                            }
                            if ui.button("JSON\u{2026}").clicked() {
                                export_request = Some(ExportFormat::Json);
                                ui.close_menu();
                            }
                        });
                    });
                    ui.separator();
                    if ui.button("Exit").clicked() {
                        ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                    }
                });
                ui.menu_button("View", |ui| {
                    let theme_label = if self.state.dark_mode {
                        "Light theme"
                    } else {
                        "Dark theme"
                    };
                    if ui.button(theme_label).clicked() {
                        self.state.dark_mode = !self.state.dark_mode;
                        ui.close_menu();
                    }
                    ui.separator();
                    if ui.button("About").clicked() {
                        self.state.show_about = true;
                        ui.close_menu();
                    }
                });
            });
        });

        if let Some(format) = export_request {
            self.export_history(format);
        }

        // Tab strip with the New button on the right.
        egui::TopBottomPanel::top("tab_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                for tab in Tab::all() {
                    if ui
                        .selectable_label(self.state.active_tab == *tab, tab.label())
                        .clicked()
                    {
                        self.state.active_tab = *tab;
                    }
                }
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.button("+ New reminder").clicked() {
                        self.state.request_new_reminder();
                    }
                });
            });
        });

        // Status bar
        egui::TopBottomPanel::bottom("status_bar")
            .exact_height(ui::theme::STATUS_BAR_HEIGHT)
            .show(ctx, |ui| {
                ui.horizontal_centered(|ui| {
                    ui.label(&self.state.status_message);
                    if !self.state.warnings.is_empty() {
                        ui.separator();
                        let label = format!("\u{26a0} {} warning(s)", self.state.warnings.len());
                        ui.label(
                            egui::RichText::new(label)
                                .color(egui::Color32::from_rgb(217, 119, 6)), // Amber 600
                        )
                        .on_hover_text(self.state.warnings.join("\n"));
                    }
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        ui.label(format!(
                            "{} reminders \u{00b7} {} requests",
                            self.state.fixtures.reminders.len(),
                            self.state.intended_actions.len()
                        ));
                        if self.state.debug_mode {
                            ui.label(egui::RichText::new("DEBUG").small().weak());
                        }
                    });
                });
            });

        // Central panel: active tab
        egui::CentralPanel::default().show(ctx, |ui| match self.state.active_tab {
            Tab::Today => ui::panels::today::render(ui, &self.state),
            Tab::Calendar => ui::panels::calendar::render(ui, &mut self.state),
            Tab::Config => ui::panels::reminders::render(ui, &mut self.state),
        });

        // Dialogs. The confirmation dialogs render after the detail dialog
        // so they stack on top of it.
        ui::panels::medicine_detail::render(ctx, &mut self.state);
        ui::panels::dialogs::render(ctx, &mut self.state);
        ui::panels::about::render(ctx, &mut self.state);
    }

    /// Called by eframe when the application window is about to close.
    ///
    /// Saves the current session so the next launch can restore it.
    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        tracing::info!(
            requests = self.state.intended_actions.len(),
            "DoseWatch shutting down"
        );
        self.state.save_session();
    }
}
