// DoseWatch - main.rs
//
// Application entry point. Handles:
// 1. CLI argument parsing
// 2. Configuration loading and logging initialisation
// 3. Fixture loading (built-in demo set or user file)
// 4. Session restore and CLI overrides
// 5. eframe GUI launch

#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod gui;

// Re-export modules from the library crate so that `gui.rs` and other
// binary-side code can still use `crate::app::...`, `crate::core::...` etc.
pub use dosewatch::app;

pub use dosewatch::core;
pub use dosewatch::platform;
pub use dosewatch::ui;
pub use dosewatch::util;

use clap::Parser;
use std::path::PathBuf;

/// DoseWatch - Medication reminder dashboard.
///
/// Shows today's scheduled doses, a monthly calendar, and the reminder
/// list with supply levels and recent executions.
#[derive(Parser, Debug)]
#[command(name = "DoseWatch", version, about)]
struct Cli {
    /// Fixture file with reminders and instances (built-in demo set if omitted).
    #[arg(short = 'f', long = "fixtures")]
    fixtures: Option<PathBuf>,

    /// Date treated as today, YYYY-MM-DD (defaults to the latest scheduled day).
    #[arg(long = "date")]
    date: Option<chrono::NaiveDate>,

    /// Tab to open: today, calendar or config.
    #[arg(short = 't', long = "tab")]
    tab: Option<String>,

    /// Initial activity filter: all, active or inactive.
    #[arg(long = "filter")]
    filter: Option<String>,

    /// Enable debug logging (equivalent to RUST_LOG=debug).
    #[arg(short = 'd', long = "debug")]
    debug: bool,
}

fn main() {
    let cli = Cli::parse();

    // Resolve platform paths and read config.toml before logging so the
    // configured level and file can take effect.
    let platform_paths = platform::config::PlatformPaths::resolve();
    let (config, config_warnings) = platform::config::load_config(&platform_paths.config_dir);

    util::logging::init(
        cli.debug,
        config.log_level.as_deref(),
        config.log_file.as_deref(),
    );

    tracing::info!(
        version = util::constants::APP_VERSION,
        debug = cli.debug,
        "DoseWatch starting"
    );
    for warning in &config_warnings {
        tracing::warn!(warning = %warning, "Configuration warning");
    }

    // Fixture source: CLI override > config file > built-in
    let fixture_file = cli.fixtures.as_deref().or(config.fixtures_file.as_deref());
    let (fixtures, fixture_errors) = app::fixture_mgr::load_fixtures(fixture_file);
    for err in &fixture_errors {
        tracing::warn!(error = %err, fatal = err.is_fatal(), "Fixture loading warning");
    }

    tracing::info!(
        reminders = fixtures.reminders.len(),
        instances = fixtures.instances.len(),
        "Ready to launch GUI"
    );

    let mut state = app::state::AppState::new(fixtures, &config, cli.debug);
    state.warnings = config_warnings;
    state
        .warnings
        .extend(fixture_errors.iter().map(|e| e.to_string()));

    // Restore the previous session, then let explicit CLI flags win.
    let session_file = app::session::session_path(&platform_paths.data_dir);
    if let Some(data) = app::session::load(&session_file) {
        state.restore_session(data);
    }
    state.session_file = Some(session_file);

    if let Some(date) = cli.date {
        state.set_reference_date(date);
    }
    if let Some(ref raw) = cli.tab {
        match app::state::Tab::parse(raw) {
            Some(tab) => state.active_tab = tab,
            None => tracing::warn!(tab = %raw, "Unknown tab name; ignoring"),
        }
    }
    if let Some(ref raw) = cli.filter {
        match core::filter::ActivityFilter::parse(raw) {
            Some(activity) => state.set_activity(activity),
            None => tracing::warn!(filter = %raw, "Unknown activity filter; ignoring"),
        }
    }

    let font_size = state.font_size;
    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(format!(
                "{} v{}",
                util::constants::APP_NAME,
                util::constants::APP_VERSION
            ))
            .with_inner_size([1100.0, 760.0])
            .with_min_inner_size([720.0, 480.0]),
        ..Default::default()
    };

    let result = eframe::run_native(
        util::constants::APP_NAME,
        native_options,
        Box::new(move |cc| {
            configure_text_size(&cc.egui_ctx, font_size);
            Ok(Box::new(gui::DoseWatchApp::new(state)))
        }),
    );

    if let Err(e) = result {
        tracing::error!(error = %e, "Failed to launch GUI");
        eprintln!("Error: Failed to launch DoseWatch GUI: {e}");
        std::process::exit(1);
    }
}

/// Scale the body, button and heading text styles to the configured size.
fn configure_text_size(ctx: &egui::Context, body_size: f32) {
    ctx.style_mut(|style| {
        for (text_style, font_id) in style.text_styles.iter_mut() {
            font_id.size = match text_style {
                egui::TextStyle::Heading => body_size * 1.45,
                egui::TextStyle::Small => body_size * 0.72,
                _ => body_size,
            };
        }
    });
    tracing::debug!(size = body_size, "Text size configured");
}
