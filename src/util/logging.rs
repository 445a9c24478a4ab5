// DoseWatch - util/logging.rs
//
// tracing-subscriber setup. The level comes from, in order: RUST_LOG,
// the --debug flag, `[logging] level` in config.toml, then "info".
// Lines go to stderr, or are appended to `[logging] file` without colour.
//
// Medicine notes are free text about a patient and are never logged.

use std::fs::{File, OpenOptions};
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

/// Where the active filter came from, reported once logging is up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LevelSource {
    Environment,
    DebugFlag,
    ConfigFile,
    Default,
}

/// Pick the filter directive when RUST_LOG is not set.
///
/// Returns `None` when RUST_LOG should be honoured instead.
fn directive(
    rust_log_set: bool,
    debug_flag: bool,
    config_level: Option<&str>,
) -> (Option<&str>, LevelSource) {
    if rust_log_set {
        (None, LevelSource::Environment)
    } else if debug_flag {
        (Some("debug"), LevelSource::DebugFlag)
    } else if let Some(level) = config_level {
        (Some(level), LevelSource::ConfigFile)
    } else {
        (Some(super::constants::DEFAULT_LOG_LEVEL), LevelSource::Default)
    }
}

fn open_log_file(path: &str) -> Option<File> {
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| eprintln!("Cannot open log file '{path}': {e}. Logging to stderr."))
        .ok()
}

/// Open the configured log file, falling back to stderr.
///
/// The returned label names the output actually in use.
fn choose_output(log_file: Option<&str>) -> (Option<File>, &str) {
    match log_file.and_then(|path| open_log_file(path).map(|file| (path, file))) {
        Some((path, file)) => (Some(file), path),
        None => (None, "stderr"),
    }
}

/// Install the global subscriber. Call once, before anything logs.
pub fn init(debug_flag: bool, config_level: Option<&str>, log_file: Option<&str>) {
    let rust_log_set = std::env::var_os("RUST_LOG").is_some();
    let (level, source) = directive(rust_log_set, debug_flag, config_level);
    let filter = match level {
        Some(level) => EnvFilter::new(level),
        None => EnvFilter::from_default_env(),
    };

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_line_number(true)
        .compact();

    let (file, output) = choose_output(log_file);
    match file {
        Some(file) => builder.with_ansi(false).with_writer(Mutex::new(file)).init(),
        None => builder.init(),
    }

    tracing::debug!(
        app = super::constants::APP_NAME,
        version = super::constants::APP_VERSION,
        level_source = ?source,
        output,
        "Logging ready"
    );
}
