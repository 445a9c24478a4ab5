// DoseWatch - platform/config.rs
//
// Where DoseWatch keeps its files, and the `config.toml` reader.
// `directories` picks the per-OS locations; every value read from the
// file is range-checked before use.

use crate::util::constants;
use crate::util::error::ConfigError;
use directories::ProjectDirs;
use std::path::{Path, PathBuf};

/// Directories holding `config.toml` and `session.json`.
#[derive(Debug, Clone)]
pub struct PlatformPaths {
    /// e.g. `~/.config/dosewatch` on Linux.
    pub config_dir: PathBuf,

    pub data_dir: PathBuf,
}

impl PlatformPaths {
    /// Per-OS project directories, or the working directory when the OS
    /// reports no home.
    pub fn resolve() -> Self {
        let Some(dirs) = ProjectDirs::from("", "", constants::APP_ID) else {
            tracing::warn!("No home directory found; keeping config and session in the working directory");
            return Self::in_dir(Path::new("."));
        };

        let paths = Self {
            config_dir: dirs.config_dir().to_path_buf(),
            data_dir: dirs.data_dir().to_path_buf(),
        };
        tracing::debug!(
            config = %paths.config_dir.display(),
            data = %paths.data_dir.display(),
            "Using platform directories"
        );
        paths
    }

    /// Both files side by side in `dir`.
    pub fn in_dir(dir: &Path) -> Self {
        Self {
            config_dir: dir.to_path_buf(),
            data_dir: dir.to_path_buf(),
        }
    }
}

// =============================================================================
// config.toml loading and validation
// =============================================================================

/// `config.toml` as written by the user; keys we do not know are skipped.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct RawConfig {
    pub ui: UiSection,
    pub reminders: RemindersSection,
    pub logging: LoggingSection,
}

/// `[ui]`
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct UiSection {
    /// "dark" or "light".
    pub theme: Option<String>,
    pub font_size: Option<f32>,
    /// Tab shown at startup: "today", "calendar" or "config".
    pub default_tab: Option<String>,
}

/// `[reminders]`
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct RemindersSection {
    /// Executions listed per reminder card.
    pub recent_executions_limit: Option<usize>,
    /// Supply percentage below which a medicine is flagged.
    pub low_stock_percent: Option<f32>,
    /// Fixture file replacing the built-in demo set.
    pub fixtures_file: Option<String>,
}

/// `[logging]`
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    pub level: Option<String>,
    /// Append log lines here instead of stderr.
    pub file: Option<String>,
}

/// Tab names accepted by `[ui] default_tab`.
pub const TAB_NAMES: &[&str] = &["today", "calendar", "config"];

/// Settings after validation. Rejected values keep their defaults.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub dark_mode: bool,
    pub font_size: f32,
    /// Lowercase, one of `TAB_NAMES`.
    pub default_tab: Option<String>,

    pub recent_executions_limit: usize,
    pub low_stock_percent: f32,
    pub fixtures_file: Option<PathBuf>,

    /// Read before the subscriber exists, so kept as plain strings.
    pub log_level: Option<String>,
    pub log_file: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            dark_mode: true,
            font_size: constants::DEFAULT_FONT_SIZE,
            default_tab: None,
            recent_executions_limit: constants::RECENT_EXECUTIONS_LIMIT,
            low_stock_percent: constants::DEFAULT_LOW_STOCK_PERCENT,
            fixtures_file: None,
            log_level: None,
            log_file: None,
        }
    }
}

/// Read `config.toml` from `config_dir`.
///
/// No file means defaults and no warnings. A file that cannot be read or
/// parsed also means defaults, with one warning for the status bar.
pub fn load_config(config_dir: &Path) -> (AppConfig, Vec<String>) {
    let path = config_dir.join(constants::CONFIG_FILE_NAME);
    if !path.is_file() {
        tracing::debug!(path = %path.display(), "No config file, defaults apply");
        return (AppConfig::default(), Vec::new());
    }

    match read_raw_config(&path) {
        Ok(raw) => {
            tracing::info!(path = %path.display(), "Config file read");
            validate(raw)
        }
        Err(e) => {
            tracing::warn!(error = %e, "Config file ignored");
            (AppConfig::default(), vec![format!("{e}. Using defaults.")])
        }
    }
}

fn read_raw_config(path: &Path) -> Result<RawConfig, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    toml::from_str(&content).map_err(|e| ConfigError::TomlParse {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Validate each field against named constants, accumulating all problems.
pub fn validate(raw: RawConfig) -> (AppConfig, Vec<String>) {
    let mut config = AppConfig::default();
    let mut warnings: Vec<String> = Vec::new();

    // -- UI: theme --
    if let Some(ref theme) = raw.ui.theme {
        match theme.to_lowercase().as_str() {
            "dark" => config.dark_mode = true,
            "light" => config.dark_mode = false,
            other => warnings.push(format!(
                "[ui] theme = \"{other}\" is not recognised. Expected \"dark\" or \"light\". Using default (dark).",
            )),
        }
    }

    // -- UI: font_size --
    if let Some(size) = raw.ui.font_size {
        if (constants::MIN_FONT_SIZE..=constants::MAX_FONT_SIZE).contains(&size) {
            config.font_size = size;
        } else {
            warnings.push(
                ConfigError::ValueOutOfRange {
                    field: "[ui] font_size".to_string(),
                    value: size.to_string(),
                    expected: format!(
                        "{}-{} (default {})",
                        constants::MIN_FONT_SIZE,
                        constants::MAX_FONT_SIZE,
                        constants::DEFAULT_FONT_SIZE
                    ),
                }
                .to_string(),
            );
        }
    }

    // -- UI: default_tab --
    if let Some(ref tab) = raw.ui.default_tab {
        let lower = tab.to_lowercase();
        if TAB_NAMES.contains(&lower.as_str()) {
            config.default_tab = Some(lower);
        } else {
            warnings.push(format!(
                "[ui] default_tab = \"{tab}\" is not recognised. Valid values: {}.",
                TAB_NAMES.join(", ")
            ));
        }
    }

    // -- Reminders: recent_executions_limit --
    if let Some(limit) = raw.reminders.recent_executions_limit {
        if (constants::MIN_RECENT_EXECUTIONS_LIMIT..=constants::MAX_RECENT_EXECUTIONS_LIMIT)
            .contains(&limit)
        {
            config.recent_executions_limit = limit;
        } else {
            warnings.push(
                ConfigError::ValueOutOfRange {
                    field: "[reminders] recent_executions_limit".to_string(),
                    value: limit.to_string(),
                    expected: format!(
                        "{}-{} (default {})",
                        constants::MIN_RECENT_EXECUTIONS_LIMIT,
                        constants::MAX_RECENT_EXECUTIONS_LIMIT,
                        constants::RECENT_EXECUTIONS_LIMIT
                    ),
                }
                .to_string(),
            );
        }
    }

    // -- Reminders: low_stock_percent --
    if let Some(pct) = raw.reminders.low_stock_percent {
        if (constants::MIN_LOW_STOCK_PERCENT..=constants::MAX_LOW_STOCK_PERCENT).contains(&pct) {
            config.low_stock_percent = pct;
        } else {
            warnings.push(
                ConfigError::ValueOutOfRange {
                    field: "[reminders] low_stock_percent".to_string(),
                    value: pct.to_string(),
                    expected: format!(
                        "{}-{} (default {})",
                        constants::MIN_LOW_STOCK_PERCENT,
                        constants::MAX_LOW_STOCK_PERCENT,
                        constants::DEFAULT_LOW_STOCK_PERCENT
                    ),
                }
                .to_string(),
            );
        }
    }

    // -- Reminders: fixtures_file --
    if let Some(ref file) = raw.reminders.fixtures_file {
        if !file.trim().is_empty() {
            config.fixtures_file = Some(PathBuf::from(file));
        }
    }

    // -- Logging: level --
    if let Some(ref level) = raw.logging.level {
        let valid = ["error", "warn", "info", "debug", "trace"];
        if valid.contains(&level.to_lowercase().as_str()) {
            config.log_level = Some(level.to_lowercase());
        } else {
            warnings.push(format!(
                "[logging] level = \"{level}\" is not recognised. \
                 Valid values: error, warn, info, debug, trace. Using default (info).",
            ));
        }
    }

    // -- Logging: file --
    if let Some(ref file) = raw.logging.file {
        if !file.is_empty() {
            config.log_file = Some(file.clone());
        }
    }

    if !warnings.is_empty() {
        tracing::warn!(
            count = warnings.len(),
            "Config validation produced warnings"
        );
    }

    (config, warnings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_config(dir: &TempDir, body: &str) {
        std::fs::write(dir.path().join(constants::CONFIG_FILE_NAME), body).unwrap();
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = TempDir::new().unwrap();
        let (config, warnings) = load_config(dir.path());
        assert!(warnings.is_empty());
        assert!(config.dark_mode);
        assert_eq!(
            config.recent_executions_limit,
            constants::RECENT_EXECUTIONS_LIMIT
        );
    }

    #[test]
    fn test_valid_values_are_applied() {
        let dir = TempDir::new().unwrap();
        write_config(
            &dir,
            r#"
[ui]
theme = "Light"
font_size = 16.0
default_tab = "Calendar"

[reminders]
recent_executions_limit = 3
low_stock_percent = 25.0
fixtures_file = "/srv/dosewatch/ward.toml"

[logging]
level = "DEBUG"
"#,
        );
        let (config, warnings) = load_config(dir.path());
        assert!(warnings.is_empty(), "unexpected warnings: {warnings:?}");
        assert!(!config.dark_mode);
        assert_eq!(config.font_size, 16.0);
        assert_eq!(config.default_tab.as_deref(), Some("calendar"));
        assert_eq!(config.recent_executions_limit, 3);
        assert_eq!(config.low_stock_percent, 25.0);
        assert_eq!(
            config.fixtures_file,
            Some(PathBuf::from("/srv/dosewatch/ward.toml"))
        );
        assert_eq!(config.log_level.as_deref(), Some("debug"));
    }

    #[test]
    fn test_out_of_range_values_fall_back_with_warnings() {
        let dir = TempDir::new().unwrap();
        write_config(
            &dir,
            r#"
[ui]
theme = "sepia"
font_size = 99.0
default_tab = "history"

[reminders]
recent_executions_limit = 0
low_stock_percent = 150.0
"#,
        );
        let (config, warnings) = load_config(dir.path());
        assert_eq!(warnings.len(), 5);
        assert!(config.dark_mode);
        assert_eq!(config.font_size, constants::DEFAULT_FONT_SIZE);
        assert!(config.default_tab.is_none());
        assert_eq!(
            config.recent_executions_limit,
            constants::RECENT_EXECUTIONS_LIMIT
        );
        assert_eq!(
            config.low_stock_percent,
            constants::DEFAULT_LOW_STOCK_PERCENT
        );
    }

    #[test]
    fn test_unparseable_file_gives_defaults_and_warning() {
        let dir = TempDir::new().unwrap();
        write_config(&dir, "[ui\ntheme = ");
        let (config, warnings) = load_config(dir.path());
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("Config parse error"));
        assert!(config.dark_mode);
    }

    #[test]
    fn test_unknown_keys_are_ignored() {
        let dir = TempDir::new().unwrap();
        write_config(&dir, "[future]\nfeature = true\n");
        let (_, warnings) = load_config(dir.path());
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_in_dir_keeps_config_and_session_together() {
        let dir = TempDir::new().unwrap();
        let paths = PlatformPaths::in_dir(dir.path());
        std::fs::write(
            paths.config_dir.join(constants::CONFIG_FILE_NAME),
            "[ui]\ntheme = \"light\"\n",
        )
        .unwrap();
        let (config, _) = load_config(&paths.config_dir);
        assert!(!config.dark_mode);
        assert_eq!(paths.config_dir, paths.data_dir);
    }
}
