// DoseWatch - app/session.rs
//
// Remembers the dashboard view between runs: tab, list search and
// activity filter, the selected calendar day and the theme.
//
// Reminder data never goes into the session; fixtures are reloaded on
// every start. Writes go through a temporary file and a rename.

use crate::app::state::Tab;
use crate::core::filter::ActivityFilter;
use crate::util::constants::SESSION_FILE_NAME;
use crate::util::error::{DoseWatchError, Result};
use serde::{Deserialize, Serialize};
use std::io;
use std::path::{Path, PathBuf};

/// Bumped on breaking changes to `SessionData`; other versions are ignored.
pub const SESSION_VERSION: u32 = 1;

/// What `session.json` holds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionData {
    pub version: u32,

    #[serde(default)]
    pub active_tab: Tab,

    /// Medicine search text in the configuration list.
    #[serde(default)]
    pub search: String,

    #[serde(default)]
    pub activity: ActivityFilter,

    /// Day of month selected in the calendar.
    #[serde(default)]
    pub selected_day: Option<u32>,

    #[serde(default = "default_dark_mode")]
    pub dark_mode: bool,
}

fn default_dark_mode() -> bool {
    true
}

/// Resolve the session file path from the platform data directory.
pub fn session_path(data_dir: &Path) -> PathBuf {
    data_dir.join(SESSION_FILE_NAME)
}

fn io_error(path: &Path, operation: &'static str, source: io::Error) -> DoseWatchError {
    DoseWatchError::Io {
        path: path.to_path_buf(),
        operation,
        source,
    }
}

/// Write `data` next to `path` and rename it into place.
///
/// Parent directories are created on demand. A failed rename removes the
/// temporary file and leaves the previous session untouched.
pub fn save(data: &SessionData, path: &Path) -> Result<()> {
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir).map_err(|e| io_error(dir, "create session directory", e))?;
    }

    let body = serde_json::to_vec_pretty(data)
        .map_err(|e| io_error(path, "encode session", io::Error::other(e)))?;

    let staging = path.with_extension("json.tmp");
    std::fs::write(&staging, body).map_err(|e| io_error(&staging, "write session", e))?;

    if let Err(e) = std::fs::rename(&staging, path) {
        let _ = std::fs::remove_file(&staging);
        return Err(io_error(path, "replace session", e));
    }

    tracing::debug!(path = %path.display(), "Session saved");
    Ok(())
}

/// Read the session at `path`.
///
/// A missing file, unreadable JSON or another schema version all yield
/// `None`, and the app starts with defaults.
pub fn load(path: &Path) -> Option<SessionData> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return None,
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "Session file unreadable");
            return None;
        }
    };

    match serde_json::from_str::<SessionData>(&content) {
        Ok(data) if data.version == SESSION_VERSION => {
            tracing::info!(
                path = %path.display(),
                tab = data.active_tab.label(),
                "Session restored"
            );
            Some(data)
        }
        Ok(data) => {
            tracing::warn!(
                found = data.version,
                expected = SESSION_VERSION,
                "Discarding session from another version"
            );
            None
        }
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "Discarding malformed session");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn sample_data() -> SessionData {
        SessionData {
            version: SESSION_VERSION,
            active_tab: Tab::Config,
            search: "insu".to_string(),
            activity: ActivityFilter::ActiveOnly,
            selected_day: Some(22),
            dark_mode: false,
        }
    }

    #[test]
    fn test_save_then_load_returns_same_view() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("session.json");
        let original = sample_data();

        save(&original, &path).expect("save should succeed");
        let loaded = load(&path).expect("load should return Some after valid save");
        assert_eq!(loaded, original);
    }

    #[test]
    fn test_missing_file_is_fresh_start() {
        let dir = TempDir::new().unwrap();
        assert!(load(&dir.path().join("nonexistent.json")).is_none());
    }

    #[test]
    fn test_malformed_json_is_discarded() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("session.json");
        std::fs::write(&path, b"not valid json {{{{").unwrap();
        assert!(load(&path).is_none());
    }

    #[test]
    fn test_other_version_is_discarded() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("session.json");
        let mut data = sample_data();
        data.version = 99;
        save(&data, &path).unwrap();
        assert!(load(&path).is_none());
    }

    #[test]
    fn test_missing_fields_take_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("session.json");
        std::fs::write(&path, format!("{{\"version\": {SESSION_VERSION}}}")).unwrap();
        let loaded = load(&path).unwrap();
        assert_eq!(loaded.active_tab, Tab::Today);
        assert_eq!(loaded.activity, ActivityFilter::All);
        assert!(loaded.dark_mode);
    }

    #[test]
    fn test_save_under_a_file_reports_directory_error() {
        let dir = TempDir::new().unwrap();
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, b"").unwrap();

        let err = save(&sample_data(), &blocker.join("session.json")).unwrap_err();
        match err {
            DoseWatchError::Io { path, operation, .. } => {
                assert_eq!(operation, "create session directory");
                assert_eq!(path, blocker);
            }
            other => panic!("expected Io error, got {other:?}"),
        }
    }

    #[test]
    fn test_leftover_temp_file_does_not_block_save() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("session.json");
        save(&sample_data(), &path).unwrap();

        std::fs::write(path.with_extension("json.tmp"), b"garbage").unwrap();

        let mut updated = sample_data();
        updated.search = "omep".to_string();
        save(&updated, &path).unwrap();
        assert_eq!(load(&path).unwrap().search, "omep");
    }
}
