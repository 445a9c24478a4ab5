// DoseWatch - app/fixture_mgr.rs
//
// Chooses the fixture set shown by the dashboard: the built-in demo set
// embedded in the binary, or a user TOML file read from disk.
// A user file that cannot be used falls back to the built-in set.

use crate::core::fixtures::{self, FixtureSet};
use crate::util::constants;
use crate::util::error::FixtureError;
use std::path::Path;

/// Load the fixture set to display.
///
/// Returns the set and every problem encountered. Fatal problems with the
/// user file are reported and the built-in set is used instead.
pub fn load_fixtures(user_file: Option<&Path>) -> (FixtureSet, Vec<FixtureError>) {
    let Some(path) = user_file else {
        let set = fixtures::load_builtin_fixtures();
        tracing::info!(
            reminders = set.reminders.len(),
            "Using built-in demo fixtures"
        );
        return (set, Vec::new());
    };

    match load_user_fixtures(path) {
        Ok((set, warnings)) => {
            tracing::info!(
                path = %path.display(),
                reminders = set.reminders.len(),
                instances = set.instances.len(),
                warnings = warnings.len(),
                "Loaded user fixtures"
            );
            (set, warnings)
        }
        Err(e) => {
            tracing::warn!(error = %e, "User fixtures unusable; falling back to built-in set");
            (fixtures::load_builtin_fixtures(), vec![e])
        }
    }
}

/// Read and validate a fixture file from disk.
pub fn load_user_fixtures(path: &Path) -> Result<(FixtureSet, Vec<FixtureError>), FixtureError> {
    let metadata = std::fs::metadata(path).map_err(|e| FixtureError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;

    if metadata.len() > constants::MAX_FIXTURE_FILE_SIZE {
        return Err(FixtureError::FileTooLarge {
            path: path.to_path_buf(),
            size: metadata.len(),
            max_size: constants::MAX_FIXTURE_FILE_SIZE,
        });
    }

    let content = std::fs::read_to_string(path).map_err(|e| FixtureError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;

    fixtures::load_from_str(&content, path)
}
