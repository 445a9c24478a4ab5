// DoseWatch - util/constants.rs
//
// Single source of truth for all named constants, limits, and defaults.

// =============================================================================
// Application metadata
// =============================================================================

/// Application display name.
pub const APP_NAME: &str = "DoseWatch";

/// Application identifier used for config/data directories.
pub const APP_ID: &str = "DoseWatch";

/// Current application version.
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

// =============================================================================
// Reminder views
// =============================================================================

/// Number of settled executions shown per reminder card.
pub const RECENT_EXECUTIONS_LIMIT: usize = 5;

/// Minimum user-configurable recent-executions limit.
pub const MIN_RECENT_EXECUTIONS_LIMIT: usize = 1;

/// Maximum user-configurable recent-executions limit.
pub const MAX_RECENT_EXECUTIONS_LIMIT: usize = 20;

/// Supply percentage below which a medicine is flagged as running low.
pub const DEFAULT_LOW_STOCK_PERCENT: f32 = 30.0;

/// Minimum configurable low-stock threshold (percent).
pub const MIN_LOW_STOCK_PERCENT: f32 = 1.0;

/// Maximum configurable low-stock threshold (percent).
pub const MAX_LOW_STOCK_PERCENT: f32 = 100.0;

/// Default `max_retries` for an instance when the fixture omits it.
pub const DEFAULT_MAX_RETRIES: u32 = 3;

/// Default tablets taken per dose when the fixture omits it.
pub const DEFAULT_TABLETS_PER_DOSE: u32 = 1;

/// Upper bound on the intended-action log kept in memory.
/// Oldest entries are dropped first once the cap is reached.
pub const MAX_INTENDED_ACTIONS: usize = 200;

/// Timestamp layout used by fixture files and exports.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M";

// =============================================================================
// Fixture limits
// =============================================================================

/// Maximum size of a user fixture file in bytes.
pub const MAX_FIXTURE_FILE_SIZE: u64 = 1024 * 1024; // 1 MB

/// Maximum number of reminders accepted from a fixture file.
pub const MAX_REMINDERS: usize = 1_000;

// =============================================================================
// UI defaults
// =============================================================================

/// Default UI body font size in points.
pub const DEFAULT_FONT_SIZE: f32 = 14.5;

/// Minimum user-configurable UI font size (points).
pub const MIN_FONT_SIZE: f32 = 10.0;

/// Maximum user-configurable UI font size (points).
pub const MAX_FONT_SIZE: f32 = 24.0;

// =============================================================================
// Logging
// =============================================================================

/// Default log level.
pub const DEFAULT_LOG_LEVEL: &str = "info";

// =============================================================================
// Configuration
// =============================================================================

/// Configuration file name.
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Session persistence file name (stored in the platform data directory).
pub const SESSION_FILE_NAME: &str = "session.json";
