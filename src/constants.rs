//! Constants used throughout the application.
//!
//! This module contains all constants used in moodlog, organized into logical
//! groups. Having constants centralized makes them easier to find, modify, and
//! reference consistently.

// Application Metadata
/// The name of the application.
pub const APP_NAME: &str = "moodlog";
/// The description of the application used in CLI help text.
pub const APP_DESCRIPTION: &str = "A tiny local mood journal";

// CLI Arguments & Defaults
/// Log format identifier for plain text.
pub const LOG_FORMAT_TEXT: &str = "text";
/// Log format identifier for JSON.
pub const LOG_FORMAT_JSON: &str = "json";
/// Default log level.
pub const DEFAULT_LOG_LEVEL: &str = "info";

// Configuration Keys & Environment Variables
/// Environment variable for specifying the data directory.
pub const ENV_VAR_MOODLOG_DIR: &str = "MOODLOG_DIR";
/// Environment variable toggling session gating of mutations.
pub const ENV_VAR_REQUIRE_LOGIN: &str = "MOODLOG_REQUIRE_LOGIN";
/// Standard environment variable for the user's home directory.
pub const ENV_VAR_HOME: &str = "HOME";
/// Default sub-directory name for the data directory within the user's home directory.
pub const DEFAULT_DATA_SUBDIR: &str = ".moodlog";
/// Placeholder string for redacted information in debug output.
pub const REDACTED_PLACEHOLDER: &str = "[REDACTED]";

// Persistence
/// Storage key of the persisted store snapshot.
pub const STORE_KEY: &str = "root";
/// Current version of the persisted snapshot layout.
pub const SNAPSHOT_VERSION: u32 = 1;
/// File extension for persisted slots.
pub const SLOT_FILE_EXTENSION: &str = "json";
/// Name of the advisory lock file guarding the data directory.
pub const LOCK_FILE_NAME: &str = ".moodlog.lock";
/// Default POSIX permissions for newly created directories (owner read/write/execute).
#[cfg(unix)]
pub const DEFAULT_DIR_PERMISSIONS: u32 = 0o700;
/// Default POSIX permissions for newly created files (owner read/write).
#[cfg(unix)]
pub const DEFAULT_FILE_PERMISSIONS: u32 = 0o600;

// Date Logic
/// Date format of an entry's `date` field (MM/DD/YYYY).
pub const ENTRY_DATE_FORMAT: &str = "%m/%d/%Y";

// Display
/// Width in characters of a full statistics bar.
pub const STATS_BAR_WIDTH: usize = 30;
/// Character used to draw statistics bars.
pub const STATS_BAR_CHAR: char = '█';

// Logging Configuration
/// Service name used in tracing spans and structured logs.
pub const TRACING_SERVICE_NAME: &str = "moodlog";
/// Name for the root tracing span covering an application invocation.
pub const TRACING_ROOT_SPAN_NAME: &str = "app_invocation";
