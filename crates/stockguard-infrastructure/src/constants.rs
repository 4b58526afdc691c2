//! Infrastructure layer constants
//!
//! Contains constants that are part of the infrastructure implementation.
//! Domain-specific constants are defined in `stockguard_domain::constants`.

// ============================================================================
// CONFIGURATION CONSTANTS
// ============================================================================

/// Default configuration file name
pub const DEFAULT_CONFIG_FILENAME: &str = "stockguard.toml";

/// Default configuration directory name
pub const DEFAULT_CONFIG_DIR: &str = "stockguard";

/// Environment variable prefix for configuration
pub const CONFIG_ENV_PREFIX: &str = "STOCKGUARD";

/// Separator between nested keys in environment variable names
pub const CONFIG_ENV_SEPARATOR: &str = "__";

// ============================================================================
// LOGGING CONSTANTS
// ============================================================================

/// Default log level
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Environment variable overriding the log filter
pub const LOG_FILTER_ENV: &str = "STOCKGUARD_LOG";

/// Log file name used when the configured path has no stem
pub const DEFAULT_LOG_FILE_STEM: &str = "stockguard";

// ============================================================================
// SALE CONSTANTS
// ============================================================================

/// Number of concurrent buyers a flash sale starts by default
pub const DEFAULT_FLASH_SALE_BUYERS: usize = 10;
