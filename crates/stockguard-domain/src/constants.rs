//! Domain layer constants
//!
//! Defaults shared by the lock manager, the inventory services and the
//! configuration layer. Infrastructure-specific constants remain in
//! `stockguard_infrastructure::constants`.

// ============================================================================
// KEY NAMES
// ============================================================================

/// Default lock key guarding the inventory counter
pub const DEFAULT_LOCK_NAME: &str = "lock";

/// Default inventory counter key
pub const DEFAULT_STOCK_KEY: &str = "stockCount";

/// Prefix of every generated holder identity
pub const HOLDER_ID_PREFIX: &str = "busiId";

/// Quantity a restock puts back when none is given
pub const DEFAULT_RESTOCK_UNITS: i64 = 5000;

// ============================================================================
// LEASE CONSTANTS
// ============================================================================

/// Lease TTL in seconds
pub const DEFAULT_LEASE_TTL_SECS: u64 = 10;

/// Minimum lease TTL; the store expires keys with one-second granularity
pub const MIN_LEASE_TTL_SECS: u64 = 1;

/// Interval between two lease renewals in milliseconds (TTL / 10)
pub const DEFAULT_RENEW_INTERVAL_MS: u64 = 1000;

/// Delay before the first lease renewal in milliseconds
pub const DEFAULT_RENEW_INITIAL_DELAY_MS: u64 = 100;

/// Sleep between two acquisition attempts in milliseconds
pub const DEFAULT_ACQUIRE_BACKOFF_MS: u64 = 10;

/// Reentrancy count written on first acquisition
pub const INITIAL_REENTRANCY_COUNT: i64 = 1;

// ============================================================================
// OPTIMISTIC RETRY CONSTANTS
// ============================================================================

/// First backoff after a conflicting commit in milliseconds
pub const DEFAULT_RETRY_BASE_DELAY_MS: u64 = 1;

/// Upper bound of the conflict backoff in milliseconds
pub const DEFAULT_RETRY_MAX_DELAY_MS: u64 = 50;

/// Backoff growth factor between two conflicting commits
pub const DEFAULT_RETRY_MULTIPLIER: f64 = 2.0;
