//! Lock configuration types

use serde::{Deserialize, Serialize};
use std::time::Duration;
use stockguard_application::locking::LockOptions;
use stockguard_domain::constants::{
    DEFAULT_ACQUIRE_BACKOFF_MS, DEFAULT_LEASE_TTL_SECS, DEFAULT_LOCK_NAME,
    DEFAULT_RENEW_INITIAL_DELAY_MS, DEFAULT_RENEW_INTERVAL_MS,
};
use stockguard_domain::error::Result;
use stockguard_domain::value_objects::LockName;

/// Lock configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LockConfig {
    /// Store key of the lock guarding the counter
    pub name: String,
    /// Lease lifetime without renewal, in seconds
    pub lease_ttl_secs: u64,
    /// Period between renewals, in milliseconds
    pub renew_interval_ms: u64,
    /// Delay before the first renewal, in milliseconds
    pub renew_initial_delay_ms: u64,
    /// Pause between contended acquisition attempts, in milliseconds
    pub acquire_backoff_ms: u64,
    /// Acquisition deadline in milliseconds; unset waits forever
    pub acquire_timeout_ms: Option<u64>,
}

impl Default for LockConfig {
    fn default() -> Self {
        Self {
            name: DEFAULT_LOCK_NAME.to_string(),
            lease_ttl_secs: DEFAULT_LEASE_TTL_SECS,
            renew_interval_ms: DEFAULT_RENEW_INTERVAL_MS,
            renew_initial_delay_ms: DEFAULT_RENEW_INITIAL_DELAY_MS,
            acquire_backoff_ms: DEFAULT_ACQUIRE_BACKOFF_MS,
            acquire_timeout_ms: None,
        }
    }
}

impl LockConfig {
    /// Validated lock name
    pub fn lock_name(&self) -> Result<LockName> {
        LockName::new(self.name.as_str())
    }

    /// Timings as lock manager options
    pub fn to_options(&self) -> LockOptions {
        LockOptions {
            lease_ttl: Duration::from_secs(self.lease_ttl_secs),
            renew_interval: Duration::from_millis(self.renew_interval_ms),
            renew_initial_delay: Duration::from_millis(self.renew_initial_delay_ms),
            acquire_backoff: Duration::from_millis(self.acquire_backoff_ms),
            acquire_timeout: self.acquire_timeout_ms.map(Duration::from_millis),
        }
    }
}
