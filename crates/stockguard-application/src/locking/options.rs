//! Lock timing options

use std::time::Duration;
use stockguard_domain::constants::{
    DEFAULT_ACQUIRE_BACKOFF_MS, DEFAULT_LEASE_TTL_SECS, DEFAULT_RENEW_INITIAL_DELAY_MS,
    DEFAULT_RENEW_INTERVAL_MS, MIN_LEASE_TTL_SECS,
};
use stockguard_domain::error::{Error, Result};

/// Timing of lease acquisition and renewal
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LockOptions {
    /// Lifetime of a lease without renewal. Whole seconds only.
    pub lease_ttl: Duration,
    /// Period between renewals
    pub renew_interval: Duration,
    /// Delay before the first renewal
    pub renew_initial_delay: Duration,
    /// Pause between contended acquisition attempts
    pub acquire_backoff: Duration,
    /// Give up acquiring after this long; `None` waits forever
    pub acquire_timeout: Option<Duration>,
}

impl Default for LockOptions {
    fn default() -> Self {
        Self {
            lease_ttl: Duration::from_secs(DEFAULT_LEASE_TTL_SECS),
            renew_interval: Duration::from_millis(DEFAULT_RENEW_INTERVAL_MS),
            renew_initial_delay: Duration::from_millis(DEFAULT_RENEW_INITIAL_DELAY_MS),
            acquire_backoff: Duration::from_millis(DEFAULT_ACQUIRE_BACKOFF_MS),
            acquire_timeout: None,
        }
    }
}

impl LockOptions {
    /// Check the timings against each other
    pub fn validate(&self) -> Result<()> {
        if self.lease_ttl < Duration::from_secs(MIN_LEASE_TTL_SECS) {
            return Err(Error::config(format!(
                "Lease TTL must be at least {}s",
                MIN_LEASE_TTL_SECS
            )));
        }
        if self.lease_ttl.subsec_nanos() != 0 {
            return Err(Error::config("Lease TTL must be a whole number of seconds"));
        }
        if self.renew_interval.is_zero() {
            return Err(Error::config("Renewal interval cannot be zero"));
        }
        // The lease has to outlive one missed renewal
        if self.renew_interval.saturating_mul(2) > self.lease_ttl {
            return Err(Error::config(format!(
                "Renewal interval ({}ms) must be at most half the lease TTL ({}s)",
                self.renew_interval.as_millis(),
                self.lease_ttl.as_secs()
            )));
        }
        if self.renew_initial_delay.saturating_add(self.renew_interval) >= self.lease_ttl {
            return Err(Error::config(format!(
                "Initial renewal delay ({}ms) plus the renewal interval must be shorter than the lease TTL ({}s)",
                self.renew_initial_delay.as_millis(),
                self.lease_ttl.as_secs()
            )));
        }
        if self.acquire_backoff.is_zero() {
            return Err(Error::config("Acquire backoff cannot be zero"));
        }
        Ok(())
    }

    /// TTL argument passed to the lock procedures
    pub fn ttl_secs(&self) -> u64 {
        self.lease_ttl.as_secs()
    }
}
