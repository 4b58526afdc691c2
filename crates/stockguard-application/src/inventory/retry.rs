//! Conflict retry policy for the optimistic path

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use stockguard_domain::constants::{
    DEFAULT_RETRY_BASE_DELAY_MS, DEFAULT_RETRY_MAX_DELAY_MS, DEFAULT_RETRY_MULTIPLIER,
};
use stockguard_domain::error::{Error, Result};

/// Exponential backoff between conflicting transaction attempts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetryPolicy {
    /// Delay after the first conflict
    pub base_delay_ms: u64,
    /// Upper bound of any single delay
    pub max_delay_ms: u64,
    /// Growth factor per conflict
    pub backoff_multiplier: f64,
    /// Give up after this many conflicts; `None` retries forever
    pub max_attempts: Option<u32>,
    /// Randomise each delay to spread out colliding writers
    pub jitter: bool,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            base_delay_ms: DEFAULT_RETRY_BASE_DELAY_MS,
            max_delay_ms: DEFAULT_RETRY_MAX_DELAY_MS,
            backoff_multiplier: DEFAULT_RETRY_MULTIPLIER,
            max_attempts: None,
            jitter: true,
        }
    }
}

impl RetryPolicy {
    /// Calculate backoff delay for a given retry attempt
    pub fn calculate_backoff(&self, attempt: u32) -> u64 {
        let exponent = i32::try_from(attempt).unwrap_or(i32::MAX);
        let delay = self.base_delay_ms as f64 * self.backoff_multiplier.powi(exponent);
        (delay as u64).min(self.max_delay_ms)
    }

    /// Delay to wait before retry `attempt`, jitter applied
    pub fn delay_for(&self, attempt: u32) -> Duration {
        let ceiling = self.calculate_backoff(attempt);
        if !self.jitter || ceiling == 0 {
            return Duration::from_millis(ceiling);
        }
        let millis = rand::rng().random_range(ceiling / 2..=ceiling);
        Duration::from_millis(millis)
    }

    /// Whether `conflicts` conflicts exhaust the policy
    pub fn is_exhausted(&self, conflicts: u32) -> bool {
        self.max_attempts.is_some_and(|max| conflicts >= max)
    }

    /// Check the policy parameters
    pub fn validate(&self) -> Result<()> {
        if self.max_delay_ms < self.base_delay_ms {
            return Err(Error::config(
                "Retry max_delay_ms cannot be smaller than base_delay_ms",
            ));
        }
        if self.backoff_multiplier.is_nan() || self.backoff_multiplier < 1.0 {
            return Err(Error::config("Retry backoff_multiplier must be at least 1.0"));
        }
        if self.max_attempts == Some(0) {
            return Err(Error::config("Retry max_attempts must be positive when set"));
        }
        Ok(())
    }
}
