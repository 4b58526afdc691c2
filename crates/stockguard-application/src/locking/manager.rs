//! Reentrant Lock Manager
//!
//! Thin typed layer over the three atomic lock procedures. Every operation
//! is a single store round-trip; only [`ReentrantLockManager::acquire`]
//! loops.
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use stockguard_application::locking::ReentrantLockManager;
//! use stockguard_domain::ports::ScriptExecutor;
//! use stockguard_domain::value_objects::LockName;
//!
//! async fn example(store: Arc<dyn ScriptExecutor>) -> stockguard_domain::Result<()> {
//!     let manager = ReentrantLockManager::new(store);
//!     let lease = manager.acquire(&LockName::new("lock")?).await?;
//!     // ... critical section ...
//!     lease.release().await?;
//!     Ok(())
//! }
//! ```

use crate::locking::lease::LockLease;
use crate::locking::options::LockOptions;
use crate::locking::watchdog::LeaseWatchdog;
use std::sync::Arc;
use stockguard_domain::constants::INITIAL_REENTRANCY_COUNT;
use stockguard_domain::error::{Error, Result};
use stockguard_domain::ports::{AtomicScript, ScriptExecutor};
use stockguard_domain::value_objects::{
    AcquireOutcome, HolderId, LockName, ReleaseOutcome, RenewOutcome,
};
use tokio::time::Instant;

/// Reentrant lock manager
///
/// Cheap to clone; clones share the executor.
#[derive(Clone)]
pub struct ReentrantLockManager {
    executor: Arc<dyn ScriptExecutor>,
    options: LockOptions,
}

impl ReentrantLockManager {
    /// Create a manager with default timings
    pub fn new(executor: Arc<dyn ScriptExecutor>) -> Self {
        Self {
            executor,
            options: LockOptions::default(),
        }
    }

    /// Create a manager with custom timings
    pub fn with_options(executor: Arc<dyn ScriptExecutor>, options: LockOptions) -> Result<Self> {
        options.validate()?;
        Ok(Self { executor, options })
    }

    /// Timings in use
    pub fn options(&self) -> &LockOptions {
        &self.options
    }

    /// One non-blocking acquisition attempt
    ///
    /// Creates the lock with a count of one and a fresh TTL, or increments
    /// the count when `holder` already holds it (TTL untouched).
    pub async fn try_acquire(&self, lock: &LockName, holder: &HolderId) -> Result<AcquireOutcome> {
        let reply = self
            .executor
            .execute(
                AtomicScript::AcquireReentrant,
                &[lock.to_string()],
                &[
                    holder.to_string(),
                    INITIAL_REENTRANCY_COUNT.to_string(),
                    self.options.ttl_secs().to_string(),
                ],
            )
            .await?
            .into_integer()?;

        match reply {
            1 => Ok(AcquireOutcome::Acquired),
            0 => Ok(AcquireOutcome::AlreadyHeldByOther),
            other => Err(Error::store(format!(
                "Unexpected acquire reply {} for lock {}",
                other, lock
            ))),
        }
    }

    /// Drop one hold of `holder`, deleting the lock when none remain
    pub async fn release(&self, lock: &LockName, holder: &HolderId) -> Result<ReleaseOutcome> {
        let remaining = self
            .executor
            .execute(
                AtomicScript::ReleaseReentrant,
                &[lock.to_string()],
                &[holder.to_string()],
            )
            .await?
            .into_integer()?;

        let outcome = match remaining {
            r if r < 0 => ReleaseOutcome::NotHolder,
            0 => ReleaseOutcome::Released,
            r => ReleaseOutcome::StillHeld(u32::try_from(r).unwrap_or(u32::MAX)),
        };
        tracing::debug!(lock = %lock, holder = %holder, ?outcome, "[LOCK] Released");
        Ok(outcome)
    }

    /// Reset the TTL if `holder` still holds the lock
    pub async fn renew(&self, lock: &LockName, holder: &HolderId) -> Result<RenewOutcome> {
        let renewed = self
            .executor
            .execute(
                AtomicScript::RenewLease,
                &[lock.to_string()],
                &[holder.to_string(), self.options.ttl_secs().to_string()],
            )
            .await?
            .into_boolean()?;

        Ok(if renewed {
            RenewOutcome::Renewed
        } else {
            RenewOutcome::NotHolder
        })
    }

    /// Acquire `lock` under a fresh holder identity and start renewing it
    ///
    /// Retries with a fixed backoff while another holder owns the lock.
    /// Fails with `Error::AcquireTimeout` once the configured timeout
    /// elapses; waits forever when none is set.
    pub async fn acquire(&self, lock: &LockName) -> Result<LockLease> {
        let holder = HolderId::generate();
        let started = Instant::now();
        let mut attempts: u64 = 0;

        loop {
            attempts += 1;
            if self.try_acquire(lock, &holder).await?.is_acquired() {
                break;
            }

            let waited = started.elapsed();
            if let Some(timeout) = self.options.acquire_timeout
                && waited >= timeout
            {
                let waited_ms = u64::try_from(waited.as_millis()).unwrap_or(u64::MAX);
                tracing::warn!(
                    lock = %lock,
                    attempts,
                    waited_ms,
                    "[LOCK] Gave up waiting for lock"
                );
                return Err(Error::acquire_timeout(lock.as_str(), waited_ms));
            }
            tokio::time::sleep(self.options.acquire_backoff).await;
        }

        tracing::debug!(lock = %lock, holder = %holder, attempts, "[LOCK] Acquired");
        let watchdog = LeaseWatchdog::spawn(self.clone(), lock.clone(), holder.clone());
        Ok(LockLease::new(self.clone(), lock.clone(), holder, watchdog))
    }
}

impl std::fmt::Debug for ReentrantLockManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReentrantLockManager")
            .field("options", &self.options)
            .finish()
    }
}
