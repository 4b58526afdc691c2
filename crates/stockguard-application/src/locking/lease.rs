//! Held lock with its renewal watchdog

use crate::locking::manager::ReentrantLockManager;
use crate::locking::watchdog::LeaseWatchdog;
use stockguard_domain::error::{Error, Result};
use stockguard_domain::value_objects::{
    AcquireOutcome, HolderId, LeaseState, LockName, ReleaseOutcome,
};

/// One top-level acquisition of a lock
///
/// Owns the watchdog renewing the lease. Nested acquisitions go through
/// [`LockLease::reenter`] and reuse the same holder identity and watchdog.
///
/// Call [`LockLease::release`] when done. A lease dropped without release
/// stops renewing at once and releases its holds in the background when a
/// Tokio runtime is available; otherwise the TTL frees the lock.
pub struct LockLease {
    manager: ReentrantLockManager,
    lock: LockName,
    holder: HolderId,
    depth: u32,
    watchdog: Option<LeaseWatchdog>,
}

impl LockLease {
    pub(crate) fn new(
        manager: ReentrantLockManager,
        lock: LockName,
        holder: HolderId,
        watchdog: LeaseWatchdog,
    ) -> Self {
        Self {
            manager,
            lock,
            holder,
            depth: 1,
            watchdog: Some(watchdog),
        }
    }

    /// Lock this lease holds
    pub fn lock_name(&self) -> &LockName {
        &self.lock
    }

    /// Holder identity of this acquisition
    pub fn holder(&self) -> &HolderId {
        &self.holder
    }

    /// Number of holds taken through this lease
    pub fn depth(&self) -> u32 {
        self.depth
    }

    /// State reported by the watchdog
    pub fn state(&self) -> LeaseState {
        self.watchdog
            .as_ref()
            .map_or(LeaseState::Stopped, LeaseWatchdog::state)
    }

    /// Whether the lock was lost to expiry or eviction
    pub fn is_lost(&self) -> bool {
        self.state() == LeaseState::Lost
    }

    /// Take one more hold with the same identity
    ///
    /// Fails with `Error::LeaseLost` once the watchdog has reported the
    /// lease lost, even if the lock happens to be free again.
    pub async fn reenter(&mut self) -> Result<()> {
        if self.is_lost() {
            return Err(self.lost());
        }
        match self.manager.try_acquire(&self.lock, &self.holder).await? {
            AcquireOutcome::Acquired => {
                self.depth += 1;
                Ok(())
            }
            AcquireOutcome::AlreadyHeldByOther => Err(self.lost()),
        }
    }

    /// Drop one nested hold
    ///
    /// The outermost hold can only be dropped through [`LockLease::release`].
    pub async fn exit(&mut self) -> Result<ReleaseOutcome> {
        if self.depth <= 1 {
            return Err(Error::invalid_argument(
                "Cannot exit the outermost hold, release the lease instead",
            ));
        }
        match self.manager.release(&self.lock, &self.holder).await? {
            ReleaseOutcome::StillHeld(count) => {
                self.depth = count;
                Ok(ReleaseOutcome::StillHeld(count))
            }
            ReleaseOutcome::Released | ReleaseOutcome::NotHolder => Err(self.lost()),
        }
    }

    /// Stop renewing, then drop every hold of this lease
    ///
    /// Returns `NotHolder` when the lock had already been lost.
    pub async fn release(mut self) -> Result<ReleaseOutcome> {
        if let Some(watchdog) = self.watchdog.take() {
            watchdog.stop().await;
        }

        let mut outcome = ReleaseOutcome::NotHolder;
        while self.depth > 0 {
            outcome = self.manager.release(&self.lock, &self.holder).await?;
            self.depth -= 1;
            match outcome {
                ReleaseOutcome::StillHeld(count) => self.depth = self.depth.min(count),
                ReleaseOutcome::Released | ReleaseOutcome::NotHolder => {
                    self.depth = 0;
                }
            }
        }
        Ok(outcome)
    }

    fn lost(&self) -> Error {
        Error::lease_lost(self.lock.as_str(), self.holder.as_str())
    }
}

impl Drop for LockLease {
    fn drop(&mut self) {
        // Cancels renewal
        self.watchdog.take();
        if self.depth == 0 {
            return;
        }

        let Ok(runtime) = tokio::runtime::Handle::try_current() else {
            tracing::debug!(
                lock = %self.lock,
                holder = %self.holder,
                "[LOCK] Lease dropped outside a runtime, leaving it to expire"
            );
            return;
        };

        let manager = self.manager.clone();
        let lock = self.lock.clone();
        let holder = self.holder.clone();
        let depth = self.depth;
        runtime.spawn(async move {
            for _ in 0..depth {
                match manager.release(&lock, &holder).await {
                    Ok(ReleaseOutcome::StillHeld(_)) => continue,
                    Ok(_) => break,
                    Err(e) => {
                        tracing::warn!(
                            lock = %lock,
                            holder = %holder,
                            error = %e,
                            "[LOCK] Background release failed, lease will expire"
                        );
                        break;
                    }
                }
            }
        });
    }
}

impl std::fmt::Debug for LockLease {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LockLease")
            .field("lock", &self.lock)
            .field("holder", &self.holder)
            .field("depth", &self.depth)
            .field("state", &self.state())
            .finish()
    }
}
