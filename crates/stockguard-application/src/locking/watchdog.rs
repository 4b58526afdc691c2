//! Lease Renewal Watchdog
//!
//! Background task that keeps one lease alive while its owner works.
//!
//! # Lifecycle
//!
//! - Spawned right after a successful top-level acquisition
//! - First renewal after `renew_initial_delay`, then every `renew_interval`
//! - Publishes [`LeaseState::Lost`] and exits when a renewal reports that
//!   the holder no longer owns the lock
//! - Publishes [`LeaseState::Stopped`] when cancelled by its owner
//!
//! Transport errors are logged and retried on the next tick. Only an
//! explicit `NotHolder` reply declares the lease lost.

use crate::locking::manager::ReentrantLockManager;
use stockguard_domain::value_objects::{HolderId, LeaseState, LockName, RenewOutcome};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

/// Renewal task scoped to one `(lock, holder)` pair
///
/// Uses `CancellationToken` for async-native shutdown signaling. Dropping
/// the watchdog cancels the task.
pub struct LeaseWatchdog {
    cancel_token: CancellationToken,
    state: watch::Receiver<LeaseState>,
    task_handle: Option<JoinHandle<()>>,
}

impl LeaseWatchdog {
    /// Spawn the renewal loop on the current runtime
    pub fn spawn(manager: ReentrantLockManager, lock: LockName, holder: HolderId) -> Self {
        let cancel_token = CancellationToken::new();
        let (state_tx, state) = watch::channel(LeaseState::Active);

        let token = cancel_token.clone();
        let task_handle = tokio::spawn(async move {
            Self::renewal_loop(manager, lock, holder, token, state_tx).await;
        });

        Self {
            cancel_token,
            state,
            task_handle: Some(task_handle),
        }
    }

    /// Main loop issuing periodic renewals
    async fn renewal_loop(
        manager: ReentrantLockManager,
        lock: LockName,
        holder: HolderId,
        cancel_token: CancellationToken,
        state_tx: watch::Sender<LeaseState>,
    ) {
        let options = manager.options().clone();
        let mut ticks = tokio::time::interval_at(
            Instant::now() + options.renew_initial_delay,
            options.renew_interval,
        );
        ticks.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = cancel_token.cancelled() => {
                    state_tx.send_replace(LeaseState::Stopped);
                    tracing::trace!(lock = %lock, holder = %holder, "[WATCHDOG] Stopped");
                    return;
                }

                _ = ticks.tick() => {
                    match manager.renew(&lock, &holder).await {
                        Ok(RenewOutcome::Renewed) => {
                            tracing::trace!(lock = %lock, holder = %holder, "[WATCHDOG] Lease renewed");
                        }
                        Ok(RenewOutcome::NotHolder) => {
                            tracing::warn!(
                                lock = %lock,
                                holder = %holder,
                                "[WATCHDOG] Lease lost, holder no longer owns the lock"
                            );
                            state_tx.send_replace(LeaseState::Lost);
                            return;
                        }
                        Err(e) => {
                            tracing::warn!(
                                lock = %lock,
                                holder = %holder,
                                error = %e,
                                "[WATCHDOG] Renewal failed, retrying on next tick"
                            );
                        }
                    }
                }
            }
        }
    }

    /// Last published state
    pub fn state(&self) -> LeaseState {
        *self.state.borrow()
    }

    /// Whether a renewal reported the lease as lost
    pub fn is_lost(&self) -> bool {
        self.state() == LeaseState::Lost
    }

    /// Whether the renewal task is still scheduled
    pub fn is_running(&self) -> bool {
        self.task_handle
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }

    /// Receiver notified on every state change
    pub fn subscribe(&self) -> watch::Receiver<LeaseState> {
        self.state.clone()
    }

    /// Cancel renewal and wait for the task to exit
    ///
    /// Returns the final state: `Stopped`, or `Lost` when the lease was
    /// already gone before the cancellation.
    pub async fn stop(mut self) -> LeaseState {
        self.cancel_token.cancel();
        if let Some(handle) = self.task_handle.take()
            && let Err(e) = handle.await
        {
            tracing::warn!(error = %e, "[WATCHDOG] Renewal task ended abnormally");
        }
        self.state()
    }
}

impl Drop for LeaseWatchdog {
    fn drop(&mut self) {
        self.cancel_token.cancel();
    }
}

impl std::fmt::Debug for LeaseWatchdog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LeaseWatchdog")
            .field("state", &self.state())
            .field("running", &self.is_running())
            .finish()
    }
}
