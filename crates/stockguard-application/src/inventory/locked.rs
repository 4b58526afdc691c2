//! Lock-based inventory service
//!
//! Every counter write happens inside a lease on one named lock. Readers
//! outside the lock only ever see a stale-but-valid count, so a zero read
//! without the lock is enough to answer `SoldOut`.

use crate::locking::{LockLease, ReentrantLockManager};
use crate::ports::InventoryService;
use async_trait::async_trait;
use std::sync::Arc;
use stockguard_domain::error::{Error, Result};
use stockguard_domain::ports::CounterStore;
use stockguard_domain::value_objects::{
    ConcurrencyStrategy, LockName, PurchaseOutcome, ReleaseOutcome, StockKey,
};

/// Inventory service guarded by a reentrant distributed lock
#[derive(Clone)]
pub struct LockedInventoryService {
    locks: ReentrantLockManager,
    counters: Arc<dyn CounterStore>,
    lock_name: LockName,
    stock_key: StockKey,
}

impl LockedInventoryService {
    /// Create a service guarding `stock_key` with `lock_name`
    pub fn new(
        locks: ReentrantLockManager,
        counters: Arc<dyn CounterStore>,
        lock_name: LockName,
        stock_key: StockKey,
    ) -> Self {
        Self {
            locks,
            counters,
            lock_name,
            stock_key,
        }
    }

    /// Lock guarding the counter
    pub fn lock_name(&self) -> &LockName {
        &self.lock_name
    }

    /// Counter key
    pub fn stock_key(&self) -> &StockKey {
        &self.stock_key
    }

    async fn read_stock(&self) -> Result<i64> {
        self.counters
            .read_counter(self.stock_key.as_str())
            .await?
            .ok_or_else(|| Error::counter_missing(self.stock_key.as_str()))
    }

    /// Re-check and decrement while `lease` is held
    async fn take_one(&self, lease: &LockLease) -> Result<PurchaseOutcome> {
        let stock = self.read_stock().await?;
        if stock <= 0 {
            return Ok(PurchaseOutcome::SoldOut);
        }
        if lease.is_lost() {
            return Err(Error::lease_lost(
                self.lock_name.as_str(),
                lease.holder().as_str(),
            ));
        }
        self.counters
            .write_counter(self.stock_key.as_str(), stock - 1)
            .await?;
        tracing::debug!(
            key = %self.stock_key,
            holder = %lease.holder(),
            remaining = stock - 1,
            "[INVENTORY] Unit sold"
        );
        Ok(PurchaseOutcome::Purchased)
    }

    /// Overwrite the counter while `lease` is held, returning the old value
    async fn replace_stock(&self, lease: &LockLease, units: i64) -> Result<Option<i64>> {
        let previous = self
            .counters
            .read_counter(self.stock_key.as_str())
            .await?;
        if lease.is_lost() {
            return Err(Error::lease_lost(
                self.lock_name.as_str(),
                lease.holder().as_str(),
            ));
        }
        self.counters
            .write_counter(self.stock_key.as_str(), units)
            .await?;
        Ok(previous)
    }

    /// Release `lease`, logging instead of failing
    async fn finish(&self, lease: LockLease) {
        let holder = lease.holder().clone();
        match lease.release().await {
            Ok(ReleaseOutcome::NotHolder) => {
                tracing::warn!(
                    lock = %self.lock_name,
                    holder = %holder,
                    "[INVENTORY] Lock was already gone at release"
                );
            }
            Ok(_) => {}
            Err(e) => {
                tracing::warn!(
                    lock = %self.lock_name,
                    holder = %holder,
                    error = %e,
                    "[INVENTORY] Release failed, lock will expire"
                );
            }
        }
    }
}

#[async_trait]
impl InventoryService for LockedInventoryService {
    async fn purchase(&self) -> Result<PurchaseOutcome> {
        if self.read_stock().await? <= 0 {
            return Ok(PurchaseOutcome::SoldOut);
        }

        let lease = self.locks.acquire(&self.lock_name).await?;
        let outcome = self.take_one(&lease).await;
        self.finish(lease).await;
        outcome
    }

    async fn remaining(&self) -> Result<i64> {
        self.read_stock().await
    }

    async fn restock(&self, units: i64) -> Result<()> {
        if units < 0 {
            return Err(Error::invalid_argument(format!(
                "Cannot restock a negative amount: {}",
                units
            )));
        }

        let lease = self.locks.acquire(&self.lock_name).await?;
        let replaced = self.replace_stock(&lease, units).await;
        self.finish(lease).await;

        let previous = replaced?;
        tracing::info!(key = %self.stock_key, units, ?previous, "[INVENTORY] Restocked");
        Ok(())
    }

    fn strategy(&self) -> ConcurrencyStrategy {
        ConcurrencyStrategy::Lock
    }
}
