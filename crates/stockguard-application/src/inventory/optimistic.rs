//! Optimistic inventory service
//!
//! No lock: each attempt watches the counter, reads it and commits the
//! decrement in a transaction that aborts if anyone wrote the counter in
//! between. Aborted attempts back off and start over.

use crate::inventory::retry::RetryPolicy;
use crate::ports::InventoryService;
use async_trait::async_trait;
use std::sync::Arc;
use stockguard_domain::error::{Error, Result};
use stockguard_domain::ports::{CommitOutcome, CounterStore, OptimisticStore, WatchSession};
use stockguard_domain::value_objects::{ConcurrencyStrategy, PurchaseOutcome, StockKey};

/// Inventory service using compare-and-swap transactions
#[derive(Clone)]
pub struct OptimisticInventoryService {
    store: Arc<dyn OptimisticStore>,
    stock_key: StockKey,
    retry: RetryPolicy,
}

impl OptimisticInventoryService {
    /// Create a service for `stock_key` with the default retry policy
    pub fn new(store: Arc<dyn OptimisticStore>, stock_key: StockKey) -> Self {
        Self {
            store,
            stock_key,
            retry: RetryPolicy::default(),
        }
    }

    /// Replace the retry policy
    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Result<Self> {
        retry.validate()?;
        self.retry = retry;
        Ok(self)
    }

    /// Retry policy in use
    pub fn retry_policy(&self) -> &RetryPolicy {
        &self.retry
    }

    /// Counter key
    pub fn stock_key(&self) -> &StockKey {
        &self.stock_key
    }

    /// Watch, read, and commit `next(current)` until a commit sticks
    ///
    /// `next` returning `None` ends the loop without writing.
    async fn transact<F>(&self, next: F) -> Result<Option<i64>>
    where
        F: Fn(Option<i64>) -> Result<Option<i64>> + Send + Sync,
    {
        let key = self.stock_key.as_str();
        let mut session = self.store.open_session().await?;
        let mut conflicts: u32 = 0;

        loop {
            session.watch(key).await?;
            let current = session.read_counter(key).await?;

            let value = match next(current) {
                Ok(Some(value)) => value,
                Ok(None) => {
                    session.unwatch().await?;
                    return Ok(None);
                }
                Err(e) => {
                    discard(session.as_mut()).await;
                    return Err(e);
                }
            };

            match session.commit_counter(key, value).await? {
                CommitOutcome::Committed => {
                    if conflicts > 0 {
                        tracing::debug!(key, conflicts, "[INVENTORY] Committed after conflicts");
                    }
                    return Ok(Some(value));
                }
                CommitOutcome::Conflict => {
                    conflicts += 1;
                    if self.retry.is_exhausted(conflicts) {
                        tracing::warn!(key, conflicts, "[INVENTORY] Conflict limit reached");
                        return Err(Error::conflict_limit(key, conflicts));
                    }
                    let delay = self.retry.delay_for(conflicts - 1);
                    tracing::trace!(
                        key,
                        attempt = conflicts,
                        delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
                        "[INVENTORY] Write conflict, retrying"
                    );
                    tokio::time::sleep(delay).await;
                }
            }
        }
    }
}

/// Best-effort unwatch before returning an error
async fn discard(session: &mut dyn WatchSession) {
    if let Err(e) = session.unwatch().await {
        tracing::debug!(error = %e, "[INVENTORY] Unwatch failed");
    }
}

#[async_trait]
impl InventoryService for OptimisticInventoryService {
    async fn purchase(&self) -> Result<PurchaseOutcome> {
        let key = self.stock_key.as_str();
        let committed = self
            .transact(|current| match current {
                None => Err(Error::counter_missing(key)),
                Some(stock) if stock <= 0 => Ok(None),
                Some(stock) => Ok(Some(stock - 1)),
            })
            .await?;

        Ok(match committed {
            Some(remaining) => {
                tracing::debug!(key, remaining, "[INVENTORY] Unit sold");
                PurchaseOutcome::Purchased
            }
            None => PurchaseOutcome::SoldOut,
        })
    }

    async fn remaining(&self) -> Result<i64> {
        let key = self.stock_key.as_str();
        CounterStore::read_counter(self.store.as_ref(), key)
            .await?
            .ok_or_else(|| Error::counter_missing(key))
    }

    async fn restock(&self, units: i64) -> Result<()> {
        if units < 0 {
            return Err(Error::invalid_argument(format!(
                "Cannot restock a negative amount: {}",
                units
            )));
        }
        self.transact(|_| Ok(Some(units))).await?;
        tracing::info!(key = %self.stock_key, units, "[INVENTORY] Restocked");
        Ok(())
    }

    fn strategy(&self) -> ConcurrencyStrategy {
        ConcurrencyStrategy::Optimistic
    }
}
