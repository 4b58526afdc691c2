//! Store and Service Factories
//!
//! **IMPORTANT: All store implementations come from stockguard-providers.**
//! This factory only handles wiring.

use std::sync::Arc;

use crate::config::{AppConfig, StoreBackend, StoreConfig};
use stockguard_application::inventory::{LockedInventoryService, OptimisticInventoryService};
use stockguard_application::locking::ReentrantLockManager;
use stockguard_application::ports::InventoryService;
use stockguard_domain::error::Result;
use stockguard_domain::ports::{CoordinationStore, CounterStore, OptimisticStore};
use stockguard_domain::value_objects::ConcurrencyStrategy;
use stockguard_providers::store::{InMemoryCoordinationStore, RedisCoordinationStore};

/// Factory for creating coordination stores
pub struct StoreFactory;

impl StoreFactory {
    /// Create a store based on configuration
    ///
    /// No connection is made here; the Redis store connects on first use.
    pub fn create(config: &StoreConfig) -> Result<Arc<dyn CoordinationStore>> {
        match config.backend {
            StoreBackend::Redis => {
                let store = RedisCoordinationStore::new(config.url.trim())?;
                tracing::debug!(endpoint = %store.endpoint(), "Created Redis store");
                Ok(Arc::new(store))
            }
            StoreBackend::Memory => {
                tracing::debug!("Created in-memory store");
                Ok(Arc::new(InMemoryCoordinationStore::new()))
            }
        }
    }
}

/// Factory for creating inventory services
pub struct InventoryServiceFactory;

impl InventoryServiceFactory {
    /// Create the lock manager configured for `store`
    pub fn lock_manager(
        config: &AppConfig,
        store: Arc<dyn CoordinationStore>,
    ) -> Result<ReentrantLockManager> {
        ReentrantLockManager::with_options(store, config.lock.to_options())
    }

    /// Create the inventory service for `strategy`
    pub fn create(
        strategy: ConcurrencyStrategy,
        config: &AppConfig,
        store: Arc<dyn CoordinationStore>,
        locks: ReentrantLockManager,
    ) -> Result<Arc<dyn InventoryService>> {
        let stock_key = config.inventory.stock_key()?;
        match strategy {
            ConcurrencyStrategy::Lock => {
                let counters: Arc<dyn CounterStore> = store;
                Ok(Arc::new(LockedInventoryService::new(
                    locks,
                    counters,
                    config.lock.lock_name()?,
                    stock_key,
                )))
            }
            ConcurrencyStrategy::Optimistic => {
                let transactions: Arc<dyn OptimisticStore> = store;
                let service = OptimisticInventoryService::new(transactions, stock_key)
                    .with_retry_policy(config.optimistic.clone())?;
                Ok(Arc::new(service))
            }
        }
    }
}
