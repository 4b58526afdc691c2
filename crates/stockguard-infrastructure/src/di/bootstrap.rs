//! Composition Root
//!
//! Wires a store, the lock manager and both inventory services from one
//! [`AppConfig`].
//!
//! ```text
//! AppConfig → StoreFactory → Arc<dyn CoordinationStore>
//!                                   ↓
//!                      ReentrantLockManager
//!                                   ↓
//!          LockedInventoryService / OptimisticInventoryService
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! let context = bootstrap(AppConfig::default())?;
//! let inventory = context.inventory(ConcurrencyStrategy::Optimistic);
//! inventory.purchase().await?;
//! ```

use crate::config::AppConfig;
use crate::di::factory::{InventoryServiceFactory, StoreFactory};
use std::sync::Arc;
use stockguard_application::locking::ReentrantLockManager;
use stockguard_application::ports::InventoryService;
use stockguard_domain::error::Result;
use stockguard_domain::ports::CoordinationStore;
use stockguard_domain::value_objects::ConcurrencyStrategy;
use tracing::info;

/// Application context holding every wired service
pub struct StockGuardContext {
    /// Application configuration
    pub config: Arc<AppConfig>,

    store: Arc<dyn CoordinationStore>,
    locks: ReentrantLockManager,
    locked_inventory: Arc<dyn InventoryService>,
    optimistic_inventory: Arc<dyn InventoryService>,
}

impl StockGuardContext {
    /// Shared coordination store
    pub fn store(&self) -> Arc<dyn CoordinationStore> {
        Arc::clone(&self.store)
    }

    /// Lock manager for raw lock operations
    pub fn locks(&self) -> &ReentrantLockManager {
        &self.locks
    }

    /// Inventory service for `strategy`
    pub fn inventory(&self, strategy: ConcurrencyStrategy) -> Arc<dyn InventoryService> {
        match strategy {
            ConcurrencyStrategy::Lock => Arc::clone(&self.locked_inventory),
            ConcurrencyStrategy::Optimistic => Arc::clone(&self.optimistic_inventory),
        }
    }

    /// Inventory service for the configured default strategy
    pub fn default_inventory(&self) -> Arc<dyn InventoryService> {
        self.inventory(self.config.inventory.strategy)
    }
}

impl std::fmt::Debug for StockGuardContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StockGuardContext")
            .field("backend", &self.store.backend_name())
            .field("locks", &self.locks)
            .finish()
    }
}

/// Build the context, creating the store from configuration
pub fn bootstrap(config: AppConfig) -> Result<StockGuardContext> {
    let store = StoreFactory::create(&config.store)?;
    bootstrap_with_store(config, store)
}

/// Build the context around an existing store
pub fn bootstrap_with_store(
    config: AppConfig,
    store: Arc<dyn CoordinationStore>,
) -> Result<StockGuardContext> {
    let locks = InventoryServiceFactory::lock_manager(&config, Arc::clone(&store))?;
    let locked_inventory = InventoryServiceFactory::create(
        ConcurrencyStrategy::Lock,
        &config,
        Arc::clone(&store),
        locks.clone(),
    )?;
    let optimistic_inventory = InventoryServiceFactory::create(
        ConcurrencyStrategy::Optimistic,
        &config,
        Arc::clone(&store),
        locks.clone(),
    )?;

    info!(
        backend = store.backend_name(),
        lock = %config.lock.name,
        stock_key = %config.inventory.stock_key,
        strategy = %config.inventory.strategy,
        "Bootstrapped StockGuard"
    );

    Ok(StockGuardContext {
        config: Arc::new(config),
        store,
        locks,
        locked_inventory,
        optimistic_inventory,
    })
}
