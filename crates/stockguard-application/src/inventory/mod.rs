//! Inventory services
//!
//! Two implementations of [`crate::ports::InventoryService`] over the same
//! counter key:
//!
//! | Service | Strategy | Guard |
//! |---------|----------|-------|
//! | [`LockedInventoryService`] | `lock` | reentrant distributed lock with lease renewal |
//! | [`OptimisticInventoryService`] | `optimistic` | `WATCH`/`MULTI`/`EXEC` with retry |

pub mod locked;
pub mod optimistic;
pub mod retry;

pub use locked::LockedInventoryService;
pub use optimistic::OptimisticInventoryService;
pub use retry::RetryPolicy;
