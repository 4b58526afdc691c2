//! Application Service Port Interfaces
//!
//! Contracts implemented by the application services so callers can pick a
//! concurrency strategy at runtime.

use async_trait::async_trait;
use stockguard_domain::error::Result;
use stockguard_domain::value_objects::{ConcurrencyStrategy, PurchaseOutcome};

// ============================================================================
// Inventory Service Interface
// ============================================================================

/// Inventory Service Interface
///
/// One shared integer counter of available units. Every implementation
/// guarantees the counter never drops below zero and never loses a
/// decrement, whatever the number of concurrent callers.
#[async_trait]
pub trait InventoryService: Send + Sync {
    /// Take one unit, or report that none are left
    async fn purchase(&self) -> Result<PurchaseOutcome>;

    /// Current number of available units
    async fn remaining(&self) -> Result<i64>;

    /// Set the number of available units
    async fn restock(&self, units: i64) -> Result<()>;

    /// Concurrency-control strategy this implementation uses
    fn strategy(&self) -> ConcurrencyStrategy;
}
