//! # StockGuard
//!
//! Oversell-free inventory decrements for many concurrent processes sharing
//! one Redis instance.
//!
//! Two interchangeable strategies guard the stock counter:
//!
//! - **Lock**: a reentrant lease-based distributed lock, kept alive by a
//!   watchdog while the holder works
//! - **Optimistic**: `WATCH` / `MULTI` / `EXEC` compare-and-swap, retried
//!   with backoff on conflict
//!
//! ## Example
//!
//! ```ignore
//! use stockguard::infrastructure::{AppConfig, bootstrap};
//! use stockguard::domain::value_objects::ConcurrencyStrategy;
//!
//! let context = bootstrap(AppConfig::default())?;
//! let inventory = context.inventory(ConcurrencyStrategy::Lock);
//! inventory.restock(100).await?;
//! let outcome = inventory.purchase().await?;
//! ```
//!
//! ## Architecture
//!
//! - `domain` - Error type, value objects and store ports
//! - `application` - Lock manager, lease watchdog and inventory services
//! - `infrastructure` - Configuration, logging and wiring

/// Domain layer - core types and ports
///
/// Re-exports from the domain crate for convenience
pub mod domain {
    pub use stockguard_domain::*;
}

/// Application layer - locking and inventory services
///
/// Re-exports from the application crate for convenience
pub mod application {
    pub use stockguard_application::*;
}

/// Infrastructure layer - config, logging and composition root
///
/// Re-exports from the infrastructure crate for convenience
pub mod infrastructure {
    pub use stockguard_infrastructure::*;
}

pub mod cli;

// Re-export commonly used domain types at the crate root
pub use domain::*;

pub use application::{FlashSale, FlashSaleReport, InventoryService};
pub use cli::{Cli, run};
