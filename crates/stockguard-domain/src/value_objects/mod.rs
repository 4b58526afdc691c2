//! Domain Value Objects
//!
//! Immutable value objects describing locks, holders and inventory
//! outcomes. Value objects are defined by their attributes and can be
//! compared for equality.
//!
//! ## Value Objects
//!
//! | Value Object | Description |
//! |--------------|-------------|
//! | [`LockName`] | Store key of a distributed lock |
//! | [`HolderId`] | Opaque identity of one logical lock holder |
//! | [`AcquireOutcome`] | Result of a single non-blocking acquisition |
//! | [`RenewOutcome`] | Result of a lease renewal |
//! | [`ReleaseOutcome`] | Result of a release |
//! | [`LeaseState`] | Lifecycle of a lease as seen by its watchdog |
//! | [`StockKey`] | Store key of an inventory counter |
//! | [`PurchaseOutcome`] | Business outcome of a purchase attempt |
//! | [`ConcurrencyStrategy`] | Which guard protects the counter |

/// Inventory value objects
pub mod inventory;
/// Lock and lease value objects
pub mod lock;

pub use inventory::{ConcurrencyStrategy, PurchaseOutcome, StockKey};
pub use lock::{AcquireOutcome, HolderId, LeaseState, LockName, ReleaseOutcome, RenewOutcome};
