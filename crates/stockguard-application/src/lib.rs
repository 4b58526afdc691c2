//! Application Layer - StockGuard
//!
//! Lock management and inventory services built on the coordination store
//! ports declared in `stockguard-domain`.
//!
//! ## Architecture
//!
//! The application layer:
//! - Implements the reentrant lock manager and its lease renewal watchdog
//! - Implements both concurrency-control paths of the inventory service
//! - Orchestrates flash sales over any [`ports::InventoryService`]
//! - Has no dependencies on concrete store backends
//!
//! ## Modules
//!
//! - `locking`: [`ReentrantLockManager`], [`LeaseWatchdog`], [`LockLease`]
//! - `inventory`: [`LockedInventoryService`], [`OptimisticInventoryService`]
//! - `use_cases`: [`FlashSale`]
//!
//! ## Dependencies
//!
//! This crate depends only on:
//! - `stockguard-domain`: error type, value objects and store ports
//! - Pure Rust libraries for async, cancellation and logging

pub mod inventory;
pub mod locking;
pub mod ports;
pub mod use_cases;

pub use inventory::*;
pub use locking::*;
pub use ports::*;
pub use use_cases::*;
