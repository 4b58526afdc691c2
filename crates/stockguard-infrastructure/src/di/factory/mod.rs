//! Factories
//!
//! Build stores and inventory services from configuration.
//!
//! **ARCHITECTURE**: This module contains ONLY wiring logic.
//! No concrete implementations - those are in stockguard-providers and
//! stockguard-application.

pub mod providers;

pub use providers::{InventoryServiceFactory, StoreFactory};
