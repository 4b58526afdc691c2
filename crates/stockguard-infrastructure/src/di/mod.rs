//! Composition
//!
//! Factories and the composition root. All dependencies travel as
//! `Arc<dyn Trait>`; there is no global store client.

pub mod bootstrap;
pub mod factory;

pub use bootstrap::{StockGuardContext, bootstrap, bootstrap_with_store};
pub use factory::{InventoryServiceFactory, StoreFactory};
