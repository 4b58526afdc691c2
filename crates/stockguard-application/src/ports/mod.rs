//! Application Ports
//!
//! Service interfaces exposed by this layer.

pub mod services;

pub use services::InventoryService;
