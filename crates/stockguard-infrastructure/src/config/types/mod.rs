//! Configuration types module

pub mod app;
pub mod inventory;
pub mod lock;
pub mod logging;
pub mod store;

// Re-export main types
pub use app::*;
