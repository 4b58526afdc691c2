//! Provider Utilities
//!
//! Shared utilities used by provider implementations.

mod locks;

pub use locks::lock_mutex;
