//! # StockGuard - Store Implementations
//!
//! Backends implementing the coordination store ports defined in
//! `stockguard-domain`.
//!
//! ## Providers
//!
//! | Provider | Port | Description |
//! |----------|------|-------------|
//! | [`store::RedisCoordinationStore`] | `CoordinationStore` | Lua scripts + WATCH/MULTI/EXEC on Redis |
//! | [`store::InMemoryCoordinationStore`] | `CoordinationStore` | Single-process backend for tests and demos |
//!
//! ## Feature Flags
//!
//! ```toml
//! [dependencies]
//! stockguard-providers = { version = "0.1", default-features = false, features = ["store-redis"] }
//! ```

// Re-export domain types commonly used with providers
pub use stockguard_domain::error::{Error, Result};
pub use stockguard_domain::ports::CoordinationStore;

/// Provider-specific constants
pub mod constants;

/// Shared utilities for provider implementations
pub mod utils;

/// Coordination store implementations
pub mod store;
