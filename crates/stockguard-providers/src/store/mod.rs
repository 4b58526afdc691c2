//! Coordination Store Implementations
//!
//! ## Available Providers
//!
//! | Provider | Type | Description |
//! |----------|------|-------------|
//! | [`InMemoryCoordinationStore`] | Local | Mutex-guarded map with TTLs and key versions |
//! | [`RedisCoordinationStore`] | Distributed | Redis-backed for multi-instance deployments |
//!
//! ## Provider Selection Guide
//!
//! - **Development/Testing**: Use `InMemoryCoordinationStore`; it supports fault injection
//! - **Multi Instance**: Use `RedisCoordinationStore`; every participant must share one endpoint

#[cfg(feature = "store-memory")]
pub mod memory;
#[cfg(feature = "store-redis")]
pub mod redis;
#[cfg(feature = "store-redis")]
pub mod scripts;

#[cfg(feature = "store-memory")]
pub use self::memory::InMemoryCoordinationStore;
#[cfg(feature = "store-redis")]
pub use self::redis::RedisCoordinationStore;
