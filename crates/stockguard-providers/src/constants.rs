//! Provider Constants
//!
//! Constants specific to store implementations. Lease and retry defaults
//! live in `stockguard_domain::constants`.

/// Default Redis connection URL
pub const REDIS_DEFAULT_URL: &str = "redis://127.0.0.1:6379";

/// Backend name reported by the Redis store
pub const REDIS_BACKEND_NAME: &str = "redis";

/// Backend name reported by the in-memory store
pub const MEMORY_BACKEND_NAME: &str = "memory";
