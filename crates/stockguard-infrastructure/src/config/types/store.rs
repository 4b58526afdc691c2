//! Store configuration types

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use stockguard_domain::error::{Error, Result};

/// Coordination store backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    /// Shared Redis server
    #[default]
    Redis,
    /// Process-local store, for tests and single-process demos
    Memory,
}

impl StoreBackend {
    /// Lowercase name used in configuration
    pub fn as_str(&self) -> &'static str {
        match self {
            StoreBackend::Redis => "redis",
            StoreBackend::Memory => "memory",
        }
    }
}

impl fmt::Display for StoreBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StoreBackend {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "redis" => Ok(StoreBackend::Redis),
            "memory" | "in_memory" => Ok(StoreBackend::Memory),
            other => Err(Error::config(format!(
                "Unknown store backend: {}. Use redis or memory",
                other
            ))),
        }
    }
}

/// Coordination store configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Backend to use
    pub backend: StoreBackend,
    /// Redis connection URL, ignored by the memory backend
    pub url: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            backend: StoreBackend::default(),
            url: stockguard_providers::constants::REDIS_DEFAULT_URL.to_string(),
        }
    }
}
