//! Main application configuration

use serde::{Deserialize, Serialize};
use stockguard_application::inventory::RetryPolicy;

pub use super::inventory::InventoryConfig;
pub use super::lock::LockConfig;
pub use super::logging::LoggingConfig;
pub use super::store::{StoreBackend, StoreConfig};

/// Root configuration
///
/// Every section falls back to its defaults when omitted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Coordination store
    pub store: StoreConfig,
    /// Lock name and lease timings
    pub lock: LockConfig,
    /// Counter key and default strategy
    pub inventory: InventoryConfig,
    /// Conflict retry policy of the optimistic path
    pub optimistic: RetryPolicy,
    /// Logging
    pub logging: LoggingConfig,
}
