//! Inventory configuration types

use serde::{Deserialize, Serialize};
use stockguard_domain::constants::{DEFAULT_RESTOCK_UNITS, DEFAULT_STOCK_KEY};
use stockguard_domain::error::Result;
use stockguard_domain::value_objects::{ConcurrencyStrategy, StockKey};

/// Inventory configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InventoryConfig {
    /// Store key of the stock counter
    pub stock_key: String,
    /// Strategy used when the caller does not pick one
    pub strategy: ConcurrencyStrategy,
    /// Units a restock without an explicit amount sets
    pub restock_units: i64,
}

impl Default for InventoryConfig {
    fn default() -> Self {
        Self {
            stock_key: DEFAULT_STOCK_KEY.to_string(),
            strategy: ConcurrencyStrategy::default(),
            restock_units: DEFAULT_RESTOCK_UNITS,
        }
    }
}

impl InventoryConfig {
    /// Validated counter key
    pub fn stock_key(&self) -> Result<StockKey> {
        StockKey::new(self.stock_key.as_str())
    }
}
