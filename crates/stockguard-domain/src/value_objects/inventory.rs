//! Inventory Value Objects

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Value Object: Stock Key
///
/// Store key of the integer counter holding the available units.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct StockKey(String);

impl StockKey {
    /// Create a stock key, rejecting empty keys
    pub fn new<S: Into<String>>(key: S) -> Result<Self> {
        let key = key.into();
        if key.trim().is_empty() {
            return Err(Error::invalid_argument("Stock key cannot be empty"));
        }
        Ok(Self(key))
    }

    /// Borrow the key
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for StockKey {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        Self::new(value)
    }
}

impl From<StockKey> for String {
    fn from(key: StockKey) -> Self {
        key.0
    }
}

impl fmt::Display for StockKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Business outcome of a purchase attempt
///
/// Running out of stock is an expected outcome, not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PurchaseOutcome {
    /// One unit was taken from the counter
    Purchased,
    /// The counter was already at zero
    SoldOut,
}

impl fmt::Display for PurchaseOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PurchaseOutcome::Purchased => write!(f, "purchased"),
            PurchaseOutcome::SoldOut => write!(f, "sold out"),
        }
    }
}

/// Concurrency-control strategy guarding the counter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ConcurrencyStrategy {
    /// Reentrant distributed lock with lease renewal
    #[default]
    Lock,
    /// WATCH/MULTI/EXEC compare-and-swap with retry
    Optimistic,
}

impl ConcurrencyStrategy {
    /// Lowercase name used in configuration and logs
    pub fn as_str(&self) -> &'static str {
        match self {
            ConcurrencyStrategy::Lock => "lock",
            ConcurrencyStrategy::Optimistic => "optimistic",
        }
    }
}

impl fmt::Display for ConcurrencyStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ConcurrencyStrategy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "lock" | "distributed-lock" => Ok(ConcurrencyStrategy::Lock),
            "optimistic" | "cas" => Ok(ConcurrencyStrategy::Optimistic),
            other => Err(Error::invalid_argument(format!(
                "Unknown concurrency strategy: {}. Use lock or optimistic",
                other
            ))),
        }
    }
}
