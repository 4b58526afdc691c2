//! Error handling types

use thiserror::Error;

/// Result type alias for operations that can fail
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for StockGuard
///
/// Contention, lock loss reported by a renewal and sold-out inventory are
/// not errors; they travel as values (`AcquireOutcome`, `RenewOutcome`,
/// `PurchaseOutcome`).
#[derive(Error, Debug)]
pub enum Error {
    /// The coordination store could not be reached
    #[error("Store unavailable: {message}")]
    StoreUnavailable {
        /// Description of the transport failure
        message: String,
        /// Optional source error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The coordination store answered with an error
    #[error("Store error: {message}")]
    Store {
        /// Description of the store error
        message: String,
        /// Optional source error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The counter key does not exist in the store
    #[error("Counter not found: {key}")]
    CounterMissing {
        /// Counter key
        key: String,
    },

    /// The counter key holds something that is not an integer
    #[error("Counter {key} holds a non-integer value: {value}")]
    InvalidCounter {
        /// Counter key
        key: String,
        /// Raw stored value
        value: String,
    },

    /// Lock acquisition gave up after the configured deadline
    #[error("Timed out after {waited_ms}ms waiting for lock {lock}")]
    AcquireTimeout {
        /// Lock name
        lock: String,
        /// Time spent waiting in milliseconds
        waited_ms: u64,
    },

    /// The lease was lost while the critical section was running
    #[error("Lease on lock {lock} lost by holder {holder}")]
    LeaseLost {
        /// Lock name
        lock: String,
        /// Holder identity that lost the lease
        holder: String,
    },

    /// Optimistic commit kept conflicting until the attempt limit
    #[error("Gave up on {key} after {attempts} conflicting commits")]
    ConflictLimit {
        /// Counter key
        key: String,
        /// Number of commit attempts made
        attempts: u32,
    },

    /// Invalid argument provided to a function
    #[error("Invalid argument: {message}")]
    InvalidArgument {
        /// Description of the invalid argument
        message: String,
    },

    /// Configuration-related error (simple form)
    #[error("Configuration error: {message}")]
    Config {
        /// Description of the configuration error
        message: String,
    },

    /// Configuration-related error (with source)
    #[error("Configuration error: {message}")]
    Configuration {
        /// Description of the configuration error
        message: String,
        /// Optional source error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// I/O operation error
    #[error("I/O error: {source}")]
    Io {
        /// The underlying I/O error
        #[from]
        source: std::io::Error,
    },

    /// Internal system error
    #[error("Internal error: {message}")]
    Internal {
        /// Description of the internal error
        message: String,
    },
}

// Store error creation methods
impl Error {
    /// Create a store-unavailable error
    pub fn store_unavailable<S: Into<String>>(message: S) -> Self {
        Self::StoreUnavailable {
            message: message.into(),
            source: None,
        }
    }

    /// Create a store-unavailable error with source
    pub fn store_unavailable_with_source<
        S: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    >(
        message: S,
        source: E,
    ) -> Self {
        Self::StoreUnavailable {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a store error
    pub fn store<S: Into<String>>(message: S) -> Self {
        Self::Store {
            message: message.into(),
            source: None,
        }
    }

    /// Create a store error with source
    pub fn store_with_source<S: Into<String>, E: std::error::Error + Send + Sync + 'static>(
        message: S,
        source: E,
    ) -> Self {
        Self::Store {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a counter-missing error
    pub fn counter_missing<S: Into<String>>(key: S) -> Self {
        Self::CounterMissing { key: key.into() }
    }

    /// Create an invalid-counter error
    pub fn invalid_counter<K: Into<String>, V: Into<String>>(key: K, value: V) -> Self {
        Self::InvalidCounter {
            key: key.into(),
            value: value.into(),
        }
    }
}

// Coordination error creation methods
impl Error {
    /// Create an acquire-timeout error
    pub fn acquire_timeout<S: Into<String>>(lock: S, waited_ms: u64) -> Self {
        Self::AcquireTimeout {
            lock: lock.into(),
            waited_ms,
        }
    }

    /// Create a lease-lost error
    pub fn lease_lost<L: Into<String>, H: Into<String>>(lock: L, holder: H) -> Self {
        Self::LeaseLost {
            lock: lock.into(),
            holder: holder.into(),
        }
    }

    /// Create a conflict-limit error
    pub fn conflict_limit<S: Into<String>>(key: S, attempts: u32) -> Self {
        Self::ConflictLimit {
            key: key.into(),
            attempts,
        }
    }
}

// Configuration and general error creation methods
impl Error {
    /// Create an invalid argument error
    pub fn invalid_argument<S: Into<String>>(message: S) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// Create a configuration error (simple)
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a configuration error with source
    pub fn configuration_with_source<
        S: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    >(
        message: S,
        source: E,
    ) -> Self {
        Self::Configuration {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create an internal error
    pub fn internal<S: Into<String>>(message: S) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }
}

impl Error {
    /// Whether the error comes from the transport rather than the store itself
    pub fn is_store_unavailable(&self) -> bool {
        matches!(self, Self::StoreUnavailable { .. })
    }
}
