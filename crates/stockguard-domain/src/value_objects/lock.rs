//! Lock-Related Value Objects
//!
//! Names, holder identities and the outcomes of the three atomic lock
//! procedures (acquire, release, renew).

use crate::constants::HOLDER_ID_PREFIX;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Value Object: Lock Name
///
/// Store key under which the lock hash lives. Never empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct LockName(String);

impl LockName {
    /// Create a lock name, rejecting empty or whitespace-only keys
    pub fn new<S: Into<String>>(name: S) -> Result<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(Error::invalid_argument("Lock name cannot be empty"));
        }
        Ok(Self(name))
    }

    /// Borrow the key
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for LockName {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        Self::new(value)
    }
}

impl From<LockName> for String {
    fn from(name: LockName) -> Self {
        name.0
    }
}

impl fmt::Display for LockName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Value Object: Holder Identity
///
/// Identifies one logical operation holding a lock, not a process or a
/// thread. A fresh identity is generated for every top-level acquisition;
/// reentrant acquisitions must present the same identity to be recognised.
///
/// ## Example
///
/// ```rust
/// use stockguard_domain::value_objects::HolderId;
///
/// let first = HolderId::generate();
/// let second = HolderId::generate();
/// assert_ne!(first, second);
/// assert!(first.as_str().starts_with("busiId"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HolderId(String);

impl HolderId {
    /// Generate a new unique identity
    pub fn generate() -> Self {
        Self(format!("{}{}", HOLDER_ID_PREFIX, uuid::Uuid::new_v4()))
    }

    /// Wrap an existing identity, e.g. one received from another process
    pub fn from_raw<S: Into<String>>(raw: S) -> Self {
        Self(raw.into())
    }

    /// Borrow the identity
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for HolderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Outcome of one non-blocking acquisition attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AcquireOutcome {
    /// The caller now holds the lock (first or nested acquisition)
    Acquired,
    /// Another holder owns the lock; expected under contention
    AlreadyHeldByOther,
}

impl AcquireOutcome {
    /// Whether the lock was obtained
    pub fn is_acquired(self) -> bool {
        matches!(self, Self::Acquired)
    }
}

/// Outcome of a lease renewal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RenewOutcome {
    /// Expiration reset to a full TTL
    Renewed,
    /// The caller is no longer the recorded holder; the lease is gone
    NotHolder,
}

/// Outcome of a release
///
/// Releasing a lock one does not hold is a no-op reported as
/// [`ReleaseOutcome::NotHolder`], never an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReleaseOutcome {
    /// The last hold was dropped and the lock deleted
    Released,
    /// Nested holds remain
    StillHeld(u32),
    /// The caller did not hold the lock; nothing changed
    NotHolder,
}

/// Lifecycle of a lease as observed by its renewal watchdog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LeaseState {
    /// Renewals are being scheduled
    Active,
    /// A renewal reported that the holder no longer owns the lock
    Lost,
    /// The owner cancelled renewal
    Stopped,
}

impl fmt::Display for LeaseState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LeaseState::Active => write!(f, "active"),
            LeaseState::Lost => write!(f, "lost"),
            LeaseState::Stopped => write!(f, "stopped"),
        }
    }
}
