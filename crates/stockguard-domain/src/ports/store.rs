//! Coordination Store Port
//!
//! Contract for the single shared key-value store every participant talks
//! to. A backend must offer three capabilities:
//!
//! | Capability | Trait | Redis primitive |
//! |------------|-------|-----------------|
//! | Atomic multi-step procedures | [`ScriptExecutor`] | `EVALSHA` / `EVAL` |
//! | Plain integer counters | [`CounterStore`] | `GET` / `SET` |
//! | Read-then-conditional-write | [`OptimisticStore`] | `WATCH` / `MULTI` / `EXEC` |
//!
//! Transport failures surface as `Error::StoreUnavailable`.

use crate::error::{Error, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Atomic procedures understood by every backend
///
/// The argument layout is fixed per procedure:
///
/// | Procedure | KEYS | ARGV | Reply |
/// |-----------|------|------|-------|
/// | `AcquireReentrant` | lock | holder, initial count, ttl secs | integer: 1 acquired, 0 held by other |
/// | `ReleaseReentrant` | lock | holder | integer: -1 not holder, else remaining count |
/// | `RenewLease` | lock | holder, ttl secs | boolean: renewed |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AtomicScript {
    /// Create or re-enter a reentrant lock
    AcquireReentrant,
    /// Drop one reentrant hold, deleting the lock at zero
    ReleaseReentrant,
    /// Reset the lease TTL if the caller still holds the lock
    RenewLease,
}

impl AtomicScript {
    /// Stable procedure name used in logs
    pub fn name(&self) -> &'static str {
        match self {
            AtomicScript::AcquireReentrant => "acquire_reentrant",
            AtomicScript::ReleaseReentrant => "release_reentrant",
            AtomicScript::RenewLease => "renew_lease",
        }
    }

    /// Type of the value the procedure returns
    pub fn reply_kind(&self) -> ReplyKind {
        match self {
            AtomicScript::AcquireReentrant | AtomicScript::ReleaseReentrant => ReplyKind::Integer,
            AtomicScript::RenewLease => ReplyKind::Boolean,
        }
    }

    /// Number of keys the procedure expects
    pub fn key_count(&self) -> usize {
        1
    }

    /// Number of arguments the procedure expects
    pub fn arg_count(&self) -> usize {
        match self {
            AtomicScript::AcquireReentrant => 3,
            AtomicScript::ReleaseReentrant => 1,
            AtomicScript::RenewLease => 2,
        }
    }

    /// Check keys and arguments against the fixed layout
    pub fn check_arity(&self, keys: &[String], args: &[String]) -> Result<()> {
        if keys.len() != self.key_count() || args.len() != self.arg_count() {
            return Err(Error::invalid_argument(format!(
                "{} expects {} key(s) and {} argument(s), got {} and {}",
                self.name(),
                self.key_count(),
                self.arg_count(),
                keys.len(),
                args.len()
            )));
        }
        Ok(())
    }
}

impl fmt::Display for AtomicScript {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Type of a procedure reply
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplyKind {
    /// Signed integer reply
    Integer,
    /// Boolean reply
    Boolean,
}

/// Typed reply of an atomic procedure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScriptReply {
    /// Signed integer reply
    Integer(i64),
    /// Boolean reply
    Boolean(bool),
}

impl ScriptReply {
    /// Build a reply of the given kind from the raw integer a store returns
    pub fn from_raw(kind: ReplyKind, raw: i64) -> Self {
        match kind {
            ReplyKind::Integer => ScriptReply::Integer(raw),
            ReplyKind::Boolean => ScriptReply::Boolean(raw != 0),
        }
    }

    /// Extract an integer reply
    pub fn into_integer(self) -> Result<i64> {
        match self {
            ScriptReply::Integer(value) => Ok(value),
            ScriptReply::Boolean(_) => Err(Error::store("Expected an integer script reply")),
        }
    }

    /// Extract a boolean reply
    pub fn into_boolean(self) -> Result<bool> {
        match self {
            ScriptReply::Boolean(value) => Ok(value),
            ScriptReply::Integer(_) => Err(Error::store("Expected a boolean script reply")),
        }
    }
}

/// Runs atomic procedures against the shared store
///
/// No caller may observe a state where only part of a procedure's effect
/// is visible.
#[async_trait]
pub trait ScriptExecutor: Send + Sync {
    /// Execute `script` with the ordered `keys` and `args`
    async fn execute(
        &self,
        script: AtomicScript,
        keys: &[String],
        args: &[String],
    ) -> Result<ScriptReply>;
}

/// Integer counters stored as plain keys
///
/// Writes are only legal while the caller holds the lock guarding the
/// counter; unguarded writers must go through [`OptimisticStore`].
#[async_trait]
pub trait CounterStore: Send + Sync {
    /// Read a counter, `None` when the key is absent
    async fn read_counter(&self, key: &str) -> Result<Option<i64>>;

    /// Overwrite a counter
    async fn write_counter(&self, key: &str, value: i64) -> Result<()>;
}

/// Outcome of a conditional commit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitOutcome {
    /// The queued write was applied
    Committed,
    /// A watched key changed since it was watched; nothing was written
    Conflict,
}

/// A transaction context bound to one store connection
///
/// Watches are per context. A commit (successful or not) and an explicit
/// unwatch both clear the watched set.
#[async_trait]
pub trait WatchSession: Send {
    /// Mark `key` as watched by this context
    async fn watch(&mut self, key: &str) -> Result<()>;

    /// Read a counter through this context
    async fn read_counter(&mut self, key: &str) -> Result<Option<i64>>;

    /// Forget every watched key
    async fn unwatch(&mut self) -> Result<()>;

    /// Atomically write `value` to `key` unless a watched key changed
    async fn commit_counter(&mut self, key: &str, value: i64) -> Result<CommitOutcome>;
}

/// Opens transaction contexts
///
/// Plain counter reads need no transaction and go through the
/// [`CounterStore`] supertrait on the shared connection.
#[async_trait]
pub trait OptimisticStore: CounterStore {
    /// Open a new context with its own connection
    async fn open_session(&self) -> Result<Box<dyn WatchSession>>;
}

/// Full coordination store: scripts, counters and transactions
pub trait CoordinationStore: ScriptExecutor + CounterStore + OptimisticStore {
    /// Backend name for logs ("redis", "memory")
    fn backend_name(&self) -> &str;
}
