//! In-memory coordination store
//!
//! Single-process implementation of every store port. All procedures run
//! under one mutex, which gives them the same indivisibility Lua scripts
//! have on Redis. Each key carries a version bumped on every mutation so
//! watch sessions can detect conflicting writes the way `WATCH` does.
//!
//! Expiry uses the Tokio clock, so tests can drive lease timing with
//! `tokio::time::pause` and `advance`.
//!
//! ## Fault injection
//!
//! - [`InMemoryCoordinationStore::set_available`] makes every call fail with `StoreUnavailable`
//! - [`InMemoryCoordinationStore::inject_commit_conflicts`] forces the next commits to conflict
//! - [`InMemoryCoordinationStore::evict`] deletes a key as if its TTL had elapsed

use crate::constants::MEMORY_BACKEND_NAME;
use crate::utils::lock_mutex;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use stockguard_domain::error::{Error, Result};
use stockguard_domain::ports::{
    AtomicScript, CommitOutcome, CoordinationStore, CounterStore, OptimisticStore,
    ScriptExecutor, ScriptReply, WatchSession,
};
use tokio::time::Instant;

const WRONG_TYPE: &str = "WRONGTYPE Operation against a key holding the wrong kind of value";

enum SlotValue {
    Counter(i64),
    Hash(HashMap<String, i64>),
}

struct Slot {
    value: SlotValue,
    expires_at: Option<Instant>,
}

struct MemoryState {
    slots: HashMap<String, Slot>,
    versions: HashMap<String, u64>,
    next_version: u64,
    available: bool,
    pending_conflicts: u32,
    sessions_opened: u64,
}

impl Default for MemoryState {
    fn default() -> Self {
        Self {
            slots: HashMap::new(),
            versions: HashMap::new(),
            next_version: 0,
            available: true,
            pending_conflicts: 0,
            sessions_opened: 0,
        }
    }
}

impl MemoryState {
    fn ensure_available(&self) -> Result<()> {
        if self.available {
            Ok(())
        } else {
            Err(Error::store_unavailable("In-memory store is marked unavailable"))
        }
    }

    fn touch(&mut self, key: &str) {
        self.next_version += 1;
        self.versions.insert(key.to_string(), self.next_version);
    }

    fn version(&self, key: &str) -> u64 {
        self.versions.get(key).copied().unwrap_or(0)
    }

    /// Drop `key` if its TTL has elapsed
    fn purge_expired(&mut self, key: &str) {
        let expired = self
            .slots
            .get(key)
            .and_then(|slot| slot.expires_at)
            .is_some_and(|deadline| Instant::now() >= deadline);
        if expired {
            self.slots.remove(key);
            self.touch(key);
        }
    }

    fn read_counter(&mut self, key: &str) -> Result<Option<i64>> {
        self.purge_expired(key);
        match self.slots.get(key).map(|slot| &slot.value) {
            None => Ok(None),
            Some(SlotValue::Counter(value)) => Ok(Some(*value)),
            Some(SlotValue::Hash(_)) => Err(Error::store(WRONG_TYPE)),
        }
    }

    fn write_counter(&mut self, key: &str, value: i64) {
        // SET discards any TTL, as Redis does
        self.slots.insert(
            key.to_string(),
            Slot {
                value: SlotValue::Counter(value),
                expires_at: None,
            },
        );
        self.touch(key);
    }

    fn acquire(&mut self, key: &str, holder: &str, initial: i64, ttl: Duration) -> Result<i64> {
        self.purge_expired(key);
        let Some(slot) = self.slots.get_mut(key) else {
            let mut holders = HashMap::new();
            holders.insert(holder.to_string(), initial);
            self.slots.insert(
                key.to_string(),
                Slot {
                    value: SlotValue::Hash(holders),
                    expires_at: Some(Instant::now() + ttl),
                },
            );
            self.touch(key);
            return Ok(1);
        };

        let SlotValue::Hash(holders) = &mut slot.value else {
            return Err(Error::store(WRONG_TYPE));
        };
        match holders.get_mut(holder) {
            Some(count) => {
                *count += 1;
                self.touch(key);
                Ok(1)
            }
            None => Ok(0),
        }
    }

    fn release(&mut self, key: &str, holder: &str) -> Result<i64> {
        self.purge_expired(key);
        let Some(slot) = self.slots.get_mut(key) else {
            return Ok(-1);
        };
        let SlotValue::Hash(holders) = &mut slot.value else {
            return Err(Error::store(WRONG_TYPE));
        };
        let Some(count) = holders.get_mut(holder) else {
            return Ok(-1);
        };

        *count -= 1;
        let remaining = *count;
        if remaining <= 0 {
            holders.remove(holder);
            if holders.is_empty() {
                self.slots.remove(key);
            }
            self.touch(key);
            return Ok(0);
        }
        self.touch(key);
        Ok(remaining)
    }

    fn renew(&mut self, key: &str, holder: &str, ttl: Duration) -> Result<i64> {
        self.purge_expired(key);
        let Some(slot) = self.slots.get_mut(key) else {
            return Ok(0);
        };
        let SlotValue::Hash(holders) = &slot.value else {
            return Err(Error::store(WRONG_TYPE));
        };
        if !holders.contains_key(holder) {
            return Ok(0);
        }
        slot.expires_at = Some(Instant::now() + ttl);
        self.touch(key);
        Ok(1)
    }
}

/// In-memory coordination store
///
/// Clones share state, so one instance can stand in for a store reached by
/// many callers.
#[derive(Clone, Default)]
pub struct InMemoryCoordinationStore {
    state: Arc<Mutex<MemoryState>>,
}

impl InMemoryCoordinationStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent call succeed or fail with `StoreUnavailable`
    pub fn set_available(&self, available: bool) -> Result<()> {
        lock_mutex(&self.state, "memory store availability")?.available = available;
        Ok(())
    }

    /// Force the next `count` commits to report a conflict
    pub fn inject_commit_conflicts(&self, count: u32) -> Result<()> {
        lock_mutex(&self.state, "memory store conflict injection")?.pending_conflicts = count;
        Ok(())
    }

    /// Delete `key` regardless of holder, as an elapsed TTL would
    pub fn evict(&self, key: &str) -> Result<bool> {
        let mut state = lock_mutex(&self.state, "memory store evict")?;
        let existed = state.slots.remove(key).is_some();
        if existed {
            state.touch(key);
        }
        Ok(existed)
    }

    /// Whether `key` currently exists
    pub fn contains_key(&self, key: &str) -> Result<bool> {
        let mut state = lock_mutex(&self.state, "memory store lookup")?;
        state.purge_expired(key);
        Ok(state.slots.contains_key(key))
    }

    /// Holder currently recorded on a lock
    pub fn holder_of(&self, lock: &str) -> Result<Option<String>> {
        let mut state = lock_mutex(&self.state, "memory store lookup")?;
        state.purge_expired(lock);
        match state.slots.get(lock).map(|slot| &slot.value) {
            Some(SlotValue::Hash(holders)) => Ok(holders.keys().next().cloned()),
            Some(SlotValue::Counter(_)) => Err(Error::store(WRONG_TYPE)),
            None => Ok(None),
        }
    }

    /// Reentrancy count of `holder` on `lock`
    pub fn reentrancy_count(&self, lock: &str, holder: &str) -> Result<Option<i64>> {
        let mut state = lock_mutex(&self.state, "memory store lookup")?;
        state.purge_expired(lock);
        match state.slots.get(lock).map(|slot| &slot.value) {
            Some(SlotValue::Hash(holders)) => Ok(holders.get(holder).copied()),
            Some(SlotValue::Counter(_)) => Err(Error::store(WRONG_TYPE)),
            None => Ok(None),
        }
    }

    /// Number of watch sessions opened so far
    pub fn sessions_opened(&self) -> Result<u64> {
        Ok(lock_mutex(&self.state, "memory store lookup")?.sessions_opened)
    }

    /// Remaining time before `key` expires, `None` without a TTL
    pub fn time_to_live(&self, key: &str) -> Result<Option<Duration>> {
        let mut state = lock_mutex(&self.state, "memory store lookup")?;
        state.purge_expired(key);
        Ok(state
            .slots
            .get(key)
            .and_then(|slot| slot.expires_at)
            .map(|deadline| deadline.saturating_duration_since(Instant::now())))
    }
}

fn parse_ttl(raw: &str) -> Result<Duration> {
    raw.parse::<u64>()
        .map(Duration::from_secs)
        .map_err(|_| Error::invalid_argument(format!("Invalid TTL seconds: {}", raw)))
}

#[async_trait]
impl ScriptExecutor for InMemoryCoordinationStore {
    async fn execute(
        &self,
        script: AtomicScript,
        keys: &[String],
        args: &[String],
    ) -> Result<ScriptReply> {
        script.check_arity(keys, args)?;
        let mut state = lock_mutex(&self.state, script.name())?;
        state.ensure_available()?;

        let key = keys[0].as_str();
        let raw = match script {
            AtomicScript::AcquireReentrant => {
                let initial = args[1].parse::<i64>().map_err(|_| {
                    Error::invalid_argument(format!("Invalid initial count: {}", args[1]))
                })?;
                state.acquire(key, &args[0], initial, parse_ttl(&args[2])?)?
            }
            AtomicScript::ReleaseReentrant => state.release(key, &args[0])?,
            AtomicScript::RenewLease => state.renew(key, &args[0], parse_ttl(&args[1])?)?,
        };

        Ok(ScriptReply::from_raw(script.reply_kind(), raw))
    }
}

#[async_trait]
impl CounterStore for InMemoryCoordinationStore {
    async fn read_counter(&self, key: &str) -> Result<Option<i64>> {
        let mut state = lock_mutex(&self.state, "memory store read")?;
        state.ensure_available()?;
        state.read_counter(key)
    }

    async fn write_counter(&self, key: &str, value: i64) -> Result<()> {
        let mut state = lock_mutex(&self.state, "memory store write")?;
        state.ensure_available()?;
        state.write_counter(key, value);
        Ok(())
    }
}

#[async_trait]
impl OptimisticStore for InMemoryCoordinationStore {
    async fn open_session(&self) -> Result<Box<dyn WatchSession>> {
        let mut state = lock_mutex(&self.state, "memory store session")?;
        state.ensure_available()?;
        state.sessions_opened += 1;
        drop(state);
        Ok(Box::new(InMemoryWatchSession {
            state: Arc::clone(&self.state),
            watched: HashMap::new(),
        }))
    }
}

impl CoordinationStore for InMemoryCoordinationStore {
    fn backend_name(&self) -> &str {
        MEMORY_BACKEND_NAME
    }
}

impl std::fmt::Debug for InMemoryCoordinationStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let keys = self.state.lock().map(|state| state.slots.len()).unwrap_or(0);
        f.debug_struct("InMemoryCoordinationStore")
            .field("keys", &keys)
            .finish()
    }
}

/// Transaction context over the shared in-memory state
///
/// Remembers the version of each watched key; a commit succeeds only if
/// none of them moved.
pub struct InMemoryWatchSession {
    state: Arc<Mutex<MemoryState>>,
    watched: HashMap<String, u64>,
}

#[async_trait]
impl WatchSession for InMemoryWatchSession {
    async fn watch(&mut self, key: &str) -> Result<()> {
        let mut state = lock_mutex(&self.state, "memory store watch")?;
        state.ensure_available()?;
        state.purge_expired(key);
        self.watched.insert(key.to_string(), state.version(key));
        Ok(())
    }

    async fn read_counter(&mut self, key: &str) -> Result<Option<i64>> {
        let mut state = lock_mutex(&self.state, "memory store read")?;
        state.ensure_available()?;
        state.read_counter(key)
    }

    async fn unwatch(&mut self) -> Result<()> {
        let state = lock_mutex(&self.state, "memory store unwatch")?;
        state.ensure_available()?;
        self.watched.clear();
        Ok(())
    }

    async fn commit_counter(&mut self, key: &str, value: i64) -> Result<CommitOutcome> {
        let mut state = lock_mutex(&self.state, "memory store commit")?;
        state.ensure_available()?;

        let watched = std::mem::take(&mut self.watched);
        let mut conflict = false;
        for (watched_key, version) in &watched {
            state.purge_expired(watched_key);
            if state.version(watched_key) != *version {
                conflict = true;
            }
        }
        if state.pending_conflicts > 0 {
            state.pending_conflicts -= 1;
            conflict = true;
        }

        if conflict {
            return Ok(CommitOutcome::Conflict);
        }
        state.write_counter(key, value);
        Ok(CommitOutcome::Committed)
    }
}
