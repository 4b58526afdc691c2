//! Domain Port Interfaces
//!
//! Defines the boundary contracts between the domain and the store
//! backends. High-level modules (lock manager, inventory services) depend
//! on these traits; `stockguard-providers` implements them.
//!
//! ## Organization
//!
//! - **store** - Coordination store ports (atomic scripts, counters, watch sessions)

/// Coordination store ports
pub mod store;

pub use store::{
    AtomicScript, CommitOutcome, CoordinationStore, CounterStore, OptimisticStore, ReplyKind,
    ScriptExecutor, ScriptReply, WatchSession,
};
