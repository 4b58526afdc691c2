//! Reentrant distributed locking
//!
//! A lock is a hash in the shared store mapping one holder identity to a
//! reentrancy count, with a TTL. [`ReentrantLockManager`] runs the atomic
//! procedures, [`LeaseWatchdog`] keeps the TTL fresh while work is in
//! progress, and [`LockLease`] ties both together for one acquisition.

pub mod lease;
pub mod manager;
pub mod options;
pub mod watchdog;

pub use lease::LockLease;
pub use manager::ReentrantLockManager;
pub use options::LockOptions;
pub use watchdog::LeaseWatchdog;
