//! Lock utilities for proper error handling of poisoned locks

use std::sync::{Mutex, MutexGuard};
use stockguard_domain::error::{Error, Result};

/// Lock a Mutex and handle poisoning
pub fn lock_mutex<'a, T>(lock: &'a Mutex<T>, context: &str) -> Result<MutexGuard<'a, T>> {
    lock.lock()
        .map_err(|_| Error::internal(format!("Mutex lock poisoned: {}", context)))
}
