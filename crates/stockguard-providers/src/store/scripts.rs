//! Lua sources of the atomic lock procedures
//!
//! The lock is a hash `holder -> reentrancy count` with a key-level TTL.
//! `HDEL` of the last field removes the key, so no zero-count entry is
//! ever left behind.

use stockguard_domain::ports::AtomicScript;

/// Create the lock or re-enter it
///
/// KEYS[1] lock, ARGV[1] holder, ARGV[2] initial count, ARGV[3] ttl secs.
/// Re-entering leaves the TTL untouched.
pub const ACQUIRE_REENTRANT: &str = r#"
    if redis.call('exists', KEYS[1]) == 0 then
        redis.call('hset', KEYS[1], ARGV[1], ARGV[2])
        redis.call('expire', KEYS[1], ARGV[3])
        return 1
    elseif redis.call('hexists', KEYS[1], ARGV[1]) == 1 then
        redis.call('hincrby', KEYS[1], ARGV[1], 1)
        return 1
    end
    return 0
"#;

/// Drop one hold
///
/// KEYS[1] lock, ARGV[1] holder. Returns -1 when the caller is not the
/// holder, otherwise the remaining count.
pub const RELEASE_REENTRANT: &str = r#"
    if redis.call('hexists', KEYS[1], ARGV[1]) == 0 then
        return -1
    end
    local remaining = redis.call('hincrby', KEYS[1], ARGV[1], -1)
    if remaining <= 0 then
        redis.call('hdel', KEYS[1], ARGV[1])
        return 0
    end
    return remaining
"#;

/// Reset the TTL if the caller still holds the lock
///
/// KEYS[1] lock, ARGV[1] holder, ARGV[2] ttl secs.
pub const RENEW_LEASE: &str = r#"
    if redis.call('hexists', KEYS[1], ARGV[1]) == 1 then
        redis.call('expire', KEYS[1], ARGV[2])
        return 1
    end
    return 0
"#;

/// Lua source of a procedure
pub fn source(script: AtomicScript) -> &'static str {
    match script {
        AtomicScript::AcquireReentrant => ACQUIRE_REENTRANT,
        AtomicScript::ReleaseReentrant => RELEASE_REENTRANT,
        AtomicScript::RenewLease => RENEW_LEASE,
    }
}
