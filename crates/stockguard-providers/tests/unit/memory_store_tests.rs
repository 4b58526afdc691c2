//! In-memory store: atomic lock procedures and counters

use std::time::Duration;
use stockguard_domain::Error;
use stockguard_domain::ports::{AtomicScript, CounterStore, ScriptExecutor, ScriptReply};
use stockguard_providers::store::InMemoryCoordinationStore;

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

async fn acquire(store: &InMemoryCoordinationStore, holder: &str, ttl: &str) -> ScriptReply {
    store
        .execute(
            AtomicScript::AcquireReentrant,
            &strings(&["lock"]),
            &strings(&[holder, "1", ttl]),
        )
        .await
        .unwrap()
}

async fn release(store: &InMemoryCoordinationStore, holder: &str) -> ScriptReply {
    store
        .execute(
            AtomicScript::ReleaseReentrant,
            &strings(&["lock"]),
            &strings(&[holder]),
        )
        .await
        .unwrap()
}

async fn renew(store: &InMemoryCoordinationStore, holder: &str, ttl: &str) -> ScriptReply {
    store
        .execute(
            AtomicScript::RenewLease,
            &strings(&["lock"]),
            &strings(&[holder, ttl]),
        )
        .await
        .unwrap()
}

#[tokio::test]
async fn test_acquire_creates_lock_with_ttl() {
    let store = InMemoryCoordinationStore::new();

    assert_eq!(acquire(&store, "a", "10").await, ScriptReply::Integer(1));
    assert_eq!(store.holder_of("lock").unwrap(), Some("a".to_string()));
    assert_eq!(store.reentrancy_count("lock", "a").unwrap(), Some(1));

    let ttl = store.time_to_live("lock").unwrap().unwrap();
    assert!(ttl <= Duration::from_secs(10));
    assert!(ttl > Duration::from_secs(9));
}

#[tokio::test]
async fn test_second_holder_is_rejected_not_merged() {
    let store = InMemoryCoordinationStore::new();

    acquire(&store, "a", "10").await;
    assert_eq!(acquire(&store, "b", "10").await, ScriptReply::Integer(0));
    assert_eq!(store.reentrancy_count("lock", "b").unwrap(), None);
    assert_eq!(store.holder_of("lock").unwrap(), Some("a".to_string()));
}

#[tokio::test(start_paused = true)]
async fn test_reentry_increments_without_touching_ttl() {
    let store = InMemoryCoordinationStore::new();

    acquire(&store, "a", "10").await;
    tokio::time::advance(Duration::from_secs(4)).await;
    assert_eq!(acquire(&store, "a", "10").await, ScriptReply::Integer(1));

    assert_eq!(store.reentrancy_count("lock", "a").unwrap(), Some(2));
    let ttl = store.time_to_live("lock").unwrap().unwrap();
    assert_eq!(ttl, Duration::from_secs(6));
}

#[tokio::test]
async fn test_release_counts_down_then_deletes() {
    let store = InMemoryCoordinationStore::new();

    acquire(&store, "a", "10").await;
    acquire(&store, "a", "10").await;

    assert_eq!(release(&store, "a").await, ScriptReply::Integer(1));
    assert!(store.contains_key("lock").unwrap());
    assert_eq!(release(&store, "a").await, ScriptReply::Integer(0));
    assert!(!store.contains_key("lock").unwrap());
}

#[tokio::test]
async fn test_release_by_non_holder_is_a_no_op() {
    let store = InMemoryCoordinationStore::new();

    acquire(&store, "a", "10").await;
    assert_eq!(release(&store, "b").await, ScriptReply::Integer(-1));
    assert_eq!(store.reentrancy_count("lock", "a").unwrap(), Some(1));

    let empty = InMemoryCoordinationStore::new();
    assert_eq!(release(&empty, "a").await, ScriptReply::Integer(-1));
}

#[tokio::test(start_paused = true)]
async fn test_renew_resets_ttl_for_holder_only() {
    let store = InMemoryCoordinationStore::new();

    acquire(&store, "a", "10").await;
    tokio::time::advance(Duration::from_secs(7)).await;

    assert_eq!(renew(&store, "b", "10").await, ScriptReply::Boolean(false));
    assert_eq!(
        store.time_to_live("lock").unwrap(),
        Some(Duration::from_secs(3))
    );

    assert_eq!(renew(&store, "a", "10").await, ScriptReply::Boolean(true));
    assert_eq!(
        store.time_to_live("lock").unwrap(),
        Some(Duration::from_secs(10))
    );
}

#[tokio::test(start_paused = true)]
async fn test_lock_expires_after_ttl_and_not_before() {
    let store = InMemoryCoordinationStore::new();

    acquire(&store, "a", "2").await;

    tokio::time::advance(Duration::from_millis(1999)).await;
    assert_eq!(acquire(&store, "b", "2").await, ScriptReply::Integer(0));

    tokio::time::advance(Duration::from_millis(1)).await;
    assert_eq!(acquire(&store, "b", "2").await, ScriptReply::Integer(1));
    assert_eq!(store.holder_of("lock").unwrap(), Some("b".to_string()));
}

#[tokio::test(start_paused = true)]
async fn test_renew_after_expiry_reports_not_holder() {
    let store = InMemoryCoordinationStore::new();

    acquire(&store, "a", "1").await;
    tokio::time::advance(Duration::from_secs(2)).await;

    assert_eq!(renew(&store, "a", "1").await, ScriptReply::Boolean(false));
    assert!(!store.contains_key("lock").unwrap());
}

#[tokio::test]
async fn test_script_arity_is_checked() {
    let store = InMemoryCoordinationStore::new();

    let result = store
        .execute(
            AtomicScript::AcquireReentrant,
            &strings(&["lock"]),
            &strings(&["a"]),
        )
        .await;
    assert!(matches!(result, Err(Error::InvalidArgument { .. })));

    let result = store
        .execute(
            AtomicScript::RenewLease,
            &strings(&["lock"]),
            &strings(&["a", "soon"]),
        )
        .await;
    assert!(matches!(result, Err(Error::InvalidArgument { .. })));
}

#[tokio::test]
async fn test_lock_procedures_reject_counter_keys() {
    let store = InMemoryCoordinationStore::new();
    store.write_counter("lock", 3).await.unwrap();

    let result = store
        .execute(
            AtomicScript::AcquireReentrant,
            &strings(&["lock"]),
            &strings(&["a", "1", "10"]),
        )
        .await;
    assert!(matches!(result, Err(Error::Store { .. })));
}

#[tokio::test]
async fn test_counter_read_write() {
    let store = InMemoryCoordinationStore::new();

    assert_eq!(store.read_counter("stockCount").await.unwrap(), None);
    store.write_counter("stockCount", 3).await.unwrap();
    assert_eq!(store.read_counter("stockCount").await.unwrap(), Some(3));
    assert_eq!(store.time_to_live("stockCount").unwrap(), None);
}

#[tokio::test]
async fn test_unavailable_store_fails_every_call() {
    let store = InMemoryCoordinationStore::new();
    store.write_counter("stockCount", 3).await.unwrap();
    store.set_available(false).unwrap();

    let read = store.read_counter("stockCount").await;
    assert!(matches!(read, Err(Error::StoreUnavailable { .. })));

    let script = store
        .execute(
            AtomicScript::AcquireReentrant,
            &strings(&["lock"]),
            &strings(&["a", "1", "10"]),
        )
        .await;
    assert!(matches!(script, Err(Error::StoreUnavailable { .. })));

    store.set_available(true).unwrap();
    assert_eq!(store.read_counter("stockCount").await.unwrap(), Some(3));
}

#[tokio::test]
async fn test_evict_drops_lock() {
    let store = InMemoryCoordinationStore::new();

    acquire(&store, "a", "10").await;
    assert!(store.evict("lock").unwrap());
    assert!(!store.evict("lock").unwrap());
    assert_eq!(acquire(&store, "b", "10").await, ScriptReply::Integer(1));
}
