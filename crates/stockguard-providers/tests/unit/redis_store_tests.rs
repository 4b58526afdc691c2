//! Redis store tests
//!
//! Require a Redis server on localhost:6379.

use stockguard_domain::ports::{
    AtomicScript, CommitOutcome, CounterStore, OptimisticStore, ScriptExecutor, ScriptReply,
};
use stockguard_providers::store::RedisCoordinationStore;

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

fn unique(prefix: &str) -> String {
    format!("{}:{}", prefix, std::process::id())
}

#[tokio::test]
#[ignore] // Requires Redis
async fn test_redis_reentrant_lock_round_trip() {
    let store = RedisCoordinationStore::new("redis://localhost:6379").unwrap();
    let lock = unique("stockguard:test:lock");
    let keys = strings(&[lock.as_str()]);

    let acquired = store
        .execute(
            AtomicScript::AcquireReentrant,
            &keys,
            &strings(&["a", "1", "10"]),
        )
        .await
        .unwrap();
    assert_eq!(acquired, ScriptReply::Integer(1));

    let rejected = store
        .execute(
            AtomicScript::AcquireReentrant,
            &keys,
            &strings(&["b", "1", "10"]),
        )
        .await
        .unwrap();
    assert_eq!(rejected, ScriptReply::Integer(0));

    let renewed = store
        .execute(AtomicScript::RenewLease, &keys, &strings(&["a", "10"]))
        .await
        .unwrap();
    assert_eq!(renewed, ScriptReply::Boolean(true));

    let released = store
        .execute(AtomicScript::ReleaseReentrant, &keys, &strings(&["a"]))
        .await
        .unwrap();
    assert_eq!(released, ScriptReply::Integer(0));
}

#[tokio::test]
#[ignore] // Requires Redis
async fn test_redis_watch_conflict() {
    let store = RedisCoordinationStore::new("redis://localhost:6379").unwrap();
    let key = unique("stockguard:test:stock");
    store.write_counter(&key, 3).await.unwrap();

    let mut session = store.open_session().await.unwrap();
    session.watch(&key).await.unwrap();
    let seen = session.read_counter(&key).await.unwrap().unwrap();

    store.write_counter(&key, 2).await.unwrap();
    assert_eq!(
        session.commit_counter(&key, seen - 1).await.unwrap(),
        CommitOutcome::Conflict
    );

    session.watch(&key).await.unwrap();
    let seen = session.read_counter(&key).await.unwrap().unwrap();
    assert_eq!(
        session.commit_counter(&key, seen - 1).await.unwrap(),
        CommitOutcome::Committed
    );
    assert_eq!(store.read_counter(&key).await.unwrap(), Some(1));
}

#[tokio::test]
#[ignore] // Requires Redis
async fn test_redis_ping() {
    let store = RedisCoordinationStore::new("redis://localhost:6379").unwrap();
    assert!(store.ping().await.is_ok());
}
