//! In-memory store: watch sessions

use stockguard_domain::Error;
use stockguard_domain::ports::{CommitOutcome, CounterStore, OptimisticStore};
use stockguard_providers::store::InMemoryCoordinationStore;

#[tokio::test]
async fn test_commit_without_interference() {
    let store = InMemoryCoordinationStore::new();
    store.write_counter("stockCount", 3).await.unwrap();

    let mut session = store.open_session().await.unwrap();
    session.watch("stockCount").await.unwrap();
    let current = session.read_counter("stockCount").await.unwrap().unwrap();
    let outcome = session
        .commit_counter("stockCount", current - 1)
        .await
        .unwrap();

    assert_eq!(outcome, CommitOutcome::Committed);
    assert_eq!(store.read_counter("stockCount").await.unwrap(), Some(2));
}

#[tokio::test]
async fn test_concurrent_write_aborts_commit() {
    let store = InMemoryCoordinationStore::new();
    store.write_counter("stockCount", 3).await.unwrap();

    let mut first = store.open_session().await.unwrap();
    let mut second = store.open_session().await.unwrap();

    first.watch("stockCount").await.unwrap();
    second.watch("stockCount").await.unwrap();
    let seen_first = first.read_counter("stockCount").await.unwrap().unwrap();
    let seen_second = second.read_counter("stockCount").await.unwrap().unwrap();

    assert_eq!(
        second
            .commit_counter("stockCount", seen_second - 1)
            .await
            .unwrap(),
        CommitOutcome::Committed
    );
    assert_eq!(
        first
            .commit_counter("stockCount", seen_first - 1)
            .await
            .unwrap(),
        CommitOutcome::Conflict
    );
    assert_eq!(store.read_counter("stockCount").await.unwrap(), Some(2));
}

#[tokio::test]
async fn test_rewriting_same_value_still_conflicts() {
    let store = InMemoryCoordinationStore::new();
    store.write_counter("stockCount", 3).await.unwrap();

    let mut session = store.open_session().await.unwrap();
    session.watch("stockCount").await.unwrap();
    store.write_counter("stockCount", 3).await.unwrap();

    assert_eq!(
        session.commit_counter("stockCount", 2).await.unwrap(),
        CommitOutcome::Conflict
    );
}

#[tokio::test]
async fn test_commit_clears_watches() {
    let store = InMemoryCoordinationStore::new();
    store.write_counter("stockCount", 3).await.unwrap();

    let mut session = store.open_session().await.unwrap();
    session.watch("stockCount").await.unwrap();
    store.write_counter("stockCount", 5).await.unwrap();
    assert_eq!(
        session.commit_counter("stockCount", 4).await.unwrap(),
        CommitOutcome::Conflict
    );

    // Without a new watch the next commit is unconditional
    assert_eq!(
        session.commit_counter("stockCount", 4).await.unwrap(),
        CommitOutcome::Committed
    );
    assert_eq!(store.read_counter("stockCount").await.unwrap(), Some(4));
}

#[tokio::test]
async fn test_unwatch_forgets_keys() {
    let store = InMemoryCoordinationStore::new();
    store.write_counter("stockCount", 3).await.unwrap();

    let mut session = store.open_session().await.unwrap();
    session.watch("stockCount").await.unwrap();
    session.unwatch().await.unwrap();
    store.write_counter("stockCount", 7).await.unwrap();

    assert_eq!(
        session.commit_counter("stockCount", 6).await.unwrap(),
        CommitOutcome::Committed
    );
}

#[tokio::test]
async fn test_injected_conflicts_are_consumed() {
    let store = InMemoryCoordinationStore::new();
    store.write_counter("stockCount", 1).await.unwrap();
    store.inject_commit_conflicts(2).unwrap();

    let mut session = store.open_session().await.unwrap();
    for expected in [
        CommitOutcome::Conflict,
        CommitOutcome::Conflict,
        CommitOutcome::Committed,
    ] {
        session.watch("stockCount").await.unwrap();
        assert_eq!(
            session.commit_counter("stockCount", 0).await.unwrap(),
            expected
        );
    }
}

#[tokio::test]
async fn test_session_on_unavailable_store() {
    let store = InMemoryCoordinationStore::new();
    store.set_available(false).unwrap();

    let result = store.open_session().await;
    assert!(matches!(result, Err(Error::StoreUnavailable { .. })));
}
