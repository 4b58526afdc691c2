//! Unit tests for domain error types

use stockguard_domain::Error;

#[test]
fn test_store_unavailable_error() {
    let error = Error::store_unavailable("connection refused");
    assert!(error.is_store_unavailable());
    assert_eq!(format!("{}", error), "Store unavailable: connection refused");
}

#[test]
fn test_store_unavailable_with_source() {
    let io = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused");
    let error = Error::store_unavailable_with_source("Failed to connect", io);
    match error {
        Error::StoreUnavailable { message, source } => {
            assert_eq!(message, "Failed to connect");
            assert!(source.is_some());
        }
        _ => panic!("Expected StoreUnavailable error"),
    }
}

#[test]
fn test_store_error_is_not_unavailable() {
    let error = Error::store("WRONGTYPE Operation against a key holding the wrong kind of value");
    assert!(!error.is_store_unavailable());
}

#[test]
fn test_counter_errors() {
    match Error::counter_missing("stockCount") {
        Error::CounterMissing { key } => assert_eq!(key, "stockCount"),
        _ => panic!("Expected CounterMissing error"),
    }

    let error = Error::invalid_counter("stockCount", "abc");
    assert!(format!("{}", error).contains("abc"));
}

#[test]
fn test_coordination_errors() {
    let timeout = Error::acquire_timeout("lock", 250);
    assert_eq!(
        format!("{}", timeout),
        "Timed out after 250ms waiting for lock lock"
    );

    match Error::lease_lost("lock", "busiId-1") {
        Error::LeaseLost { lock, holder } => {
            assert_eq!(lock, "lock");
            assert_eq!(holder, "busiId-1");
        }
        _ => panic!("Expected LeaseLost error"),
    }

    match Error::conflict_limit("stockCount", 5) {
        Error::ConflictLimit { key, attempts } => {
            assert_eq!(key, "stockCount");
            assert_eq!(attempts, 5);
        }
        _ => panic!("Expected ConflictLimit error"),
    }
}

#[test]
fn test_io_error_conversion() {
    let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
    let error: Error = io.into();
    assert!(matches!(error, Error::Io { .. }));
}
