//! Unit tests for inventory value objects

use stockguard_domain::value_objects::{ConcurrencyStrategy, PurchaseOutcome, StockKey};

#[test]
fn test_stock_key_validation() {
    assert!(StockKey::new("").is_err());
    assert_eq!(StockKey::new("stockCount").unwrap().as_str(), "stockCount");
}

#[test]
fn test_strategy_parsing() {
    assert_eq!(
        "lock".parse::<ConcurrencyStrategy>().unwrap(),
        ConcurrencyStrategy::Lock
    );
    assert_eq!(
        "Optimistic".parse::<ConcurrencyStrategy>().unwrap(),
        ConcurrencyStrategy::Optimistic
    );
    assert!("pessimistic".parse::<ConcurrencyStrategy>().is_err());
}

#[test]
fn test_strategy_default_and_serde() {
    assert_eq!(ConcurrencyStrategy::default(), ConcurrencyStrategy::Lock);
    let json = serde_json::to_string(&ConcurrencyStrategy::Optimistic).unwrap();
    assert_eq!(json, "\"optimistic\"");
}

#[test]
fn test_purchase_outcome_display() {
    assert_eq!(PurchaseOutcome::Purchased.to_string(), "purchased");
    assert_eq!(PurchaseOutcome::SoldOut.to_string(), "sold out");
}
