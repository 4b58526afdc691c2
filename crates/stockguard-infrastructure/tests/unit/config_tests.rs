//! Configuration Loader Tests

use std::time::Duration;
use stockguard_application::inventory::RetryPolicy;
use stockguard_domain::Error;
use stockguard_domain::value_objects::ConcurrencyStrategy;
use stockguard_infrastructure::config::{
    ConfigBuilder, ConfigLoader, LockConfig, StoreBackend, StoreConfig,
};
use stockguard_infrastructure::constants::DEFAULT_LOG_LEVEL;
use tempfile::TempDir;

#[test]
fn test_config_loader_default() {
    let config = ConfigLoader::new().load().unwrap();

    assert_eq!(config.store.backend, StoreBackend::Redis);
    assert_eq!(config.store.url, "redis://127.0.0.1:6379");
    assert_eq!(config.lock.name, "lock");
    assert_eq!(config.lock.lease_ttl_secs, 10);
    assert_eq!(config.lock.acquire_timeout_ms, None);
    assert_eq!(config.inventory.stock_key, "stockCount");
    assert_eq!(config.inventory.restock_units, 5000);
    assert_eq!(config.inventory.strategy, ConcurrencyStrategy::Lock);
    assert_eq!(config.logging.level, DEFAULT_LOG_LEVEL);
}

#[test]
fn test_lock_config_to_options() {
    let lock = LockConfig {
        acquire_timeout_ms: Some(250),
        ..Default::default()
    };
    let options = lock.to_options();

    assert_eq!(options.lease_ttl, Duration::from_secs(10));
    assert_eq!(options.renew_interval, Duration::from_secs(1));
    assert_eq!(options.renew_initial_delay, Duration::from_millis(100));
    assert_eq!(options.acquire_backoff, Duration::from_millis(10));
    assert_eq!(options.acquire_timeout, Some(Duration::from_millis(250)));
}

#[test]
fn test_partial_file_keeps_other_defaults() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("stockguard.toml");
    std::fs::write(
        &config_path,
        r#"
[store]
backend = "memory"

[lock]
lease_ttl_secs = 30
acquire_timeout_ms = 2000

[inventory]
strategy = "optimistic"

[optimistic]
max_attempts = 8
"#,
    )
    .unwrap();

    let config = ConfigLoader::new()
        .with_config_path(&config_path)
        .load()
        .unwrap();

    assert_eq!(config.store.backend, StoreBackend::Memory);
    assert_eq!(config.lock.lease_ttl_secs, 30);
    assert_eq!(config.lock.renew_interval_ms, 1000);
    assert_eq!(config.lock.acquire_timeout_ms, Some(2000));
    assert_eq!(config.inventory.strategy, ConcurrencyStrategy::Optimistic);
    assert_eq!(config.inventory.stock_key, "stockCount");
    assert_eq!(config.optimistic.max_attempts, Some(8));
    assert_eq!(config.optimistic.max_delay_ms, 50);
}

#[test]
fn test_missing_file_falls_back_to_defaults() {
    let temp_dir = TempDir::new().unwrap();
    let loader = ConfigLoader::new().with_config_path(temp_dir.path().join("absent.toml"));

    let config = loader.load().unwrap();
    assert_eq!(config.lock.name, "lock");
    assert!(loader.config_path().is_some());
}

#[test]
fn test_source_path_prefers_explicit_file() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("stockguard.toml");

    let loader = ConfigLoader::new().with_config_path(&config_path);
    assert_eq!(loader.source_path(), Some(config_path.clone()));

    std::fs::write(&config_path, "[lock]\nname = \"orders\"\n").unwrap();
    assert_eq!(loader.source_path(), Some(config_path));
    assert_eq!(loader.load().unwrap().lock.name, "orders");
}

#[test]
fn test_config_save_load() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("saved.toml");

    let original = ConfigBuilder::new()
        .with_memory_store()
        .with_strategy(ConcurrencyStrategy::Optimistic)
        .with_retry_policy(RetryPolicy {
            max_attempts: Some(5),
            ..Default::default()
        })
        .build();

    let loader = ConfigLoader::new();
    loader.save_to_file(&original, &config_path).unwrap();

    let loaded = ConfigLoader::new()
        .with_config_path(&config_path)
        .load()
        .unwrap();
    assert_eq!(loaded, original);
}

#[test]
fn test_invalid_lock_timings_rejected() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("bad.toml");
    std::fs::write(
        &config_path,
        "[lock]\nlease_ttl_secs = 2\nrenew_interval_ms = 5000\n",
    )
    .unwrap();

    let result = ConfigLoader::new().with_config_path(&config_path).load();
    assert!(matches!(result, Err(Error::Config { .. })));
}

#[test]
fn test_invalid_values_rejected() {
    let cases = [
        "[store]\nurl = \"http://localhost\"\n",
        "[lock]\nname = \"  \"\n",
        "[inventory]\nrestock_units = -5\n",
        "[optimistic]\nmax_attempts = 0\n",
        "[logging]\nlevel = \"loud\"\n",
        "[inventory]\nstrategy = \"pessimistic\"\n",
    ];

    let temp_dir = TempDir::new().unwrap();
    for (i, contents) in cases.iter().enumerate() {
        let config_path = temp_dir.path().join(format!("case{}.toml", i));
        std::fs::write(&config_path, contents).unwrap();

        let result = ConfigLoader::new().with_config_path(&config_path).load();
        assert!(result.is_err(), "case {} should be rejected: {}", i, contents);
    }
}

#[test]
fn test_memory_backend_ignores_url() {
    let config = ConfigBuilder::new()
        .with_store(StoreConfig {
            backend: StoreBackend::Memory,
            url: String::new(),
        })
        .build();
    assert!(stockguard_infrastructure::config::loader::validate_app_config(&config).is_ok());
}

#[test]
fn test_store_backend_parsing() {
    assert_eq!("redis".parse::<StoreBackend>().unwrap(), StoreBackend::Redis);
    assert_eq!("MEMORY".parse::<StoreBackend>().unwrap(), StoreBackend::Memory);
    assert!("etcd".parse::<StoreBackend>().is_err());
}

/// Helper to set env var
fn set_env(key: &str, value: &str) {
    // SAFETY: Tests must run with --test-threads=1
    unsafe {
        std::env::set_var(key, value);
    }
}

/// Helper to remove env var
fn remove_env(key: &str) {
    // SAFETY: Tests must run with --test-threads=1
    unsafe {
        std::env::remove_var(key);
    }
}

/// Run with: `cargo test -p stockguard-infrastructure --test unit env_ -- --test-threads=1 --ignored`
#[test]
#[ignore = "requires --test-threads=1 due to env var mutations"]
fn test_env_overrides_nested_keys() {
    set_env("SGTEST_STORE__BACKEND", "memory");
    set_env("SGTEST_LOCK__ACQUIRE_TIMEOUT_MS", "750");
    set_env("SGTEST_INVENTORY__STOCK_KEY", "flash:stock");

    let result = ConfigLoader::new().with_env_prefix("SGTEST").load();

    remove_env("SGTEST_STORE__BACKEND");
    remove_env("SGTEST_LOCK__ACQUIRE_TIMEOUT_MS");
    remove_env("SGTEST_INVENTORY__STOCK_KEY");

    let config = result.unwrap();
    assert_eq!(config.store.backend, StoreBackend::Memory);
    assert_eq!(config.lock.acquire_timeout_ms, Some(750));
    assert_eq!(config.inventory.stock_key, "flash:stock");
}
