//! Configuration loader
//!
//! Handles loading configuration from various sources including
//! TOML files, environment variables, and default values.

use crate::config::{
    AppConfig, InventoryConfig, LockConfig, LoggingConfig, StoreBackend, StoreConfig,
};
use crate::constants::*;
use crate::error_ext::ErrorContext;
use crate::logging::parse_log_level;
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use std::env;
use std::path::{Path, PathBuf};
use stockguard_application::inventory::RetryPolicy;
use stockguard_domain::error::{Error, Result};
use stockguard_domain::value_objects::ConcurrencyStrategy;

/// Configuration loader service
#[derive(Clone)]
pub struct ConfigLoader {
    /// Configuration file path
    config_path: Option<PathBuf>,

    /// Environment prefix
    env_prefix: String,
}

impl ConfigLoader {
    /// Create a new configuration loader with default settings
    pub fn new() -> Self {
        Self {
            config_path: None,
            env_prefix: CONFIG_ENV_PREFIX.to_string(),
        }
    }

    /// Set the configuration file path
    pub fn with_config_path<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.config_path = Some(path.as_ref().to_path_buf());
        self
    }

    /// Set the environment variable prefix
    pub fn with_env_prefix<S: Into<String>>(mut self, prefix: S) -> Self {
        self.env_prefix = prefix.into();
        self
    }

    /// Load configuration from all sources
    ///
    /// Configuration sources are merged in this order (later sources override earlier):
    /// 1. Default values from `AppConfig::default()`
    /// 2. TOML configuration file (if exists)
    /// 3. Environment variables with prefix, `__` between nested keys
    ///    (e.g., `STOCKGUARD_STORE__URL`)
    ///
    /// Nothing is logged here since logging is configured from the result;
    /// report [`ConfigLoader::source_path`] once a subscriber is installed.
    pub fn load(&self) -> Result<AppConfig> {
        let mut figment = Figment::new().merge(Serialized::defaults(AppConfig::default()));

        if let Some(path) = self.source_path()
            && path.exists()
        {
            figment = figment.merge(Toml::file(&path));
        }

        figment = figment
            .merge(Env::prefixed(&format!("{}_", self.env_prefix)).split(CONFIG_ENV_SEPARATOR));

        let app_config: AppConfig = figment
            .extract()
            .config_context("Failed to extract configuration")?;

        validate_app_config(&app_config)?;

        Ok(app_config)
    }

    /// Save configuration to file
    pub fn save_to_file<P: AsRef<Path>>(&self, config: &AppConfig, path: P) -> Result<()> {
        let toml_string =
            toml::to_string_pretty(config).config_context("Failed to serialize config to TOML")?;

        std::fs::write(path.as_ref(), toml_string).config_context("Failed to write config file")?;

        Ok(())
    }

    /// Get the current configuration file path
    pub fn config_path(&self) -> Option<&Path> {
        self.config_path.as_deref()
    }

    /// File `load` reads: the explicit path, or the first discovered default
    ///
    /// An explicit path is returned even when it does not exist.
    pub fn source_path(&self) -> Option<PathBuf> {
        self.config_path
            .clone()
            .or_else(Self::find_default_config_path)
    }

    /// Find the first existing default configuration file
    fn find_default_config_path() -> Option<PathBuf> {
        let current_dir = env::current_dir().ok()?;

        let candidates = vec![
            Some(current_dir.join(DEFAULT_CONFIG_FILENAME)),
            Some(
                current_dir
                    .join(DEFAULT_CONFIG_DIR)
                    .join(DEFAULT_CONFIG_FILENAME),
            ),
            dirs::config_dir().map(|d| d.join(DEFAULT_CONFIG_DIR).join(DEFAULT_CONFIG_FILENAME)),
            dirs::home_dir().map(|d| {
                d.join(format!(".{}", DEFAULT_CONFIG_DIR))
                    .join(DEFAULT_CONFIG_FILENAME)
            }),
        ];

        candidates.into_iter().flatten().find(|path| path.exists())
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

/// Validate application configuration
///
/// Performs validation of all configuration sections.
pub fn validate_app_config(config: &AppConfig) -> Result<()> {
    validate_store_config(&config.store)?;
    validate_lock_config(&config.lock)?;
    validate_inventory_config(&config.inventory)?;
    validate_optimistic_config(&config.optimistic)?;
    validate_logging_config(&config.logging)?;
    Ok(())
}

fn validate_store_config(config: &StoreConfig) -> Result<()> {
    if config.backend == StoreBackend::Redis {
        let url = config.url.trim();
        if url.is_empty() {
            return Err(Error::config("Store URL cannot be empty for the redis backend"));
        }
        if !["redis://", "rediss://", "unix://", "redis+unix://"]
            .iter()
            .any(|scheme| url.starts_with(scheme))
        {
            return Err(Error::config(format!(
                "Store URL must use a redis:// or rediss:// scheme: {}",
                url
            )));
        }
    }
    Ok(())
}

fn validate_lock_config(config: &LockConfig) -> Result<()> {
    config.lock_name()?;
    config.to_options().validate()
}

fn validate_inventory_config(config: &InventoryConfig) -> Result<()> {
    config.stock_key()?;
    if config.restock_units < 0 {
        return Err(Error::config("Restock units cannot be negative"));
    }
    Ok(())
}

fn validate_optimistic_config(config: &RetryPolicy) -> Result<()> {
    config.validate()
}

fn validate_logging_config(config: &LoggingConfig) -> Result<()> {
    parse_log_level(&config.level).map(|_| ())
}

/// Configuration builder for programmatic configuration
pub struct ConfigBuilder {
    config: AppConfig,
}

impl ConfigBuilder {
    /// Create a new configuration builder with defaults
    pub fn new() -> Self {
        Self {
            config: AppConfig::default(),
        }
    }

    /// Set store configuration
    pub fn with_store(mut self, store: StoreConfig) -> Self {
        self.config.store = store;
        self
    }

    /// Use the in-memory store
    pub fn with_memory_store(mut self) -> Self {
        self.config.store.backend = StoreBackend::Memory;
        self
    }

    /// Set lock configuration
    pub fn with_lock(mut self, lock: LockConfig) -> Self {
        self.config.lock = lock;
        self
    }

    /// Set the default concurrency strategy
    pub fn with_strategy(mut self, strategy: ConcurrencyStrategy) -> Self {
        self.config.inventory.strategy = strategy;
        self
    }

    /// Set inventory configuration
    pub fn with_inventory(mut self, inventory: InventoryConfig) -> Self {
        self.config.inventory = inventory;
        self
    }

    /// Set the optimistic retry policy
    pub fn with_retry_policy(mut self, policy: RetryPolicy) -> Self {
        self.config.optimistic = policy;
        self
    }

    /// Set logging configuration
    pub fn with_logging(mut self, logging: LoggingConfig) -> Self {
        self.config.logging = logging;
        self
    }

    /// Build the configuration
    pub fn build(self) -> AppConfig {
        self.config
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
