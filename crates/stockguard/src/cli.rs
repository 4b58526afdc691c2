//! Flash sale command line
//!
//! Loads configuration, applies command line overrides, optionally resets
//! the stock counter and then runs one flash sale against the configured
//! store.

use clap::Parser;
use std::path::PathBuf;
use stockguard_application::{FlashSale, FlashSaleReport};
use stockguard_domain::error::{Error, Result};
use stockguard_domain::value_objects::ConcurrencyStrategy;
use stockguard_infrastructure::config::{AppConfig, ConfigLoader, StoreBackend};
use stockguard_infrastructure::constants::DEFAULT_FLASH_SALE_BUYERS;
use stockguard_infrastructure::di::bootstrap;
use stockguard_infrastructure::error_ext::ErrorContext;
use stockguard_infrastructure::logging::{init_logging, log_config_source};

/// Command line interface for StockGuard
#[derive(Parser, Debug)]
#[command(name = "stockguard")]
#[command(about = "StockGuard - run a flash sale without overselling")]
#[command(version)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Store backend, overriding `store.backend`
    #[arg(long)]
    pub store: Option<StoreBackend>,

    /// Concurrency strategy, overriding `inventory.strategy`
    #[arg(short, long)]
    pub strategy: Option<ConcurrencyStrategy>,

    /// Number of concurrent buyers
    #[arg(short, long, default_value_t = DEFAULT_FLASH_SALE_BUYERS)]
    pub buyers: usize,

    /// Units to put on sale, overriding `inventory.restock_units`
    #[arg(long, conflicts_with = "keep_stock")]
    pub stock: Option<i64>,

    /// Sell whatever the counter currently holds instead of resetting it
    ///
    /// Use this when several processes share one sale.
    #[arg(long)]
    pub keep_stock: bool,

    /// Print the report as JSON
    #[arg(long)]
    pub json: bool,
}

impl Cli {
    /// Configuration loader honouring `--config`
    pub fn loader(&self) -> ConfigLoader {
        match &self.config {
            Some(path) => ConfigLoader::new().with_config_path(path),
            None => ConfigLoader::new(),
        }
    }

    /// Load configuration and apply the command line overrides
    pub fn resolve_config(&self) -> Result<AppConfig> {
        let mut config = self.loader().load()?;

        if let Some(backend) = self.store {
            config.store.backend = backend;
        }
        if let Some(strategy) = self.strategy {
            config.inventory.strategy = strategy;
        }
        if let Some(stock) = self.stock {
            if stock < 0 {
                return Err(Error::invalid_argument("Stock cannot be negative"));
            }
            config.inventory.restock_units = stock;
        }
        Ok(config)
    }
}

/// Run one flash sale as described by `cli`
///
/// Installs the global logging subscriber, so call at most once per process.
pub async fn run(cli: &Cli) -> Result<FlashSaleReport> {
    let config = cli.resolve_config()?;
    init_logging(config.logging.clone())?;
    log_config_source(cli.loader().source_path().as_deref());

    let context = bootstrap(config)?;
    let inventory = context.default_inventory();

    if !cli.keep_stock {
        inventory
            .restock(context.config.inventory.restock_units)
            .await?;
    }

    FlashSale::new(inventory).run(cli.buyers).await
}

/// Render a report for stdout
pub fn render(report: &FlashSaleReport, json: bool) -> Result<String> {
    if json {
        serde_json::to_string(report).context("Failed to encode report")
    } else {
        Ok(report.to_string())
    }
}
