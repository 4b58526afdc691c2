//! Flash Sale Use Case
//!
//! Fires a burst of concurrent buyers at one inventory service and tallies
//! what each of them got.

use crate::ports::InventoryService;
use futures::future::join_all;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use stockguard_domain::error::Result;
use stockguard_domain::value_objects::{ConcurrencyStrategy, PurchaseOutcome};

/// Tally of one flash sale
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlashSaleReport {
    /// Strategy of the service the buyers hit
    pub strategy: ConcurrencyStrategy,
    /// Buyers that got a unit
    pub purchased: usize,
    /// Buyers turned away because stock ran out
    pub sold_out: usize,
    /// Buyers whose attempt failed with an error
    pub failed: usize,
    /// Counter value after the sale
    pub remaining: i64,
}

impl FlashSaleReport {
    /// Total number of buyers
    pub fn buyers(&self) -> usize {
        self.purchased + self.sold_out + self.failed
    }
}

impl fmt::Display for FlashSaleReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} buyers ({}): {} purchased, {} sold out, {} failed, {} remaining",
            self.buyers(),
            self.strategy,
            self.purchased,
            self.sold_out,
            self.failed,
            self.remaining
        )
    }
}

/// Flash sale driver
pub struct FlashSale {
    service: Arc<dyn InventoryService>,
}

impl FlashSale {
    /// Create a sale over `service`
    pub fn new(service: Arc<dyn InventoryService>) -> Self {
        Self { service }
    }

    /// Run `buyers` concurrent purchase attempts, one task each
    ///
    /// Individual failures are counted, not propagated. Only reading the
    /// final counter can fail the whole run.
    pub async fn run(&self, buyers: usize) -> Result<FlashSaleReport> {
        let strategy = self.service.strategy();
        tracing::info!(buyers, %strategy, "[SALE] Starting flash sale");

        let attempts = (0..buyers).map(|buyer| {
            let service = Arc::clone(&self.service);
            tokio::spawn(async move {
                let outcome = service.purchase().await;
                if let Err(e) = &outcome {
                    tracing::warn!(buyer, error = %e, "[SALE] Purchase failed");
                }
                outcome
            })
        });

        let mut report = FlashSaleReport {
            strategy,
            purchased: 0,
            sold_out: 0,
            failed: 0,
            remaining: 0,
        };
        for joined in join_all(attempts).await {
            match joined {
                Ok(Ok(PurchaseOutcome::Purchased)) => report.purchased += 1,
                Ok(Ok(PurchaseOutcome::SoldOut)) => report.sold_out += 1,
                Ok(Err(_)) => report.failed += 1,
                Err(e) => {
                    tracing::warn!(error = %e, "[SALE] Buyer task aborted");
                    report.failed += 1;
                }
            }
        }

        report.remaining = self.service.remaining().await?;
        tracing::info!(
            purchased = report.purchased,
            sold_out = report.sold_out,
            failed = report.failed,
            remaining = report.remaining,
            "[SALE] Flash sale finished"
        );
        Ok(report)
    }
}
