//! StockGuard - Entry Point
//!
//! Binary entry point running one flash sale. Lives in the `stockguard`
//! facade crate next to the library it drives.
//!
//! ## Examples
//!
//! | Command | Description |
//! |---------|-------------|
//! | `stockguard` | Lock strategy against `redis://127.0.0.1:6379` |
//! | `stockguard -s optimistic -b 500 --stock 100` | Optimistic strategy, 500 buyers for 100 units |
//! | `stockguard --store memory --json` | In-process store, JSON report |
//! | `stockguard --keep-stock` | Join a sale another process already stocked |

use clap::Parser;
use stockguard::cli::{Cli, render, run};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let report = run(&cli).await?;
    println!("{}", render(&report, cli.json)?);
    Ok(())
}
