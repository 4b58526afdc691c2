//! Use Cases
//!
//! Orchestrations built on the inventory services.

pub mod flash_sale;

pub use flash_sale::{FlashSale, FlashSaleReport};
