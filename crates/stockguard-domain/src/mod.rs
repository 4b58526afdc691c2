//! # StockGuard Domain
//!
//! Core types shared by every StockGuard crate: the error taxonomy, the
//! value objects describing locks and inventory outcomes, and the ports
//! a coordination store backend must implement.
//!
//! ## Module Overview
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`error`] | Error type and `Result` alias |
//! | [`constants`] | Default key names, lease timings and retry bounds |
//! | [`value_objects`] | Lock names, holder identities, outcomes |
//! | [`ports`] | Store contracts (atomic scripts, counters, watch sessions) |

pub mod constants;
pub mod error;
pub mod ports;
pub mod value_objects;

pub use error::{Error, Result};
pub use value_objects::*;
