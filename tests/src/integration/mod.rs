//! # Integration Tests
//!
//! Ledger behaviour through the public ports only.

pub mod flows;
pub mod properties;
