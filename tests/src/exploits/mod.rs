//! # Exploit Simulations
//!
//! Each module models one attack against a gate and asserts the ledger
//! rejects it without changing state.

pub mod allowance_abuse;
pub mod pause_bypass;
