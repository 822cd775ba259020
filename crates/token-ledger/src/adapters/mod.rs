//! # Adapters Layer (Outer Hexagon)
//!
//! Concrete implementations of the driven ports.
//!
//! - Adapters implement `ports::outbound` traits
//! - The domain never depends on anything in this module

pub mod authorization;
pub mod event_sink;

pub use authorization::*;
pub use event_sink::*;
