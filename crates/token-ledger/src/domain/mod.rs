//! # Domain Layer (Inner Hexagon)
//!
//! Pure ledger logic: balances, allowances, classification, tax policy,
//! transfer planning, roles and the pause switch.
//! NO I/O, NO logging, NO knowledge of the authorization collaborator.

pub mod allowances;
pub mod balances;
pub mod classification;
pub mod invariants;
pub mod pause;
pub mod roles;
pub mod state;
pub mod tax;
pub mod transfer;
pub mod value_objects;

pub use allowances::*;
pub use balances::*;
pub use classification::*;
pub use invariants::*;
pub use pause::*;
pub use roles::*;
pub use state::*;
pub use tax::*;
pub use transfer::*;
pub use value_objects::*;
