//! # token-ledger
//!
//! Fungible-token ledger with taxed transfers, role-gated administration and
//! an emergency pause switch.
//!
//! ## Overview
//!
//! - **Balances and allowances**: standard transfer, approve and delegated
//!   transfer, with total supply always equal to the sum of balances
//! - **Tax policy**: buy/sell rates in basis points, selected by whitelist and
//!   governance-list classification, redirected to the treasury
//! - **Access control**: governance confirmed by an external multi-signature
//!   collaborator (fail closed), minting restricted to oracle and rbs
//! - **Pause switch**: halts every mutation except `pause`/`unpause`
//!
//! ## Architecture
//!
//! ```text
//! caller ──→ TokenApi / AdminApi / TokenQuery ──→ TokenService
//!                                                   │
//!                       ┌───────────────────────────┼─────────────────────┐
//!                       ▼                           ▼                     ▼
//!                 PauseSwitch              AccessController        TransferPlan
//!                                                   │                     │
//!                                      AuthorizationOracle (port)   TaxPolicy + BalanceLedger
//!                                                                         │
//!                                                               EventSink (port)
//! ```
//!
//! ## Tax Rules
//!
//! | # | Condition | Decision |
//! |---|-----------|----------|
//! | 1 | either party whitelisted | `Exempt` |
//! | 2 | `from` long or `to` short | `Buy` |
//! | 3 | `to` long or `from` short | `Sell` |
//! | 4 | otherwise | `Untaxed` |
//!
//! ## Example
//!
//! ```rust,ignore
//! use token_ledger::prelude::*;
//!
//! let service = TokenService::new(TokenConfig::from_env()?, authorizer, TracingEventSink)?;
//! service.transfer(alice, bob, U256::from(1_000))?;
//! ```

// Crate-level lints
#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

// =============================================================================
// MODULES
// =============================================================================

pub mod access;
pub mod adapters;
pub mod config;
pub mod domain;
pub mod errors;
pub mod events;
pub mod ports;
pub mod service;

// =============================================================================
// PRELUDE
// =============================================================================

/// Convenient re-exports for common usage.
pub mod prelude {
    // Value objects
    pub use crate::domain::value_objects::{Address, AddressParseError, BasisPoints, MAX_TAX, U256};

    // Domain
    pub use crate::domain::classification::GovernanceList;
    pub use crate::domain::pause::PauseState;
    pub use crate::domain::roles::Role;
    pub use crate::domain::state::{TokenMetadata, TokenState};
    pub use crate::domain::tax::{TaxDecision, TaxQuote};
    pub use crate::domain::transfer::{TransferPlan, TransferReceipt};

    // Invariants
    pub use crate::domain::invariants::{
        check_all_invariants, InvariantCheckResult, InvariantViolation,
    };

    // Ports
    pub use crate::ports::inbound::{AdminApi, TokenApi, TokenQuery};
    pub use crate::ports::outbound::{AuthorizationOracle, EventSink};

    // Adapters
    pub use crate::adapters::{
        InMemoryEventLog, NoOpEventSink, QuorumAuthorizer, StaticAuthorizer, TracingEventSink,
        UnavailableAuthorizer,
    };

    // Events
    pub use crate::events::TokenEvent;

    // Errors
    pub use crate::errors::{AuthorizationError, SinkError, TokenError, TokenResult};

    // Configuration
    pub use crate::config::{ConfigError, RoleConfig, TokenConfig};

    // Service
    pub use crate::service::{ServiceStats, TokenService};
    #[cfg(any(test, feature = "test-utils"))]
    pub use crate::service::{create_test_service, TEST_ROLES};
}

pub use errors::{TokenError, TokenResult};
pub use service::TokenService;

// =============================================================================
// CRATE INFO
// =============================================================================

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// =============================================================================
// TESTS
// =============================================================================
