//! # Ledger State
//!
//! The single owned aggregate holding every piece of durable state. The
//! service keeps exactly one of these behind a lock; nothing is global.

use crate::domain::allowances::AllowanceLedger;
use crate::domain::balances::BalanceLedger;
use crate::domain::classification::ClassificationRegistry;
use crate::domain::pause::PauseSwitch;
use crate::domain::roles::RoleStore;
use crate::domain::tax::TaxPolicy;
use crate::domain::value_objects::{Address, U256};
use crate::errors::TokenResult;
use serde::{Deserialize, Serialize};

/// Token metadata, fixed at construction.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenMetadata {
    /// Human-readable name.
    pub name: String,
    /// Ticker symbol.
    pub symbol: String,
    /// Display decimals.
    pub decimals: u8,
}

/// Everything the ledger persists.
#[derive(Clone, Debug)]
pub struct TokenState {
    /// Name, symbol, decimals.
    pub metadata: TokenMetadata,
    /// Balances and total supply.
    pub balances: BalanceLedger,
    /// Delegated spending limits.
    pub allowances: AllowanceLedger,
    /// Whitelist and governance lists.
    pub registry: ClassificationRegistry,
    /// Buy/sell rates.
    pub tax: TaxPolicy,
    /// Role holders.
    pub roles: RoleStore,
    /// Emergency switch.
    pub pause: PauseSwitch,
}

impl TokenState {
    /// Builds the genesis state.
    ///
    /// Mints `initial_supply` to governance and whitelists governance,
    /// treasury, oracle and rbs plus any `extra_whitelist` entries.
    pub fn genesis(
        metadata: TokenMetadata,
        roles: RoleStore,
        tax: TaxPolicy,
        initial_supply: U256,
        extra_whitelist: &[Address],
    ) -> TokenResult<Self> {
        let mut balances = BalanceLedger::new();
        balances.mint(roles.governance(), initial_supply)?;

        let mut registry = ClassificationRegistry::new();
        for account in [roles.governance(), roles.treasury(), roles.oracle(), roles.rbs()]
            .iter()
            .chain(extra_whitelist)
        {
            registry.set_whitelist(*account, true);
        }

        Ok(Self {
            metadata,
            balances,
            allowances: AllowanceLedger::new(),
            registry,
            tax,
            roles,
            pause: PauseSwitch::new(),
        })
    }
}
