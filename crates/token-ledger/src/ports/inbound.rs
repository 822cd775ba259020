//! # Driving Ports (API - Inbound)
//!
//! The public surface of the ledger. Every method takes the caller address
//! supplied by the host environment; nothing is derived from payloads.
//!
//! | Trait | Operations | Gate |
//! |-------|------------|------|
//! | `TokenApi` | transfer, approve, transfer_from, allowance adjustments | pause |
//! | `TokenQuery` | balances, allowances, metadata, roles, lists, rates | none |
//! | `AdminApi` | mint | oracle or rbs, pause |
//! | `AdminApi` | role setters, rates, classification | governance, pause |
//! | `AdminApi` | pause, unpause | governance |

use crate::domain::classification::GovernanceList;
use crate::domain::tax::TaxQuote;
use crate::domain::transfer::TransferReceipt;
use crate::domain::value_objects::{Address, BasisPoints, U256};
use crate::errors::TokenResult;

/// Value-moving and allowance operations open to any account.
pub trait TokenApi: Send + Sync {
    /// Moves `amount` from `caller` to `to`, taxed per policy.
    fn transfer(&self, caller: Address, to: Address, amount: U256) -> TokenResult<TransferReceipt>;

    /// Sets `caller`'s allowance for `spender` to `amount`.
    fn approve(&self, caller: Address, spender: Address, amount: U256) -> TokenResult<()>;

    /// Moves `amount` from `from` to `to` using `caller`'s allowance.
    fn transfer_from(
        &self,
        caller: Address,
        from: Address,
        to: Address,
        amount: U256,
    ) -> TokenResult<TransferReceipt>;

    /// Raises `caller`'s allowance for `spender` by `added`.
    fn increase_allowance(&self, caller: Address, spender: Address, added: U256) -> TokenResult<U256>;

    /// Lowers `caller`'s allowance for `spender` by `subtracted`.
    fn decrease_allowance(
        &self,
        caller: Address,
        spender: Address,
        subtracted: U256,
    ) -> TokenResult<U256>;
}

/// Pure reads. Never gated, never mutate.
pub trait TokenQuery: Send + Sync {
    /// Token name.
    fn name(&self) -> String;
    /// Token symbol.
    fn symbol(&self) -> String;
    /// Display decimals.
    fn decimals(&self) -> u8;
    /// Total supply.
    fn total_supply(&self) -> U256;
    /// Balance of `account`.
    fn balance_of(&self, account: Address) -> U256;
    /// Allowance of `spender` over `owner`.
    fn allowance(&self, owner: Address, spender: Address) -> U256;
    /// Governance address.
    fn governance(&self) -> Address;
    /// Oracle address.
    fn oracle(&self) -> Address;
    /// RBS address.
    fn rbs(&self) -> Address;
    /// Treasury address.
    fn treasury(&self) -> Address;
    /// Authorization collaborator address.
    fn authorization_collaborator(&self) -> Address;
    /// Current buy rate.
    fn buy_tax(&self) -> BasisPoints;
    /// Current sell rate.
    fn sell_tax(&self) -> BasisPoints;
    /// Whitelist membership.
    fn is_whitelisted(&self, account: Address) -> bool;
    /// Governance list membership.
    fn is_governance_listed(&self, account: Address, list: GovernanceList) -> bool;
    /// Pause flag.
    fn is_paused(&self) -> bool;
    /// Tax the policy would charge on a transfer, without executing it.
    fn quote_tax(&self, from: Address, to: Address, amount: U256) -> TokenResult<TaxQuote>;
}

/// Privileged operations.
pub trait AdminApi: Send + Sync {
    /// Mints `amount` to `to`. Oracle or rbs only.
    fn mint(&self, caller: Address, to: Address, amount: U256) -> TokenResult<()>;

    /// Replaces the governance address.
    fn set_governance(&self, caller: Address, governance: Address) -> TokenResult<()>;

    /// Replaces the oracle address.
    fn set_oracle(&self, caller: Address, oracle: Address) -> TokenResult<()>;

    /// Replaces the rbs address.
    fn set_rbs(&self, caller: Address, rbs: Address) -> TokenResult<()>;

    /// Replaces the treasury address.
    fn set_treasury(&self, caller: Address, treasury: Address) -> TokenResult<()>;

    /// Replaces the authorization collaborator address.
    fn set_authorization_collaborator(&self, caller: Address, collaborator: Address) -> TokenResult<()>;

    /// Replaces both tax rates.
    fn set_tax_rates(&self, caller: Address, buy: BasisPoints, sell: BasisPoints) -> TokenResult<()>;

    /// Sets whitelist membership of `account`.
    fn update_whitelist(&self, caller: Address, account: Address, listed: bool) -> TokenResult<()>;

    /// Sets governance list membership of `account`.
    fn update_governance_list(
        &self,
        caller: Address,
        account: Address,
        list: GovernanceList,
        listed: bool,
    ) -> TokenResult<()>;

    /// Engages the pause switch.
    fn pause(&self, caller: Address) -> TokenResult<()>;

    /// Releases the pause switch.
    fn unpause(&self, caller: Address) -> TokenResult<()>;
}
