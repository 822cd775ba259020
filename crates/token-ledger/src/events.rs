//! # Change Records
//!
//! Structured records emitted by every successful mutating call, intended for
//! external observers and auditors. A failed call emits nothing.
//!
//! | Record | Emitted by |
//! |--------|------------|
//! | `Transfer` | transfer, transfer_from (one per leg), mint (from null) |
//! | `TaxApplied` | transfer, transfer_from (every transfer, any decision) |
//! | `Approval` | approve, increase/decrease allowance, transfer_from |
//! | `RoleUpdated` | set_governance/oracle/rbs/treasury/authorization_collaborator |
//! | `TaxRatesUpdated` | set_tax_rates |
//! | `WhitelistUpdated` | update_whitelist |
//! | `GovernanceListUpdated` | update_governance_list |
//! | `Paused` / `Unpaused` | pause / unpause |

use crate::domain::classification::GovernanceList;
use crate::domain::roles::Role;
use crate::domain::tax::TaxDecision;
use crate::domain::value_objects::{Address, BasisPoints, U256};
use serde::{Deserialize, Serialize};

/// A change record.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TokenEvent {
    /// Value moved between accounts (`from` is null for mints).
    Transfer {
        /// Debited account.
        from: Address,
        /// Credited account.
        to: Address,
        /// Amount moved.
        amount: U256,
    },
    /// Outcome of the tax policy for one transfer.
    TaxApplied {
        /// Sender.
        from: Address,
        /// Receiver.
        to: Address,
        /// Which rule applied.
        decision: TaxDecision,
        /// Applied rate.
        rate: BasisPoints,
        /// Amount sent to the recipient.
        tax_amount: U256,
        /// Tax recipient (treasury).
        recipient: Address,
    },
    /// Allowance changed.
    Approval {
        /// Owner of the balance.
        owner: Address,
        /// Delegated spender.
        spender: Address,
        /// Previous allowance.
        old_amount: U256,
        /// New allowance.
        new_amount: U256,
    },
    /// A role changed hands.
    RoleUpdated {
        /// Which role.
        role: Role,
        /// Previous holder.
        old: Address,
        /// New holder.
        new: Address,
    },
    /// Buy/sell rates changed.
    TaxRatesUpdated {
        /// Previous buy rate.
        old_buy: BasisPoints,
        /// New buy rate.
        new_buy: BasisPoints,
        /// Previous sell rate.
        old_sell: BasisPoints,
        /// New sell rate.
        new_sell: BasisPoints,
    },
    /// Whitelist membership changed.
    WhitelistUpdated {
        /// Account.
        account: Address,
        /// Previous flag.
        old: bool,
        /// New flag.
        new: bool,
    },
    /// Governance list membership changed.
    GovernanceListUpdated {
        /// Account.
        account: Address,
        /// Which list.
        list: GovernanceList,
        /// Previous flag.
        old: bool,
        /// New flag.
        new: bool,
    },
    /// Ledger paused.
    Paused {
        /// Governance caller.
        by: Address,
    },
    /// Ledger resumed.
    Unpaused {
        /// Governance caller.
        by: Address,
    },
}

impl TokenEvent {
    /// Short name of the record kind.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Transfer { .. } => "transfer",
            Self::TaxApplied { .. } => "tax_applied",
            Self::Approval { .. } => "approval",
            Self::RoleUpdated { .. } => "role_updated",
            Self::TaxRatesUpdated { .. } => "tax_rates_updated",
            Self::WhitelistUpdated { .. } => "whitelist_updated",
            Self::GovernanceListUpdated { .. } => "governance_list_updated",
            Self::Paused { .. } => "paused",
            Self::Unpaused { .. } => "unpaused",
        }
    }

    /// Addresses the record concerns, for indexing.
    #[must_use]
    pub fn affected_addresses(&self) -> Vec<Address> {
        match self {
            Self::Transfer { from, to, .. } => vec![*from, *to],
            Self::TaxApplied {
                from,
                to,
                recipient,
                ..
            } => vec![*from, *to, *recipient],
            Self::Approval { owner, spender, .. } => vec![*owner, *spender],
            Self::RoleUpdated { old, new, .. } => vec![*old, *new],
            Self::TaxRatesUpdated { .. } => Vec::new(),
            Self::WhitelistUpdated { account, .. }
            | Self::GovernanceListUpdated { account, .. } => vec![*account],
            Self::Paused { by } | Self::Unpaused { by } => vec![*by],
        }
    }

    /// Serializes the record as a JSON line for audit trails.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

// =============================================================================
// TESTS
// =============================================================================
