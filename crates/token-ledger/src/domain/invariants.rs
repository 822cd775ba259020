//! # Domain Invariants
//!
//! Properties that MUST hold before and after every public call.
//!
//! - INVARIANT-1: Conservation (`sum(balances) == total_supply`)
//! - INVARIANT-2: Tax rates within `[0, MAX_TAX]`
//! - INVARIANT-3: No role held by the null address

use crate::domain::roles::Role;
use crate::domain::state::TokenState;
use crate::domain::value_objects::{BasisPoints, U256};

// =============================================================================
// INVARIANT CHECKS
// =============================================================================

/// INVARIANT-1: Conservation
///
/// Transfers and tax legs only move value; mint raises supply and one
/// balance by the same amount.
#[must_use]
pub fn check_conservation(state: &TokenState) -> bool {
    state.balances.sum_of_balances() == Some(state.balances.total_supply())
}

/// INVARIANT-2: Tax rates bounded
#[must_use]
pub fn check_tax_rates(state: &TokenState) -> bool {
    state.tax.buy_tax().is_valid() && state.tax.sell_tax().is_valid()
}

/// INVARIANT-3: Roles non-null
#[must_use]
pub fn check_roles(state: &TokenState) -> bool {
    Role::ALL.iter().all(|role| !state.roles.get(*role).is_zero())
}

/// Check all invariants at once.
#[must_use]
pub fn check_all_invariants(state: &TokenState) -> InvariantCheckResult {
    let mut violations = Vec::new();

    if !check_conservation(state) {
        violations.push(InvariantViolation::SupplyMismatch {
            sum_of_balances: state.balances.sum_of_balances(),
            total_supply: state.balances.total_supply(),
        });
    }

    if !check_tax_rates(state) {
        violations.push(InvariantViolation::TaxRateOutOfRange {
            buy: state.tax.buy_tax(),
            sell: state.tax.sell_tax(),
        });
    }

    for role in Role::ALL {
        if state.roles.get(role).is_zero() {
            violations.push(InvariantViolation::NullRole(role));
        }
    }

    if violations.is_empty() {
        InvariantCheckResult::Valid
    } else {
        InvariantCheckResult::Invalid(violations)
    }
}

// =============================================================================
// RESULT TYPES
// =============================================================================

/// Result of checking invariants.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InvariantCheckResult {
    /// All invariants hold.
    Valid,
    /// One or more invariants violated.
    Invalid(Vec<InvariantViolation>),
}

impl InvariantCheckResult {
    /// Returns true if all invariants hold.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }
}

/// A specific invariant violation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InvariantViolation {
    /// Balances do not add up to total supply (`None` if the sum overflows).
    SupplyMismatch {
        /// Sum of all balances.
        sum_of_balances: Option<U256>,
        /// Recorded total supply.
        total_supply: U256,
    },
    /// A rate exceeds 100%.
    TaxRateOutOfRange {
        /// Buy rate.
        buy: BasisPoints,
        /// Sell rate.
        sell: BasisPoints,
    },
    /// A role is the null address.
    NullRole(Role),
}

// =============================================================================
// TESTS
// =============================================================================
