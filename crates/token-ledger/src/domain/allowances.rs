//! # Allowance Ledger
//!
//! Delegated spending limits keyed by `(owner, spender)`.
//! An allowance of `U256::MAX` is unlimited and never decremented.

use crate::domain::value_objects::{Address, U256};
use crate::errors::{TokenError, TokenResult};
use std::collections::HashMap;

/// Per-owner-per-spender allowances.
#[derive(Clone, Debug, Default)]
pub struct AllowanceLedger {
    allowances: HashMap<(Address, Address), U256>,
}

impl AllowanceLedger {
    /// Creates an empty allowance ledger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current allowance of `spender` over `owner`'s balance.
    #[must_use]
    pub fn allowance(&self, owner: &Address, spender: &Address) -> U256 {
        self.allowances
            .get(&(*owner, *spender))
            .copied()
            .unwrap_or_default()
    }

    /// True if the allowance is the unlimited sentinel.
    #[must_use]
    pub fn is_unlimited(&self, owner: &Address, spender: &Address) -> bool {
        self.allowance(owner, spender) == U256::MAX
    }

    /// Sets the allowance to `amount`, overwriting any prior value.
    ///
    /// Returns the previous allowance.
    pub fn approve(&mut self, owner: Address, spender: Address, amount: U256) -> TokenResult<U256> {
        if owner.is_zero() || spender.is_zero() {
            return Err(TokenError::ZeroAddress);
        }
        let previous = self.allowance(&owner, &spender);
        self.allowances.insert((owner, spender), amount);
        Ok(previous)
    }

    /// Allowance left after spending `amount`, without writing it.
    pub fn remaining_after_spend(
        &self,
        owner: &Address,
        spender: &Address,
        amount: U256,
    ) -> TokenResult<U256> {
        let current = self.allowance(owner, spender);
        if current == U256::MAX {
            return Ok(current);
        }
        current
            .checked_sub(amount)
            .ok_or(TokenError::InsufficientAllowance {
                required: amount,
                available: current,
            })
    }

    /// Consumes `amount` of the allowance unless it is unlimited.
    ///
    /// Returns the remaining allowance.
    pub fn spend_allowance(
        &mut self,
        owner: Address,
        spender: Address,
        amount: U256,
    ) -> TokenResult<U256> {
        let remaining = self.remaining_after_spend(&owner, &spender, amount)?;
        if remaining != U256::MAX {
            self.allowances.insert((owner, spender), remaining);
        }
        Ok(remaining)
    }

    /// Adds `added` to the allowance. Returns `(old, new)`.
    pub fn increase_allowance(
        &mut self,
        owner: Address,
        spender: Address,
        added: U256,
    ) -> TokenResult<(U256, U256)> {
        let current = self.allowance(&owner, &spender);
        let updated = current
            .checked_add(added)
            .ok_or(TokenError::ArithmeticOverflow)?;
        self.approve(owner, spender, updated)?;
        Ok((current, updated))
    }

    /// Subtracts `subtracted` from the allowance. Returns `(old, new)`.
    pub fn decrease_allowance(
        &mut self,
        owner: Address,
        spender: Address,
        subtracted: U256,
    ) -> TokenResult<(U256, U256)> {
        let current = self.allowance(&owner, &spender);
        let updated = current
            .checked_sub(subtracted)
            .ok_or(TokenError::InsufficientAllowance {
                required: subtracted,
                available: current,
            })?;
        self.approve(owner, spender, updated)?;
        Ok((current, updated))
    }
}

// =============================================================================
// TESTS
// =============================================================================
