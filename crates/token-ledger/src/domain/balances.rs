//! # Balance Ledger
//!
//! Per-account balances and total supply.
//!
//! INVARIANT: `sum(balances) == total_supply` after every public method.
//! Outside of `mint`, balances change only as [`Leg`]s: every debit is paired
//! with a credit of the same amount.
//! Multi-leg movements are staged against a scratch view of the touched
//! accounts and committed only once every leg has been checked.

use crate::domain::value_objects::{Address, U256};
use crate::errors::{TokenError, TokenResult};
use std::collections::{BTreeMap, HashMap};

/// One debit/credit pair moving `amount` from `from` to `to`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Leg {
    /// Debited account.
    pub from: Address,
    /// Credited account.
    pub to: Address,
    /// Amount moved.
    pub amount: U256,
}

impl Leg {
    /// Creates a leg.
    #[must_use]
    pub const fn new(from: Address, to: Address, amount: U256) -> Self {
        Self { from, to, amount }
    }
}

/// Balances and total supply.
#[derive(Clone, Debug, Default)]
pub struct BalanceLedger {
    balances: HashMap<Address, U256>,
    total_supply: U256,
}

impl BalanceLedger {
    /// Creates an empty ledger with zero supply.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Balance of `account` (zero if never credited).
    #[must_use]
    pub fn balance_of(&self, account: &Address) -> U256 {
        self.balances.get(account).copied().unwrap_or_default()
    }

    /// Total supply.
    #[must_use]
    pub fn total_supply(&self) -> U256 {
        self.total_supply
    }

    /// Number of accounts that have ever held a balance.
    #[must_use]
    pub fn account_count(&self) -> usize {
        self.balances.len()
    }

    /// Sum of every balance, or `None` if it does not fit a `U256`.
    #[must_use]
    pub fn sum_of_balances(&self) -> Option<U256> {
        self.balances
            .values()
            .try_fold(U256::zero(), |acc, balance| acc.checked_add(*balance))
    }

    /// Creates `amount` new tokens in `account`.
    ///
    /// The only operation that increases total supply.
    pub fn mint(&mut self, account: Address, amount: U256) -> TokenResult<()> {
        if account.is_zero() {
            return Err(TokenError::ZeroAddress);
        }
        let new_supply = self
            .total_supply
            .checked_add(amount)
            .ok_or(TokenError::ArithmeticOverflow)?;
        let new_balance = self
            .balance_of(&account)
            .checked_add(amount)
            .ok_or(TokenError::ArithmeticOverflow)?;

        self.total_supply = new_supply;
        self.balances.insert(account, new_balance);
        Ok(())
    }

    /// Checks whether `account` can cover `amount`.
    pub fn ensure_covers(&self, account: &Address, amount: U256) -> TokenResult<()> {
        let available = self.balance_of(account);
        if available < amount {
            return Err(TokenError::InsufficientBalance {
                required: amount,
                available,
            });
        }
        Ok(())
    }

    /// Applies every leg in order, or none of them.
    pub fn apply(&mut self, legs: &[Leg]) -> TokenResult<()> {
        let mut staged: BTreeMap<Address, U256> = BTreeMap::new();

        for leg in legs {
            let from_balance = staged
                .get(&leg.from)
                .copied()
                .unwrap_or_else(|| self.balance_of(&leg.from));
            let debited = from_balance.checked_sub(leg.amount).ok_or(
                TokenError::InsufficientBalance {
                    required: leg.amount,
                    available: from_balance,
                },
            )?;
            staged.insert(leg.from, debited);

            let to_balance = staged
                .get(&leg.to)
                .copied()
                .unwrap_or_else(|| self.balance_of(&leg.to));
            let credited = to_balance
                .checked_add(leg.amount)
                .ok_or(TokenError::ArithmeticOverflow)?;
            staged.insert(leg.to, credited);
        }

        self.balances.extend(staged);
        Ok(())
    }
}

// =============================================================================
// TESTS
// =============================================================================
