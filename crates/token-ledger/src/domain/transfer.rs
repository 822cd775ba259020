//! # Transfer Engine
//!
//! Validates a transfer, asks the tax policy for a quote and turns it into
//! balance legs. With tax the sender pays two legs, tax first:
//!
//! ```text
//! from ──tax_amount──→ treasury
//! from ──net_amount──→ to
//! ```
//!
//! Without tax a single leg moves the full amount. Either way the sum of
//! balance deltas is zero: tax is a redirection, never a burn or a mint.

use crate::domain::balances::Leg;
use crate::domain::state::TokenState;
use crate::domain::tax::TaxQuote;
use crate::domain::value_objects::{Address, U256};
use crate::errors::{TokenError, TokenResult};

/// A validated transfer that has not been applied yet.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransferPlan {
    /// Sender.
    pub from: Address,
    /// Receiver.
    pub to: Address,
    /// Gross amount debited from the sender.
    pub amount: U256,
    /// Tax decision and split.
    pub quote: TaxQuote,
    /// Legs in application order.
    pub legs: Vec<Leg>,
}

impl TransferPlan {
    /// Builds the plan against the current state without mutating it.
    pub fn build(state: &TokenState, from: Address, to: Address, amount: U256) -> TokenResult<Self> {
        validate_endpoints(from, to, amount)?;

        let quote = state.tax.compute_tax(
            &state.registry,
            state.roles.treasury(),
            &from,
            &to,
            amount,
        )?;
        state.balances.ensure_covers(&from, amount)?;

        let legs = if quote.is_taxed() {
            vec![
                Leg::new(from, quote.recipient, quote.tax_amount),
                Leg::new(from, to, quote.net_amount),
            ]
        } else {
            vec![Leg::new(from, to, amount)]
        };

        Ok(Self {
            from,
            to,
            amount,
            quote,
            legs,
        })
    }
}

fn validate_endpoints(from: Address, to: Address, amount: U256) -> TokenResult<()> {
    if from.is_zero() || to.is_zero() {
        return Err(TokenError::ZeroAddress);
    }
    if amount.is_zero() {
        return Err(TokenError::ZeroAmount);
    }
    Ok(())
}

/// Outcome of an applied transfer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransferReceipt {
    /// The plan that was applied.
    pub plan: TransferPlan,
    /// Allowance left after a delegated transfer.
    pub remaining_allowance: Option<U256>,
}

impl TokenState {
    /// Moves `amount` from `from` to `to`, taxed per policy.
    pub fn execute_transfer(
        &mut self,
        from: Address,
        to: Address,
        amount: U256,
    ) -> TokenResult<TransferReceipt> {
        let plan = TransferPlan::build(self, from, to, amount)?;
        self.balances.apply(&plan.legs)?;
        Ok(TransferReceipt {
            plan,
            remaining_allowance: None,
        })
    }

    /// Moves `amount` from `from` to `to` on behalf of `spender`.
    ///
    /// The allowance is checked before the balance; it is only written once
    /// the balance legs have landed.
    pub fn execute_transfer_from(
        &mut self,
        spender: Address,
        from: Address,
        to: Address,
        amount: U256,
    ) -> TokenResult<TransferReceipt> {
        validate_endpoints(from, to, amount)?;
        self.allowances.remaining_after_spend(&from, &spender, amount)?;

        let plan = TransferPlan::build(self, from, to, amount)?;
        self.balances.apply(&plan.legs)?;
        let remaining = self.allowances.spend_allowance(from, spender, amount)?;

        Ok(TransferReceipt {
            plan,
            remaining_allowance: Some(remaining),
        })
    }
}

// =============================================================================
// TESTS
// =============================================================================
