//! # Tax Policy
//!
//! Decides, per transfer, whether it is taxed and at which rate.
//!
//! Rules are evaluated in priority order and the first match wins:
//!
//! | # | Condition | Decision | Rate |
//! |---|-----------|----------|------|
//! | 1 | `from` or `to` whitelisted | `Exempt` | 0 |
//! | 2 | `from` long OR `to` short | `Buy` | `buy_tax` |
//! | 3 | `to` long OR `from` short | `Sell` | `sell_tax` |
//! | 4 | otherwise | `Untaxed` | 0 |
//!
//! An account on both governance lists therefore always resolves to `Buy`.

use crate::domain::classification::ClassificationRegistry;
use crate::domain::value_objects::{Address, BasisPoints, U256};
use crate::errors::{TokenError, TokenResult};
use serde::{Deserialize, Serialize};

/// Classification of a transfer by the tax policy.
///
/// `Exempt` and `Untaxed` both produce zero tax but are different outcomes:
/// the first is a whitelist exemption, the second a transfer no rule matched.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TaxDecision {
    /// A party is whitelisted.
    Exempt,
    /// Buy-side transfer, taxed at `buy_tax`.
    Buy,
    /// Sell-side transfer, taxed at `sell_tax`.
    Sell,
    /// No classification rule matched.
    Untaxed,
}

impl TaxDecision {
    /// Lower-case label for logs and metrics.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Exempt => "exempt",
            Self::Buy => "buy",
            Self::Sell => "sell",
            Self::Untaxed => "untaxed",
        }
    }
}

/// Result of running the policy against one transfer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxQuote {
    /// Which rule applied.
    pub decision: TaxDecision,
    /// Rate that was applied.
    pub rate: BasisPoints,
    /// Amount redirected to the recipient.
    pub tax_amount: U256,
    /// Amount that reaches the receiver.
    pub net_amount: U256,
    /// Where the tax goes (always the treasury).
    pub recipient: Address,
}

impl TaxQuote {
    /// True if a non-zero amount is redirected.
    #[must_use]
    pub fn is_taxed(&self) -> bool {
        !self.tax_amount.is_zero()
    }
}

/// Buy and sell rates.
///
/// INVARIANT: both rates are `<= MAX_TAX`; only [`TaxPolicy::new`] and
/// [`TaxPolicy::set_rates`] write them and both validate.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxPolicy {
    buy_tax: BasisPoints,
    sell_tax: BasisPoints,
}

impl TaxPolicy {
    /// Creates a policy, rejecting rates above 100%.
    pub fn new(buy_tax: BasisPoints, sell_tax: BasisPoints) -> TokenResult<Self> {
        validate_rate(buy_tax)?;
        validate_rate(sell_tax)?;
        Ok(Self { buy_tax, sell_tax })
    }

    /// Current buy rate.
    #[must_use]
    pub fn buy_tax(&self) -> BasisPoints {
        self.buy_tax
    }

    /// Current sell rate.
    #[must_use]
    pub fn sell_tax(&self) -> BasisPoints {
        self.sell_tax
    }

    /// Replaces both rates. Returns the previous `(buy, sell)`.
    pub fn set_rates(
        &mut self,
        buy_tax: BasisPoints,
        sell_tax: BasisPoints,
    ) -> TokenResult<(BasisPoints, BasisPoints)> {
        let updated = Self::new(buy_tax, sell_tax)?;
        let previous = (self.buy_tax, self.sell_tax);
        *self = updated;
        Ok(previous)
    }

    /// Classifies a transfer and returns the rate that applies.
    #[must_use]
    pub fn classify(
        &self,
        registry: &ClassificationRegistry,
        from: &Address,
        to: &Address,
    ) -> (TaxDecision, BasisPoints) {
        if registry.is_whitelisted(from) || registry.is_whitelisted(to) {
            (TaxDecision::Exempt, BasisPoints::ZERO)
        } else if registry.is_long(from) || registry.is_short(to) {
            (TaxDecision::Buy, self.buy_tax)
        } else if registry.is_long(to) || registry.is_short(from) {
            (TaxDecision::Sell, self.sell_tax)
        } else {
            (TaxDecision::Untaxed, BasisPoints::ZERO)
        }
    }

    /// Computes the tax owed on moving `amount` from `from` to `to`.
    pub fn compute_tax(
        &self,
        registry: &ClassificationRegistry,
        treasury: Address,
        from: &Address,
        to: &Address,
        amount: U256,
    ) -> TokenResult<TaxQuote> {
        let (decision, rate) = self.classify(registry, from, to);
        let tax_amount = rate.apply(amount).ok_or(TokenError::ArithmeticOverflow)?;
        // rate <= MAX_TAX so tax_amount <= amount
        let net_amount = amount
            .checked_sub(tax_amount)
            .ok_or(TokenError::ArithmeticOverflow)?;

        Ok(TaxQuote {
            decision,
            rate,
            tax_amount,
            net_amount,
            recipient: treasury,
        })
    }
}

fn validate_rate(rate: BasisPoints) -> TokenResult<()> {
    if rate.is_valid() {
        Ok(())
    } else {
        Err(TokenError::InvalidTaxRate {
            rate,
            max: BasisPoints::MAX,
        })
    }
}

// =============================================================================
// TESTS
// =============================================================================
