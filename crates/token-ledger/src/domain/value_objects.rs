//! # Value Objects
//!
//! Immutable primitives of the ledger domain: account addresses, amounts and
//! tax rates expressed in basis points.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// Re-export U256 from primitive-types for 256-bit balances
pub use primitive_types::U256;

/// Denominator for every rate in the ledger (100.00%).
pub const MAX_TAX: u16 = 10_000;

// =============================================================================
// ADDRESS (20 bytes)
// =============================================================================

/// A 20-byte account address.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub struct Address(pub [u8; 20]);

impl Address {
    /// The null address (0x0000...0000).
    pub const ZERO: Self = Self([0u8; 20]);

    /// Creates an address from a 20-byte array.
    #[must_use]
    pub const fn new(bytes: [u8; 20]) -> Self {
        Self(bytes)
    }

    /// Creates an address whose bytes are all `byte`. Handy for fixtures.
    #[must_use]
    pub const fn repeat_byte(byte: u8) -> Self {
        Self([byte; 20])
    }

    /// Creates an address from a slice. Returns None if wrong length.
    #[must_use]
    pub fn from_slice(slice: &[u8]) -> Option<Self> {
        if slice.len() == 20 {
            let mut bytes = [0u8; 20];
            bytes.copy_from_slice(slice);
            Some(Self(bytes))
        } else {
            None
        }
    }

    /// Returns the underlying bytes.
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; 20] {
        &self.0
    }

    /// Returns true if this is the null address.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; 20]
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x")?;
        for byte in &self.0[..4] {
            write!(f, "{byte:02x}")?;
        }
        write!(f, "...")?;
        for byte in &self.0[18..] {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

/// Error returned when parsing an address from hex.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AddressParseError {
    /// Input was not valid hex.
    #[error("invalid hex: {0}")]
    InvalidHex(String),

    /// Input decoded to the wrong number of bytes.
    #[error("invalid address length: expected 20 bytes, got {0}")]
    InvalidLength(usize),
}

impl FromStr for Address {
    type Err = AddressParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.strip_prefix("0x").unwrap_or(s);
        let bytes = hex::decode(trimmed).map_err(|e| AddressParseError::InvalidHex(e.to_string()))?;
        Self::from_slice(&bytes).ok_or(AddressParseError::InvalidLength(bytes.len()))
    }
}

impl From<[u8; 20]> for Address {
    fn from(bytes: [u8; 20]) -> Self {
        Self(bytes)
    }
}

impl From<Address> for [u8; 20] {
    fn from(addr: Address) -> Self {
        addr.0
    }
}

// =============================================================================
// BASIS POINTS
// =============================================================================

/// A rate in basis points (1/10000).
///
/// Construction does not clamp: a value above [`MAX_TAX`] is representable so
/// that callers can be told precisely which rate was rejected.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub struct BasisPoints(pub u16);

impl BasisPoints {
    /// 0%.
    pub const ZERO: Self = Self(0);

    /// 100%.
    pub const MAX: Self = Self(MAX_TAX);

    /// Creates a rate from raw basis points.
    #[must_use]
    pub const fn new(bps: u16) -> Self {
        Self(bps)
    }

    /// Raw basis points.
    #[must_use]
    pub const fn get(self) -> u16 {
        self.0
    }

    /// True if the rate is within `[0, MAX_TAX]`.
    #[must_use]
    pub const fn is_valid(self) -> bool {
        self.0 <= MAX_TAX
    }

    /// Applies this rate to `amount`, rounding down.
    ///
    /// Splits `amount` into `q * MAX_TAX + r` so that no intermediate product
    /// exceeds `amount`; exact for every `U256` when the rate is valid.
    /// Returns `None` only for rates above `MAX_TAX` whose result overflows.
    #[must_use]
    pub fn apply(self, amount: U256) -> Option<U256> {
        let denominator = U256::from(MAX_TAX);
        let rate = U256::from(self.0);
        let quotient = amount / denominator;
        let remainder = amount % denominator;

        let whole = quotient.checked_mul(rate)?;
        // remainder < 10_000 and rate <= u16::MAX, cannot overflow
        let partial = remainder * rate / denominator;
        whole.checked_add(partial)
    }
}

impl fmt::Debug for BasisPoints {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}bps", self.0)
    }
}

impl fmt::Display for BasisPoints {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:02}%", self.0 / 100, self.0 % 100)
    }
}

impl From<u16> for BasisPoints {
    fn from(bps: u16) -> Self {
        Self(bps)
    }
}

// =============================================================================
// TESTS
// =============================================================================
