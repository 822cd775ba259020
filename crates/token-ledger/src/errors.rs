//! # Error Types
//!
//! All error types surfaced by the ledger. Every error aborts the current call
//! and leaves durable state untouched.

use crate::config::ConfigError;
use crate::domain::value_objects::{Address, BasisPoints, U256};
use thiserror::Error;

// =============================================================================
// TOKEN ERRORS
// =============================================================================

/// Errors returned by ledger operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TokenError {
    /// An address argument was the null address.
    #[error("zero address")]
    ZeroAddress,

    /// A transfer of zero tokens was requested.
    #[error("zero amount")]
    ZeroAmount,

    /// Debit exceeds the account balance.
    #[error("insufficient balance: required {required}, available {available}")]
    InsufficientBalance {
        /// Amount the call needed.
        required: U256,
        /// Balance at the time of the call.
        available: U256,
    },

    /// Spend or decrease exceeds the current allowance.
    #[error("insufficient allowance: required {required}, available {available}")]
    InsufficientAllowance {
        /// Amount the call needed.
        required: U256,
        /// Allowance at the time of the call.
        available: U256,
    },

    /// A tax rate above 100%.
    #[error("invalid tax rate: {rate:?} exceeds {max:?}")]
    InvalidTaxRate {
        /// Rejected rate.
        rate: BasisPoints,
        /// Highest accepted rate.
        max: BasisPoints,
    },

    /// Caller does not hold the role required by the operation.
    #[error("caller {caller:?} not authorized")]
    NotAuthorized {
        /// Rejected caller.
        caller: Address,
    },

    /// The ledger is paused.
    #[error("system paused")]
    SystemPaused,

    /// `unpause` while the ledger is active.
    #[error("system not paused")]
    NotPaused,

    /// Checked arithmetic failed (supply or allowance overflow).
    #[error("arithmetic overflow")]
    ArithmeticOverflow,

    /// Construction parameters that no role or rate error covers.
    #[error("invalid configuration: {0}")]
    InvalidConfig(ConfigError),
}

impl From<ConfigError> for TokenError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::ZeroRole(_) => Self::ZeroAddress,
            ConfigError::InvalidTaxRate(rate) => Self::InvalidTaxRate {
                rate,
                max: BasisPoints::MAX,
            },
            other => Self::InvalidConfig(other),
        }
    }
}

impl TokenError {
    /// Returns true if the error comes from the access controller.
    #[must_use]
    pub fn is_authorization_failure(&self) -> bool {
        matches!(self, Self::NotAuthorized { .. })
    }

    /// Returns true if the error comes from the pause switch.
    #[must_use]
    pub fn is_pause_failure(&self) -> bool {
        matches!(self, Self::SystemPaused | Self::NotPaused)
    }
}

/// Result type for ledger operations.
pub type TokenResult<T> = Result<T, TokenError>;

// =============================================================================
// AUTHORIZATION ERRORS
// =============================================================================

/// Failures of the external authorization collaborator.
///
/// None of these ever grant access: the access controller maps every one of
/// them to [`TokenError::NotAuthorized`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthorizationError {
    /// The collaborator could not be reached.
    #[error("authorization collaborator unavailable")]
    Unavailable,

    /// No collaborator is registered at the queried address.
    #[error("unknown authorization collaborator: {0:?}")]
    UnknownCollaborator(Address),

    /// The collaborator answered with something other than yes/no.
    #[error("ambiguous authorization response: {0}")]
    Ambiguous(String),

    /// An approval came from an address outside the signer set.
    #[error("unknown signer: {0:?}")]
    UnknownSigner(Address),

    /// A quorum threshold that can never, or always, be met.
    #[error("invalid threshold: {threshold} of {signers} signers")]
    InvalidThreshold {
        /// Requested approvals.
        threshold: usize,
        /// Size of the signer set.
        signers: usize,
    },
}

// =============================================================================
// SINK ERRORS
// =============================================================================

/// Errors from publishing change records.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SinkError {
    /// The record could not be serialized.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// The downstream consumer is gone.
    #[error("event sink disconnected")]
    Disconnected,
}

// =============================================================================
// TESTS
// =============================================================================
