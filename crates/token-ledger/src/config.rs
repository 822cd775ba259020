//! # Ledger Configuration
//!
//! Construction parameters for [`TokenService`](crate::service::TokenService).
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `TT_NAME` | `Taxed Token` | Token name |
//! | `TT_SYMBOL` | `TAX` | Token symbol |
//! | `TT_DECIMALS` | `9` | Display decimals |
//! | `TT_INITIAL_SUPPLY` | `1000000` | Minted to governance at genesis (decimal) |
//! | `TT_BUY_TAX` | `500` | Buy rate in basis points |
//! | `TT_SELL_TAX` | `1000` | Sell rate in basis points |
//! | `TT_GOVERNANCE` | required | Hex address |
//! | `TT_ORACLE` | required | Hex address |
//! | `TT_RBS` | required | Hex address |
//! | `TT_TREASURY` | required | Hex address |
//! | `TT_AUTHORIZATION_COLLABORATOR` | required | Hex address |
//! | `TT_WHITELIST` | empty | Comma-separated hex addresses |

use crate::domain::roles::{Role, RoleStore};
use crate::domain::value_objects::{Address, BasisPoints, U256};
use serde::{Deserialize, Serialize};
use std::env;
use thiserror::Error;

/// Configuration errors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A required variable is not set.
    #[error("missing environment variable: {0}")]
    MissingVar(&'static str),

    /// A variable could not be parsed.
    #[error("invalid value for {var}: {reason}")]
    InvalidValue {
        /// Variable name.
        var: &'static str,
        /// Parser message.
        reason: String,
    },

    /// A role is the null address.
    #[error("role {0} must not be the zero address")]
    ZeroRole(Role),

    /// A rate above 100%.
    #[error("tax rate {0:?} exceeds 10000bps")]
    InvalidTaxRate(BasisPoints),

    /// Name or symbol left empty.
    #[error("{0} must not be empty")]
    EmptyField(&'static str),
}

/// Initial role holders.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleConfig {
    /// Governance address; receives the initial supply.
    pub governance: Address,
    /// Oracle address.
    pub oracle: Address,
    /// RBS address.
    pub rbs: Address,
    /// Treasury address; receives all tax.
    pub treasury: Address,
    /// Authorization collaborator address.
    pub authorization_collaborator: Address,
}

impl RoleConfig {
    fn holders(&self) -> [(Role, Address); 5] {
        [
            (Role::Governance, self.governance),
            (Role::Oracle, self.oracle),
            (Role::Rbs, self.rbs),
            (Role::Treasury, self.treasury),
            (Role::AuthorizationCollaborator, self.authorization_collaborator),
        ]
    }

    /// Builds the role store. Fails on any null holder.
    pub fn to_store(&self) -> Result<RoleStore, ConfigError> {
        if let Some((role, _)) = self.holders().iter().find(|(_, addr)| addr.is_zero()) {
            return Err(ConfigError::ZeroRole(*role));
        }
        RoleStore::new(
            self.governance,
            self.oracle,
            self.rbs,
            self.treasury,
            self.authorization_collaborator,
        )
        .map_err(|_| ConfigError::ZeroRole(Role::Governance))
    }
}

/// Ledger configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenConfig {
    /// Token name.
    pub name: String,
    /// Token symbol.
    pub symbol: String,
    /// Display decimals.
    pub decimals: u8,
    /// Minted to governance at genesis.
    pub initial_supply: U256,
    /// Initial buy rate.
    pub buy_tax: BasisPoints,
    /// Initial sell rate.
    pub sell_tax: BasisPoints,
    /// Initial role holders.
    pub roles: RoleConfig,
    /// Whitelisted at genesis in addition to the role holders.
    pub extra_whitelist: Vec<Address>,
}

impl Default for TokenConfig {
    fn default() -> Self {
        Self {
            name: "Taxed Token".to_string(),
            symbol: "TAX".to_string(),
            decimals: 9,
            initial_supply: U256::from(1_000_000u64),
            buy_tax: BasisPoints::new(500),
            sell_tax: BasisPoints::new(1_000),
            roles: RoleConfig::default(),
            extra_whitelist: Vec::new(),
        }
    }
}

impl TokenConfig {
    /// Default parameters with the given role holders.
    #[must_use]
    pub fn with_roles(roles: RoleConfig) -> Self {
        Self {
            roles,
            ..Self::default()
        }
    }

    /// Checks every field that construction would reject.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.name.trim().is_empty() {
            return Err(ConfigError::EmptyField("name"));
        }
        if self.symbol.trim().is_empty() {
            return Err(ConfigError::EmptyField("symbol"));
        }
        for rate in [self.buy_tax, self.sell_tax] {
            if !rate.is_valid() {
                return Err(ConfigError::InvalidTaxRate(rate));
            }
        }
        self.roles.to_store()?;
        Ok(())
    }

    /// Reads configuration from `TT_*` environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Reads configuration through `lookup`, falling back to defaults for
    /// optional keys.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let required_address = |var: &'static str| -> Result<Address, ConfigError> {
            let raw = lookup(var).ok_or(ConfigError::MissingVar(var))?;
            parse_address(var, &raw)
        };

        let roles = RoleConfig {
            governance: required_address("TT_GOVERNANCE")?,
            oracle: required_address("TT_ORACLE")?,
            rbs: required_address("TT_RBS")?,
            treasury: required_address("TT_TREASURY")?,
            authorization_collaborator: required_address("TT_AUTHORIZATION_COLLABORATOR")?,
        };

        let decimals = match lookup("TT_DECIMALS") {
            Some(raw) => raw.trim().parse().map_err(|e: std::num::ParseIntError| {
                ConfigError::InvalidValue {
                    var: "TT_DECIMALS",
                    reason: e.to_string(),
                }
            })?,
            None => defaults.decimals,
        };

        let initial_supply = match lookup("TT_INITIAL_SUPPLY") {
            Some(raw) => U256::from_dec_str(raw.trim()).map_err(|e| ConfigError::InvalidValue {
                var: "TT_INITIAL_SUPPLY",
                reason: format!("{e:?}"),
            })?,
            None => defaults.initial_supply,
        };

        let buy_tax = match lookup("TT_BUY_TAX") {
            Some(raw) => parse_rate("TT_BUY_TAX", &raw)?,
            None => defaults.buy_tax,
        };
        let sell_tax = match lookup("TT_SELL_TAX") {
            Some(raw) => parse_rate("TT_SELL_TAX", &raw)?,
            None => defaults.sell_tax,
        };

        let extra_whitelist = match lookup("TT_WHITELIST") {
            Some(raw) => raw
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(|s| parse_address("TT_WHITELIST", s))
                .collect::<Result<Vec<_>, _>>()?,
            None => Vec::new(),
        };

        let config = Self {
            name: lookup("TT_NAME").unwrap_or(defaults.name),
            symbol: lookup("TT_SYMBOL").unwrap_or(defaults.symbol),
            decimals,
            initial_supply,
            buy_tax,
            sell_tax,
            roles,
            extra_whitelist,
        };
        config.validate()?;
        Ok(config)
    }
}

fn parse_address(var: &'static str, raw: &str) -> Result<Address, ConfigError> {
    raw.trim()
        .parse::<Address>()
        .map_err(|e| ConfigError::InvalidValue {
            var,
            reason: e.to_string(),
        })
}

fn parse_rate(var: &'static str, raw: &str) -> Result<BasisPoints, ConfigError> {
    raw.trim()
        .parse::<u16>()
        .map(BasisPoints::new)
        .map_err(|e| ConfigError::InvalidValue {
            var,
            reason: e.to_string(),
        })
}

// =============================================================================
// TESTS
// =============================================================================
