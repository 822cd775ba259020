//! # Role Store
//!
//! Current holders of the five administrative roles.
//!
//! INVARIANT: no role is ever the null address.

use crate::domain::value_objects::Address;
use crate::errors::{TokenError, TokenResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Administrative roles.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    /// Confirmed by the authorization collaborator; administers everything.
    Governance,
    /// Price oracle; may mint.
    Oracle,
    /// Range-bound stability operator; may mint.
    Rbs,
    /// Receives all collected tax.
    Treasury,
    /// Address of the external multi-signature confirmation service.
    AuthorizationCollaborator,
}

impl Role {
    /// Every role, in storage order.
    pub const ALL: [Role; 5] = [
        Role::Governance,
        Role::Oracle,
        Role::Rbs,
        Role::Treasury,
        Role::AuthorizationCollaborator,
    ];
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Governance => "governance",
            Self::Oracle => "oracle",
            Self::Rbs => "rbs",
            Self::Treasury => "treasury",
            Self::AuthorizationCollaborator => "authorization_collaborator",
        };
        f.write_str(name)
    }
}

/// Holder addresses for every role.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleStore {
    governance: Address,
    oracle: Address,
    rbs: Address,
    treasury: Address,
    authorization_collaborator: Address,
}

impl RoleStore {
    /// Creates the store; every address must be non-null.
    pub fn new(
        governance: Address,
        oracle: Address,
        rbs: Address,
        treasury: Address,
        authorization_collaborator: Address,
    ) -> TokenResult<Self> {
        let store = Self {
            governance,
            oracle,
            rbs,
            treasury,
            authorization_collaborator,
        };
        if Role::ALL.iter().any(|role| store.get(*role).is_zero()) {
            return Err(TokenError::ZeroAddress);
        }
        Ok(store)
    }

    /// Current holder of `role`.
    #[must_use]
    pub fn get(&self, role: Role) -> Address {
        match role {
            Role::Governance => self.governance,
            Role::Oracle => self.oracle,
            Role::Rbs => self.rbs,
            Role::Treasury => self.treasury,
            Role::AuthorizationCollaborator => self.authorization_collaborator,
        }
    }

    /// Replaces the holder of `role`. Returns the previous holder.
    pub fn set(&mut self, role: Role, holder: Address) -> TokenResult<Address> {
        if holder.is_zero() {
            return Err(TokenError::ZeroAddress);
        }
        let slot = match role {
            Role::Governance => &mut self.governance,
            Role::Oracle => &mut self.oracle,
            Role::Rbs => &mut self.rbs,
            Role::Treasury => &mut self.treasury,
            Role::AuthorizationCollaborator => &mut self.authorization_collaborator,
        };
        Ok(std::mem::replace(slot, holder))
    }

    /// Governance address.
    #[must_use]
    pub fn governance(&self) -> Address {
        self.governance
    }

    /// Oracle address.
    #[must_use]
    pub fn oracle(&self) -> Address {
        self.oracle
    }

    /// RBS address.
    #[must_use]
    pub fn rbs(&self) -> Address {
        self.rbs
    }

    /// Treasury address.
    #[must_use]
    pub fn treasury(&self) -> Address {
        self.treasury
    }

    /// Authorization collaborator address.
    #[must_use]
    pub fn authorization_collaborator(&self) -> Address {
        self.authorization_collaborator
    }

    /// True if `caller` is the oracle or the rbs.
    #[must_use]
    pub fn is_oracle_or_rbs(&self, caller: &Address) -> bool {
        *caller == self.oracle || *caller == self.rbs
    }
}

// =============================================================================
// TESTS
// =============================================================================
