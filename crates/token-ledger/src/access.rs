//! # Access Controller
//!
//! Two predicates guard privileged operations:
//!
//! - **Governance**: the authorization collaborator stored in the role store
//!   must confirm the caller. No local fallback exists; an unreachable or
//!   ambiguous collaborator is a denial.
//! - **Oracle or RBS**: direct address match against the role store.

use crate::domain::roles::RoleStore;
use crate::domain::value_objects::Address;
use crate::errors::{TokenError, TokenResult};
use crate::ports::outbound::AuthorizationOracle;
use token_telemetry::log_event;

/// Role checks backed by an injected [`AuthorizationOracle`].
#[derive(Debug)]
pub struct AccessController<A: AuthorizationOracle> {
    oracle: A,
}

impl<A: AuthorizationOracle> AccessController<A> {
    /// Wraps an authorization port.
    pub fn new(oracle: A) -> Self {
        Self { oracle }
    }

    /// The injected port.
    pub fn oracle(&self) -> &A {
        &self.oracle
    }

    /// Fails with `NotAuthorized` unless the collaborator confirms `caller`.
    pub fn require_governance(&self, roles: &RoleStore, caller: Address) -> TokenResult<()> {
        let collaborator = roles.authorization_collaborator();
        match self.oracle.is_confirmed(collaborator, caller) {
            Ok(true) => Ok(()),
            Ok(false) => {
                log_event!(warn, "access", "Governance call not confirmed", caller = ?caller);
                Err(TokenError::NotAuthorized { caller })
            }
            Err(e) => {
                log_event!(
                    warn,
                    "access",
                    "Authorization collaborator failed, denying",
                    caller = ?caller,
                    collaborator = ?collaborator,
                    error = %e
                );
                Err(TokenError::NotAuthorized { caller })
            }
        }
    }

    /// Fails with `NotAuthorized` unless `caller` is the oracle or rbs.
    pub fn require_oracle_or_rbs(&self, roles: &RoleStore, caller: Address) -> TokenResult<()> {
        if roles.is_oracle_or_rbs(&caller) {
            Ok(())
        } else {
            log_event!(warn, "access", "Mint attempted by non-minter", caller = ?caller);
            Err(TokenError::NotAuthorized { caller })
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
