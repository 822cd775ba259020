//! # Authorization Adapters
//!
//! Implementations of [`AuthorizationOracle`]:
//!
//! | Adapter | Behaviour |
//! |---------|-----------|
//! | `StaticAuthorizer` | fixed confirmation set per collaborator address |
//! | `QuorumAuthorizer` | M-of-N signer approvals per caller |
//! | `UnavailableAuthorizer` | collaborator unreachable, every query errors |
//!
//! Production deployments would put a client for the remote multi-sig
//! service behind the same trait.

use crate::domain::value_objects::Address;
use crate::errors::AuthorizationError;
use crate::ports::outbound::AuthorizationOracle;
use parking_lot::RwLock;
use std::collections::{HashMap, HashSet};
use tracing::debug;

// =============================================================================
// STATIC
// =============================================================================

/// Confirmation sets keyed by collaborator address.
#[derive(Debug, Default)]
pub struct StaticAuthorizer {
    confirmed: RwLock<HashMap<Address, HashSet<Address>>>,
}

impl StaticAuthorizer {
    /// Creates an authorizer with no registered collaborators.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an authorizer where `collaborator` confirms `callers`.
    #[must_use]
    pub fn with_confirmed(collaborator: Address, callers: impl IntoIterator<Item = Address>) -> Self {
        let authorizer = Self::new();
        authorizer.register(collaborator);
        for caller in callers {
            authorizer.confirm(collaborator, caller);
        }
        authorizer
    }

    /// Registers a collaborator with an empty confirmation set.
    pub fn register(&self, collaborator: Address) {
        self.confirmed.write().entry(collaborator).or_default();
    }

    /// Marks `caller` as confirmed by `collaborator`.
    pub fn confirm(&self, collaborator: Address, caller: Address) {
        self.confirmed
            .write()
            .entry(collaborator)
            .or_default()
            .insert(caller);
    }

    /// Withdraws the confirmation of `caller`.
    pub fn revoke(&self, collaborator: Address, caller: Address) {
        if let Some(set) = self.confirmed.write().get_mut(&collaborator) {
            set.remove(&caller);
        }
    }
}

impl AuthorizationOracle for StaticAuthorizer {
    fn is_confirmed(
        &self,
        collaborator: Address,
        caller: Address,
    ) -> Result<bool, AuthorizationError> {
        self.confirmed
            .read()
            .get(&collaborator)
            .map(|set| set.contains(&caller))
            .ok_or(AuthorizationError::UnknownCollaborator(collaborator))
    }
}

// =============================================================================
// QUORUM
// =============================================================================

#[derive(Debug)]
struct QuorumPolicy {
    signers: HashSet<Address>,
    threshold: usize,
    /// caller -> signers that approved it
    approvals: HashMap<Address, HashSet<Address>>,
}

/// Local M-of-N policy: a caller is confirmed once at least `threshold`
/// distinct signers have approved it.
#[derive(Debug, Default)]
pub struct QuorumAuthorizer {
    policies: RwLock<HashMap<Address, QuorumPolicy>>,
}

impl QuorumAuthorizer {
    /// Creates an authorizer with no registered collaborators.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a signer set at `collaborator`, replacing any previous one.
    pub fn register(
        &self,
        collaborator: Address,
        signers: impl IntoIterator<Item = Address>,
        threshold: usize,
    ) -> Result<(), AuthorizationError> {
        let signers: HashSet<Address> = signers.into_iter().collect();
        if threshold == 0 || threshold > signers.len() {
            return Err(AuthorizationError::InvalidThreshold {
                threshold,
                signers: signers.len(),
            });
        }
        self.policies.write().insert(
            collaborator,
            QuorumPolicy {
                signers,
                threshold,
                approvals: HashMap::new(),
            },
        );
        Ok(())
    }

    /// Records `signer`'s approval of `caller`. Returns the approval count.
    pub fn approve(
        &self,
        collaborator: Address,
        signer: Address,
        caller: Address,
    ) -> Result<usize, AuthorizationError> {
        let mut policies = self.policies.write();
        let policy = policies
            .get_mut(&collaborator)
            .ok_or(AuthorizationError::UnknownCollaborator(collaborator))?;
        if !policy.signers.contains(&signer) {
            return Err(AuthorizationError::UnknownSigner(signer));
        }
        let approvals = policy.approvals.entry(caller).or_default();
        approvals.insert(signer);
        debug!(
            caller = ?caller,
            approvals = approvals.len(),
            threshold = policy.threshold,
            "Quorum approval recorded"
        );
        Ok(approvals.len())
    }

    /// Withdraws `signer`'s approval of `caller`. Returns the approval count.
    pub fn revoke(
        &self,
        collaborator: Address,
        signer: Address,
        caller: Address,
    ) -> Result<usize, AuthorizationError> {
        let mut policies = self.policies.write();
        let policy = policies
            .get_mut(&collaborator)
            .ok_or(AuthorizationError::UnknownCollaborator(collaborator))?;
        let approvals = policy.approvals.entry(caller).or_default();
        approvals.remove(&signer);
        Ok(approvals.len())
    }
}

impl AuthorizationOracle for QuorumAuthorizer {
    fn is_confirmed(
        &self,
        collaborator: Address,
        caller: Address,
    ) -> Result<bool, AuthorizationError> {
        let policies = self.policies.read();
        let policy = policies
            .get(&collaborator)
            .ok_or(AuthorizationError::UnknownCollaborator(collaborator))?;
        let count = policy.approvals.get(&caller).map_or(0, HashSet::len);
        Ok(count >= policy.threshold)
    }
}

// =============================================================================
// UNAVAILABLE
// =============================================================================

/// A collaborator that cannot be reached.
#[derive(Debug, Default, Clone, Copy)]
pub struct UnavailableAuthorizer;

impl AuthorizationOracle for UnavailableAuthorizer {
    fn is_confirmed(
        &self,
        _collaborator: Address,
        _caller: Address,
    ) -> Result<bool, AuthorizationError> {
        Err(AuthorizationError::Unavailable)
    }
}

// =============================================================================
// TESTS
// =============================================================================
