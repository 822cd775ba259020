//! # Driven Ports (SPI - Outbound)
//!
//! Interfaces the ledger depends on. Adapters implement these traits to
//! provide:
//! - Multi-signature confirmation of governance callers
//! - Delivery of change records to observers
//!
//! Both are synchronous: the host executes each call to completion and there
//! are no suspension points inside a call.

use crate::domain::value_objects::Address;
use crate::errors::{AuthorizationError, SinkError};
use crate::events::TokenEvent;

// =============================================================================
// AUTHORIZATION ORACLE (external multi-sig confirmation)
// =============================================================================

/// External yes/no authorization check standing in for local
/// signature-threshold verification.
///
/// ## Implementation Notes
///
/// - `collaborator` is the address currently stored in the role store; an
///   implementation resolves the confirmation service at that address, so a
///   governance update of the collaborator redirects every later query.
/// - Any `Err` is treated as a denial by the access controller. There is no
///   local fallback.
pub trait AuthorizationOracle: Send + Sync {
    /// Is `caller` currently confirmed by the service at `collaborator`?
    fn is_confirmed(&self, collaborator: Address, caller: Address)
        -> Result<bool, AuthorizationError>;
}

impl<T: AuthorizationOracle + ?Sized> AuthorizationOracle for std::sync::Arc<T> {
    fn is_confirmed(
        &self,
        collaborator: Address,
        caller: Address,
    ) -> Result<bool, AuthorizationError> {
        (**self).is_confirmed(collaborator, caller)
    }
}

// =============================================================================
// EVENT SINK
// =============================================================================

/// Receives change records after a call has committed.
///
/// Records of one call are delivered together and in emission order. A sink
/// failure is logged but never rolls back a committed call.
pub trait EventSink: Send + Sync {
    /// Publishes the records of one committed call.
    fn publish(&self, events: &[TokenEvent]) -> Result<(), SinkError>;
}

impl<T: EventSink + ?Sized> EventSink for std::sync::Arc<T> {
    fn publish(&self, events: &[TokenEvent]) -> Result<(), SinkError> {
        (**self).publish(events)
    }
}
