//! Pause switch for emergency halts
//!
//! State Machine:
//! ```text
//! [ACTIVE] ──pause()──→ [PAUSED]
//!     ↑                     │
//!     └─────unpause()───────┘
//! ```
//!
//! While paused every balance- or allowance-mutating operation and every
//! administrative setter other than `unpause` is rejected. Reads are never
//! gated.

use crate::errors::{TokenError, TokenResult};
use serde::{Deserialize, Serialize};

/// Pause switch state
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum PauseState {
    /// Normal operation
    #[default]
    Active,
    /// Emergency halt
    Paused,
}

/// Process-wide pause switch
#[derive(Debug, Default, Clone)]
pub struct PauseSwitch {
    state: PauseState,
    /// Number of times the switch has been engaged
    pause_count: u64,
}

impl PauseSwitch {
    /// Create a switch in the `Active` state
    pub fn new() -> Self {
        Self::default()
    }

    /// Get current state
    pub fn state(&self) -> PauseState {
        self.state
    }

    /// Check if the ledger is paused
    pub fn is_paused(&self) -> bool {
        matches!(self.state, PauseState::Paused)
    }

    /// Total pauses since construction
    pub fn pause_count(&self) -> u64 {
        self.pause_count
    }

    /// Fails with `SystemPaused` unless active
    pub fn ensure_active(&self) -> TokenResult<()> {
        if self.is_paused() {
            return Err(TokenError::SystemPaused);
        }
        Ok(())
    }

    /// Active → Paused
    pub fn pause(&mut self) -> TokenResult<()> {
        self.ensure_active()?;
        self.state = PauseState::Paused;
        self.pause_count += 1;
        Ok(())
    }

    /// Paused → Active
    pub fn unpause(&mut self) -> TokenResult<()> {
        if !self.is_paused() {
            return Err(TokenError::NotPaused);
        }
        self.state = PauseState::Active;
        Ok(())
    }
}
