//! # Event Sink Adapters
//!
//! In-memory log for tests and embedding hosts, a tracing sink that writes
//! each record as a structured log line, and a no-op sink.

use crate::errors::SinkError;
use crate::events::TokenEvent;
use crate::ports::outbound::EventSink;
use parking_lot::Mutex;
use tracing::info;

/// Appends every record to an in-memory vector.
#[derive(Debug, Default)]
pub struct InMemoryEventLog {
    events: Mutex<Vec<TokenEvent>>,
}

impl InMemoryEventLog {
    /// Creates an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of every record so far.
    #[must_use]
    pub fn events(&self) -> Vec<TokenEvent> {
        self.events.lock().clone()
    }

    /// Removes and returns every record so far.
    pub fn drain(&self) -> Vec<TokenEvent> {
        std::mem::take(&mut *self.events.lock())
    }

    /// Number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.events.lock().len()
    }

    /// True if nothing was recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.lock().is_empty()
    }

    /// Records of the given kind.
    #[must_use]
    pub fn of_kind(&self, kind: &str) -> Vec<TokenEvent> {
        self.events
            .lock()
            .iter()
            .filter(|event| event.kind() == kind)
            .cloned()
            .collect()
    }
}

impl EventSink for InMemoryEventLog {
    fn publish(&self, events: &[TokenEvent]) -> Result<(), SinkError> {
        self.events.lock().extend_from_slice(events);
        Ok(())
    }
}

/// Writes each record as an `info!` line with its JSON body.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingEventSink;

impl EventSink for TracingEventSink {
    fn publish(&self, events: &[TokenEvent]) -> Result<(), SinkError> {
        for event in events {
            let body = event
                .to_json()
                .map_err(|e| SinkError::Serialization(e.to_string()))?;
            info!(target: "token_ledger::audit", kind = event.kind(), record = %body, "Change record");
        }
        Ok(())
    }
}

/// Discards every record.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoOpEventSink;

impl EventSink for NoOpEventSink {
    fn publish(&self, _events: &[TokenEvent]) -> Result<(), SinkError> {
        Ok(())
    }
}

// =============================================================================
// TESTS
// =============================================================================
