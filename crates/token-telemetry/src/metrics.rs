//! Prometheus metrics for the token ledger.
//!
//! All metrics follow the naming convention: `tt_<area>_<metric>_<unit>`
//!
//! Tax amounts are recorded in base units, saturating at `u64::MAX` per
//! observation.

use lazy_static::lazy_static;
use prometheus::{Encoder, IntCounter, IntCounterVec, IntGauge, Opts, Registry, TextEncoder};
use std::sync::Arc;

use crate::TelemetryError;

lazy_static! {
    /// Global metrics registry
    pub static ref REGISTRY: Registry = Registry::new();

    // =========================================================================
    // TRANSFER METRICS
    // =========================================================================

    /// Completed transfers by tax decision
    pub static ref TRANSFERS_TOTAL: IntCounterVec = IntCounterVec::new(
        Opts::new("tt_ledger_transfers_total", "Completed transfers"),
        &["decision"]  // decision: exempt/buy/sell/untaxed
    ).expect("metric creation failed");

    /// Transfers that redirected a non-zero tax amount
    pub static ref TAXED_TRANSFERS: IntCounter = IntCounter::new(
        "tt_ledger_taxed_transfers_total",
        "Transfers that paid tax to the treasury"
    ).expect("metric creation failed");

    /// Cumulative tax sent to the treasury
    pub static ref TAX_COLLECTED: IntCounter = IntCounter::new(
        "tt_ledger_tax_collected_units_total",
        "Tax redirected to the treasury, in base units"
    ).expect("metric creation failed");

    /// Tokens minted
    pub static ref MINTED: IntCounter = IntCounter::new(
        "tt_ledger_minted_units_total",
        "Tokens minted, in base units"
    ).expect("metric creation failed");

    // =========================================================================
    // ACCESS METRICS
    // =========================================================================

    /// Calls rejected by the access controller
    pub static ref AUTHORIZATION_DENIALS: IntCounter = IntCounter::new(
        "tt_access_denials_total",
        "Calls rejected with NotAuthorized"
    ).expect("metric creation failed");

    /// Rejected calls by operation
    pub static ref REJECTED_CALLS: IntCounterVec = IntCounterVec::new(
        Opts::new("tt_ledger_rejected_calls_total", "Calls that failed and changed nothing"),
        &["operation"]
    ).expect("metric creation failed");

    // =========================================================================
    // PAUSE METRICS
    // =========================================================================

    /// Pause switch transitions
    pub static ref PAUSE_TOGGLES: IntCounterVec = IntCounterVec::new(
        Opts::new("tt_pause_toggles_total", "Pause switch transitions"),
        &["state"]  // state: paused/active
    ).expect("metric creation failed");

    /// 1 while paused
    pub static ref PAUSED: IntGauge = IntGauge::new(
        "tt_pause_engaged",
        "1 while the ledger is paused"
    ).expect("metric creation failed");
}

/// Handle to the registered metrics
pub struct MetricsHandle {
    _registry: Arc<Registry>,
}

/// Register all metrics with the global registry. Repeated calls are no-ops.
pub fn register_metrics() -> Result<MetricsHandle, TelemetryError> {
    let metrics: Vec<Box<dyn prometheus::core::Collector>> = vec![
        // Transfers
        Box::new(TRANSFERS_TOTAL.clone()),
        Box::new(TAXED_TRANSFERS.clone()),
        Box::new(TAX_COLLECTED.clone()),
        Box::new(MINTED.clone()),
        // Access
        Box::new(AUTHORIZATION_DENIALS.clone()),
        Box::new(REJECTED_CALLS.clone()),
        // Pause
        Box::new(PAUSE_TOGGLES.clone()),
        Box::new(PAUSED.clone()),
    ];

    for metric in metrics {
        match REGISTRY.register(metric) {
            Ok(()) | Err(prometheus::Error::AlreadyReg) => {}
            Err(e) => return Err(TelemetryError::MetricsInit(e.to_string())),
        }
    }

    Ok(MetricsHandle {
        _registry: Arc::new(REGISTRY.clone()),
    })
}

/// Encode all metrics as Prometheus text format.
pub fn encode_metrics() -> Result<String, TelemetryError> {
    let encoder = TextEncoder::new();
    let metric_families = REGISTRY.gather();
    let mut buffer = Vec::new();
    encoder
        .encode(&metric_families, &mut buffer)
        .map_err(|e| TelemetryError::MetricsInit(e.to_string()))?;
    String::from_utf8(buffer).map_err(|e| TelemetryError::MetricsInit(e.to_string()))
}
