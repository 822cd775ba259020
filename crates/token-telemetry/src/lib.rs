//! # Token Telemetry
//!
//! Logging and metrics for the token ledger.
//!
//! ## Components
//!
//! - **Logging**: `tracing-subscriber` with `EnvFilter`, pretty or JSON output
//! - **Metrics**: Prometheus counters for transfers, tax, denials and pauses
//!
//! ## Usage
//!
//! ```rust,ignore
//! use token_telemetry::{init_telemetry, TelemetryConfig};
//!
//! fn main() {
//!     let _guard = init_telemetry(TelemetryConfig::from_env()).expect("Failed to init telemetry");
//!     // Ledger calls now log and record metrics
//! }
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `TT_SERVICE_NAME` | `token-ledger` | Service name in logs |
//! | `TT_LOG_LEVEL` / `RUST_LOG` | `info` | Log level filter |
//! | `TT_CONSOLE_OUTPUT` | `true` | Write logs to stdout |
//! | `TT_JSON_LOGS` | `false` (`true` in containers) | JSON log lines |

pub mod config;
pub mod logging;
pub mod metrics;

pub use config::TelemetryConfig;
pub use metrics::{
    encode_metrics, register_metrics, MetricsHandle, AUTHORIZATION_DENIALS, MINTED,
    PAUSED, PAUSE_TOGGLES, REJECTED_CALLS, TAXED_TRANSFERS, TAX_COLLECTED, TRANSFERS_TOTAL,
};

use thiserror::Error;

/// Telemetry initialization errors
#[derive(Error, Debug)]
pub enum TelemetryError {
    #[error("Failed to initialize logging: {0}")]
    LoggingInit(String),

    #[error("Failed to initialize Prometheus metrics: {0}")]
    MetricsInit(String),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

/// Initialize logging and register metrics.
///
/// Returns a guard to hold for the lifetime of the application.
pub fn init_telemetry(config: TelemetryConfig) -> Result<TelemetryGuard, TelemetryError> {
    // Metrics first, they do not log
    let metrics_handle = register_metrics()?;
    logging::init_logging(&config)?;

    Ok(TelemetryGuard {
        _metrics: metrics_handle,
        service_name: config.service_name,
    })
}

/// Guard that keeps telemetry active.
pub struct TelemetryGuard {
    _metrics: MetricsHandle,
    service_name: String,
}

impl Drop for TelemetryGuard {
    fn drop(&mut self) {
        tracing::info!(service = %self.service_name, "Shutting down telemetry");
    }
}
