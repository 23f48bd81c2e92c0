//! # Smart Account Telemetry
//!
//! Logging and metrics bootstrap shared by every crate in the workspace.
//!
//! ## Components
//!
//! - **Logs**: `tracing-subscriber` registry with an `EnvFilter` and either a
//!   pretty or a JSON formatting layer.
//! - **Metrics**: Prometheus counters for casts, spells and registry governance.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use sc_telemetry::{init_telemetry, TelemetryConfig};
//!
//! fn main() {
//!     let config = TelemetryConfig::from_env();
//!     let _guard = init_telemetry(&config).expect("Failed to init telemetry");
//! }
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `SC_SERVICE_NAME` | `smart-account` | Service name attached to logs |
//! | `SC_LOG_LEVEL` | `info` | Log level filter (falls back to `RUST_LOG`) |
//! | `SC_JSON_LOGS` | `false` | Emit JSON formatted logs |
//! | `SC_CONSOLE_OUTPUT` | `true` | Write logs to stdout |

#![warn(missing_docs)]

mod config;
mod logging;
pub mod metrics;

pub use config::TelemetryConfig;
pub use logging::init_logging;
pub use metrics::{
    register_metrics, MetricsHandle, CASTS_EXECUTED, CASTS_FAILED, REGISTRY_CHANGES,
    SPELLS_EXECUTED,
};

use thiserror::Error;

/// Telemetry initialization errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TelemetryError {
    /// The tracing subscriber could not be installed.
    #[error("Failed to initialize logging: {0}")]
    LoggingInit(String),

    /// A Prometheus collector could not be registered or encoded.
    #[error("Failed to initialize Prometheus metrics: {0}")]
    MetricsInit(String),

    /// A configuration value was rejected.
    #[error("Invalid configuration: {0}")]
    Config(String),
}

/// Initialize metrics and logging.
///
/// Returns a guard holding the metrics handle. Logging initialization is
/// tolerant of an already-installed global subscriber, so calling this twice
/// (for example from several tests) is harmless.
pub fn init_telemetry(config: &TelemetryConfig) -> Result<TelemetryGuard, TelemetryError> {
    // Metrics first; they do not depend on the subscriber
    let metrics = register_metrics()?;

    let installed = init_logging(config)?;

    tracing::info!(
        service = %config.service_name,
        log_level = %config.log_level,
        json_logs = config.json_logs,
        subscriber_installed = installed,
        "Telemetry initialized"
    );

    Ok(TelemetryGuard { metrics })
}

/// Guard that keeps telemetry active for the lifetime of the application.
pub struct TelemetryGuard {
    metrics: MetricsHandle,
}

impl TelemetryGuard {
    /// Handle to the metrics registry.
    #[must_use]
    pub fn metrics(&self) -> &MetricsHandle {
        &self.metrics
    }
}

impl Drop for TelemetryGuard {
    fn drop(&mut self) {
        tracing::info!("Shutting down telemetry...");
    }
}

/// Log a batch-level event with the standard account fields.
///
/// # Example
///
/// ```rust,ignore
/// log_cast_event!(info, "Cast committed", account, nonce, spells = 2);
/// ```
#[macro_export]
macro_rules! log_cast_event {
    ($level:ident, $msg:expr, $account:expr, $nonce:expr $(, $($field:tt)*)?) => {
        tracing::$level!(
            account = %$account,
            nonce = $nonce,
            $($($field)*,)?
            $msg
        )
    };
}

/// Log a spell-level event with the standard spell fields.
#[macro_export]
macro_rules! log_spell_event {
    ($level:ident, $msg:expr, $index:expr, $connector:expr, $method:expr $(, $($field:tt)*)?) => {
        tracing::$level!(
            index = $index,
            connector = %$connector,
            method = %$method,
            $($($field)*,)?
            $msg
        )
    };
}
