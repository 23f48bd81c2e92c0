//! Prometheus metrics for the smart account engine.
//!
//! All metrics follow the naming convention: `sc_<noun>_<verb>_total`

use lazy_static::lazy_static;
use prometheus::{Counter, CounterVec, Encoder, Opts, Registry, TextEncoder};

use crate::TelemetryError;

lazy_static! {
    /// Crate-local metrics registry
    pub static ref REGISTRY: Registry = Registry::new();

    // =========================================================================
    // CAST METRICS
    // =========================================================================

    /// Batches committed
    pub static ref CASTS_EXECUTED: Counter = Counter::new(
        "sc_casts_executed_total",
        "Total number of batches that committed"
    ).expect("metric creation failed");

    /// Batches rejected or rolled back
    pub static ref CASTS_FAILED: CounterVec = CounterVec::new(
        Opts::new("sc_casts_failed_total", "Total number of batches that failed"),
        &["reason"]  // reason: unauthorized/module_not_found/spell_failed/...
    ).expect("metric creation failed");

    /// Spells executed inside committed batches
    pub static ref SPELLS_EXECUTED: CounterVec = CounterVec::new(
        Opts::new("sc_spells_executed_total", "Spells executed in committed batches"),
        &["connector"]
    ).expect("metric creation failed");

    // =========================================================================
    // REGISTRY METRICS
    // =========================================================================

    /// Governance actions applied to the connector registry
    pub static ref REGISTRY_CHANGES: CounterVec = CounterVec::new(
        Opts::new("sc_registry_changes_total", "Connector registry governance actions"),
        &["action"]  // action: add/enable/disable/add_chief/remove_chief
    ).expect("metric creation failed");
}

/// Handle to the registered metrics.
#[derive(Debug, Clone, Copy)]
pub struct MetricsHandle {
    _private: (),
}

impl MetricsHandle {
    /// Render every registered metric in the Prometheus text format.
    pub fn gather(&self) -> Result<String, TelemetryError> {
        encode_metrics()
    }
}

/// Register all metrics with the crate registry.
///
/// Registering twice is not an error; collectors already present are kept.
pub fn register_metrics() -> Result<MetricsHandle, TelemetryError> {
    let metrics: Vec<Box<dyn prometheus::core::Collector>> = vec![
        Box::new(CASTS_EXECUTED.clone()),
        Box::new(CASTS_FAILED.clone()),
        Box::new(SPELLS_EXECUTED.clone()),
        Box::new(REGISTRY_CHANGES.clone()),
    ];

    for metric in metrics {
        match REGISTRY.register(metric) {
            Ok(()) | Err(prometheus::Error::AlreadyReg) => {}
            Err(e) => return Err(TelemetryError::MetricsInit(e.to_string())),
        }
    }

    Ok(MetricsHandle { _private: () })
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
