//! Smart account runtime binary.

use anyhow::{Context, Result};
use sc_runtime::{RuntimeConfig, ScRuntime, Script};
use sc_telemetry::init_telemetry;
use tracing::{debug, info};

#[tokio::main]
async fn main() -> Result<()> {
    let config = RuntimeConfig::load(std::env::args().skip(1))?;
    let telemetry = init_telemetry(&config.telemetry).context("Failed to initialize telemetry")?;

    let script = Script::load(&config.script_path)
        .with_context(|| format!("Failed to load script {}", config.script_path.display()))?;
    info!(
        script = %config.script_path.display(),
        steps = script.steps.len(),
        "Script loaded"
    );

    let runtime =
        ScRuntime::new(script, config.service.clone()).context("Failed to deploy connectors")?;
    let report = runtime.run().await?;

    println!(
        "{}",
        serde_json::to_string_pretty(&report).context("Failed to render report")?
    );

    let metrics = telemetry.metrics().gather().context("Failed to gather metrics")?;
    debug!(%metrics, "Final metrics");
    info!(
        casts_executed = report.stats.casts_executed,
        casts_failed = report.stats.casts_failed,
        "Run complete"
    );

    Ok(())
}
