//! # Runtime Configuration
//!
//! Unified configuration for the runtime: where the script lives, account
//! limits and telemetry.

use sc_02_smart_account::service::ServiceConfig;
use sc_telemetry::TelemetryConfig;
use std::path::PathBuf;
use thiserror::Error;

/// Environment variable naming the script when no argument is given.
pub const SCRIPT_ENV: &str = "SC_SCRIPT";

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Neither an argument nor `SC_SCRIPT` named a script.
    #[error("no script given: pass a path as the first argument or set {SCRIPT_ENV}")]
    MissingScript,
}

/// Complete runtime configuration.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    /// JSON script to replay.
    pub script_path: PathBuf,
    /// Smart account service settings.
    pub service: ServiceConfig,
    /// Logging and metrics.
    pub telemetry: TelemetryConfig,
}

impl RuntimeConfig {
    /// Builds the configuration from process arguments (program name
    /// excluded) and the environment.
    pub fn load(mut args: impl Iterator<Item = String>) -> Result<Self, ConfigError> {
        let script_path = args
            .next()
            .or_else(|| std::env::var(SCRIPT_ENV).ok())
            .filter(|path| !path.is_empty())
            .map(PathBuf::from)
            .ok_or(ConfigError::MissingScript)?;

        Ok(Self {
            script_path,
            service: ServiceConfig::from_env(),
            telemetry: TelemetryConfig::for_service("sc-runtime"),
        })
    }
}
