//! # Smart Account Runtime
//!
//! Wires the connector registry, the connectors and a smart account service
//! together over an in-memory world, then replays a JSON script against it.
//!
//! ## Startup Sequence
//!
//! 1. Load configuration (first argument or `SC_SCRIPT`, then environment)
//! 2. Initialize telemetry
//! 3. Parse the script and deploy its world and connectors
//! 4. Replay every step, collecting audit records
//! 5. Print the run report as JSON
//!
//! ## Modules
//!
//! - `config` - runtime configuration
//! - `script` - script layout and spell compilation
//! - `wiring` - world seeding and connector registration
//! - `runtime` - step replay and reporting

#![warn(missing_docs)]

pub mod config;
pub mod runtime;
pub mod script;
pub mod wiring;

pub use config::{ConfigError, RuntimeConfig};
pub use runtime::{RunReport, ScRuntime, StepReport};
pub use script::{Script, ScriptError, Step};
