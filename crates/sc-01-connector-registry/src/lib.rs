//! # SC-01 Connector Registry - Governed Module Resolution
//!
//! Maps logical connector names ("LEND", "PRIZE") to executable connector
//! handles. Entries have an enable/disable lifecycle and are changed only by
//! governing principals.
//!
//! ## Domain Invariants
//!
//! | Invariant | Enforcement Location |
//! |-----------|---------------------|
//! | At most one enabled entry per name | `domain/state.rs` - `RegistryState::register()` |
//! | An address is active under at most one name | `domain/state.rs` - `register()`, `enable()` |
//! | Disabling is non-destructive | `domain/state.rs` - `RegistryState::disable()` |
//! | Resolution never returns a disabled entry | `domain/state.rs` - `RegistryState::resolve()` |
//! | Only governors mutate | `service.rs` - `ConnectorRegistry::require_governor()` |
//!
//! ## Governance
//!
//! | Action | Authorized Caller(s) |
//! |--------|---------------------|
//! | `register`, `enable`, `disable` | master or any chief |
//! | `add_chief`, `remove_chief` | master only |
//!
//! ## Snapshots
//!
//! Readers take a [`RegistrySnapshot`], a reference-counted view of the state
//! at the moment of the call. Governance writes replace the shared state
//! (copy-on-write) and never touch snapshots already handed out, so a batch
//! that resolved its connectors keeps seeing the same view until it ends.
//!
//! ## Usage Example
//!
//! ```ignore
//! use sc_01_connector_registry::prelude::*;
//!
//! let registry = ConnectorRegistry::new(master);
//! registry.register(master, "LEND", lend_address, ConnectorVersion::V2, handle)?;
//!
//! let snapshot = registry.snapshot();
//! let resolved = snapshot.resolve("LEND")?;
//! ```

// Crate-level lints
#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

// =============================================================================
// MODULES
// =============================================================================

pub mod domain;
pub mod errors;
pub mod ports;
pub mod service;

// =============================================================================
// PRELUDE
// =============================================================================

/// Convenient re-exports for common usage.
pub mod prelude {
    pub use crate::domain::entities::{
        ConnectorEntry, ConnectorVersion, GovernanceAction, GovernanceRecord, ResolvedConnector,
    };
    pub use crate::domain::state::{RegistrySnapshot, RegistryState};
    pub use crate::errors::RegistryError;
    pub use crate::ports::inbound::{ConnectorResolver, RegistryGovernance};
    pub use crate::service::ConnectorRegistry;
}

pub use prelude::*;
