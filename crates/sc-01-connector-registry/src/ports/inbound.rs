//! # Driving Ports (API - Inbound)
//!
//! Interfaces the registry exposes to deployment tooling (governance) and to
//! the casting engine (resolution).

use crate::domain::entities::{ConnectorVersion, ResolvedConnector};
use crate::domain::state::RegistrySnapshot;
use crate::errors::RegistryError;
use shared_types::Address;

/// Administrative surface, restricted to governing principals.
pub trait RegistryGovernance<H>: Send + Sync {
    /// Registers a new enabled entry.
    fn register(
        &self,
        caller: Address,
        name: &str,
        address: Address,
        version: ConnectorVersion,
        handle: H,
    ) -> Result<(), RegistryError>;

    /// Re-enables the latest entry of `name`.
    fn enable(&self, caller: Address, name: &str) -> Result<(), RegistryError>;

    /// Disables the enabled entry of `name`. Idempotent.
    fn disable(&self, caller: Address, name: &str) -> Result<(), RegistryError>;
}

/// Resolution surface used by the casting engine.
pub trait ConnectorResolver<H: Clone>: Send + Sync {
    /// Point-in-time view used for a whole batch.
    fn snapshot(&self) -> RegistrySnapshot<H>;

    /// Resolves a single name against a fresh snapshot.
    fn resolve(&self, name: &str) -> Result<ResolvedConnector<H>, RegistryError> {
        self.snapshot().resolve(name)
    }
}
