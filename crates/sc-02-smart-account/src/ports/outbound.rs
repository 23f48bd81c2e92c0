//! # Driven Ports (SPI - Outbound)
//!
//! What the account needs from the outside world: connectors to dispatch to
//! and a committed world state to read from and apply changes to.

use crate::domain::context::SpellContext;
use crate::domain::journal::ChangeSet;
use crate::domain::records::SpellOutput;
use crate::errors::ConnectorError;
use sc_01_connector_registry::ConnectorResolver;
use shared_types::{Address, StorageKey, StorageValue, U256};
use std::sync::Arc;

// =============================================================================
// CONNECTOR
// =============================================================================

/// Uniform dispatch interface every connector implements.
///
/// A connector is stateless between calls. It decodes `args` itself, books
/// every effect through `ctx` and reports a normalized [`SpellOutput`]. Any
/// error aborts the whole batch.
pub trait Connector: Send + Sync {
    /// Connector name used in logs.
    fn name(&self) -> &str;

    /// Runs `method` with `args` inside the account context.
    fn execute(
        &self,
        method: &str,
        args: &[u8],
        ctx: &mut SpellContext<'_, '_>,
    ) -> Result<SpellOutput, ConnectorError>;
}

/// Handle stored in the registry.
pub type ConnectorHandle = Arc<dyn Connector>;

/// Registry shared by every account.
pub type SharedRegistry = Arc<dyn ConnectorResolver<ConnectorHandle>>;

// =============================================================================
// WORLD STATE
// =============================================================================

/// Read access to committed balances and protocol storage.
pub trait StateAccess: Send + Sync {
    /// Balance of `owner` in `token`; zero if never credited.
    fn balance_of(&self, owner: &Address, token: &Address) -> U256;

    /// Storage word of `contract` at `key`; zero if never written.
    fn storage(&self, contract: &Address, key: &StorageKey) -> StorageValue;
}

/// Committed world state the account applies successful batches to.
pub trait WorldState: StateAccess {
    /// Applies every final value of a committed batch.
    fn apply(&mut self, changes: ChangeSet);
}
