//! # Spells and Audit Records
//!
//! The batch submission format and what a committed batch reports.

use super::journal::StateChange;
use sc_01_connector_registry::ConnectorVersion;
use serde::{Deserialize, Serialize};
use shared_types::{encode_args, keccak256, Address, Bytes, CodecError, Hash, SlotId, U256};

// =============================================================================
// SPELL
// =============================================================================

/// One unit of work: connector name, method, opaque arguments.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Spell {
    /// Logical connector name, resolved through the registry.
    pub connector: String,
    /// Method selector understood by the connector.
    pub method: String,
    /// Connector-defined argument encoding.
    pub args: Bytes,
}

impl Spell {
    /// Creates a spell from raw encoded arguments.
    pub fn new(connector: impl Into<String>, method: impl Into<String>, args: Bytes) -> Self {
        Self {
            connector: connector.into(),
            method: method.into(),
            args,
        }
    }

    /// Creates a spell, encoding `args` with the workspace codec.
    pub fn encode<T: Serialize>(
        connector: impl Into<String>,
        method: impl Into<String>,
        args: &T,
    ) -> Result<Self, CodecError> {
        Ok(Self::new(connector, method, encode_args(args)?))
    }

    /// Keccak-256 of the encoded batch.
    pub fn batch_hash(spells: &[Spell]) -> Result<Hash, CodecError> {
        let encoded = encode_args(&spells)?;
        Ok(keccak256(encoded.as_slice()))
    }
}

// =============================================================================
// CONNECTOR OUTPUT
// =============================================================================

/// What a connector reports for a successful spell.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SpellOutput {
    /// Normalized quantity the spell moved.
    pub amount: U256,
    /// Connector-specific event name, e.g. `LogDeposit`.
    pub event_name: String,
    /// Connector-specific event parameters.
    pub event_params: serde_json::Value,
}

impl SpellOutput {
    /// Builds an output.
    pub fn new(
        amount: U256,
        event_name: impl Into<String>,
        event_params: serde_json::Value,
    ) -> Self {
        Self {
            amount,
            event_name: event_name.into(),
            event_params,
        }
    }
}

// =============================================================================
// AUDIT RECORD
// =============================================================================

/// Per-spell part of the audit record.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SpellOutcome {
    /// Position in the batch.
    pub index: usize,
    /// Connector name as submitted.
    pub connector: String,
    /// Address the name resolved to for this batch.
    pub connector_address: Address,
    /// Interface generation of the resolved entry.
    pub version: ConnectorVersion,
    /// Method invoked.
    pub method: String,
    /// Normalized amount.
    pub amount: U256,
    /// Connector event name.
    pub event_name: String,
    /// Connector event parameters.
    pub event_params: serde_json::Value,
    /// Scratch slots read, in access order.
    pub slots_read: Vec<SlotId>,
    /// Scratch slots written, in access order.
    pub slots_written: Vec<SlotId>,
}

/// Immutable summary of one committed batch.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CastRecord {
    /// Account the batch ran in.
    pub account: Address,
    /// Principal that submitted it.
    pub initiator: Address,
    /// Fee recipient / origin supplied with the batch.
    pub origin: Address,
    /// Keccak-256 of the encoded spells.
    pub batch_hash: Hash,
    /// Per-account sequence number, starting at 1.
    pub nonce: u64,
    /// One outcome per spell, in execution order.
    pub outcomes: Vec<SpellOutcome>,
    /// Ordered state effects that were committed.
    pub changes: Vec<StateChange>,
}

impl CastRecord {
    /// Connector names in execution order.
    #[must_use]
    pub fn connectors(&self) -> Vec<String> {
        self.outcomes.iter().map(|o| o.connector.clone()).collect()
    }

    /// Event names in execution order.
    #[must_use]
    pub fn event_names(&self) -> Vec<String> {
        self.outcomes.iter().map(|o| o.event_name.clone()).collect()
    }
}
