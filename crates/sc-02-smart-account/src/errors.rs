//! # Error Types
//!
//! Errors raised while casting, by connectors, by the state journal and by
//! authority management.

use sc_01_connector_registry::RegistryError;
use shared_types::{Address, CodecError, U256};
use thiserror::Error;

// =============================================================================
// CAST ERRORS
// =============================================================================

/// Why a batch was rejected or rolled back.
///
/// Whatever the variant, a failed cast leaves the world unchanged.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CastError {
    /// Initiator is not an authority of the account.
    #[error("unauthorized: {caller} may not cast on this account")]
    Unauthorized {
        /// The rejected initiator.
        caller: Address,
    },

    /// The batch has no spells.
    #[error("empty batch")]
    EmptyBatch,

    /// The batch exceeds the configured spell limit.
    #[error("too many spells: {count} > {max}")]
    TooManySpells {
        /// Spells submitted.
        count: usize,
        /// Configured maximum.
        max: usize,
    },

    /// A spell named a connector that is unknown or disabled.
    #[error("module not found: {0}")]
    ModuleNotFound(String),

    /// A cast was started while another cast was running on this thread.
    #[error("reentrant cast rejected")]
    ReentrantCast,

    /// A connector reported failure; the reason is passed through unchanged.
    #[error("spell {index} ({connector}.{method}) failed: {reason}")]
    SpellExecutionFailed {
        /// Position of the failing spell.
        index: usize,
        /// Connector name.
        connector: String,
        /// Method invoked.
        method: String,
        /// The connector's own error.
        reason: ConnectorError,
    },

    /// Registry failure other than a missing connector.
    #[error("registry error: {0}")]
    Registry(RegistryError),

    /// The batch could not be encoded for hashing.
    #[error("batch encoding failed: {0}")]
    Encoding(#[from] CodecError),
}

impl CastError {
    /// Short, stable label for metrics.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Unauthorized { .. } => "unauthorized",
            Self::EmptyBatch => "empty_batch",
            Self::TooManySpells { .. } => "too_many_spells",
            Self::ModuleNotFound(_) => "module_not_found",
            Self::ReentrantCast => "reentrant_cast",
            Self::SpellExecutionFailed { .. } => "spell_execution_failed",
            Self::Registry(_) => "registry",
            Self::Encoding(_) => "encoding",
        }
    }
}

impl From<RegistryError> for CastError {
    fn from(err: RegistryError) -> Self {
        match err {
            RegistryError::ModuleNotFound(name) => Self::ModuleNotFound(name),
            other => Self::Registry(other),
        }
    }
}

// =============================================================================
// CONNECTOR ERRORS
// =============================================================================

/// Failure reported by a connector.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConnectorError {
    /// The connector has no such method.
    #[error("unknown method {method} on {connector}")]
    UnknownMethod {
        /// Connector name.
        connector: String,
        /// Requested method.
        method: String,
    },

    /// Arguments decoded but are not acceptable.
    #[error("invalid arguments: {0}")]
    InvalidArgs(String),

    /// Arguments did not decode.
    #[error(transparent)]
    Codec(#[from] CodecError),

    /// The wrapped external protocol rejected the operation.
    #[error("protocol error: {0}")]
    Protocol(String),

    /// A balance or storage update was impossible.
    #[error(transparent)]
    State(#[from] StateError),

    /// The connector tried to start a nested cast.
    #[error("reentrant cast rejected")]
    ReentrantCast,

    /// A nested cast failed for another reason.
    #[error("nested cast failed: {0}")]
    NestedCast(Box<CastError>),
}

impl From<CastError> for ConnectorError {
    fn from(err: CastError) -> Self {
        match err {
            CastError::ReentrantCast => Self::ReentrantCast,
            other => Self::NestedCast(Box::new(other)),
        }
    }
}

// =============================================================================
// STATE ERRORS
// =============================================================================

/// Errors from journaled balance updates.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StateError {
    /// Debit larger than the balance.
    #[error("insufficient {token} for {owner}: required {required}, available {available}")]
    InsufficientBalance {
        /// Debited holder.
        owner: Address,
        /// Token debited.
        token: Address,
        /// Requested amount.
        required: U256,
        /// Balance at the time.
        available: U256,
    },

    /// Credit would overflow 256 bits.
    #[error("balance overflow of {token} for {owner}")]
    Overflow {
        /// Credited holder.
        owner: Address,
        /// Token credited.
        token: Address,
    },
}

// =============================================================================
// AUTHORITY ERRORS
// =============================================================================

/// Errors from managing the set of principals allowed to cast.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthorityError {
    /// Caller is not an authority of the account.
    #[error("unauthorized: {caller} is not an authority")]
    Unauthorized {
        /// The rejected caller.
        caller: Address,
    },

    /// Removing the principal would leave the account without authorities.
    #[error("cannot remove the last authority")]
    LastAuthority,
}
