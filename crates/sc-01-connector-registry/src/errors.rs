//! # Error Types
//!
//! Errors raised by registry governance and resolution.

use shared_types::Address;
use thiserror::Error;

/// Errors from the connector registry.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// Caller is not allowed to perform the governance action.
    #[error("unauthorized: {caller} is not a registry governor")]
    Unauthorized {
        /// The rejected caller.
        caller: Address,
    },

    /// The name already has an enabled entry.
    #[error("duplicate name: {0} is already active")]
    DuplicateName(String),

    /// The address is already active under another name.
    #[error("duplicate address: {address} is already active as {existing}")]
    DuplicateAddress {
        /// The conflicting address.
        address: Address,
        /// Name the address is active under.
        existing: String,
    },

    /// No entry was ever registered under the name.
    #[error("unknown name: {0}")]
    UnknownName(String),

    /// The name is unknown or its entry is disabled.
    #[error("module not found: {0}")]
    ModuleNotFound(String),

    /// The name is empty or contains whitespace or control characters.
    #[error("invalid connector name: {0:?}")]
    InvalidName(String),
}

impl RegistryError {
    /// Short, stable label for metrics.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Unauthorized { .. } => "unauthorized",
            Self::DuplicateName(_) => "duplicate_name",
            Self::DuplicateAddress { .. } => "duplicate_address",
            Self::UnknownName(_) => "unknown_name",
            Self::ModuleNotFound(_) => "module_not_found",
            Self::InvalidName(_) => "invalid_name",
        }
    }
}
