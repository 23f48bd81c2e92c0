//! # Connector Implementations
//!
//! Each connector decodes its argument layout, applies the scratch-slot
//! convention and forwards to the wrapped protocol through the account's
//! journaled state.

pub mod lending;
pub mod prize_pool;

use sc_02_smart_account::errors::ConnectorError;

/// Error for a method the connector does not expose.
pub(crate) fn unknown_method(connector: &str, method: &str) -> ConnectorError {
    ConnectorError::UnknownMethod {
        connector: connector.to_string(),
        method: method.to_string(),
    }
}
