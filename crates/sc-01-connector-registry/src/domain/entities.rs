//! # Registry Entities
//!
//! Entries, resolution results and the governance audit trail.

use serde::{Deserialize, Serialize};
use shared_types::Address;
use std::fmt;

// =============================================================================
// CONNECTOR VERSION
// =============================================================================

/// Dispatch-interface generation a connector implements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ConnectorVersion {
    /// First-generation interface.
    V1,
    /// Current interface.
    #[default]
    V2,
}

impl fmt::Display for ConnectorVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::V1 => write!(f, "v1"),
            Self::V2 => write!(f, "v2"),
        }
    }
}

// =============================================================================
// CONNECTOR ENTRY
// =============================================================================

/// One registration of a name. A name accumulates entries over time; only the
/// latest one may be enabled.
#[derive(Clone)]
pub struct ConnectorEntry<H> {
    /// Logical name.
    pub name: String,
    /// Address the name resolves to.
    pub address: Address,
    /// Whether the entry currently resolves.
    pub enabled: bool,
    /// Interface generation.
    pub version: ConnectorVersion,
    /// Executable handle.
    pub handle: H,
}

impl<H> ConnectorEntry<H> {
    /// Creates a new, enabled entry.
    pub fn new(
        name: impl Into<String>,
        address: Address,
        version: ConnectorVersion,
        handle: H,
    ) -> Self {
        Self {
            name: name.into(),
            address,
            enabled: true,
            version,
            handle,
        }
    }
}

impl<H> fmt::Debug for ConnectorEntry<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectorEntry")
            .field("name", &self.name)
            .field("address", &self.address)
            .field("enabled", &self.enabled)
            .field("version", &self.version)
            .finish_non_exhaustive()
    }
}

/// Result of resolving a name against a snapshot.
#[derive(Clone)]
pub struct ResolvedConnector<H> {
    /// Logical name that was resolved.
    pub name: String,
    /// Address of the enabled entry.
    pub address: Address,
    /// Interface generation.
    pub version: ConnectorVersion,
    /// Executable handle.
    pub handle: H,
}

impl<H> fmt::Debug for ResolvedConnector<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResolvedConnector")
            .field("name", &self.name)
            .field("address", &self.address)
            .field("version", &self.version)
            .finish_non_exhaustive()
    }
}

// =============================================================================
// GOVERNANCE
// =============================================================================

/// Kind of governance change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GovernanceAction {
    /// A new entry was registered.
    Register,
    /// The latest entry of a name was re-enabled.
    Enable,
    /// The enabled entry of a name was disabled.
    Disable,
    /// A chief was added.
    AddChief,
    /// A chief was removed.
    RemoveChief,
}

impl GovernanceAction {
    /// Metric label.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Register => "register",
            Self::Enable => "enable",
            Self::Disable => "disable",
            Self::AddChief => "add_chief",
            Self::RemoveChief => "remove_chief",
        }
    }
}

/// Append-only record of one applied governance change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GovernanceRecord {
    /// Position in the log, starting at 1.
    pub sequence: u64,
    /// What happened.
    pub action: GovernanceAction,
    /// Connector name, empty for chief changes.
    pub name: String,
    /// Connector address, or the chief for chief changes.
    pub address: Address,
    /// Principal that made the change.
    pub caller: Address,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_entry_is_enabled() {
        let entry = ConnectorEntry::new("LEND", Address::from_low_u64(1), ConnectorVersion::V2, ());
        assert!(entry.enabled);
        assert_eq!(entry.name, "LEND");
    }

    #[test]
    fn test_debug_skips_handle() {
        let entry =
            ConnectorEntry::new("LEND", Address::from_low_u64(1), ConnectorVersion::V1, 42u32);
        let text = format!("{entry:?}");
        assert!(text.contains("LEND"));
        assert!(!text.contains("42"));
    }

    #[test]
    fn test_version_display() {
        assert_eq!(ConnectorVersion::V1.to_string(), "v1");
        assert_eq!(ConnectorVersion::default(), ConnectorVersion::V2);
    }
}
