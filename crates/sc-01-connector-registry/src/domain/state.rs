//! # Registry State
//!
//! The versioned name table and the immutable snapshots readers resolve
//! against. Every mutating operation validates first and mutates second, so a
//! rejected call leaves the state untouched.

use super::entities::{ConnectorEntry, ConnectorVersion, ResolvedConnector};
use crate::errors::RegistryError;
use shared_types::Address;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

/// Name table with per-name history.
#[derive(Clone)]
pub struct RegistryState<H> {
    /// Entries per name, oldest first. Only the last one may be enabled.
    entries: BTreeMap<String, Vec<ConnectorEntry<H>>>,
    /// Address -> name for every enabled entry.
    active_addresses: HashMap<Address, String>,
}

impl<H> Default for RegistryState<H> {
    fn default() -> Self {
        Self {
            entries: BTreeMap::new(),
            active_addresses: HashMap::new(),
        }
    }
}

impl<H: Clone> RegistryState<H> {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a new enabled entry for `name`.
    ///
    /// A name whose entries are all disabled gets a fresh entry appended; the
    /// older ones stay in the history.
    pub fn register(
        &mut self,
        name: &str,
        address: Address,
        version: ConnectorVersion,
        handle: H,
    ) -> Result<(), RegistryError> {
        validate_name(name)?;

        if self.latest(name).is_some_and(|entry| entry.enabled) {
            return Err(RegistryError::DuplicateName(name.to_string()));
        }
        self.check_address_free(address, name)?;

        self.entries
            .entry(name.to_string())
            .or_default()
            .push(ConnectorEntry::new(name, address, version, handle));
        self.active_addresses.insert(address, name.to_string());
        Ok(())
    }

    /// Re-enables the latest entry of `name`.
    ///
    /// Returns `Ok(false)` when it was already enabled.
    pub fn enable(&mut self, name: &str) -> Result<bool, RegistryError> {
        let latest = self
            .latest(name)
            .ok_or_else(|| RegistryError::UnknownName(name.to_string()))?;
        if latest.enabled {
            return Ok(false);
        }
        let address = latest.address;
        self.check_address_free(address, name)?;

        if let Some(entry) = self.latest_mut(name) {
            entry.enabled = true;
        }
        self.active_addresses.insert(address, name.to_string());
        Ok(true)
    }

    /// Disables the enabled entry of `name`.
    ///
    /// Returns `Ok(false)` when it was already disabled.
    pub fn disable(&mut self, name: &str) -> Result<bool, RegistryError> {
        let entry = self
            .latest_mut(name)
            .ok_or_else(|| RegistryError::UnknownName(name.to_string()))?;
        if !entry.enabled {
            return Ok(false);
        }
        entry.enabled = false;
        let address = entry.address;
        self.active_addresses.remove(&address);
        Ok(true)
    }

    /// Resolves `name` to its enabled entry.
    pub fn resolve(&self, name: &str) -> Result<ResolvedConnector<H>, RegistryError> {
        match self.latest(name) {
            Some(entry) if entry.enabled => Ok(ResolvedConnector {
                name: entry.name.clone(),
                address: entry.address,
                version: entry.version,
                handle: entry.handle.clone(),
            }),
            _ => Err(RegistryError::ModuleNotFound(name.to_string())),
        }
    }

    /// Reports whether every name resolves, along with each resolved address.
    #[must_use]
    pub fn is_connectors(&self, names: &[&str]) -> (bool, Vec<Option<Address>>) {
        let addresses: Vec<Option<Address>> = names
            .iter()
            .map(|name| self.resolve(name).ok().map(|resolved| resolved.address))
            .collect();
        let all = addresses.iter().all(Option::is_some);
        (all, addresses)
    }

    /// Latest entry of `name`, enabled or not.
    #[must_use]
    pub fn latest(&self, name: &str) -> Option<&ConnectorEntry<H>> {
        self.entries.get(name).and_then(|history| history.last())
    }

    /// Every entry ever registered under `name`, oldest first.
    #[must_use]
    pub fn history(&self, name: &str) -> &[ConnectorEntry<H>] {
        self.entries.get(name).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Names with an enabled entry, sorted.
    #[must_use]
    pub fn active_names(&self) -> Vec<String> {
        self.entries
            .iter()
            .filter(|(_, history)| history.last().is_some_and(|entry| entry.enabled))
            .map(|(name, _)| name.clone())
            .collect()
    }

    /// Name the address is currently active under.
    #[must_use]
    pub fn name_of(&self, address: &Address) -> Option<&str> {
        self.active_addresses.get(address).map(String::as_str)
    }

    fn latest_mut(&mut self, name: &str) -> Option<&mut ConnectorEntry<H>> {
        self.entries.get_mut(name).and_then(|history| history.last_mut())
    }

    fn check_address_free(&self, address: Address, name: &str) -> Result<(), RegistryError> {
        match self.active_addresses.get(&address) {
            Some(existing) if existing != name => Err(RegistryError::DuplicateAddress {
                address,
                existing: existing.clone(),
            }),
            _ => Ok(()),
        }
    }
}

/// Rejects empty names and names with whitespace or control characters.
pub fn validate_name(name: &str) -> Result<(), RegistryError> {
    if name.is_empty() || name.chars().any(|c| c.is_whitespace() || c.is_control()) {
        return Err(RegistryError::InvalidName(name.to_string()));
    }
    Ok(())
}

// =============================================================================
// SNAPSHOT
// =============================================================================

/// Point-in-time, read-only view of the registry.
///
/// Cheap to clone. Later governance changes are never visible through an
/// existing snapshot.
#[derive(Clone)]
pub struct RegistrySnapshot<H> {
    state: Arc<RegistryState<H>>,
}

impl<H: Clone> RegistrySnapshot<H> {
    /// Wraps shared state.
    #[must_use]
    pub fn new(state: Arc<RegistryState<H>>) -> Self {
        Self { state }
    }

    /// Resolves `name` as of this snapshot.
    pub fn resolve(&self, name: &str) -> Result<ResolvedConnector<H>, RegistryError> {
        self.state.resolve(name)
    }

    /// Batch pre-check as of this snapshot.
    #[must_use]
    pub fn is_connectors(&self, names: &[&str]) -> (bool, Vec<Option<Address>>) {
        self.state.is_connectors(names)
    }

    /// The underlying state.
    #[must_use]
    pub fn state(&self) -> &RegistryState<H> {
        &self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn addr(n: u64) -> Address {
        Address::from_low_u64(n)
    }

    fn state_with_lend() -> RegistryState<u32> {
        let mut state = RegistryState::new();
        state
            .register("LEND", addr(1), ConnectorVersion::V2, 1)
            .expect("register");
        state
    }

    #[test]
    fn test_register_and_resolve() {
        let state = state_with_lend();
        let resolved = state.resolve("LEND").expect("resolve");
        assert_eq!(resolved.address, addr(1));
        assert_eq!(resolved.handle, 1);
        assert_eq!(state.name_of(&addr(1)), Some("LEND"));
    }

    #[test]
    fn test_register_active_name_fails() {
        let mut state = state_with_lend();
        let result = state.register("LEND", addr(2), ConnectorVersion::V2, 2);
        assert_eq!(result, Err(RegistryError::DuplicateName("LEND".into())));
        assert_eq!(state.history("LEND").len(), 1);
    }

    #[test]
    fn test_register_active_address_fails() {
        let mut state = state_with_lend();
        let result = state.register("OTHER", addr(1), ConnectorVersion::V2, 2);
        assert!(matches!(result, Err(RegistryError::DuplicateAddress { .. })));
        assert!(state.latest("OTHER").is_none());
    }

    #[test]
    fn test_invalid_names() {
        let mut state: RegistryState<u32> = RegistryState::new();
        for name in ["", "LEND A", "LEND\n", "\tX"] {
            assert_eq!(
                state.register(name, addr(1), ConnectorVersion::V1, 0),
                Err(RegistryError::InvalidName(name.to_string()))
            );
        }
    }

    #[test]
    fn test_resolve_unknown_and_disabled() {
        let mut state = state_with_lend();
        assert_eq!(
            state.resolve("NOPE").map(|r| r.address),
            Err(RegistryError::ModuleNotFound("NOPE".into()))
        );

        state.disable("LEND").expect("disable");
        assert_eq!(
            state.resolve("LEND").map(|r| r.address),
            Err(RegistryError::ModuleNotFound("LEND".into()))
        );
    }

    #[test]
    fn test_disable_is_idempotent() {
        let mut state = state_with_lend();
        assert_eq!(state.disable("LEND"), Ok(true));
        assert_eq!(state.disable("LEND"), Ok(false));
        assert!(!state.history("LEND")[0].enabled);
        assert_eq!(state.name_of(&addr(1)), None);
    }

    #[test]
    fn test_enable_and_disable_unknown() {
        let mut state: RegistryState<u32> = RegistryState::new();
        assert_eq!(state.enable("X"), Err(RegistryError::UnknownName("X".into())));
        assert_eq!(state.disable("X"), Err(RegistryError::UnknownName("X".into())));
    }

    #[test]
    fn test_reenable_restores_resolution() {
        let mut state = state_with_lend();
        state.disable("LEND").expect("disable");
        assert_eq!(state.enable("LEND"), Ok(true));
        assert_eq!(state.enable("LEND"), Ok(false));
        assert_eq!(state.resolve("LEND").map(|r| r.address), Ok(addr(1)));
    }

    #[test]
    fn test_enable_fails_when_address_taken() {
        let mut state = state_with_lend();
        state.disable("LEND").expect("disable");
        state
            .register("LEND2", addr(1), ConnectorVersion::V2, 9)
            .expect("address is free again");

        assert!(matches!(
            state.enable("LEND"),
            Err(RegistryError::DuplicateAddress { .. })
        ));
        assert!(state.resolve("LEND").is_err());
    }

    #[test]
    fn test_register_after_disable_appends_history() {
        let mut state = state_with_lend();
        state.disable("LEND").expect("disable");
        state
            .register("LEND", addr(5), ConnectorVersion::V2, 5)
            .expect("re-register");

        let history = state.history("LEND");
        assert_eq!(history.len(), 2);
        assert!(!history[0].enabled);
        assert!(history[1].enabled);
        assert_eq!(state.resolve("LEND").map(|r| r.handle), Ok(5));
    }

    #[test]
    fn test_is_connectors() {
        let mut state = state_with_lend();
        state
            .register("PRIZE", addr(2), ConnectorVersion::V2, 2)
            .expect("register");

        let (ok, addresses) = state.is_connectors(&["LEND", "PRIZE"]);
        assert!(ok);
        assert_eq!(addresses, vec![Some(addr(1)), Some(addr(2))]);

        let (ok, addresses) = state.is_connectors(&["LEND", "NOPE"]);
        assert!(!ok);
        assert_eq!(addresses, vec![Some(addr(1)), None]);
    }

    #[test]
    fn test_active_names_sorted() {
        let mut state = state_with_lend();
        state
            .register("AAVE", addr(3), ConnectorVersion::V1, 3)
            .expect("register");
        state.disable("LEND").expect("disable");
        assert_eq!(state.active_names(), vec!["AAVE".to_string()]);
    }

    #[test]
    fn test_snapshot_is_isolated() {
        let mut state = state_with_lend();
        let snapshot = RegistrySnapshot::new(Arc::new(state.clone()));

        state.disable("LEND").expect("disable");

        assert!(snapshot.resolve("LEND").is_ok());
        assert!(state.resolve("LEND").is_err());
    }

    proptest! {
        #[test]
        fn prop_at_most_one_enabled_entry(
            ops in proptest::collection::vec((0u8..3, 0u64..3), 1..40)
        ) {
            let mut state: RegistryState<u64> = RegistryState::new();
            for (op, n) in ops {
                let _ = match op {
                    0 => state.register("X", addr(n), ConnectorVersion::V2, n).map(|()| true),
                    1 => state.enable("X"),
                    _ => state.disable("X"),
                };
                let enabled = state.history("X").iter().filter(|e| e.enabled).count();
                prop_assert!(enabled <= 1);
                if let Some(latest) = state.latest("X") {
                    prop_assert_eq!(state.resolve("X").is_ok(), latest.enabled);
                }
            }
        }
    }
}
