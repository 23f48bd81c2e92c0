//! # Connector Registry Service
//!
//! Thread-safe registry shared by every account. Governance writes are
//! serialized behind a write lock and swap in a new state; resolution hands
//! out [`RegistrySnapshot`]s that are never revalidated.

use crate::domain::entities::{ConnectorVersion, GovernanceAction, GovernanceRecord};
use crate::domain::state::{RegistrySnapshot, RegistryState};
use crate::errors::RegistryError;
use crate::ports::inbound::{ConnectorResolver, RegistryGovernance};
use parking_lot::RwLock;
use sc_telemetry::REGISTRY_CHANGES;
use shared_types::Address;
use std::collections::BTreeSet;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Governing principals and the audit trail of their changes.
struct Governance {
    master: Address,
    chiefs: BTreeSet<Address>,
    log: Vec<GovernanceRecord>,
}

impl Governance {
    fn is_governor(&self, caller: &Address) -> bool {
        *caller == self.master || self.chiefs.contains(caller)
    }

    fn record(&mut self, action: GovernanceAction, name: &str, address: Address, caller: Address) {
        let sequence = self.log.len() as u64 + 1;
        self.log.push(GovernanceRecord {
            sequence,
            action,
            name: name.to_string(),
            address,
            caller,
        });
        REGISTRY_CHANGES.with_label_values(&[action.as_str()]).inc();
    }
}

/// The shared connector registry.
pub struct ConnectorRegistry<H> {
    state: RwLock<Arc<RegistryState<H>>>,
    governance: RwLock<Governance>,
}

impl<H: Clone + Send + Sync> ConnectorRegistry<H> {
    /// Creates an empty registry governed by `master`.
    #[must_use]
    pub fn new(master: Address) -> Self {
        Self {
            state: RwLock::new(Arc::new(RegistryState::new())),
            governance: RwLock::new(Governance {
                master,
                chiefs: BTreeSet::new(),
                log: Vec::new(),
            }),
        }
    }

    // =========================================================================
    // GOVERNORS
    // =========================================================================

    /// The master principal.
    #[must_use]
    pub fn master(&self) -> Address {
        self.governance.read().master
    }

    /// Current chiefs, sorted.
    #[must_use]
    pub fn chiefs(&self) -> Vec<Address> {
        self.governance.read().chiefs.iter().copied().collect()
    }

    /// True for the master and every chief.
    #[must_use]
    pub fn is_governor(&self, principal: &Address) -> bool {
        self.governance.read().is_governor(principal)
    }

    /// Grants chief rights. Master only; adding an existing chief is a no-op.
    pub fn add_chief(&self, caller: Address, chief: Address) -> Result<(), RegistryError> {
        let mut governance = self.governance.write();
        if caller != governance.master {
            warn!(caller = %caller, "Rejected add_chief from non-master");
            return Err(RegistryError::Unauthorized { caller });
        }
        if governance.chiefs.insert(chief) {
            governance.record(GovernanceAction::AddChief, "", chief, caller);
            info!(chief = %chief, "Chief added");
        }
        Ok(())
    }

    /// Revokes chief rights. Master only; removing a non-chief is a no-op.
    pub fn remove_chief(&self, caller: Address, chief: Address) -> Result<(), RegistryError> {
        let mut governance = self.governance.write();
        if caller != governance.master {
            warn!(caller = %caller, "Rejected remove_chief from non-master");
            return Err(RegistryError::Unauthorized { caller });
        }
        if governance.chiefs.remove(&chief) {
            governance.record(GovernanceAction::RemoveChief, "", chief, caller);
            info!(chief = %chief, "Chief removed");
        }
        Ok(())
    }

    // =========================================================================
    // READS
    // =========================================================================

    /// Ordered copy of every applied governance change.
    #[must_use]
    pub fn governance_log(&self) -> Vec<GovernanceRecord> {
        self.governance.read().log.clone()
    }

    /// Batch pre-check against the current state.
    #[must_use]
    pub fn is_connectors(&self, names: &[&str]) -> (bool, Vec<Option<Address>>) {
        self.snapshot().is_connectors(names)
    }

    /// Names that currently resolve.
    #[must_use]
    pub fn active_names(&self) -> Vec<String> {
        self.state.read().active_names()
    }

    // =========================================================================
    // INTERNALS
    // =========================================================================

    /// Runs a state mutation under both locks. The log is written only when
    /// the mutation reports a change.
    fn govern<F>(
        &self,
        caller: Address,
        action: GovernanceAction,
        name: &str,
        mutate: F,
    ) -> Result<(), RegistryError>
    where
        F: FnOnce(&mut RegistryState<H>) -> Result<Option<Address>, RegistryError>,
    {
        let mut governance = self.governance.write();
        if !governance.is_governor(&caller) {
            warn!(
                caller = %caller,
                action = action.as_str(),
                connector = name,
                "Rejected registry change"
            );
            return Err(RegistryError::Unauthorized { caller });
        }

        let mut state = self.state.write();
        let mut next = RegistryState::clone(&state);
        match mutate(&mut next)? {
            Some(address) => {
                *state = Arc::new(next);
                governance.record(action, name, address, caller);
                info!(
                    action = action.as_str(),
                    connector = name,
                    address = %address,
                    "Registry updated"
                );
            }
            None => {
                debug!(action = action.as_str(), connector = name, "Registry change was a no-op");
            }
        }
        Ok(())
    }
}

impl<H: Clone + Send + Sync> RegistryGovernance<H> for ConnectorRegistry<H> {
    fn register(
        &self,
        caller: Address,
        name: &str,
        address: Address,
        version: ConnectorVersion,
        handle: H,
    ) -> Result<(), RegistryError> {
        self.govern(caller, GovernanceAction::Register, name, |state| {
            state.register(name, address, version, handle)?;
            Ok(Some(address))
        })
    }

    fn enable(&self, caller: Address, name: &str) -> Result<(), RegistryError> {
        self.govern(caller, GovernanceAction::Enable, name, |state| {
            let changed = state.enable(name)?;
            Ok(changed.then(|| state.latest(name).map(|e| e.address)).flatten())
        })
    }

    fn disable(&self, caller: Address, name: &str) -> Result<(), RegistryError> {
        self.govern(caller, GovernanceAction::Disable, name, |state| {
            let changed = state.disable(name)?;
            Ok(changed.then(|| state.latest(name).map(|e| e.address)).flatten())
        })
    }
}

impl<H: Clone + Send + Sync> ConnectorResolver<H> for ConnectorRegistry<H> {
    fn snapshot(&self) -> RegistrySnapshot<H> {
        RegistrySnapshot::new(Arc::clone(&self.state.read()))
    }
}
