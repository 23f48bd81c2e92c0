//! # In-Memory World
//!
//! Committed balances and protocol storage kept in hash maps. Used by the
//! runtime and by tests; zero values are never stored, so two worlds with the
//! same observable state compare equal.

use crate::domain::journal::ChangeSet;
use crate::ports::outbound::{StateAccess, WorldState};
use shared_types::{Address, StorageKey, StorageValue, U256};
use std::collections::HashMap;

/// In-memory world state.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct InMemoryWorld {
    /// `(holder, token) -> balance`.
    balances: HashMap<(Address, Address), U256>,
    /// `(contract, key) -> value`.
    storage: HashMap<(Address, StorageKey), StorageValue>,
}

impl InMemoryWorld {
    /// Create a new empty world.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a balance directly (seeding).
    pub fn set_balance(&mut self, owner: Address, token: Address, amount: U256) {
        if amount.is_zero() {
            self.balances.remove(&(owner, token));
        } else {
            self.balances.insert((owner, token), amount);
        }
    }

    /// Set a storage word directly (seeding).
    pub fn set_storage(&mut self, contract: Address, key: StorageKey, value: StorageValue) {
        if value.is_zero() {
            self.storage.remove(&(contract, key));
        } else {
            self.storage.insert((contract, key), value);
        }
    }

    /// Every non-zero balance of `owner`, sorted by token.
    #[must_use]
    pub fn balances_of(&self, owner: &Address) -> Vec<(Address, U256)> {
        let mut balances: Vec<(Address, U256)> = self
            .balances
            .iter()
            .filter(|((holder, _), _)| holder == owner)
            .map(|((_, token), amount)| (*token, *amount))
            .collect();
        balances.sort_by_key(|(token, _)| *token);
        balances
    }
}

impl StateAccess for InMemoryWorld {
    fn balance_of(&self, owner: &Address, token: &Address) -> U256 {
        self.balances
            .get(&(*owner, *token))
            .copied()
            .unwrap_or_default()
    }

    fn storage(&self, contract: &Address, key: &StorageKey) -> StorageValue {
        self.storage
            .get(&(*contract, *key))
            .copied()
            .unwrap_or(StorageValue::ZERO)
    }
}

impl WorldState for InMemoryWorld {
    fn apply(&mut self, changes: ChangeSet) {
        for ((owner, token), amount) in changes.balances {
            self.set_balance(owner, token, amount);
        }
        for ((contract, key), value) in changes.storage {
            self.set_storage(contract, key, value);
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
