//! # State Journal
//!
//! Buffered overlay over the committed world. Connectors and the protocols
//! they wrap read and write through the journal; nothing reaches the world
//! until the whole batch succeeds and the account applies the resulting
//! [`ChangeSet`]. Dropping the journal discards every buffered effect.

use crate::errors::StateError;
use crate::ports::outbound::StateAccess;
use serde::{Deserialize, Serialize};
use shared_types::{Address, StorageKey, StorageValue, U256};
use std::collections::HashMap;

/// One recorded effect, in the order it happened.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum StateChange {
    /// Balance moved between holders.
    Transfer {
        token: Address,
        from: Address,
        to: Address,
        amount: U256,
    },
    /// Balance created.
    Mint {
        token: Address,
        to: Address,
        amount: U256,
    },
    /// Balance destroyed.
    Burn {
        token: Address,
        from: Address,
        amount: U256,
    },
    /// Protocol storage written.
    StorageWrite {
        contract: Address,
        key: StorageKey,
        value: StorageValue,
    },
}

/// Final values produced by a successful batch.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ChangeSet {
    /// `(holder, token) -> balance` after the batch.
    pub balances: Vec<((Address, Address), U256)>,
    /// `(contract, key) -> value` after the batch.
    pub storage: Vec<((Address, StorageKey), StorageValue)>,
    /// Ordered effect log.
    pub changes: Vec<StateChange>,
}

impl ChangeSet {
    /// True when the batch touched nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.balances.is_empty() && self.storage.is_empty()
    }
}

/// Overlay over a read-only world view.
pub struct StateJournal<'w> {
    base: &'w dyn StateAccess,
    balances: HashMap<(Address, Address), U256>,
    storage: HashMap<(Address, StorageKey), StorageValue>,
    changes: Vec<StateChange>,
}

impl<'w> StateJournal<'w> {
    /// Opens an empty journal over `base`.
    pub fn new(base: &'w dyn StateAccess) -> Self {
        Self {
            base,
            balances: HashMap::new(),
            storage: HashMap::new(),
            changes: Vec::new(),
        }
    }

    // =========================================================================
    // READS
    // =========================================================================

    /// Balance of `owner` in `token`, including buffered writes.
    #[must_use]
    pub fn balance_of(&self, owner: &Address, token: &Address) -> U256 {
        self.balances
            .get(&(*owner, *token))
            .copied()
            .unwrap_or_else(|| self.base.balance_of(owner, token))
    }

    /// Storage word, including buffered writes.
    #[must_use]
    pub fn storage(&self, contract: &Address, key: &StorageKey) -> StorageValue {
        self.storage
            .get(&(*contract, *key))
            .copied()
            .unwrap_or_else(|| self.base.storage(contract, key))
    }

    /// Effects recorded so far.
    #[must_use]
    pub fn changes(&self) -> &[StateChange] {
        &self.changes
    }

    // =========================================================================
    // WRITES
    // =========================================================================

    /// Moves `amount` of `token` from `from` to `to`.
    pub fn transfer(
        &mut self,
        token: Address,
        from: Address,
        to: Address,
        amount: U256,
    ) -> Result<(), StateError> {
        let debited = self.debited(token, from, amount)?;
        if from == to {
            // Balance check only
            self.changes.push(StateChange::Transfer {
                token,
                from,
                to,
                amount,
            });
            return Ok(());
        }
        let credited = self.credited(token, to, amount)?;

        self.balances.insert((from, token), debited);
        self.balances.insert((to, token), credited);
        self.changes.push(StateChange::Transfer {
            token,
            from,
            to,
            amount,
        });
        Ok(())
    }

    /// Creates `amount` of `token` for `to`.
    pub fn mint(&mut self, token: Address, to: Address, amount: U256) -> Result<(), StateError> {
        let credited = self.credited(token, to, amount)?;
        self.balances.insert((to, token), credited);
        self.changes.push(StateChange::Mint { token, to, amount });
        Ok(())
    }

    /// Destroys `amount` of `token` held by `from`.
    pub fn burn(&mut self, token: Address, from: Address, amount: U256) -> Result<(), StateError> {
        let debited = self.debited(token, from, amount)?;
        self.balances.insert((from, token), debited);
        self.changes.push(StateChange::Burn {
            token,
            from,
            amount,
        });
        Ok(())
    }

    /// Writes a storage word.
    pub fn set_storage(&mut self, contract: Address, key: StorageKey, value: StorageValue) {
        self.storage.insert((contract, key), value);
        self.changes.push(StateChange::StorageWrite {
            contract,
            key,
            value,
        });
    }

    /// Consumes the journal, yielding the final values to commit.
    #[must_use]
    pub fn into_change_set(self) -> ChangeSet {
        ChangeSet {
            balances: self.balances.into_iter().collect(),
            storage: self.storage.into_iter().collect(),
            changes: self.changes,
        }
    }

    fn debited(&self, token: Address, owner: Address, amount: U256) -> Result<U256, StateError> {
        let available = self.balance_of(&owner, &token);
        available
            .checked_sub(amount)
            .ok_or(StateError::InsufficientBalance {
                owner,
                token,
                required: amount,
                available,
            })
    }

    fn credited(&self, token: Address, owner: Address, amount: U256) -> Result<U256, StateError> {
        self.balance_of(&owner, &token)
            .checked_add(amount)
            .ok_or(StateError::Overflow { owner, token })
    }
}
