//! # Spell Context
//!
//! Everything a connector may touch while it runs: the account identity, the
//! batch's scratch store and the account's journaled state. Connectors keep no
//! state of their own; whatever must outlive a spell goes through here.

use super::journal::StateJournal;
use super::scratch::ScratchStore;
use shared_types::{Address, Amount, SlotId, U256};

/// Execution context handed to a connector for one spell.
pub struct SpellContext<'a, 'w> {
    account: Address,
    initiator: Address,
    connector_address: Address,
    scratch: &'a mut ScratchStore,
    journal: &'a mut StateJournal<'w>,
    slots_read: Vec<SlotId>,
    slots_written: Vec<SlotId>,
}

impl<'a, 'w> SpellContext<'a, 'w> {
    /// Builds the context for one spell.
    pub fn new(
        account: Address,
        initiator: Address,
        connector_address: Address,
        scratch: &'a mut ScratchStore,
        journal: &'a mut StateJournal<'w>,
    ) -> Self {
        Self {
            account,
            initiator,
            connector_address,
            scratch,
            journal,
            slots_read: Vec::new(),
            slots_written: Vec::new(),
        }
    }

    /// The account every effect is booked against.
    #[must_use]
    pub fn account(&self) -> Address {
        self.account
    }

    /// Principal that submitted the batch.
    #[must_use]
    pub fn initiator(&self) -> Address {
        self.initiator
    }

    /// Address the running connector was resolved to.
    #[must_use]
    pub fn connector_address(&self) -> Address {
        self.connector_address
    }

    /// Reads a scratch slot. Slot 0 reads zero and is not recorded.
    pub fn get_slot(&mut self, slot: SlotId) -> U256 {
        if !slot.is_none() {
            self.slots_read.push(slot);
        }
        self.scratch.get(slot)
    }

    /// Writes a scratch slot. Slot 0 is ignored and not recorded.
    pub fn set_slot(&mut self, slot: SlotId, value: U256) {
        if !slot.is_none() {
            self.slots_written.push(slot);
        }
        self.scratch.set(slot, value);
    }

    /// Applies the input-slot convention to an amount argument.
    ///
    /// A non-zero `get_id` replaces the literal with the slot's value. The
    /// result may still be [`Amount::EntireBalance`] if the slot held the
    /// sentinel, so callers resolve it afterwards.
    pub fn amount_from(&mut self, amount: Amount, get_id: SlotId) -> Amount {
        if get_id.is_none() {
            amount
        } else {
            Amount::from_raw(self.get_slot(get_id))
        }
    }

    /// The account's journaled state.
    pub fn state(&mut self) -> &mut StateJournal<'w> {
        &mut *self.journal
    }

    /// Read-only view of the journaled state.
    #[must_use]
    pub fn state_ref(&self) -> &StateJournal<'w> {
        &*self.journal
    }

    /// Slots read and written, in access order.
    #[must_use]
    pub fn into_slot_trace(self) -> (Vec<SlotId>, Vec<SlotId>) {
        (self.slots_read, self.slots_written)
    }
}
