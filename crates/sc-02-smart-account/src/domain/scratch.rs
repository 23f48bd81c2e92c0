//! # Scratch Store
//!
//! Slot buffer that lets a spell hand a value to later spells of the same
//! batch. One store is created per cast and dropped when the cast ends.

use shared_types::{SlotId, U256};
use std::collections::HashMap;

/// Per-batch slot storage.
///
/// - Slot 0 is reserved: writes are ignored, reads yield zero
/// - Unwritten slots read as zero
/// - Writes overwrite unconditionally (last writer wins)
#[derive(Debug, Default, Clone)]
pub struct ScratchStore {
    slots: HashMap<SlotId, U256>,
}

impl ScratchStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            slots: HashMap::new(),
        }
    }

    /// Reads a slot. Never fails; absence is zero.
    #[must_use]
    pub fn get(&self, slot: SlotId) -> U256 {
        if slot.is_none() {
            return U256::zero();
        }
        self.slots.get(&slot).copied().unwrap_or_default()
    }

    /// Writes a slot. No-op for slot 0.
    pub fn set(&mut self, slot: SlotId, value: U256) {
        if slot.is_none() {
            return;
        }
        self.slots.insert(slot, value);
    }

    /// Number of slots written.
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// True when nothing was written.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

// =============================================================================
// TESTS
// =============================================================================
