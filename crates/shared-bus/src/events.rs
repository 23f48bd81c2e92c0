//! # Account Events
//!
//! Defines every event that flows through the shared bus. Each event carries
//! enough structured data to reconstruct a batch's effect without replaying it.

use serde::{Deserialize, Serialize};
use shared_types::{Address, Hash, SlotId, U256};

/// Batch-level audit payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CastLog {
    /// The account the batch executed in.
    pub account: Address,
    /// Principal that submitted the batch.
    pub initiator: Address,
    /// Fee recipient / origin supplied with the batch.
    pub origin: Address,
    /// Keccak-256 of the encoded spells.
    pub batch_hash: Hash,
    /// Per-account sequence number of this batch.
    pub nonce: u64,
    /// Connector names in execution order.
    pub connectors: Vec<String>,
    /// Event names reported by each spell, in execution order.
    pub event_names: Vec<String>,
}

/// Spell-level audit payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpellLog {
    /// The account the spell executed in.
    pub account: Address,
    /// Sequence number of the enclosing batch.
    pub nonce: u64,
    /// Position of the spell in its batch.
    pub index: usize,
    /// Logical connector name.
    pub connector: String,
    /// Address the name resolved to.
    pub connector_address: Address,
    /// Method invoked.
    pub method: String,
    /// Normalized amount reported by the connector.
    pub amount: U256,
    /// Connector-specific event name.
    pub event_name: String,
    /// Connector-specific event parameters.
    pub event_params: serde_json::Value,
    /// Scratch slots read by the spell.
    pub slots_read: Vec<SlotId>,
    /// Scratch slots written by the spell.
    pub slots_written: Vec<SlotId>,
}

/// All events that can be published to the bus.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AccountEvent {
    /// A batch committed.
    CastExecuted(CastLog),

    /// A spell inside a committed batch.
    SpellExecuted(SpellLog),

    /// A principal was authorised to cast on an account.
    AuthorityAdded {
        /// The account.
        account: Address,
        /// Newly authorised principal.
        principal: Address,
        /// Principal that made the change.
        by: Address,
    },

    /// A principal lost the right to cast on an account.
    AuthorityRemoved {
        /// The account.
        account: Address,
        /// Removed principal.
        principal: Address,
        /// Principal that made the change.
        by: Address,
    },
}

impl AccountEvent {
    /// Get the topic for this event (for filtering).
    #[must_use]
    pub fn topic(&self) -> EventTopic {
        match self {
            Self::CastExecuted(_) => EventTopic::Casts,
            Self::SpellExecuted(_) => EventTopic::Spells,
            Self::AuthorityAdded { .. } | Self::AuthorityRemoved { .. } => EventTopic::Authority,
        }
    }

    /// Get the account that produced this event.
    #[must_use]
    pub fn account(&self) -> Address {
        match self {
            Self::CastExecuted(log) => log.account,
            Self::SpellExecuted(log) => log.account,
            Self::AuthorityAdded { account, .. } | Self::AuthorityRemoved { account, .. } => {
                *account
            }
        }
    }
}

/// Event topics for subscription filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventTopic {
    /// Batch-level events.
    Casts,
    /// Spell-level events.
    Spells,
    /// Authority changes.
    Authority,
    /// All events (no filtering).
    All,
}

/// Filter for subscribing to specific events.
#[derive(Debug, Clone, Default)]
pub struct EventFilter {
    /// Topics to include. Empty means all topics.
    pub topics: Vec<EventTopic>,
    /// Accounts to include. Empty means all accounts.
    pub accounts: Vec<Address>,
}

impl EventFilter {
    /// Create a filter that accepts all events.
    #[must_use]
    pub fn all() -> Self {
        Self::default()
    }

    /// Create a filter for specific topics.
    #[must_use]
    pub fn topics(topics: Vec<EventTopic>) -> Self {
        Self {
            topics,
            accounts: Vec::new(),
        }
    }

    /// Create a filter for events from specific accounts.
    #[must_use]
    pub fn from_accounts(accounts: Vec<Address>) -> Self {
        Self {
            topics: Vec::new(),
            accounts,
        }
    }

    /// Check if an event matches this filter.
    #[must_use]
    pub fn matches(&self, event: &AccountEvent) -> bool {
        let topic_match = self.topics.is_empty()
            || self.topics.contains(&EventTopic::All)
            || self.topics.contains(&event.topic());

        let account_match = self.accounts.is_empty() || self.accounts.contains(&event.account());

        topic_match && account_match
    }
}
