//! # Audit Events
//!
//! Conversion of committed cast records into bus events: one batch-level
//! `CastExecuted` plus one `SpellExecuted` per spell.

use crate::domain::records::CastRecord;
use shared_bus::{AccountEvent, CastLog, SpellLog};

impl CastRecord {
    /// Batch-level event payload.
    #[must_use]
    pub fn cast_log(&self) -> CastLog {
        CastLog {
            account: self.account,
            initiator: self.initiator,
            origin: self.origin,
            batch_hash: self.batch_hash,
            nonce: self.nonce,
            connectors: self.connectors(),
            event_names: self.event_names(),
        }
    }

    /// Spell-level event payloads, in execution order.
    #[must_use]
    pub fn spell_logs(&self) -> Vec<SpellLog> {
        self.outcomes
            .iter()
            .map(|outcome| SpellLog {
                account: self.account,
                nonce: self.nonce,
                index: outcome.index,
                connector: outcome.connector.clone(),
                connector_address: outcome.connector_address,
                method: outcome.method.clone(),
                amount: outcome.amount,
                event_name: outcome.event_name.clone(),
                event_params: outcome.event_params.clone(),
                slots_read: outcome.slots_read.clone(),
                slots_written: outcome.slots_written.clone(),
            })
            .collect()
    }

    /// Every event for this record; the batch event comes first.
    #[must_use]
    pub fn to_events(&self, include_spells: bool) -> Vec<AccountEvent> {
        let mut events = vec![AccountEvent::CastExecuted(self.cast_log())];
        if include_spells {
            events.extend(self.spell_logs().into_iter().map(AccountEvent::SpellExecuted));
        }
        events
    }
}
