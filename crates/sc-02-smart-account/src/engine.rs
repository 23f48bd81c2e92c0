//! # Casting Engine
//!
//! The resolve-and-dispatch loop. Spells run strictly in order against one
//! registry snapshot; the first failure stops the batch and is returned as is.
//! The engine never commits anything itself: the caller owns the journal and
//! decides what to do with it.

use crate::domain::context::SpellContext;
use crate::domain::journal::StateJournal;
use crate::domain::records::{Spell, SpellOutcome};
use crate::domain::scratch::ScratchStore;
use crate::errors::{CastError, ConnectorError};
use crate::ports::outbound::ConnectorHandle;
use sc_01_connector_registry::RegistrySnapshot;
use sc_telemetry::log_spell_event;
use shared_types::Address;
use std::cell::Cell;

// =============================================================================
// REENTRANCY GUARD
// =============================================================================

thread_local! {
    /// Account whose cast is running on this thread, if any.
    static IN_FLIGHT: Cell<Option<Address>> = const { Cell::new(None) };
}

/// Marks a cast as running on the current thread until dropped.
///
/// Casts are synchronous end to end, so a second `enter` on the same thread
/// can only come from a connector calling back into an account.
#[derive(Debug)]
pub struct CastGuard {
    _private: (),
}

impl CastGuard {
    /// Claims the thread for `account`, or fails if a cast is already running.
    pub fn enter(account: Address) -> Result<Self, CastError> {
        IN_FLIGHT.with(|slot| {
            if let Some(running) = slot.get() {
                tracing::warn!(account = %account, running = %running, "Nested cast rejected");
                return Err(CastError::ReentrantCast);
            }
            slot.set(Some(account));
            Ok(Self { _private: () })
        })
    }

    /// True while any cast is running on this thread.
    #[must_use]
    pub fn is_active() -> bool {
        IN_FLIGHT.with(|slot| slot.get().is_some())
    }
}

impl Drop for CastGuard {
    fn drop(&mut self) {
        IN_FLIGHT.with(|slot| slot.set(None));
    }
}

// =============================================================================
// DISPATCH LOOP
// =============================================================================

/// Runs `spells` in order for `account`.
///
/// Each spell is resolved against `snapshot` right before it runs, so a
/// missing connector late in the batch still fails the whole batch after the
/// earlier spells have run against the journal. Returns one outcome per
/// spell on success.
pub fn execute_spells(
    account: Address,
    initiator: Address,
    snapshot: &RegistrySnapshot<ConnectorHandle>,
    spells: &[Spell],
    scratch: &mut ScratchStore,
    journal: &mut StateJournal<'_>,
) -> Result<Vec<SpellOutcome>, CastError> {
    let mut outcomes = Vec::with_capacity(spells.len());

    for (index, spell) in spells.iter().enumerate() {
        let resolved = snapshot.resolve(&spell.connector).map_err(|err| {
            log_spell_event!(
                warn,
                "Connector did not resolve",
                index,
                spell.connector,
                spell.method
            );
            CastError::from(err)
        })?;

        let mut ctx = SpellContext::new(account, initiator, resolved.address, scratch, journal);
        let output = resolved
            .handle
            .execute(&spell.method, spell.args.as_slice(), &mut ctx)
            .map_err(|reason| {
                log_spell_event!(
                    warn,
                    "Spell failed",
                    index,
                    spell.connector,
                    spell.method,
                    error = %reason
                );
                match reason {
                    ConnectorError::ReentrantCast => CastError::ReentrantCast,
                    reason => CastError::SpellExecutionFailed {
                        index,
                        connector: spell.connector.clone(),
                        method: spell.method.clone(),
                        reason,
                    },
                }
            })?;
        let (slots_read, slots_written) = ctx.into_slot_trace();

        log_spell_event!(
            debug,
            "Spell executed",
            index,
            spell.connector,
            spell.method,
            amount = %output.amount,
            event = %output.event_name
        );

        outcomes.push(SpellOutcome {
            index,
            connector: spell.connector.clone(),
            connector_address: resolved.address,
            version: resolved.version,
            method: spell.method.clone(),
            amount: output.amount,
            event_name: output.event_name,
            event_params: output.event_params,
            slots_read,
            slots_written,
        });
    }

    Ok(outcomes)
}
