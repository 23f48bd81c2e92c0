//! # Smart Account
//!
//! Owns the authority set and the cast nonce, and is the only place where a
//! batch's journal is turned into committed state.

use crate::domain::config::AccountConfig;
use crate::domain::journal::StateJournal;
use crate::domain::records::{CastRecord, Spell};
use crate::domain::scratch::ScratchStore;
use crate::engine::{execute_spells, CastGuard};
use crate::errors::{AuthorityError, CastError};
use crate::ports::outbound::{SharedRegistry, WorldState};
use parking_lot::{Mutex, RwLock};
use sc_telemetry::log_cast_event;
use shared_types::Address;
use std::collections::BTreeSet;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// A user-owned account that executes spell batches atomically.
pub struct SmartAccount<W: WorldState> {
    /// The account's own address; every effect is booked against it.
    address: Address,
    /// Principals allowed to cast.
    authorities: RwLock<BTreeSet<Address>>,
    /// Committed batches so far.
    nonce: AtomicU64,
    /// Shared connector registry (read-mostly).
    registry: SharedRegistry,
    /// Committed world; locking it serializes batches.
    world: Arc<Mutex<W>>,
    /// Execution limits.
    config: AccountConfig,
}

impl<W: WorldState> SmartAccount<W> {
    /// Creates an account with `owner` as its first authority.
    pub fn new(
        address: Address,
        owner: Address,
        registry: SharedRegistry,
        world: Arc<Mutex<W>>,
        config: AccountConfig,
    ) -> Self {
        Self {
            address,
            authorities: RwLock::new(BTreeSet::from([owner])),
            nonce: AtomicU64::new(0),
            registry,
            world,
            config,
        }
    }

    /// The account address.
    #[must_use]
    pub fn address(&self) -> Address {
        self.address
    }

    /// Number of committed batches.
    #[must_use]
    pub fn nonce(&self) -> u64 {
        self.nonce.load(Ordering::SeqCst)
    }

    /// Execution limits.
    #[must_use]
    pub fn config(&self) -> &AccountConfig {
        &self.config
    }

    /// Shared world handle.
    #[must_use]
    pub fn world(&self) -> &Arc<Mutex<W>> {
        &self.world
    }

    // =========================================================================
    // AUTHORITIES
    // =========================================================================

    /// True if `principal` may cast.
    #[must_use]
    pub fn is_authority(&self, principal: &Address) -> bool {
        self.authorities.read().contains(principal)
    }

    /// Current authorities, sorted.
    #[must_use]
    pub fn authorities(&self) -> Vec<Address> {
        self.authorities.read().iter().copied().collect()
    }

    /// Authorizes `principal`. Returns `Ok(false)` if it already was.
    pub fn add_authority(
        &self,
        caller: Address,
        principal: Address,
    ) -> Result<bool, AuthorityError> {
        let mut authorities = self.authorities.write();
        if !authorities.contains(&caller) {
            warn!(account = %self.address, caller = %caller, "Rejected add_authority");
            return Err(AuthorityError::Unauthorized { caller });
        }
        let added = authorities.insert(principal);
        if added {
            info!(account = %self.address, principal = %principal, "Authority added");
        }
        Ok(added)
    }

    /// Revokes `principal`. Returns `Ok(false)` if it was not an authority.
    pub fn remove_authority(
        &self,
        caller: Address,
        principal: Address,
    ) -> Result<bool, AuthorityError> {
        let mut authorities = self.authorities.write();
        if !authorities.contains(&caller) {
            warn!(account = %self.address, caller = %caller, "Rejected remove_authority");
            return Err(AuthorityError::Unauthorized { caller });
        }
        if !authorities.contains(&principal) {
            return Ok(false);
        }
        if authorities.len() == 1 {
            return Err(AuthorityError::LastAuthority);
        }
        authorities.remove(&principal);
        info!(account = %self.address, principal = %principal, "Authority removed");
        Ok(true)
    }

    // =========================================================================
    // CAST
    // =========================================================================

    /// Executes `spells` in order and commits them atomically.
    ///
    /// Checks, in order: no cast already running on this thread, `initiator`
    /// is an authority, batch size. Then the registry is snapshotted, the
    /// world is locked and every spell runs against a fresh scratch store and
    /// journal. Only if all spells succeed is the journal applied and the
    /// nonce advanced; otherwise the first error is returned and nothing
    /// changes.
    pub fn cast(
        &self,
        initiator: Address,
        spells: &[Spell],
        origin: Address,
    ) -> Result<CastRecord, CastError> {
        let _guard = CastGuard::enter(self.address)?;

        if !self.is_authority(&initiator) {
            warn!(account = %self.address, initiator = %initiator, "Unauthorized cast");
            return Err(CastError::Unauthorized { caller: initiator });
        }
        self.config.check_batch(spells.len())?;
        let batch_hash = Spell::batch_hash(spells)?;

        let snapshot = self.registry.snapshot();
        let mut world = self.world.lock();

        let (outcomes, change_set) = {
            let mut journal = StateJournal::new(&*world);
            let mut scratch = ScratchStore::new();
            let outcomes = execute_spells(
                self.address,
                initiator,
                &snapshot,
                spells,
                &mut scratch,
                &mut journal,
            )?;
            debug!(scratch_slots = scratch.len(), "Scratch store released");
            (outcomes, journal.into_change_set())
        };

        let changes = change_set.changes.clone();
        world.apply(change_set);
        let nonce = self.nonce.fetch_add(1, Ordering::SeqCst) + 1;
        drop(world);

        log_cast_event!(
            info,
            "Cast committed",
            self.address,
            nonce,
            initiator = %initiator,
            spells = outcomes.len(),
            changes = changes.len()
        );

        Ok(CastRecord {
            account: self.address,
            initiator,
            origin,
            batch_hash,
            nonce,
            outcomes,
            changes,
        })
    }
}
