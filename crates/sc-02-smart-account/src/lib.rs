//! # SC-02 Smart Account - Atomic Spell Casting
//!
//! A smart account executes ordered batches of spells. Each spell names a
//! connector in the shared registry, a method and opaque arguments. The
//! account resolves every connector, runs it inside the account's own
//! execution context and commits the batch only if every spell succeeded.
//!
//! ## Domain Invariants
//!
//! | Invariant | Enforcement Location |
//! |-----------|---------------------|
//! | Only authorized principals cast | `account.rs` - `SmartAccount::cast()` |
//! | Batches are non-empty and bounded | `domain/config.rs` - `AccountConfig::check_batch()` |
//! | All-or-nothing commit | `account.rs` - journal applied only after `execute_spells()` is `Ok` |
//! | Spells run strictly in order | `engine.rs` - `execute_spells()` |
//! | Scratch slots never outlive a batch | `domain/scratch.rs` - one `ScratchStore` per cast |
//! | Slot 0 is inert | `domain/scratch.rs` - `ScratchStore::get()`, `set()` |
//! | Nested casts are rejected | `engine.rs` - `CastGuard::enter()` |
//! | Registry is read once per batch | `account.rs` - `ConnectorResolver::snapshot()` |
//!
//! ## Layers
//!
//! | Component | Location | Purpose |
//! |-----------|----------|---------|
//! | Scratch store | `domain/scratch.rs` | Per-batch slot buffer |
//! | State journal | `domain/journal.rs` | Buffered balance/storage overlay |
//! | Spell context | `domain/context.rs` | What a connector sees while it runs |
//! | Engine | `engine.rs` | Resolve + dispatch loop |
//! | Account | `account.rs` | Authorities, nonce, commit |
//! | Service | `service.rs` | Async facade publishing audit events |
//!
//! ## Usage Example
//!
//! ```ignore
//! use sc_02_smart_account::prelude::*;
//!
//! let account = SmartAccount::new(address, owner, registry, world, AccountConfig::default());
//! let record = account.cast(owner, &spells, origin)?;
//! assert_eq!(record.outcomes.len(), spells.len());
//! ```

// Crate-level lints
#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

// =============================================================================
// MODULES
// =============================================================================

pub mod account;
pub mod adapters;
pub mod domain;
pub mod engine;
pub mod errors;
pub mod events;
pub mod ports;
pub mod service;

// =============================================================================
// PRELUDE
// =============================================================================

/// Convenient re-exports for common usage.
pub mod prelude {
    pub use crate::account::SmartAccount;
    pub use crate::adapters::InMemoryWorld;
    pub use crate::domain::config::AccountConfig;
    pub use crate::domain::context::SpellContext;
    pub use crate::domain::journal::{ChangeSet, StateChange, StateJournal};
    pub use crate::domain::records::{CastRecord, Spell, SpellOutcome, SpellOutput};
    pub use crate::domain::scratch::ScratchStore;
    pub use crate::errors::{AuthorityError, CastError, ConnectorError, StateError};
    pub use crate::ports::inbound::SmartAccountApi;
    pub use crate::ports::outbound::{
        Connector, ConnectorHandle, SharedRegistry, StateAccess, WorldState,
    };
    pub use crate::service::{ServiceConfig, ServiceStats, SmartAccountService};
}
