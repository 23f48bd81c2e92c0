//! # Driving Ports (API - Inbound)
//!
//! Batch submission and authority management as seen by account owners and
//! their delegates.

use crate::domain::records::{CastRecord, Spell};
use crate::errors::{AuthorityError, CastError};
use async_trait::async_trait;
use shared_types::Address;

/// Public API of a smart account.
#[async_trait]
pub trait SmartAccountApi: Send + Sync {
    /// Executes `spells` atomically on behalf of `initiator`.
    async fn cast(
        &self,
        initiator: Address,
        spells: Vec<Spell>,
        origin: Address,
    ) -> Result<CastRecord, CastError>;

    /// Authorizes `principal` to cast. `caller` must already be an authority.
    async fn add_authority(&self, caller: Address, principal: Address)
        -> Result<(), AuthorityError>;

    /// Revokes `principal`. The last authority cannot be removed.
    async fn remove_authority(
        &self,
        caller: Address,
        principal: Address,
    ) -> Result<(), AuthorityError>;
}
