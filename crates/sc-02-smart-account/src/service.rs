//! # Smart Account Service
//!
//! Async facade over a [`SmartAccount`]: runs casts, keeps statistics and
//! metrics, and publishes audit events on the shared bus. Events are only
//! ever published for committed batches.

use crate::account::SmartAccount;
use crate::domain::config::AccountConfig;
use crate::domain::records::{CastRecord, Spell};
use crate::errors::{AuthorityError, CastError};
use crate::ports::inbound::SmartAccountApi;
use crate::ports::outbound::{SharedRegistry, WorldState};
use async_trait::async_trait;
use parking_lot::Mutex;
use sc_telemetry::{CASTS_EXECUTED, CASTS_FAILED, SPELLS_EXECUTED};
use serde::Serialize;
use shared_bus::{AccountEvent, EventPublisher};
use shared_types::Address;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, error, info, instrument, warn};

/// Smart Account Service configuration.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Limits for accounts opened through the service.
    pub account: AccountConfig,
    /// Publish one `SpellExecuted` per spell in addition to `CastExecuted`.
    pub publish_spell_events: bool,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            account: AccountConfig::default(),
            publish_spell_events: true,
        }
    }
}

impl ServiceConfig {
    /// Account limits from the environment, spell events on.
    pub fn from_env() -> Self {
        Self {
            account: AccountConfig::from_env(),
            ..Self::default()
        }
    }
}

/// Statistics for the Smart Account Service.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct ServiceStats {
    /// Batches committed.
    pub casts_executed: u64,
    /// Batches rejected or rolled back.
    pub casts_failed: u64,
    /// Spells inside committed batches.
    pub spells_executed: u64,
    /// Casts rejected because the initiator was not an authority.
    pub rejected_unauthorized: u64,
    /// Events handed to the bus.
    pub events_published: u64,
}

/// The main Smart Account Service.
pub struct SmartAccountService<W: WorldState> {
    config: ServiceConfig,
    account: Arc<SmartAccount<W>>,
    bus: Arc<dyn EventPublisher>,
    stats: Arc<RwLock<ServiceStats>>,
}

impl<W: WorldState> SmartAccountService<W> {
    /// Wraps an existing account.
    pub fn new(
        account: Arc<SmartAccount<W>>,
        bus: Arc<dyn EventPublisher>,
        config: ServiceConfig,
    ) -> Self {
        Self {
            config,
            account,
            bus,
            stats: Arc::new(RwLock::new(ServiceStats::default())),
        }
    }

    /// Opens a new account with the configured limits and wraps it.
    pub fn open(
        address: Address,
        owner: Address,
        registry: SharedRegistry,
        world: Arc<Mutex<W>>,
        bus: Arc<dyn EventPublisher>,
        config: ServiceConfig,
    ) -> Self {
        let account = Arc::new(SmartAccount::new(address, owner, registry, world, config.account));
        info!(account = %address, owner = %owner, "Smart account opened");
        Self::new(account, bus, config)
    }

    /// The wrapped account.
    #[must_use]
    pub fn account(&self) -> &Arc<SmartAccount<W>> {
        &self.account
    }

    /// Get current service statistics.
    pub async fn stats(&self) -> ServiceStats {
        self.stats.read().await.clone()
    }

    /// Executes a batch and publishes its audit events.
    #[instrument(
        skip(self, spells),
        fields(account = %self.account.address(), spells = spells.len())
    )]
    pub async fn execute_cast(
        &self,
        initiator: Address,
        spells: Vec<Spell>,
        origin: Address,
    ) -> Result<CastRecord, CastError> {
        let result = self.account.cast(initiator, &spells, origin);

        match &result {
            Ok(record) => {
                CASTS_EXECUTED.inc();
                for outcome in &record.outcomes {
                    SPELLS_EXECUTED.with_label_values(&[outcome.connector.as_str()]).inc();
                }
                let mut stats = self.stats.write().await;
                stats.casts_executed += 1;
                stats.spells_executed += record.outcomes.len() as u64;
            }
            Err(err) => {
                CASTS_FAILED.with_label_values(&[err.kind()]).inc();
                let mut stats = self.stats.write().await;
                stats.casts_failed += 1;
                if matches!(err, CastError::Unauthorized { .. }) {
                    stats.rejected_unauthorized += 1;
                }
            }
        }

        match result {
            Ok(record) => {
                let events = record.to_events(self.config.publish_spell_events);
                self.publish_all(events).await;
                Ok(record)
            }
            Err(err) => {
                error!(error = %err, "Cast failed");
                Err(err)
            }
        }
    }

    /// Authorizes a principal and announces it.
    #[instrument(skip(self), fields(account = %self.account.address()))]
    pub async fn grant(&self, caller: Address, principal: Address) -> Result<(), AuthorityError> {
        if self.account.add_authority(caller, principal)? {
            self.publish_all(vec![AccountEvent::AuthorityAdded {
                account: self.account.address(),
                principal,
                by: caller,
            }])
            .await;
        }
        Ok(())
    }

    /// Revokes a principal and announces it.
    #[instrument(skip(self), fields(account = %self.account.address()))]
    pub async fn revoke(&self, caller: Address, principal: Address) -> Result<(), AuthorityError> {
        if self.account.remove_authority(caller, principal)? {
            self.publish_all(vec![AccountEvent::AuthorityRemoved {
                account: self.account.address(),
                principal,
                by: caller,
            }])
            .await;
        }
        Ok(())
    }

    async fn publish_all(&self, events: Vec<AccountEvent>) {
        let count = events.len() as u64;
        for event in events {
            let receivers = self.bus.publish(event).await;
            if receivers == 0 {
                warn!("Audit event had no subscribers");
            }
        }
        self.stats.write().await.events_published += count;
        debug!(events = count, "Audit events published");
    }
}

#[async_trait]
impl<W: WorldState + 'static> SmartAccountApi for SmartAccountService<W> {
    async fn cast(
        &self,
        initiator: Address,
        spells: Vec<Spell>,
        origin: Address,
    ) -> Result<CastRecord, CastError> {
        self.execute_cast(initiator, spells, origin).await
    }

    async fn add_authority(
        &self,
        caller: Address,
        principal: Address,
    ) -> Result<(), AuthorityError> {
        self.grant(caller, principal).await
    }

    async fn remove_authority(
        &self,
        caller: Address,
        principal: Address,
    ) -> Result<(), AuthorityError> {
        self.revoke(caller, principal).await
    }
}
