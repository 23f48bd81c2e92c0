//! # Script Runtime
//!
//! Replays a [`Script`] against one smart account. Cast and governance
//! failures are part of the report; only a malformed script aborts the run.

use crate::script::{Script, Step};
use crate::wiring::{deploy, Deployment};
use anyhow::{Context, Result};
use sc_01_connector_registry::{ConnectorRegistry, RegistryError, RegistryGovernance};
use sc_02_smart_account::adapters::InMemoryWorld;
use sc_02_smart_account::domain::records::CastRecord;
use sc_02_smart_account::ports::outbound::{ConnectorHandle, SharedRegistry};
use sc_02_smart_account::service::{ServiceConfig, ServiceStats, SmartAccountService};
use serde::Serialize;
use shared_bus::{EventFilter, EventStream, InMemoryEventBus};
use shared_types::{Address, U256};
use std::sync::Arc;
use tracing::{info, warn};

/// Outcome of one step.
#[derive(Debug, Clone, Serialize)]
pub struct StepReport {
    /// Position in the script.
    pub step: usize,
    /// Step kind.
    pub op: &'static str,
    /// Whether the step succeeded.
    pub ok: bool,
    /// Audit record of a committed cast.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub record: Option<CastRecord>,
    /// Failure reason.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl StepReport {
    fn done(step: usize, op: &'static str, record: Option<CastRecord>) -> Self {
        Self {
            step,
            op,
            ok: true,
            record,
            error: None,
        }
    }

    fn failed(step: usize, op: &'static str, error: impl ToString) -> Self {
        Self {
            step,
            op,
            ok: false,
            record: None,
            error: Some(error.to_string()),
        }
    }
}

/// Everything a run produced.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    /// Per-step outcomes.
    pub steps: Vec<StepReport>,
    /// Service counters at the end of the run.
    pub stats: ServiceStats,
    /// Account balances at the end of the run.
    pub balances: Vec<(Address, U256)>,
}

/// A deployed script ready to run.
pub struct ScRuntime {
    script: Script,
    registry: Arc<ConnectorRegistry<ConnectorHandle>>,
    bus: Arc<InMemoryEventBus>,
    service: SmartAccountService<InMemoryWorld>,
}

impl ScRuntime {
    /// Deploys the script's world and connectors and opens its account.
    pub fn new(script: Script, config: ServiceConfig) -> Result<Self, RegistryError> {
        let Deployment { registry, world } = deploy(&script)?;
        let bus = Arc::new(InMemoryEventBus::new());
        let resolver: SharedRegistry = registry.clone();
        let service = SmartAccountService::open(
            script.account,
            script.owner,
            resolver,
            world,
            bus.clone(),
            config,
        );

        Ok(Self {
            script,
            registry,
            bus,
            service,
        })
    }

    /// The account service.
    #[must_use]
    pub fn service(&self) -> &SmartAccountService<InMemoryWorld> {
        &self.service
    }

    /// The connector registry.
    #[must_use]
    pub fn registry(&self) -> &Arc<ConnectorRegistry<ConnectorHandle>> {
        &self.registry
    }

    /// Stream of audit events published during the run.
    #[must_use]
    pub fn audit_stream(&self) -> EventStream {
        self.bus.event_stream(EventFilter::all())
    }

    /// Replays every step in order.
    pub async fn run(&self) -> Result<RunReport> {
        let mut steps = Vec::with_capacity(self.script.steps.len());

        for (index, step) in self.script.steps.iter().enumerate() {
            let report = self
                .run_step(index, step)
                .await
                .with_context(|| format!("step {index} is malformed"))?;
            if report.ok {
                info!(step = index, op = report.op, "Step succeeded");
            } else {
                warn!(step = index, op = report.op, error = ?report.error, "Step failed");
            }
            steps.push(report);
        }

        let balances = self.service.account().world().lock().balances_of(&self.script.account);
        Ok(RunReport {
            steps,
            stats: self.service.stats().await,
            balances,
        })
    }

    async fn run_step(&self, index: usize, step: &Step) -> Result<StepReport> {
        let report = match step {
            Step::Cast {
                initiator,
                origin,
                spells,
            } => {
                let spells = self.script.compile(spells)?;
                match self.service.execute_cast(*initiator, spells, *origin).await {
                    Ok(record) => StepReport::done(index, "cast", Some(record)),
                    Err(err) => StepReport::failed(index, "cast", err),
                }
            }
            Step::Disable { caller, name } => match self.registry.disable(*caller, name) {
                Ok(()) => StepReport::done(index, "disable", None),
                Err(err) => StepReport::failed(index, "disable", err),
            },
            Step::Enable { caller, name } => match self.registry.enable(*caller, name) {
                Ok(()) => StepReport::done(index, "enable", None),
                Err(err) => StepReport::failed(index, "enable", err),
            },
            Step::Grant { caller, principal } => {
                match self.service.grant(*caller, *principal).await {
                    Ok(()) => StepReport::done(index, "grant", None),
                    Err(err) => StepReport::failed(index, "grant", err),
                }
            }
            Step::Revoke { caller, principal } => {
                match self.service.revoke(*caller, *principal).await {
                    Ok(()) => StepReport::done(index, "revoke", None),
                    Err(err) => StepReport::failed(index, "revoke", err),
                }
            }
        };
        Ok(report)
    }
}
