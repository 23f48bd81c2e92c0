//! # Wiring
//!
//! Builds the in-memory world, instantiates the declared connectors and
//! registers them with a fresh registry governed by the script's master.

use crate::script::{ConnectorDeployment, ConnectorKind, Script};
use parking_lot::Mutex;
use sc_01_connector_registry::{ConnectorRegistry, RegistryError, RegistryGovernance};
use sc_02_smart_account::adapters::InMemoryWorld;
use sc_02_smart_account::ports::outbound::ConnectorHandle;
use sc_03_connectors::{LendingConnector, LendingMarket, PrizePool, PrizePoolConnector};
use std::sync::Arc;
use tracing::info;

/// Everything a script runs against.
pub struct Deployment {
    /// Registry holding the deployed connectors.
    pub registry: Arc<ConnectorRegistry<ConnectorHandle>>,
    /// Shared world state.
    pub world: Arc<Mutex<InMemoryWorld>>,
}

/// Seeds the world and registers every connector in declaration order.
pub fn deploy(script: &Script) -> Result<Deployment, RegistryError> {
    let mut world = InMemoryWorld::new();
    for seed in &script.balances {
        world.set_balance(seed.owner, seed.token, seed.amount);
    }

    let registry = Arc::new(ConnectorRegistry::new(script.master));
    for deployment in &script.connectors {
        registry.register(
            script.master,
            &deployment.name,
            deployment.address,
            deployment.version,
            instantiate(deployment),
        )?;
    }

    info!(
        connectors = script.connectors.len(),
        balances = script.balances.len(),
        "Deployment ready"
    );

    Ok(Deployment {
        registry,
        world: Arc::new(Mutex::new(world)),
    })
}

fn instantiate(deployment: &ConnectorDeployment) -> ConnectorHandle {
    match &deployment.kind {
        ConnectorKind::Lending {
            market,
            listings,
            tokens,
        } => {
            let market = listings
                .iter()
                .fold(LendingMarket::new(*market), |market, listing| {
                    market.with_market(listing.underlying, (*listing).into())
                });
            Arc::new(LendingConnector::named(
                deployment.name.clone(),
                Arc::new(market),
                tokens.clone(),
            ))
        }
        ConnectorKind::PrizePool { pools } => {
            let connector = pools
                .iter()
                .fold(PrizePoolConnector::named(deployment.name.clone()), |connector, pool| {
                    let mut deployed = PrizePool::new(pool.address, pool.token, pool.ticket);
                    if let Some(bps) = pool.exit_fee_bps {
                        deployed = deployed.with_exit_fee_bps(bps);
                    }
                    connector.with_pool(deployed)
                });
            Arc::new(connector)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::script::tests::DEMO;
    use sc_01_connector_registry::ConnectorResolver;
    use sc_02_smart_account::ports::outbound::Connector;

    #[test]
    fn test_demo_deployment_resolves() {
        let script = Script::parse(DEMO).expect("parse");
        let deployment = deploy(&script).expect("deploy");

        let resolved = deployment.registry.resolve("POOLTOGETHER-A").expect("resolve");
        assert_eq!(resolved.handle.name(), "POOLTOGETHER-A");
        assert_eq!(
            deployment.registry.active_names(),
            vec!["COMPOUND-A".to_string(), "POOLTOGETHER-A".to_string()]
        );
        assert_eq!(deployment.world.lock().balances_of(&script.account).len(), 1);
    }

    #[test]
    fn test_duplicate_addresses_fail() {
        let mut script = Script::parse(DEMO).expect("parse");
        let first = script.connectors[0].address;
        script.connectors[1].address = first;
        assert!(matches!(
            deploy(&script),
            Err(RegistryError::DuplicateAddress { .. })
        ));
    }
}
