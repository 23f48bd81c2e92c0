//! # Registry Resolution
//!
//! Disabled and unknown names never resolve; a disabled name comes back only
//! through explicit governance; a running batch keeps the view it started
//! with.

#[cfg(test)]
mod tests {
    use crate::fixtures::*;
    use sc_01_connector_registry::{ConnectorResolver, RegistryError, RegistryGovernance};
    use sc_02_smart_account::domain::context::SpellContext;
    use sc_02_smart_account::domain::records::SpellOutput;
    use sc_02_smart_account::errors::{CastError, ConnectorError};
    use sc_02_smart_account::ports::outbound::{Connector, ConnectorHandle};
    use sc_01_connector_registry::{ConnectorRegistry, ConnectorVersion};
    use shared_types::{ether, Address, Bytes};
    use std::sync::Arc;

    #[test]
    fn test_unknown_and_disabled_names_do_not_resolve() {
        let fixture = Fixture::new();

        assert!(matches!(
            fixture.registry.resolve("MISSING"),
            Err(RegistryError::ModuleNotFound(_))
        ));

        fixture.registry.disable(MASTER, LEND).expect("disable");
        assert!(matches!(
            fixture.registry.resolve(LEND),
            Err(RegistryError::ModuleNotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_reenable_requires_governance() {
        let fixture = Fixture::new();
        fixture.registry.disable(MASTER, LEND).expect("disable");

        assert_eq!(
            fixture.cast(vec![deposit_eth(ether(1))]).await.unwrap_err(),
            CastError::ModuleNotFound(LEND.to_string())
        );
        assert_eq!(
            fixture.registry.enable(STRANGER, LEND),
            Err(RegistryError::Unauthorized { caller: STRANGER })
        );
        assert!(fixture.registry.resolve(LEND).is_err());

        fixture.registry.enable(MASTER, LEND).expect("enable");
        let resolved = fixture.registry.resolve(LEND).expect("resolve");
        assert_eq!(resolved.address, LEND_ADDRESS);
        fixture.cast(vec![deposit_eth(ether(1))]).await.expect("cast");
    }

    #[test]
    fn test_disable_is_idempotent() {
        let fixture = Fixture::new();
        fixture.registry.disable(MASTER, PRIZE).expect("disable");
        let log_len = fixture.registry.governance_log().len();
        let names = fixture.registry.active_names();

        fixture.registry.disable(MASTER, PRIZE).expect("disable again");

        assert_eq!(fixture.registry.governance_log().len(), log_len);
        assert_eq!(fixture.registry.active_names(), names);
        assert!(fixture.registry.resolve(PRIZE).is_err());
    }

    #[test]
    fn test_batch_precheck() {
        let fixture = Fixture::new();
        fixture.registry.disable(MASTER, PRIZE).expect("disable");

        let (ok, addresses) = fixture.registry.is_connectors(&[LEND, PRIZE]);
        assert!(!ok);
        assert_eq!(addresses, vec![Some(LEND_ADDRESS), None]);
    }

    /// Disables a name while its own spell is running.
    struct Saboteur {
        registry: Arc<ConnectorRegistry<ConnectorHandle>>,
        target: &'static str,
    }

    impl Connector for Saboteur {
        fn name(&self) -> &str {
            "SABOTEUR"
        }

        fn execute(
            &self,
            _method: &str,
            _args: &[u8],
            _ctx: &mut SpellContext<'_, '_>,
        ) -> Result<SpellOutput, ConnectorError> {
            self.registry
                .disable(MASTER, self.target)
                .map_err(|err| ConnectorError::Protocol(err.to_string()))?;
            Ok(SpellOutput::new(0u64.into(), "LogSabotage", serde_json::Value::Null))
        }
    }

    #[tokio::test]
    async fn test_running_batch_keeps_its_snapshot() {
        let fixture = Fixture::new();
        let saboteur: ConnectorHandle = Arc::new(Saboteur {
            registry: fixture.registry.clone(),
            target: LEND,
        });
        fixture
            .registry
            .register(MASTER, "SABOTEUR", Address([0x5A; 20]), ConnectorVersion::V2, saboteur)
            .expect("register");
        let sabotage =
            sc_02_smart_account::domain::records::Spell::new("SABOTEUR", "run", Bytes::new());

        let record = fixture
            .cast(vec![sabotage, deposit_eth(ether(1))])
            .await
            .expect("batch resolved against its snapshot");

        assert_eq!(record.outcomes.len(), 2);
        assert!(fixture.registry.resolve(LEND).is_err());
        assert_eq!(
            fixture.cast(vec![deposit_eth(ether(1))]).await.unwrap_err(),
            CastError::ModuleNotFound(LEND.to_string())
        );
    }
}
