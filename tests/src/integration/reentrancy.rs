//! # Reentrancy
//!
//! A connector that tries to start another cast while its own spell runs is
//! rejected, whichever account it targets, and the outer batch rolls back.

#[cfg(test)]
mod tests {
    use crate::fixtures::*;
    use sc_01_connector_registry::{ConnectorVersion, RegistryGovernance};
    use sc_02_smart_account::account::SmartAccount;
    use sc_02_smart_account::adapters::InMemoryWorld;
    use sc_02_smart_account::domain::context::SpellContext;
    use sc_02_smart_account::domain::records::{Spell, SpellOutput};
    use sc_02_smart_account::errors::{CastError, ConnectorError};
    use sc_02_smart_account::ports::outbound::{Connector, ConnectorHandle, SharedRegistry};
    use shared_types::{ether, Address, Bytes, U256};
    use std::sync::{Arc, OnceLock};

    /// Casts on `target` from inside its own spell.
    #[derive(Default)]
    struct Recurser {
        target: OnceLock<Arc<SmartAccount<InMemoryWorld>>>,
    }

    impl Connector for Recurser {
        fn name(&self) -> &str {
            "RECURSE"
        }

        fn execute(
            &self,
            _method: &str,
            _args: &[u8],
            _ctx: &mut SpellContext<'_, '_>,
        ) -> Result<SpellOutput, ConnectorError> {
            let target = self
                .target
                .get()
                .ok_or_else(|| ConnectorError::InvalidArgs("no target".into()))?;
            target.cast(OWNER, &[deposit_eth(ether(1))], OWNER)?;
            Ok(SpellOutput::new(U256::zero(), "LogRecurse", serde_json::Value::Null))
        }
    }

    fn install(fixture: &Fixture) -> Arc<Recurser> {
        let recurser = Arc::new(Recurser::default());
        fixture
            .registry
            .register(
                MASTER,
                "RECURSE",
                Address([0x7E; 20]),
                ConnectorVersion::V2,
                recurser.clone() as ConnectorHandle,
            )
            .expect("register");
        recurser
    }

    fn recurse() -> Spell {
        Spell::new("RECURSE", "run", Bytes::new())
    }

    #[tokio::test]
    async fn test_nested_cast_on_same_account_is_rejected() {
        let fixture = Fixture::new();
        let recurser = install(&fixture);
        let _ = recurser.target.set(fixture.service.account().clone());
        let before = fixture.snapshot();

        let err = fixture
            .cast(vec![deposit_eth(ether(1)), recurse()])
            .await
            .unwrap_err();

        assert_eq!(err, CastError::ReentrantCast);
        assert_eq!(fixture.snapshot(), before);
        assert_eq!(fixture.service.account().nonce(), 0);
    }

    #[tokio::test]
    async fn test_nested_cast_on_other_account_is_rejected() {
        let fixture = Fixture::new();
        let recurser = install(&fixture);
        let resolver: SharedRegistry = fixture.registry.clone();
        let other = Arc::new(SmartAccount::new(
            Address([0xAB; 20]),
            OWNER,
            resolver,
            fixture.world.clone(),
            Default::default(),
        ));
        let _ = recurser.target.set(other.clone());

        let err = fixture.cast(vec![recurse()]).await.unwrap_err();

        assert_eq!(err, CastError::ReentrantCast);
        assert_eq!(other.nonce(), 0);
    }

    #[tokio::test]
    async fn test_guard_is_released_after_rejection() {
        let fixture = Fixture::new();
        let recurser = install(&fixture);
        let _ = recurser.target.set(fixture.service.account().clone());
        fixture.cast(vec![recurse()]).await.unwrap_err();

        fixture
            .cast(vec![deposit_eth(ether(1))])
            .await
            .expect("later cast runs normally");
        assert_eq!(fixture.balance(shared_types::NATIVE_ASSET), ether(9));
    }
}
