//! # Lending and Prize-Pool Flows
//!
//! The account deposits ETH as collateral, borrows DAI straight into a prize
//! pool through a scratch slot, and withdraws early paying the exit fee.

#[cfg(test)]
mod tests {
    use crate::fixtures::*;
    use sc_01_connector_registry::RegistryGovernance;
    use sc_02_smart_account::errors::CastError;
    use shared_types::{ether, SlotId, U256, NATIVE_ASSET};

    /// Deposit 1 ETH, then borrow 100 DAI into the pool.
    async fn deposit_and_enter_pool(fixture: &Fixture) {
        fixture.cast(vec![deposit_eth(ether(1))]).await.expect("deposit");
        fixture
            .cast(vec![borrow_dai(ether(100), 1), deposit_to_pool(0u64, 1)])
            .await
            .expect("borrow into pool");
    }

    #[tokio::test]
    async fn test_scenario_deposit_collateral() {
        let fixture = Fixture::new();

        let record = fixture.cast(vec![deposit_eth(ether(1))]).await.expect("cast");

        assert_eq!(record.outcomes.len(), 1);
        assert_eq!(record.outcomes[0].event_name, "LogDeposit");
        assert_eq!(record.origin, WALLET1);
        assert_eq!(record.nonce, 1);
        assert_eq!(fixture.balance(CETH), ether(1));
        assert_eq!(fixture.balance(NATIVE_ASSET), ether(9));
    }

    #[tokio::test]
    async fn test_scenario_borrow_threads_amount_into_pool() {
        let fixture = Fixture::new();
        fixture.cast(vec![deposit_eth(ether(1))]).await.expect("deposit");

        let record = fixture
            .cast(vec![borrow_dai(ether(100), 1), deposit_to_pool(0u64, 1)])
            .await
            .expect("cast");

        let pool_spell = &record.outcomes[1];
        assert_eq!(pool_spell.connector, PRIZE);
        assert_eq!(pool_spell.amount, ether(100));
        assert_eq!(pool_spell.slots_read, vec![SlotId(1)]);
        assert_eq!(record.outcomes[0].slots_written, vec![SlotId(1)]);

        assert_eq!(fixture.balance(DAI), U256::zero());
        assert_eq!(fixture.balance(TICKET), ether(100));
    }

    #[tokio::test]
    async fn test_scenario_instant_withdrawal_pays_exit_fee() {
        let fixture = Fixture::new();
        deposit_and_enter_pool(&fixture).await;

        let record = fixture
            .cast(vec![withdraw_from_pool(ether(100), ether(100))])
            .await
            .expect("withdraw");

        let dai = fixture.balance(DAI);
        assert!(dai > ether(90));
        assert!(dai < ether(100));
        assert_eq!(fixture.balance(TICKET), U256::zero());
        assert_eq!(record.outcomes[0].event_params["exitFee"], ether(1).to_string());
    }

    #[tokio::test]
    async fn test_scenario_disabled_module_discards_earlier_spells() {
        let fixture = Fixture::new();
        fixture.registry.disable(MASTER, PRIZE).expect("disable");
        let before = fixture.snapshot();

        let result = fixture
            .cast(vec![deposit_eth(ether(1)), deposit_to_pool(ether(1), 0)])
            .await;

        assert_eq!(result.unwrap_err(), CastError::ModuleNotFound(PRIZE.to_string()));
        assert_eq!(fixture.snapshot(), before);
        assert_eq!(fixture.service.account().nonce(), 0);
    }

    #[tokio::test]
    async fn test_full_round_trip_repays_debt() {
        let fixture = Fixture::new();
        deposit_and_enter_pool(&fixture).await;
        fixture
            .cast(vec![withdraw_from_pool(ether(100), ether(100))])
            .await
            .expect("withdraw");

        // The 1 DAI exit fee stays outstanding as debt
        let record = fixture
            .cast(vec![lend(
                "payback",
                sc_03_connectors::LendingArgs::new("DAI-A", ether(99)),
            )])
            .await
            .expect("payback");

        assert_eq!(record.outcomes[0].event_name, "LogPayback");
        assert_eq!(fixture.balance(DAI), U256::zero());
        assert_eq!(fixture.service.account().nonce(), 4);
    }
}
