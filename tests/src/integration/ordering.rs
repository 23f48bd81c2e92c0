//! # Order Preservation
//!
//! Spells run strictly in listed order, so a slot written by an earlier
//! spell is visible to a later one and never the other way round.

#[cfg(test)]
mod tests {
    use crate::fixtures::*;
    use sc_02_smart_account::account::SmartAccount;
    use sc_02_smart_account::ports::outbound::SharedRegistry;
    use shared_types::{ether, Address, SlotId, U256};
    use std::sync::Arc;

    async fn collateralized() -> Fixture {
        let fixture = Fixture::new();
        fixture.cast(vec![deposit_eth(ether(1))]).await.expect("deposit");
        fixture
    }

    #[tokio::test]
    async fn test_writer_before_reader_threads_value() {
        let fixture = collateralized().await;

        let record = fixture
            .cast(vec![borrow_dai(ether(100), 3), deposit_to_pool(0u64, 3)])
            .await
            .expect("cast");

        assert_eq!(record.connectors(), vec![LEND.to_string(), PRIZE.to_string()]);
        assert_eq!(record.outcomes[1].amount, ether(100));
        assert_eq!(fixture.balance(TICKET), ether(100));
    }

    #[tokio::test]
    async fn test_reader_before_writer_sees_zero() {
        let fixture = collateralized().await;

        let record = fixture
            .cast(vec![deposit_to_pool(0u64, 3), borrow_dai(ether(100), 3)])
            .await
            .expect("cast");

        assert_eq!(record.connectors(), vec![PRIZE.to_string(), LEND.to_string()]);
        assert_eq!(record.outcomes[0].amount, U256::zero());
        assert_eq!(record.outcomes[0].slots_read, vec![SlotId(3)]);
        assert_eq!(fixture.balance(TICKET), U256::zero());
        assert_eq!(fixture.balance(DAI), ether(100));
    }

    #[tokio::test]
    async fn test_scratch_does_not_outlive_the_batch() {
        let fixture = collateralized().await;
        fixture
            .cast(vec![borrow_dai(ether(100), 3)])
            .await
            .expect("borrow");

        let record = fixture
            .cast(vec![deposit_to_pool(0u64, 3)])
            .await
            .expect("deposit");

        assert_eq!(record.outcomes[0].amount, U256::zero());
        assert_eq!(fixture.balance(DAI), ether(100));
    }

    #[tokio::test]
    async fn test_scratch_is_private_to_each_account() {
        let fixture = collateralized().await;
        let resolver: SharedRegistry = fixture.registry.clone();
        let other = SmartAccount::new(
            Address([0xAB; 20]),
            OWNER,
            resolver,
            fixture.world.clone(),
            Default::default(),
        );

        fixture
            .cast(vec![borrow_dai(ether(100), 3)])
            .await
            .expect("borrow");
        let record = other
            .cast(OWNER, &[deposit_to_pool(0u64, 3)], WALLET1)
            .expect("deposit");

        assert_eq!(record.outcomes[0].slots_read, vec![SlotId(3)]);
        assert_eq!(record.outcomes[0].amount, U256::zero());
        assert_eq!(fixture.balance(DAI), ether(100));
    }

    #[tokio::test]
    async fn test_last_writer_wins() {
        let fixture = collateralized().await;

        let record = fixture
            .cast(vec![
                borrow_dai(ether(10), 5),
                borrow_dai(ether(20), 5),
                deposit_to_pool(0u64, 5),
            ])
            .await
            .expect("cast");

        assert_eq!(record.outcomes[2].amount, ether(20));
        assert_eq!(fixture.balance(DAI), ether(10));
        assert_eq!(fixture.balance(TICKET), ether(20));
    }
}
