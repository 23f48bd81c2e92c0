//! # Atomicity
//!
//! A batch with any failing spell leaves the committed world, the nonce and
//! the audit surface exactly as they were.

#[cfg(test)]
mod tests {
    use crate::fixtures::*;
    use proptest::prelude::*;
    use sc_02_smart_account::errors::{CastError, ConnectorError};
    use shared_types::{ether, U256};

    #[tokio::test]
    async fn test_failing_last_spell_rolls_back_everything() {
        let fixture = Fixture::new();
        let before = fixture.snapshot();

        let err = fixture
            .cast(vec![deposit_eth(ether(1)), borrow_dai(ether(1_000_000), 0)])
            .await
            .unwrap_err();

        match err {
            CastError::SpellExecutionFailed {
                index,
                connector,
                method,
                reason,
            } => {
                assert_eq!(index, 1);
                assert_eq!(connector, LEND);
                assert_eq!(method, "borrow");
                assert!(matches!(reason, ConnectorError::Protocol(_)));
            }
            other => panic!("unexpected error {other:?}"),
        }
        assert_eq!(fixture.snapshot(), before);
        assert_eq!(fixture.service.account().nonce(), 0);
        assert_eq!(fixture.service.stats().await.casts_failed, 1);
    }

    #[tokio::test]
    async fn test_connector_reason_is_passed_through_unchanged() {
        let fixture = Fixture::new();

        let err = fixture.cast(vec![deposit_eth(ether(11))]).await.unwrap_err();

        assert!(matches!(
            err,
            CastError::SpellExecutionFailed {
                reason: ConnectorError::State(_),
                ..
            }
        ));
    }

    #[tokio::test]
    async fn test_rejected_batches_touch_nothing() {
        let fixture = Fixture::new();
        let before = fixture.snapshot();

        assert_eq!(fixture.cast(Vec::new()).await.unwrap_err(), CastError::EmptyBatch);
        assert_eq!(
            fixture
                .service
                .execute_cast(STRANGER, vec![deposit_eth(ether(1))], STRANGER)
                .await
                .unwrap_err(),
            CastError::Unauthorized { caller: STRANGER }
        );

        assert_eq!(fixture.snapshot(), before);
        let stats = fixture.service.stats().await;
        assert_eq!(stats.casts_failed, 2);
        assert_eq!(stats.rejected_unauthorized, 1);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(32))]

        /// Any run of valid deposits followed by an overdraft commits nothing.
        #[test]
        fn prop_overdraft_discards_prefix(deposits in prop::collection::vec(1u64..3, 0..4)) {
            let fixture = Fixture::new();
            let before = fixture.snapshot();

            let mut spells: Vec<_> = deposits.iter().map(|d| deposit_eth(ether(*d))).collect();
            spells.push(deposit_eth(ether(11)));

            let result = fixture.service.account().cast(OWNER, &spells, WALLET1);

            prop_assert!(result.is_err());
            prop_assert_eq!(fixture.snapshot(), before);
            prop_assert_eq!(fixture.balance(CETH), U256::zero());
        }
    }
}
