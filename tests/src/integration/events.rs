//! # Audit Surface
//!
//! Committed batches publish one batch-level event followed by one event per
//! spell; failed batches publish nothing.

#[cfg(test)]
mod tests {
    use crate::fixtures::*;
    use sc_02_smart_account::domain::config::AccountConfig;
    use sc_02_smart_account::service::ServiceConfig;
    use shared_bus::{AccountEvent, EventFilter, EventTopic};
    use shared_types::{ether, SlotId};
    use std::time::Duration;
    use tokio::time::timeout;

    #[tokio::test]
    async fn test_committed_batch_publishes_cast_then_spells() {
        let fixture = Fixture::new();
        fixture.cast(vec![deposit_eth(ether(1))]).await.expect("deposit");
        let mut sub = fixture.bus.subscribe(EventFilter::all());

        let record = fixture
            .cast(vec![borrow_dai(ether(100), 1), deposit_to_pool(0u64, 1)])
            .await
            .expect("cast");

        let first = timeout(Duration::from_secs(1), sub.recv())
            .await
            .expect("timeout")
            .expect("event");
        match first {
            AccountEvent::CastExecuted(log) => {
                assert_eq!(log.nonce, record.nonce);
                assert_eq!(log.origin, WALLET1);
                assert_eq!(log.batch_hash, record.batch_hash);
                assert_eq!(
                    log.event_names,
                    vec!["LogBorrow".to_string(), "LogDepositTo".to_string()]
                );
            }
            other => panic!("unexpected event {other:?}"),
        }

        for expected_index in 0..2 {
            let event = timeout(Duration::from_secs(1), sub.recv())
                .await
                .expect("timeout")
                .expect("event");
            match event {
                AccountEvent::SpellExecuted(log) => {
                    assert_eq!(log.index, expected_index);
                    if expected_index == 1 {
                        assert_eq!(log.amount, ether(100));
                        assert_eq!(log.slots_read, vec![SlotId(1)]);
                    }
                }
                other => panic!("unexpected event {other:?}"),
            }
        }
    }

    #[tokio::test]
    async fn test_failed_batch_publishes_nothing() {
        let fixture = Fixture::new();
        let mut sub = fixture.bus.subscribe(EventFilter::all());

        fixture
            .cast(vec![deposit_eth(ether(1)), borrow_dai(ether(1_000_000), 0)])
            .await
            .unwrap_err();

        assert_eq!(sub.try_recv(), Ok(None));
    }

    #[tokio::test]
    async fn test_spell_events_can_be_switched_off() {
        let fixture = Fixture::with_config(ServiceConfig {
            account: AccountConfig::default(),
            publish_spell_events: false,
        });
        let mut spells = fixture.bus.subscribe(EventFilter::topics(vec![EventTopic::Spells]));
        let mut casts = fixture.bus.subscribe(EventFilter::topics(vec![EventTopic::Casts]));

        fixture.cast(vec![deposit_eth(ether(1))]).await.expect("cast");

        assert!(matches!(casts.try_recv(), Ok(Some(AccountEvent::CastExecuted(_)))));
        assert_eq!(spells.try_recv(), Ok(None));
    }

    #[tokio::test]
    async fn test_authority_changes_are_announced() {
        let fixture = Fixture::new();
        let mut sub = fixture.bus.subscribe(EventFilter::topics(vec![EventTopic::Authority]));

        fixture.service.grant(OWNER, WALLET1).await.expect("grant");
        fixture
            .service
            .execute_cast(WALLET1, vec![deposit_eth(ether(1))], WALLET1)
            .await
            .expect("delegate casts");
        fixture.service.revoke(WALLET1, OWNER).await.expect("revoke");

        assert_eq!(
            sub.try_recv(),
            Ok(Some(AccountEvent::AuthorityAdded {
                account: ACCOUNT,
                principal: WALLET1,
                by: OWNER,
            }))
        );
        assert_eq!(
            sub.try_recv(),
            Ok(Some(AccountEvent::AuthorityRemoved {
                account: ACCOUNT,
                principal: OWNER,
                by: WALLET1,
            }))
        );
        assert!(fixture.service.revoke(WALLET1, WALLET1).await.is_err());
    }
}
