//! Cast throughput benchmarks.
//!
//! Measures the synchronous casting path (guard, snapshot, journal, apply)
//! for single-spell and threaded two-spell batches.

use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use sc_02_smart_account::domain::records::Spell;
use sc_tests::fixtures::*;
use shared_types::ether;

fn bench_single_deposit(c: &mut Criterion) {
    let spells = vec![deposit_eth(ether(1))];

    c.bench_function("cast/single_deposit", |b| {
        b.iter_batched(
            Fixture::new,
            |fixture| {
                let record = fixture.service.account().cast(OWNER, black_box(&spells), WALLET1);
                black_box(record)
            },
            BatchSize::SmallInput,
        );
    });
}

fn bench_threaded_borrow_into_pool(c: &mut Criterion) {
    let spells = vec![borrow_dai(ether(100), 1), deposit_to_pool(0u64, 1)];

    c.bench_function("cast/borrow_into_pool", |b| {
        b.iter_batched(
            || {
                let fixture = Fixture::new();
                fixture
                    .service
                    .account()
                    .cast(OWNER, &[deposit_eth(ether(1))], WALLET1)
                    .expect("collateral");
                fixture
            },
            |fixture| black_box(fixture.service.account().cast(OWNER, &spells, WALLET1)),
            BatchSize::SmallInput,
        );
    });
}

fn bench_batch_hash(c: &mut Criterion) {
    let spells: Vec<Spell> = (0..32).map(|_| deposit_eth(ether(1))).collect();

    c.bench_function("spell/batch_hash_32", |b| {
        b.iter(|| Spell::batch_hash(black_box(&spells)));
    });
}

criterion_group!(
    benches,
    bench_single_deposit,
    bench_threaded_borrow_into_pool,
    bench_batch_hash
);
criterion_main!(benches);
