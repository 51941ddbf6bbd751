//! Micro-operation benchmarks for pools and the key/value facade.
//!
//! Run with: `cargo bench --bench pool_ops`
//!
//! Measures per-operation latency for item reads, saves and deferred
//! commits across pool kinds under identical conditions.

use std::hint::black_box;
use std::time::Instant;

use cachepool::builder::{PoolBuilder, PoolKind};
use cachepool::cache::PoolCache;
use cachepool::item::Item;
use cachepool::key::validate_key;
use cachepool::pool::runtime::{ExpiryPolicy, RuntimePool};
use cachepool::traits::{CacheItem, Pool};
use criterion::{BatchSize, Criterion, Throughput, criterion_group, criterion_main};

const KEYS: usize = 4_096;
const OPS: u64 = 10_000;

fn keys() -> Vec<String> {
    (0..KEYS).map(|i| format!("bench.key.{i}")).collect()
}

fn filled(expiry: ExpiryPolicy) -> (RuntimePool<u64>, Vec<String>) {
    let keys = keys();
    let mut pool = RuntimePool::with_capacity_and_expiry(KEYS, expiry);
    for (i, key) in keys.iter().enumerate() {
        let _ = pool.save(Item::hit(key.as_str(), i as u64, None).expect("valid key"));
    }
    (pool, keys)
}

// ============================================================================
// Key Validation
// ============================================================================

fn bench_validate_key(c: &mut Criterion) {
    let mut group = c.benchmark_group("validate_key");
    let short = "user.42";
    let long = "a".repeat(64);
    group.bench_function("short", |b| b.iter(|| black_box(validate_key(black_box(short)))));
    group.bench_function("max_len", |b| b.iter(|| black_box(validate_key(black_box(&long)))));
    group.finish();
}

// ============================================================================
// Get Item Latency
// ============================================================================

fn bench_get_item(c: &mut Criterion) {
    let mut group = c.benchmark_group("get_item");
    group.throughput(Throughput::Elements(OPS));

    for (name, expiry) in [
        ("runtime_hit", ExpiryPolicy::Ignore),
        ("runtime_hit_enforced", ExpiryPolicy::EnforceOnRead),
    ] {
        group.bench_function(name, |b| {
            let (pool, keys) = filled(expiry);
            b.iter_custom(|iters| {
                let start = Instant::now();
                for _ in 0..iters {
                    for i in 0..OPS as usize {
                        black_box(pool.get_item(&keys[i % KEYS]).ok());
                    }
                }
                start.elapsed()
            })
        });
    }

    group.bench_function("runtime_miss", |b| {
        let pool = RuntimePool::<u64>::new();
        let keys = keys();
        b.iter_custom(|iters| {
            let start = Instant::now();
            for _ in 0..iters {
                for i in 0..OPS as usize {
                    black_box(pool.get_item(&keys[i % KEYS]).ok());
                }
            }
            start.elapsed()
        })
    });

    group.bench_function("null", |b| {
        let pool = PoolBuilder::new().build::<u64>(PoolKind::Null);
        let keys = keys();
        b.iter_custom(|iters| {
            let start = Instant::now();
            for _ in 0..iters {
                for i in 0..OPS as usize {
                    black_box(pool.get_item(&keys[i % KEYS]).ok());
                }
            }
            start.elapsed()
        })
    });

    group.finish();
}

// ============================================================================
// Save and Commit
// ============================================================================

fn bench_save(c: &mut Criterion) {
    let mut group = c.benchmark_group("save");
    group.throughput(Throughput::Elements(KEYS as u64));

    group.bench_function("save_each", |b| {
        let keys = keys();
        b.iter_batched(
            || RuntimePool::<u64>::with_capacity_and_expiry(KEYS, ExpiryPolicy::Ignore),
            |mut pool| {
                for (i, key) in keys.iter().enumerate() {
                    let mut item = pool.get_item(key).expect("valid key");
                    item.set(i as u64);
                    black_box(pool.save(item).ok());
                }
                pool
            },
            BatchSize::LargeInput,
        )
    });

    group.bench_function("deferred_commit", |b| {
        let keys = keys();
        b.iter_batched(
            || RuntimePool::<u64>::with_capacity_and_expiry(KEYS, ExpiryPolicy::Ignore),
            |mut pool| {
                for (i, key) in keys.iter().enumerate() {
                    let mut item = pool.get_item(key).expect("valid key");
                    item.set(i as u64);
                    black_box(pool.save_deferred(item).ok());
                }
                black_box(pool.commit());
                pool
            },
            BatchSize::LargeInput,
        )
    });

    group.finish();
}

// ============================================================================
// Facade
// ============================================================================

fn bench_pool_cache(c: &mut Criterion) {
    let mut group = c.benchmark_group("pool_cache");
    group.throughput(Throughput::Elements(KEYS as u64));

    group.bench_function("get_multiple", |b| {
        let (pool, keys) = filled(ExpiryPolicy::Ignore);
        let cache = PoolCache::new(pool);
        b.iter(|| {
            for value in cache.get_multiple(&keys, None) {
                black_box(value.ok());
            }
        })
    });

    group.bench_function("set_multiple", |b| {
        let keys = keys();
        b.iter_batched(
            || PoolCache::new(RuntimePool::<u64>::new()),
            |mut cache| {
                let pairs = keys.iter().enumerate().map(|(i, k)| (k, i as u64));
                black_box(cache.set_multiple(pairs, None).ok());
                cache
            },
            BatchSize::LargeInput,
        )
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_validate_key,
    bench_get_item,
    bench_save,
    bench_pool_cache
);
criterion_main!(benches);
