//! Performance benchmarks for the request cache.
//!
//! - Hit path: a fresh entry is returned without running the fetcher
//! - Miss path: zero TTL forces a fetch and a store on every call
//! - Key normalization for parameterized requests

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use market_data_cache::{cache_key, RequestCache};
use std::time::Duration;
use tokio::runtime::Runtime;

fn sample_sectors(count: usize) -> Vec<String> {
    (0..count).map(|i| format!("Sector {}", i)).collect()
}

/// Benchmark lookups that are served from cache.
fn bench_cache_hit(c: &mut Criterion) {
    let rt = Runtime::new().unwrap();
    let cache = RequestCache::new();
    let ttl = Duration::from_secs(300);

    rt.block_on(async {
        cache
            .cached_fetch("/api/entities/sectors", ttl, || async {
                Ok::<_, ()>(sample_sectors(11))
            })
            .await
            .unwrap();
    });

    let cache = &cache;
    c.bench_function("cache_hit", |b| {
        b.to_async(&rt).iter(move || async move {
            let _sectors = cache
                .cached_fetch("/api/entities/sectors", ttl, || async {
                    Ok::<_, ()>(Vec::<String>::new())
                })
                .await;
        });
    });
}

/// Benchmark fetch-and-store with growing payloads.
fn bench_cache_miss(c: &mut Criterion) {
    let rt = Runtime::new().unwrap();
    let cache = RequestCache::new();
    let cache = &cache;
    let mut group = c.benchmark_group("cache_miss");

    for size in [10, 100, 1000] {
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, &size| {
            b.to_async(&rt).iter(move || async move {
                let _sectors = cache
                    .cached_fetch("/api/entities/sectors", Duration::ZERO, move || async move {
                        Ok::<_, ()>(sample_sectors(size))
                    })
                    .await;
            });
        });
    }

    group.finish();
}

/// Benchmark cache key construction.
fn bench_cache_key(c: &mut Criterion) {
    let params = [("symbol", "AAPL"), ("range", "1d"), ("interval", "5m")];

    c.bench_function("cache_key", |b| {
        b.iter(|| cache_key("/api/quotes", &params));
    });
}

criterion_group!(benches, bench_cache_hit, bench_cache_miss, bench_cache_key);
criterion_main!(benches);
