use async_foreach::{for_each_parallel, for_each_sequential, for_each_throttled};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use std::convert::Infallible;
use tokio::runtime::Runtime;

fn create_items(len: usize) -> Vec<u64> {
    (0..len as u64).collect()
}

fn benchmark_async_strategies(c: &mut Criterion) {
    let rt = Runtime::new().unwrap();
    let items = create_items(1_000);

    c.bench_function("sequential_1000", |b| {
        b.iter(|| {
            rt.block_on(async {
                for_each_sequential(&items, |item, _, _| {
                    let item = *item;
                    async move {
                        black_box(item);
                        tokio::task::yield_now().await;
                        Ok::<_, Infallible>(())
                    }
                })
                .await
            })
        })
    });

    c.bench_function("parallel_1000", |b| {
        b.iter(|| {
            rt.block_on(async {
                for_each_parallel(&items, |item, _, _| {
                    let item = *item;
                    async move {
                        black_box(item);
                        tokio::task::yield_now().await;
                        Ok::<_, Infallible>(())
                    }
                })
                .await
            })
        })
    });
}

fn benchmark_throttled_batch_sizes(c: &mut Criterion) {
    let rt = Runtime::new().unwrap();
    let items = create_items(10_000);
    let mut group = c.benchmark_group("throttled_10000");

    for batch_size in [1usize, 16, 256, 10_000] {
        group.bench_with_input(BenchmarkId::from_parameter(batch_size), &batch_size, |b, &k| {
            b.iter(|| {
                rt.block_on(async {
                    let mut sum = 0u64;
                    for_each_throttled(&items, k, |item, _, _| sum += item)
                        .await
                        .unwrap();
                    black_box(sum)
                })
            })
        });
    }

    group.finish();
}

criterion_group!(benches, benchmark_async_strategies, benchmark_throttled_batch_sizes);
criterion_main!(benches);
