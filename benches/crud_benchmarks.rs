use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use std::collections::BTreeSet;
use std::hint::black_box;
use avl_ost::AvlSet;

const N: usize = 10_000;

// ─── Helper functions to generate key sequences ─────────────────────────────

fn ordered_keys(n: usize) -> Vec<i64> {
    (0..n as i64).collect()
}

fn reverse_ordered_keys(n: usize) -> Vec<i64> {
    (0..n as i64).rev().collect()
}

fn random_keys(n: usize) -> Vec<i64> {
    // Use a simple LCG for deterministic pseudo-random sequence
    let mut keys = Vec::with_capacity(n);
    let mut x: u64 = 12345;
    for _ in 0..n {
        x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
        keys.push((x >> 33) as i64);
    }
    keys
}

fn key_patterns() -> [(&'static str, Vec<i64>); 3] {
    [("ordered", ordered_keys(N)), ("reverse", reverse_ordered_keys(N)), ("random", random_keys(N))]
}

// ─── Set Benchmarks ─────────────────────────────────────────────────────────

fn bench_set_insert(c: &mut Criterion) {
    for (pattern, keys) in key_patterns() {
        let mut group = c.benchmark_group(format!("set_insert_{pattern}"));

        group.bench_function(BenchmarkId::new("AvlSet", N), |b| {
            b.iter(|| {
                let mut set = AvlSet::new();
                for &k in &keys {
                    set.insert(k);
                }
                set
            });
        });

        group.bench_function(BenchmarkId::new("BTreeSet", N), |b| {
            b.iter(|| {
                let mut set = BTreeSet::new();
                for &k in &keys {
                    set.insert(k);
                }
                set
            });
        });

        group.finish();
    }
}

fn bench_set_contains(c: &mut Criterion) {
    for (pattern, keys) in key_patterns() {
        let mut group = c.benchmark_group(format!("set_contains_{pattern}"));
        let avl_set: AvlSet<i64> = keys.iter().copied().collect();
        let bt_set: BTreeSet<i64> = keys.iter().copied().collect();

        group.bench_function(BenchmarkId::new("AvlSet", N), |b| {
            b.iter(|| {
                for k in &keys {
                    black_box(avl_set.contains(k));
                }
            });
        });

        group.bench_function(BenchmarkId::new("BTreeSet", N), |b| {
            b.iter(|| {
                for k in &keys {
                    black_box(bt_set.contains(k));
                }
            });
        });

        group.finish();
    }
}

fn bench_set_remove(c: &mut Criterion) {
    for (pattern, keys) in key_patterns() {
        let mut group = c.benchmark_group(format!("set_remove_{pattern}"));
        let avl_set: AvlSet<i64> = keys.iter().copied().collect();
        let bt_set: BTreeSet<i64> = keys.iter().copied().collect();

        group.bench_function(BenchmarkId::new("AvlSet", N), |b| {
            b.iter_batched(
                || avl_set.clone(),
                |mut set| {
                    for k in &keys {
                        set.remove(k);
                    }
                    set
                },
                criterion::BatchSize::SmallInput,
            );
        });

        group.bench_function(BenchmarkId::new("BTreeSet", N), |b| {
            b.iter_batched(
                || bt_set.clone(),
                |mut set| {
                    for k in &keys {
                        set.remove(k);
                    }
                    set
                },
                criterion::BatchSize::SmallInput,
            );
        });

        group.finish();
    }
}

fn bench_set_iterate(c: &mut Criterion) {
    let keys = random_keys(N);
    let avl_set: AvlSet<i64> = keys.iter().copied().collect();
    let bt_set: BTreeSet<i64> = keys.iter().copied().collect();
    let mut group = c.benchmark_group("set_iterate");

    group.bench_function(BenchmarkId::new("AvlSet::iter", N), |b| {
        b.iter(|| avl_set.iter().copied().sum::<i64>());
    });

    group.bench_function(BenchmarkId::new("AvlSet::cursor", N), |b| {
        b.iter(|| {
            let mut total = 0i64;
            let mut cursor = avl_set.begin();
            while let Some(k) = cursor.key() {
                total += k;
                cursor.move_next();
            }
            total
        });
    });

    group.bench_function(BenchmarkId::new("BTreeSet::iter", N), |b| {
        b.iter(|| bt_set.iter().copied().sum::<i64>());
    });

    group.finish();
}

// ─── Order Statistic Benchmarks ─────────────────────────────────────────────

fn bench_order_statistics(c: &mut Criterion) {
    let keys = random_keys(N);
    let avl_set: AvlSet<i64> = keys.iter().copied().collect();
    let mut group = c.benchmark_group("order_statistics");

    group.bench_function(BenchmarkId::new("get_by_rank", N), |b| {
        b.iter(|| {
            for rank in 0..avl_set.len() {
                black_box(avl_set.get_by_rank(rank));
            }
        });
    });

    group.bench_function(BenchmarkId::new("rank_of", N), |b| {
        b.iter(|| {
            for k in &keys {
                black_box(avl_set.rank_of(k));
            }
        });
    });

    group.bench_function(BenchmarkId::new("lower_bound", N), |b| {
        b.iter(|| {
            for k in &keys {
                black_box(avl_set.lower_bound(&(k + 1)).rank());
            }
        });
    });

    group.finish();
}

criterion_group!(set_benches, bench_set_insert, bench_set_contains, bench_set_remove, bench_set_iterate,);

criterion_group!(order_statistic_benches, bench_order_statistics);

criterion_main!(set_benches, order_statistic_benches);
