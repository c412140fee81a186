//! Rebalancing benchmarks: summation, both split strategies, full plans.

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use flowsplit::{
    Asset, RebalancePlan, Strategy, allocation_of, constrained_rebalance, precise_sum,
    unconstrained_rebalance,
};

/// Generate `n` holdings and a target allocation with a simple deterministic RNG.
fn generate_portfolio(n: usize) -> (Vec<f64>, Vec<f64>) {
    // xorshift32
    let mut rng_state: u32 = 42;
    let mut next = || {
        rng_state ^= rng_state << 13;
        rng_state ^= rng_state >> 17;
        rng_state ^= rng_state << 5;
        rng_state
    };

    let holdings: Vec<f64> = (0..n).map(|_| (next() % 1_000_000) as f64 / 100.0).collect();
    let raw: Vec<f64> = (0..n).map(|_| (next() % 1000 + 1) as f64).collect();
    let raw_total = precise_sum(&raw);
    let target = raw.iter().map(|w| w / raw_total).collect();
    (holdings, target)
}

fn bench_precise_sum(c: &mut Criterion) {
    let mut group = c.benchmark_group("sum");

    for n in [100, 10_000] {
        let (values, _) = generate_portfolio(n);
        group.bench_with_input(BenchmarkId::new("precise", n), &values, |b, v| {
            b.iter(|| black_box(precise_sum(black_box(v))))
        });
        group.bench_with_input(BenchmarkId::new("naive", n), &values, |b, v| {
            b.iter(|| black_box(black_box(v).iter().sum::<f64>()))
        });
    }

    group.finish();
}

fn bench_splits(c: &mut Criterion) {
    let mut group = c.benchmark_group("split");

    for n in [10, 1000] {
        let (holdings, target) = generate_portfolio(n);
        let current = allocation_of(&holdings).unwrap();

        group.bench_function(BenchmarkId::new("unconstrained", n), |b| {
            b.iter(|| {
                black_box(
                    unconstrained_rebalance(current.total, &current.fractions, &target, 10_000.0)
                        .unwrap(),
                )
            })
        });
        group.bench_function(BenchmarkId::new("constrained", n), |b| {
            b.iter(|| black_box(constrained_rebalance(&holdings, &target, 10_000.0).unwrap()))
        });
    }

    group.finish();
}

fn bench_plan(c: &mut Criterion) {
    let (holdings, target) = generate_portfolio(100);
    let assets: Vec<Asset> = holdings
        .iter()
        .zip(&target)
        .enumerate()
        .map(|(i, (&v, &t))| Asset::new(format!("A{i:03}"), v, t))
        .collect();

    c.bench_function("plan/100_assets_constrained", |b| {
        b.iter(|| black_box(RebalancePlan::compute(&assets, -5_000.0, Strategy::Constrained).unwrap()))
    });
}

criterion_group!(benches, bench_precise_sum, bench_splits, bench_plan);
criterion_main!(benches);
