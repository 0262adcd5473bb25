//! Criterion benchmarks for u-facility.
//!
//! Uses a small regional distribution network (3 plants, 4 warehouses,
//! 6 demand zones) and a synthetic grid instance to measure greedy
//! construction and fixed set search overhead.

use std::time::Duration;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use u_facility::greedy::{GreedyConfig, GreedyConstructor};
use u_facility::mfss::{MfssConfig, MfssRunner};
use u_facility::model::Instance;
use u_facility::optimizer::ExactOptimizer;

// ===========================================================================
// Regional distribution network
// ===========================================================================

fn regional_network() -> Instance {
    Instance::new(
        vec![120000.0, 115000.0, 110000.0],
        vec![300.0, 250.0, 250.0],
        vec![60000.0, 58000.0, 55000.0, 53000.0],
        vec![220.0, 210.0, 200.0, 180.0],
        vec![90.0, 110.0, 100.0, 90.0, 70.0, 60.0],
        vec![
            vec![10.0, 14.0, 16.0, 15.0],
            vec![16.0, 12.0, 10.0, 17.0],
            vec![11.0, 15.0, 18.0, 14.0],
        ],
        vec![
            vec![8.0, 9.0, 5.0, 11.0, 12.0, 15.0],
            vec![6.0, 8.0, 10.0, 7.0, 11.0, 13.0],
            vec![7.0, 9.0, 12.0, 6.0, 10.0, 14.0],
            vec![10.0, 7.0, 11.0, 8.0, 13.0, 6.0],
        ],
    )
    .expect("valid instance")
}

// ===========================================================================
// Random instance: facilities and customers on a unit square
// ===========================================================================

fn random_instance(n_i: usize, n_j: usize, n_k: usize, seed: u64) -> Instance {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut point = || (rng.random_range(0.0..1.0), rng.random_range(0.0..1.0));
    let primaries: Vec<(f64, f64)> = (0..n_i).map(|_| point()).collect();
    let secondaries: Vec<(f64, f64)> = (0..n_j).map(|_| point()).collect();
    let customers: Vec<(f64, f64)> = (0..n_k).map(|_| point()).collect();
    let dist = |a: (f64, f64), b: (f64, f64)| ((a.0 - b.0).powi(2) + (a.1 - b.1).powi(2)).sqrt();

    let demand = vec![10.0; n_k];
    let total: f64 = demand.iter().sum();
    Instance::new(
        vec![500.0; n_i],
        vec![total * 2.0 / n_i as f64; n_i],
        vec![200.0; n_j],
        vec![total * 2.0 / n_j as f64; n_j],
        demand,
        primaries
            .iter()
            .map(|&p| secondaries.iter().map(|&s| 10.0 * dist(p, s)).collect())
            .collect(),
        secondaries
            .iter()
            .map(|&s| customers.iter().map(|&c| 10.0 * dist(s, c)).collect())
            .collect(),
    )
    .expect("valid instance")
}

// ===========================================================================
// Benchmarks
// ===========================================================================

fn bench_greedy(c: &mut Criterion) {
    let mut group = c.benchmark_group("greedy_construct");
    group.sample_size(10);

    let optimizer = ExactOptimizer::default();
    for &rcl in &[1usize, 2, 3] {
        let inst = regional_network();
        let config = GreedyConfig::default().with_rcl_size(rcl);
        group.bench_with_input(BenchmarkId::from_parameter(rcl), &(inst, config), |b, (i, c)| {
            let mut rng = StdRng::seed_from_u64(42);
            b.iter(|| {
                let result = GreedyConstructor::run(black_box(i), &optimizer, black_box(c), &mut rng);
                black_box(result)
            })
        });
    }
    group.finish();
}

fn bench_mfss(c: &mut Criterion) {
    let mut group = c.benchmark_group("mfss");
    group.sample_size(10);

    let optimizer = ExactOptimizer::default();
    for (n_i, n_j, n_k) in [(3usize, 4usize, 6usize), (5, 10, 30), (8, 15, 60)] {
        let inst = if n_i == 3 {
            regional_network()
        } else {
            random_instance(n_i, n_j, n_k, 7)
        };
        let config = MfssConfig::default()
            .with_population_size(10)
            .with_n_best(5)
            .with_size_max(5)
            .with_initial_time_limit(Duration::from_millis(50))
            .with_max_iterations(20)
            .with_seed(42);
        group.bench_with_input(
            BenchmarkId::new(format!("i{}_j{}_k{}", n_i, n_j, n_k), n_k),
            &(inst, config),
            |b, (i, c)| {
                b.iter(|| {
                    let result = MfssRunner::run(black_box(i), &optimizer, black_box(c));
                    black_box(result)
                })
            },
        );
    }
    group.finish();
}

criterion_group!(benches, bench_greedy, bench_mfss);
criterion_main!(benches);
