//! Benchmarks for the DCFR minimizer.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use dcfr_solver::cfr::{compute_exploitability, regret_matching, CFRMinimizer, DcfrConfig};
use dcfr_solver::games::kuhn::KuhnGame;

fn quiet_config() -> DcfrConfig {
    DcfrConfig::default().with_log_interval(0)
}

fn kuhn_single_iteration_benchmark(c: &mut Criterion) {
    let game = KuhnGame::new();
    let mut minimizer = CFRMinimizer::with_config(&game, quiet_config());

    c.bench_function("kuhn_single_iteration", |b| {
        b.iter(|| black_box(minimizer.compute(1).unwrap()))
    });
}

fn kuhn_1000_iterations_benchmark(c: &mut Criterion) {
    let game = KuhnGame::new();

    c.bench_function("kuhn_1000_iterations", |b| {
        b.iter(|| {
            let mut minimizer = CFRMinimizer::with_config(&game, quiet_config());
            minimizer.compute(black_box(1000)).unwrap()
        })
    });
}

fn kuhn_exploitability_benchmark(c: &mut Criterion) {
    let game = KuhnGame::new();
    let profile = CFRMinimizer::with_config(&game, quiet_config())
        .compute(1000)
        .unwrap();

    c.bench_function("kuhn_exploitability", |b| {
        b.iter(|| compute_exploitability(&game, black_box(&profile)).unwrap())
    });
}

fn regret_matching_benchmark(c: &mut Criterion) {
    // push/fold sized: 2 actions × 1326 hands
    let regrets: Vec<Vec<f64>> = (0..2)
        .map(|a| {
            (0..1326)
                .map(|h| ((h * 7 + a * 13) % 17) as f64 - 8.0)
                .collect()
        })
        .collect();

    c.bench_function("regret_matching_1326_hands", |b| {
        b.iter(|| regret_matching(black_box(&regrets), 1326))
    });
}

criterion_group!(
    benches,
    kuhn_single_iteration_benchmark,
    kuhn_1000_iterations_benchmark,
    kuhn_exploitability_benchmark,
    regret_matching_benchmark
);
criterion_main!(benches);
