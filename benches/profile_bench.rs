// Benchmark for trajectory solving and sampling throughput
// Run with: cargo bench

use criterion::{Criterion, criterion_group, criterion_main};
use trajplan::{AccelPlanner, JerkPlanner};

fn bench_accel_solve(c: &mut Criterion) {
    c.bench_function("accel solve trapezoid", |b| {
        b.iter(|| {
            let mut planner = AccelPlanner::new();
            planner
                .init(0.0, 50.0, 2.0, 8.0, 0.0, 0.0, 0.0, Some(4.0))
                .unwrap();
            let te = planner.calc_trajectory().unwrap();
            assert!(te > 0.0);
        });
    });
}

fn bench_accel_sample(c: &mut Criterion) {
    let mut planner = AccelPlanner::new();
    planner
        .init(0.0, 50.0, 2.0, 8.0, 0.0, 0.0, 0.0, None)
        .unwrap();
    let te = planner.calc_trajectory().unwrap();

    c.bench_function("accel sample 1k points", |b| {
        b.iter(|| {
            let mut acc = 0.0;
            for i in 0..1000 {
                let t = te * (i as f64) / 1000.0;
                acc += planner.sample(t).unwrap().position;
            }
            assert!(acc.is_finite());
        });
    });
}

fn bench_jerk_solve(c: &mut Criterion) {
    c.bench_function("jerk solve full s-curve", |b| {
        b.iter(|| {
            let mut planner = JerkPlanner::new();
            planner
                .init(0.0, 100.0, 2.0, 5.0, 1.0, 0.0, 0.0, 0.0)
                .unwrap();
            let te = planner.calc_trajectory().unwrap();
            assert!(te > 0.0);
        });
    });
}

fn bench_jerk_sample(c: &mut Criterion) {
    let mut planner = JerkPlanner::new();
    planner
        .init(0.0, 100.0, 2.0, 5.0, 1.0, 0.0, 0.0, 0.0)
        .unwrap();
    let te = planner.calc_trajectory().unwrap();

    c.bench_function("jerk sample 1k points", |b| {
        b.iter(|| {
            let mut acc = 0.0;
            for i in 0..1000 {
                let t = te * (i as f64) / 1000.0;
                acc += planner.sample(t).unwrap().position;
            }
            assert!(acc.is_finite());
        });
    });
}

criterion_group!(
    benches,
    bench_accel_solve,
    bench_accel_sample,
    bench_jerk_solve,
    bench_jerk_sample
);
criterion_main!(benches);
