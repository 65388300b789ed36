/*
 * Flock Benchmark
 *
 * Measures the per-frame cost of the simulation: the pairwise distance table
 * plus the steering rules grow with the square of the population, so the step
 * is timed at several flock sizes around the default of 100.
 */

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use glam::Vec3;
use std::time::Duration;

use flock::physics;
use flock::{Flock, FlockParams, FrameContext, Viewport};

const DT: f32 = 1.0 / 60.0;

fn viewport() -> Viewport {
    Viewport::new(24.0, 14.0)
}

fn params_with(count: usize) -> FlockParams {
    FlockParams {
        boid_count: count,
        ..FlockParams::default()
    }
}

// Full step, with and without an attractor
fn bench_step(c: &mut Criterion) {
    let mut group = c.benchmark_group("step");

    for num_boids in [50, 100, 200, 400].iter() {
        group.bench_with_input(BenchmarkId::new("free", num_boids), num_boids, |b, &n| {
            let mut flock = Flock::with_seed(params_with(n), viewport(), 1);
            let frame = FrameContext::new(DT, Some(viewport()), None);
            b.iter(|| flock.step(black_box(&frame)));
        });

        group.bench_with_input(BenchmarkId::new("attracted", num_boids), num_boids, |b, &n| {
            let mut flock = Flock::with_seed(params_with(n), viewport(), 1);
            let frame = FrameContext::new(DT, Some(viewport()), Some(Vec3::new(4.0, -2.0, 0.0)));
            b.iter(|| flock.step(black_box(&frame)));
        });
    }

    group.finish();
}

// The three flocking rules for one boid against a settled flock
fn bench_rules(c: &mut Criterion) {
    let mut group = c.benchmark_group("rules");

    for num_boids in [100, 400].iter() {
        group.bench_with_input(BenchmarkId::from_parameter(num_boids), num_boids, |b, &n| {
            let flock = Flock::with_seed(params_with(n), viewport(), 2);
            let params = flock.params().clone();
            let positions: Vec<Vec3> = flock.boids().iter().map(|boid| boid.position).collect();
            let velocities: Vec<Vec3> = flock.boids().iter().map(|boid| boid.velocity).collect();
            let distances: Vec<f32> = positions.iter().map(|p| positions[0].distance(*p)).collect();

            b.iter(|| {
                let separation = physics::separation(positions[0], &positions, &distances, &params);
                let alignment = physics::alignment(&velocities, &distances, &params);
                let cohesion = physics::cohesion(positions[0], &positions, &distances, &params);
                black_box(separation + alignment + cohesion)
            });
        });
    }

    group.finish();
}

// Configure the benchmarks
criterion_group! {
    name = benches;
    config = Criterion::default()
        .sample_size(20)
        .measurement_time(Duration::from_secs(5))
        .warm_up_time(Duration::from_secs(1));
    targets = bench_step, bench_rules
}

criterion_main!(benches);
