/*
 * Flock Module
 *
 * This module owns the fixed population of boids and advances it once per
 * rendered frame.
 *
 * Each step first freezes the flock: positions and velocities are copied into
 * snapshot buffers and the full pairwise distance table is filled in. Every
 * boid then steers against that snapshot only, so a boid updated early in the
 * loop is never seen half-moved by the boids after it. The buffers belong to
 * the flock and are refilled every step, which keeps several flocks in one
 * process independent of each other.
 */

use glam::Vec3;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::boid::{Boid, BoidTransform};
use crate::frame::{FrameContext, Viewport};
use crate::params::{FlockParams, StationaryPolicy};
use crate::physics::{self, SteeringForces};

// Per-step scratch, reused between steps to avoid reallocating
#[derive(Debug, Default, Clone)]
struct Snapshot {
    positions: Vec<Vec3>,
    velocities: Vec<Vec3>,
    // Row-major N x N
    distances: Vec<f32>,
}

impl Snapshot {
    fn capture(&mut self, boids: &[Boid]) {
        let n = boids.len();

        self.positions.clear();
        self.positions.extend(boids.iter().map(|boid| boid.position));
        self.velocities.clear();
        self.velocities.extend(boids.iter().map(|boid| boid.velocity));

        self.distances.clear();
        self.distances.resize(n * n, 0.0);
        for i in 0..n {
            for j in (i + 1)..n {
                let d = self.positions[i].distance(self.positions[j]);
                self.distances[i * n + j] = d;
                self.distances[j * n + i] = d;
            }
        }
    }

    fn row(&self, index: usize) -> &[f32] {
        let n = self.positions.len();
        &self.distances[index * n..(index + 1) * n]
    }
}

#[derive(Debug, Clone)]
pub struct Flock {
    boids: Vec<Boid>,
    params: FlockParams,
    forces: Vec<SteeringForces>,
    snapshot: Snapshot,
    steps: u64,
}

impl Flock {
    /// Spawn `params.boid_count` boids spread over the viewport (and
    /// `spawn_depth` along z) with small random velocities.
    pub fn new<R: Rng + ?Sized>(params: FlockParams, viewport: Viewport, rng: &mut R) -> Self {
        let half_extents = Vec3::new(
            viewport.half_width(),
            viewport.half_height(),
            params.spawn_depth / 2.0,
        );
        let boids = (0..params.boid_count)
            .map(|_| Boid::random(&mut *rng, half_extents, params.initial_speed))
            .collect();

        tracing::debug!(
            boids = params.boid_count,
            width = viewport.width,
            height = viewport.height,
            "spawned flock"
        );
        Self::from_boids(params, boids)
    }

    pub fn with_seed(params: FlockParams, viewport: Viewport, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        Self::new(params, viewport, &mut rng)
    }

    /// Build a flock from explicit boid states. `params.boid_count` is
    /// overwritten with the number of boids given.
    pub fn from_boids(mut params: FlockParams, boids: Vec<Boid>) -> Self {
        params.boid_count = boids.len();
        let forces = vec![SteeringForces::default(); boids.len()];
        Self {
            boids,
            params,
            forces,
            snapshot: Snapshot::default(),
            steps: 0,
        }
    }

    pub fn boids(&self) -> &[Boid] {
        &self.boids
    }

    pub fn len(&self) -> usize {
        self.boids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.boids.is_empty()
    }

    pub fn params(&self) -> &FlockParams {
        &self.params
    }

    /// Tuning may change between steps; the population size may not.
    pub fn set_params(&mut self, mut params: FlockParams) {
        params.boid_count = self.boids.len();
        self.params = params;
    }

    /// Force breakdown per boid from the most recent step.
    pub fn forces(&self) -> &[SteeringForces] {
        &self.forces
    }

    pub fn steps(&self) -> u64 {
        self.steps
    }

    pub fn transforms(&self) -> impl ExactSizeIterator<Item = BoidTransform> + '_ {
        self.boids.iter().map(Boid::transform)
    }

    pub fn centroid(&self) -> Vec3 {
        if self.boids.is_empty() {
            return Vec3::ZERO;
        }
        let sum = self.boids.iter().fold(Vec3::ZERO, |acc, boid| acc + boid.position);
        sum / self.boids.len() as f32
    }

    // Advance every boid by one frame
    pub fn step(&mut self, frame: &FrameContext) {
        debug_assert!(frame.dt.is_finite() && frame.dt >= 0.0, "dt must be finite and non-negative");

        self.snapshot.capture(&self.boids);
        let bounds = frame.bounds(self.params.boundary_z);
        let params = &self.params;

        for (i, (boid, forces)) in self.boids.iter_mut().zip(self.forces.iter_mut()).enumerate() {
            boid.acceleration = Vec3::ZERO;

            if params.stationary == StationaryPolicy::Skip && boid.velocity.length() == 0.0 {
                *forces = SteeringForces {
                    speed_cap: params.max_speed,
                    ..SteeringForces::default()
                };
                continue;
            }

            *forces = physics::steering_forces(
                i,
                &self.snapshot.positions,
                &self.snapshot.velocities,
                self.snapshot.row(i),
                frame.attractor,
                &bounds,
                params,
            );
            boid.apply_force(forces.total());

            boid.integrate(frame.dt, forces.speed_cap, params.position_scale);
            boid.turn_towards_heading(params.rotation_smoothing, params.orientation_epsilon);
        }

        self.steps += 1;
    }
}
