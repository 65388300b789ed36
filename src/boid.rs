/*
 * Boid Module
 *
 * This module defines the Boid struct: one flocking agent with a position,
 * a velocity, a per-frame acceleration accumulator and a facing orientation.
 * The steering rules live in the physics module; here the boid integrates
 * what it was given and turns to face where it is going.
 */

use glam::{Quat, Vec3};
use rand::Rng;

use crate::physics;

/// Local axis a boid marker points along before any rotation.
pub const FORWARD: Vec3 = Vec3::Z;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Boid {
    pub position: Vec3,
    pub velocity: Vec3,
    /// Scratch accumulator, cleared at the start of every step.
    pub acceleration: Vec3,
    pub orientation: Quat,
}

/// What a renderer needs to place one boid marker.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoidTransform {
    pub position: Vec3,
    pub orientation: Quat,
}

impl Boid {
    pub fn new(position: Vec3, velocity: Vec3) -> Self {
        Self {
            position,
            velocity,
            acceleration: Vec3::ZERO,
            orientation: Quat::IDENTITY,
        }
    }

    // Random boid inside the spawn box with a small random velocity
    pub fn random<R: Rng + ?Sized>(rng: &mut R, half_extents: Vec3, initial_speed: f32) -> Self {
        let position = Vec3::new(
            symmetric(rng, half_extents.x),
            symmetric(rng, half_extents.y),
            symmetric(rng, half_extents.z),
        );
        let velocity = Vec3::new(
            symmetric(rng, initial_speed),
            symmetric(rng, initial_speed),
            symmetric(rng, initial_speed),
        );
        Self::new(position, velocity)
    }

    pub fn speed(&self) -> f32 {
        self.velocity.length()
    }

    pub fn apply_force(&mut self, force: Vec3) {
        self.acceleration += force;
    }

    // Integrate acceleration, cap the speed, then move
    pub fn integrate(&mut self, dt: f32, speed_cap: f32, position_scale: f32) {
        self.velocity += self.acceleration * dt;
        self.velocity = physics::limit_speed(self.velocity, speed_cap);
        self.position += self.velocity * (dt * position_scale);
    }

    /// Turn part of the way towards the direction of travel. Boids slower than
    /// `epsilon` keep their current facing.
    pub fn turn_towards_heading(&mut self, smoothing: f32, epsilon: f32) {
        if self.velocity.length() <= epsilon {
            return;
        }
        let heading = physics::normalize_or_zero(self.velocity);
        let target = Quat::from_rotation_arc(FORWARD, heading);
        self.orientation = self.orientation.slerp(target, smoothing).normalize();
    }

    pub fn heading(&self) -> Vec3 {
        self.orientation * FORWARD
    }

    pub fn transform(&self) -> BoidTransform {
        BoidTransform {
            position: self.position,
            orientation: self.orientation,
        }
    }
}

// Uniform draw in [-half, half), or 0 for an empty range
fn symmetric<R: Rng + ?Sized>(rng: &mut R, half: f32) -> f32 {
    if half > 0.0 {
        rng.gen_range(-half..half)
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn random_boid_stays_in_spawn_box() {
        let mut rng = StdRng::seed_from_u64(7);
        let half = Vec3::new(4.0, 2.0, 0.0);
        for _ in 0..200 {
            let boid = Boid::random(&mut rng, half, 0.1);
            assert!(boid.position.x.abs() <= 4.0);
            assert!(boid.position.y.abs() <= 2.0);
            assert_eq!(boid.position.z, 0.0);
            assert!(boid.velocity.abs().max_element() <= 0.1);
            assert_eq!(boid.acceleration, Vec3::ZERO);
            assert_eq!(boid.orientation, Quat::IDENTITY);
        }
    }

    #[test]
    fn integrate_caps_speed_and_scales_displacement() {
        let mut boid = Boid::new(Vec3::ZERO, Vec3::new(0.01, 0.0, 0.0));
        boid.apply_force(Vec3::new(10.0, 0.0, 0.0));
        boid.integrate(0.5, 0.05, 100.0);
        assert!((boid.speed() - 0.05).abs() < 1e-6);
        assert!((boid.position.x - 0.05 * 0.5 * 100.0).abs() < 1e-4);
    }

    #[test]
    fn orientation_turns_gradually() {
        let mut boid = Boid::new(Vec3::ZERO, Vec3::new(0.05, 0.0, 0.0));
        let target = Quat::from_rotation_arc(FORWARD, Vec3::X);

        boid.turn_towards_heading(0.1, 0.001);
        let first = boid.orientation.dot(target).abs();
        assert!(first < 0.999, "turned all the way in one frame");

        for _ in 0..200 {
            boid.turn_towards_heading(0.1, 0.001);
        }
        assert!(boid.orientation.dot(target).abs() > 0.9999);
        assert!((boid.heading() - Vec3::X).length() < 1e-2);
        assert!(boid.orientation.is_normalized());
    }

    #[test]
    fn full_smoothing_snaps() {
        let mut boid = Boid::new(Vec3::ZERO, Vec3::new(0.0, -0.05, 0.0));
        boid.turn_towards_heading(1.0, 0.001);
        assert!((boid.heading() - Vec3::new(0.0, -1.0, 0.0)).length() < 1e-4);
    }

    #[test]
    fn slow_boids_keep_their_facing() {
        let mut boid = Boid::new(Vec3::ZERO, Vec3::new(0.0005, 0.0, 0.0));
        boid.turn_towards_heading(1.0, 0.001);
        assert_eq!(boid.orientation, Quat::IDENTITY);
    }
}
