/*
 * Physics Module
 *
 * This module holds the steering rules that make up one boid's acceleration:
 * separation, alignment and cohesion against the rest of the flock, the
 * distance-ramped pull towards an optional attractor, and the fixed push back
 * inside the containment box. It also holds the speed cap and the helpers the
 * rules share.
 *
 * Every rule reads a frozen snapshot of the flock (positions, velocities and
 * this boid's row of the distance table), so the order in which boids are
 * updated never matters.
 */

use glam::Vec3;

use crate::frame::Bounds;
use crate::params::FlockParams;

/// Unit vector in the direction of `v`, or zero when `v` has no length.
#[inline]
pub fn normalize_or_zero(v: Vec3) -> Vec3 {
    let length = v.length();
    if length > 0.0 && length.is_finite() {
        v / length
    } else {
        Vec3::ZERO
    }
}

// A neighbor counts for a rule when it is strictly inside the radius and not
// coincident with the boid itself (which also skips the boid's own entry).
#[inline]
fn within(distance: f32, radius: f32) -> bool {
    distance > 0.0 && distance < radius
}

// Rule 1: keep a small distance away from other boids
pub fn separation(position: Vec3, positions: &[Vec3], distances: &[f32], params: &FlockParams) -> Vec3 {
    let mut steer = Vec3::ZERO;
    let mut count = 0u32;

    for (other, &distance) in positions.iter().zip(distances) {
        if within(distance, params.separation_radius) {
            // Pointing away from the neighbor, closer neighbors push harder
            steer += normalize_or_zero(position - *other) / distance;
            count += 1;
        }
    }

    if count == 0 {
        return Vec3::ZERO;
    }
    normalize_or_zero(steer / count as f32) * params.separation_force
}

// Rule 2: match velocity with nearby boids
pub fn alignment(velocities: &[Vec3], distances: &[f32], params: &FlockParams) -> Vec3 {
    let mut steer = Vec3::ZERO;
    let mut count = 0u32;

    for (velocity, &distance) in velocities.iter().zip(distances) {
        if within(distance, params.alignment_radius) {
            steer += *velocity;
            count += 1;
        }
    }

    if count == 0 {
        return Vec3::ZERO;
    }
    normalize_or_zero(steer / count as f32) * params.alignment_force
}

// Rule 3: move toward the centre of nearby boids
pub fn cohesion(position: Vec3, positions: &[Vec3], distances: &[f32], params: &FlockParams) -> Vec3 {
    let mut center = Vec3::ZERO;
    let mut count = 0u32;

    for (other, &distance) in positions.iter().zip(distances) {
        if within(distance, params.cohesion_radius) {
            center += *other;
            count += 1;
        }
    }

    if count == 0 {
        return Vec3::ZERO;
    }
    center /= count as f32;
    normalize_or_zero(center - position) * params.cohesion_force
}

/// 0 inside the minimum distance, then a linear ramp reaching 1 at the
/// maximum distance and staying there.
pub fn attraction_strength(distance: f32, params: &FlockParams) -> f32 {
    if distance <= params.attraction_min_distance {
        return 0.0;
    }
    let span = params.attraction_max_distance - params.attraction_min_distance;
    if span <= 0.0 {
        return 1.0;
    }
    ((distance - params.attraction_min_distance) / span).min(1.0)
}

// Pull towards the attractor, stronger the further away the boid is
pub fn attraction(position: Vec3, attractor: Vec3, params: &FlockParams) -> Vec3 {
    let strength = attraction_strength(position.distance(attractor), params);
    if strength == 0.0 {
        return Vec3::ZERO;
    }
    normalize_or_zero(attractor - position) * (params.attraction_force * strength)
}

// Keep boids within the containment box, one axis at a time
pub fn boundary(position: Vec3, bounds: &Bounds, params: &FlockParams) -> Vec3 {
    let push = |value: f32, bound: f32| {
        if value > bound {
            -params.boundary_force
        } else if value < -bound {
            params.boundary_force
        } else {
            0.0
        }
    };

    Vec3::new(
        push(position.x, bounds.half_extents.x),
        push(position.y, bounds.half_extents.y),
        push(position.z, bounds.half_extents.z),
    )
}

/// Base speed cap, raised towards the attracted cap as the boid gets further
/// from the attractor.
pub fn effective_speed_cap(attractor_distance: Option<f32>, params: &FlockParams) -> f32 {
    match attractor_distance {
        Some(distance) if distance > params.attraction_min_distance => {
            let strength = attraction_strength(distance, params);
            params.max_speed + (params.attracted_max_speed - params.max_speed) * strength
        }
        _ => params.max_speed,
    }
}

// Rescale velocity down to the cap if it is going too fast
#[inline]
pub fn limit_speed(velocity: Vec3, cap: f32) -> Vec3 {
    if velocity.length() > cap {
        normalize_or_zero(velocity) * cap
    } else {
        velocity
    }
}

/// Per-boid breakdown of the last step's acceleration.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SteeringForces {
    pub separation: Vec3,
    pub alignment: Vec3,
    pub cohesion: Vec3,
    pub attraction: Vec3,
    pub boundary: Vec3,
    pub speed_cap: f32,
}

impl SteeringForces {
    pub fn flocking(&self) -> Vec3 {
        self.separation + self.alignment + self.cohesion
    }

    pub fn total(&self) -> Vec3 {
        self.flocking() + self.attraction + self.boundary
    }
}

/// Everything one boid feels this frame, computed from the frozen snapshot.
pub fn steering_forces(
    index: usize,
    positions: &[Vec3],
    velocities: &[Vec3],
    distances: &[f32],
    attractor: Option<Vec3>,
    bounds: &Bounds,
    params: &FlockParams,
) -> SteeringForces {
    let position = positions[index];
    let attractor_distance = attractor.map(|target| position.distance(target));

    SteeringForces {
        separation: separation(position, positions, distances, params),
        alignment: alignment(velocities, distances, params),
        cohesion: cohesion(position, positions, distances, params),
        attraction: attractor.map_or(Vec3::ZERO, |target| attraction(position, target, params)),
        boundary: boundary(position, bounds, params),
        speed_cap: effective_speed_cap(attractor_distance, params),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::Viewport;

    fn distances_from(position: Vec3, positions: &[Vec3]) -> Vec<f32> {
        positions.iter().map(|other| position.distance(*other)).collect()
    }

    #[test]
    fn normalize_zero_vector_is_zero() {
        assert_eq!(normalize_or_zero(Vec3::ZERO), Vec3::ZERO);
        let unit = normalize_or_zero(Vec3::new(3.0, 0.0, 4.0));
        assert!((unit.length() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn coincident_neighbors_do_not_separate() {
        let params = FlockParams::default();
        let positions = [Vec3::ZERO, Vec3::ZERO];
        let distances = distances_from(Vec3::ZERO, &positions);
        let steer = separation(Vec3::ZERO, &positions, &distances, &params);
        assert_eq!(steer, Vec3::ZERO);
        assert!(steer.is_finite());
    }

    #[test]
    fn separation_pushes_away_with_full_force() {
        let params = FlockParams::default();
        let positions = [Vec3::ZERO, Vec3::new(0.5, 0.0, 0.0)];
        let distances = distances_from(positions[0], &positions);
        let steer = separation(positions[0], &positions, &distances, &params);
        assert!(steer.x < 0.0);
        assert!((steer.length() - params.separation_force).abs() < 1e-6);
    }

    #[test]
    fn closer_neighbor_pushes_harder() {
        let params = FlockParams::default();
        let positions = [Vec3::ZERO, Vec3::new(0.2, 0.0, 0.0), Vec3::new(0.0, 0.9, 0.0)];
        let distances = distances_from(positions[0], &positions);
        let steer = separation(positions[0], &positions, &distances, &params);

        assert!(steer.x < 0.0);
        assert!(steer.y < 0.0);
        assert_eq!(steer.z, 0.0);
        // Weights 1/0.2 and 1/0.9
        assert!(steer.x.abs() > 4.0 * steer.y.abs());
        assert!((steer.length() - params.separation_force).abs() < 1e-6);
    }

    #[test]
    fn alignment_follows_mean_neighbor_heading() {
        let params = FlockParams::default();
        let positions = [Vec3::ZERO, Vec3::new(1.0, 0.0, 0.0), Vec3::new(0.0, 1.0, 0.0)];
        let velocities = [Vec3::ZERO, Vec3::new(0.0, 0.0, 0.02), Vec3::new(0.0, 0.0, 0.04)];
        let distances = distances_from(positions[0], &positions);
        let steer = alignment(&velocities, &distances, &params);
        assert!((steer - Vec3::new(0.0, 0.0, params.alignment_force)).length() < 1e-6);
    }

    #[test]
    fn cohesion_steers_to_centroid() {
        let params = FlockParams::default();
        let positions = [Vec3::ZERO, Vec3::new(1.0, 1.0, 0.0), Vec3::new(1.0, -1.0, 0.0)];
        let distances = distances_from(positions[0], &positions);
        let steer = cohesion(positions[0], &positions, &distances, &params);
        assert!((steer - Vec3::new(params.cohesion_force, 0.0, 0.0)).length() < 1e-6);
    }

    #[test]
    fn rules_ignore_neighbors_outside_radius() {
        let params = FlockParams::default();
        let positions = [Vec3::ZERO, Vec3::new(10.0, 0.0, 0.0)];
        let velocities = [Vec3::X, Vec3::Y];
        let distances = distances_from(positions[0], &positions);
        assert_eq!(separation(positions[0], &positions, &distances, &params), Vec3::ZERO);
        assert_eq!(alignment(&velocities, &distances, &params), Vec3::ZERO);
        assert_eq!(cohesion(positions[0], &positions, &distances, &params), Vec3::ZERO);
    }

    #[test]
    fn attraction_strength_ramps_and_clamps() {
        let params = FlockParams::default();
        assert_eq!(attraction_strength(0.5, &params), 0.0);
        assert_eq!(attraction_strength(params.attraction_min_distance, &params), 0.0);
        assert!((attraction_strength(8.0, &params) - 0.5).abs() < 1e-6);
        assert_eq!(attraction_strength(params.attraction_max_distance, &params), 1.0);
        assert_eq!(attraction_strength(1000.0, &params), 1.0);

        let mut previous = 0.0;
        let mut distance = params.attraction_min_distance;
        while distance <= params.attraction_max_distance {
            let strength = attraction_strength(distance, &params);
            assert!(strength >= previous);
            previous = strength;
            distance += 0.25;
        }
    }

    #[test]
    fn attraction_is_zero_inside_min_distance() {
        let params = FlockParams::default();
        let steer = attraction(Vec3::ZERO, Vec3::new(0.5, 0.0, 0.0), &params);
        assert_eq!(steer, Vec3::ZERO);

        let steer = attraction(Vec3::ZERO, Vec3::new(0.0, 100.0, 0.0), &params);
        assert!((steer - Vec3::new(0.0, params.attraction_force, 0.0)).length() < 1e-6);
    }

    #[test]
    fn boundary_pushes_back_inside() {
        let params = FlockParams::default();
        let bounds = Bounds::new(Some(Viewport::new(10.0, 10.0)), params.boundary_z);

        let outside_positive = boundary(Vec3::new(6.0, 0.0, 0.0), &bounds, &params);
        assert!(outside_positive.x < 0.0);
        assert_eq!(outside_positive.y, 0.0);

        let outside_negative = boundary(Vec3::new(-6.0, 0.0, -6.0), &bounds, &params);
        assert!(outside_negative.x > 0.0);
        assert!(outside_negative.z > 0.0);

        assert_eq!(boundary(Vec3::new(4.9, -4.9, 4.9), &bounds, &params), Vec3::ZERO);
    }

    #[test]
    fn boundary_without_viewport_applies_no_force() {
        let params = FlockParams::default();
        let bounds = Bounds::new(None, params.boundary_z);
        let steer = boundary(Vec3::new(1.0e6, -1.0e6, 6.0), &bounds, &params);
        assert_eq!(steer, Vec3::ZERO);
    }

    #[test]
    fn speed_cap_rises_with_attractor_distance() {
        let params = FlockParams::default();
        assert_eq!(effective_speed_cap(None, &params), params.max_speed);
        assert_eq!(effective_speed_cap(Some(0.5), &params), params.max_speed);
        assert_eq!(effective_speed_cap(Some(50.0), &params), params.attracted_max_speed);
        let halfway = effective_speed_cap(Some(8.0), &params);
        assert!((halfway - (params.max_speed + params.attracted_max_speed) / 2.0).abs() < 1e-6);
    }

    #[test]
    fn limit_speed_only_shrinks() {
        let slow = Vec3::new(0.01, 0.0, 0.0);
        assert_eq!(limit_speed(slow, 0.05), slow);
        let fast = limit_speed(Vec3::new(3.0, 4.0, 0.0), 0.05);
        assert!((fast.length() - 0.05).abs() < 1e-6);
        assert_eq!(limit_speed(Vec3::ZERO, 0.0), Vec3::ZERO);
    }
}
