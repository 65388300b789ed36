/*
 * Debug Information Module
 *
 * This module defines the DebugInfo struct that collects per-frame metrics
 * for the control panel and the debug overlay.
 *
 * Includes metrics for:
 * - FPS (frames per second) and frame time
 * - Steps run, frames skipped while hidden and resume frames dropped
 * - Flock speed statistics
 */

use std::time::Duration;

use crate::flock::Flock;
use crate::simulator::Advance;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DebugInfo {
    pub fps: f32,
    pub frame_time: Duration,
    pub steps: u64,
    pub paused_frames: u64,
    pub dropped_resume_frames: u64,
    pub mean_speed: f32,
    pub max_speed: f32,
    pub attractor_active: bool,
}

impl DebugInfo {
    pub fn record(&mut self, advance: Advance, flock: &Flock) {
        match advance {
            Advance::Stepped => self.steps = flock.steps(),
            Advance::Paused => self.paused_frames += 1,
            Advance::Resumed => self.dropped_resume_frames += 1,
        }

        let (sum, max) = flock
            .boids()
            .iter()
            .map(|boid| boid.speed())
            .fold((0.0f32, 0.0f32), |(sum, max), speed| (sum + speed, max.max(speed)));
        self.mean_speed = if flock.is_empty() { 0.0 } else { sum / flock.len() as f32 };
        self.max_speed = max;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::boid::Boid;
    use crate::params::FlockParams;
    use glam::Vec3;

    #[test]
    fn records_outcomes_and_speeds() {
        let flock = Flock::from_boids(
            FlockParams::default(),
            vec![
                Boid::new(Vec3::ZERO, Vec3::new(0.02, 0.0, 0.0)),
                Boid::new(Vec3::ONE, Vec3::new(0.0, 0.04, 0.0)),
            ],
        );
        let mut info = DebugInfo::default();
        info.record(Advance::Paused, &flock);
        info.record(Advance::Resumed, &flock);
        info.record(Advance::Paused, &flock);

        assert_eq!(info.paused_frames, 2);
        assert_eq!(info.dropped_resume_frames, 1);
        assert!((info.mean_speed - 0.03).abs() < 1e-6);
        assert!((info.max_speed - 0.04).abs() < 1e-6);
    }
}
