/*
 * Simulator Module
 *
 * Wraps a Flock with the host's visibility signal. While the host reports the
 * animation as hidden nothing is stepped. The first visible frame after that
 * carries a delta covering the whole hidden period, so it is dropped and
 * stepping picks up again on the frame after.
 */

use glam::Vec3;

use crate::flock::Flock;
use crate::frame::{FrameContext, Viewport};

/// What a call to `Simulator::advance` did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    Stepped,
    Paused,
    Resumed,
}

#[derive(Debug, Clone)]
pub struct Simulator {
    flock: Flock,
    paused: bool,
}

impl Simulator {
    pub fn new(flock: Flock) -> Self {
        Self {
            flock,
            paused: false,
        }
    }

    pub fn flock(&self) -> &Flock {
        &self.flock
    }

    pub fn flock_mut(&mut self) -> &mut Flock {
        &mut self.flock
    }

    /// Swap in a freshly spawned flock, e.g. after the population size changed.
    pub fn replace_flock(&mut self, flock: Flock) {
        tracing::debug!(boids = flock.len(), "replacing flock");
        self.flock = flock;
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn advance(
        &mut self,
        dt: f32,
        viewport: Option<Viewport>,
        attractor: Option<Vec3>,
        visible: bool,
    ) -> Advance {
        if !visible {
            if !self.paused {
                tracing::debug!(step = self.flock.steps(), "animation hidden, pausing flock");
                self.paused = true;
            }
            return Advance::Paused;
        }

        if self.paused {
            self.paused = false;
            tracing::debug!(stale_dt = dt, "animation visible again, dropping resume frame");
            return Advance::Resumed;
        }

        self.flock.step(&FrameContext::new(dt, viewport, attractor));
        Advance::Stepped
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::FlockParams;

    fn simulator() -> Simulator {
        Simulator::new(Flock::with_seed(FlockParams::default(), Viewport::new(20.0, 12.0), 11))
    }

    #[test]
    fn visible_frames_step() {
        let mut sim = simulator();
        let viewport = Some(Viewport::new(20.0, 12.0));
        assert_eq!(sim.advance(0.016, viewport, None, true), Advance::Stepped);
        assert_eq!(sim.advance(0.016, viewport, None, true), Advance::Stepped);
        assert_eq!(sim.flock().steps(), 2);
    }

    #[test]
    fn hidden_frames_do_not_step_and_resume_frame_is_dropped() {
        let mut sim = simulator();
        let viewport = Some(Viewport::new(20.0, 12.0));
        sim.advance(0.016, viewport, None, true);
        let before: Vec<_> = sim.flock().boids().to_vec();

        assert_eq!(sim.advance(0.016, viewport, None, false), Advance::Paused);
        assert_eq!(sim.advance(0.016, viewport, None, false), Advance::Paused);
        assert!(sim.is_paused());

        assert_eq!(sim.advance(30.0, viewport, None, true), Advance::Resumed);
        assert!(!sim.is_paused());
        assert_eq!(sim.flock().steps(), 1);
        assert_eq!(sim.flock().boids(), before.as_slice());

        assert_eq!(sim.advance(0.016, viewport, None, true), Advance::Stepped);
        assert_eq!(sim.flock().steps(), 2);
    }
}
