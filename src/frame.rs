/*
 * Frame Module
 *
 * Per-step inputs handed to the flock by the host: elapsed time, the visible
 * extent of the world and an optional attractor. Nothing here outlives a step.
 */

use glam::Vec3;

/// Visible extent of the z = 0 plane, in world units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn half_width(&self) -> f32 {
        self.width / 2.0
    }

    pub fn half_height(&self) -> f32 {
        self.height / 2.0
    }
}

/// Containment box half extents. An axis with an infinite bound never pushes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub half_extents: Vec3,
}

impl Bounds {
    pub fn new(viewport: Option<Viewport>, boundary_z: f32) -> Self {
        let half_extents = match viewport {
            Some(viewport) => Vec3::new(viewport.half_width(), viewport.half_height(), boundary_z),
            // Nothing to contain against until the host reports its size
            None => Vec3::splat(f32::INFINITY),
        };
        Self { half_extents }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameContext {
    /// Seconds since the previous step.
    pub dt: f32,
    /// `None` until the host knows its window size.
    pub viewport: Option<Viewport>,
    pub attractor: Option<Vec3>,
}

impl FrameContext {
    pub fn new(dt: f32, viewport: Option<Viewport>, attractor: Option<Vec3>) -> Self {
        Self {
            dt,
            viewport,
            attractor,
        }
    }

    pub fn bounds(&self, boundary_z: f32) -> Bounds {
        Bounds::new(self.viewport, boundary_z)
    }
}
