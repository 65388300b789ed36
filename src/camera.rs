/*
 * Camera Module
 *
 * This module defines a fixed perspective camera on the +z axis looking back
 * at the origin. It provides the transformations the viewer needs between
 * world space and window space: the visible extent of the z = 0 plane (which
 * becomes the flock's containment box), projecting boids onto the window and
 * mapping the pointer back onto the z = 0 plane.
 *
 * Window coordinates follow nannou: origin at the centre, +y up, in pixels.
 */

use glam::{Vec2, Vec3};

use crate::frame::Viewport;

pub const DEFAULT_DISTANCE: f32 = 20.0;
pub const DEFAULT_FOV_Y_DEGREES: f32 = 40.0;
const NEAR_PLANE: f32 = 0.1;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    /// Distance from the origin along +z.
    pub distance: f32,
    /// Vertical field of view in radians.
    pub fov_y: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(DEFAULT_DISTANCE, DEFAULT_FOV_Y_DEGREES.to_radians())
    }
}

impl Camera {
    pub fn new(distance: f32, fov_y: f32) -> Self {
        Self { distance, fov_y }
    }

    // Half of the visible height at `depth` units in front of the camera
    fn half_height_at(&self, depth: f32) -> f32 {
        depth * (self.fov_y / 2.0).tan()
    }

    fn extent_with_aspect(&self, aspect: f32) -> Viewport {
        let height = 2.0 * self.half_height_at(self.distance);
        Viewport::new(height * aspect, height)
    }

    /// Visible extent of the z = 0 plane for a window of `window_size` pixels.
    /// `None` while the window has no area.
    pub fn viewport(&self, window_size: Vec2) -> Option<Viewport> {
        if window_size.x <= 0.0 || window_size.y <= 0.0 {
            return None;
        }
        Some(self.extent_with_aspect(window_size.x / window_size.y))
    }

    /// Like `viewport`, but a window with no area is measured as if it were
    /// `fallback` pixels instead. Always in world units.
    pub fn viewport_or(&self, window_size: Vec2, fallback: Vec2) -> Viewport {
        self.viewport(window_size).unwrap_or_else(|| {
            let aspect = if fallback.x > 0.0 && fallback.y > 0.0 {
                fallback.x / fallback.y
            } else {
                1.0
            };
            self.extent_with_aspect(aspect)
        })
    }

    // Pixels per world unit at `depth` units in front of the camera
    fn pixels_per_unit(&self, depth: f32, window_size: Vec2) -> f32 {
        (window_size.y / 2.0) / self.half_height_at(depth)
    }

    /// Perspective projection of a world point into window space.
    /// `None` when the point is behind the near plane.
    pub fn project(&self, point: Vec3, window_size: Vec2) -> Option<Vec2> {
        let depth = self.distance - point.z;
        if depth < NEAR_PLANE || window_size.y <= 0.0 {
            return None;
        }
        Some(Vec2::new(point.x, point.y) * self.pixels_per_unit(depth, window_size))
    }

    /// How many pixels one world unit covers at the depth of `point`.
    pub fn scale_at(&self, point: Vec3, window_size: Vec2) -> f32 {
        let depth = (self.distance - point.z).max(NEAR_PLANE);
        self.pixels_per_unit(depth, window_size)
    }

    /// Map a window-space position onto the z = 0 plane.
    pub fn screen_to_world(&self, screen: Vec2, window_size: Vec2) -> Option<Vec3> {
        if window_size.y <= 0.0 {
            return None;
        }
        let world = screen / self.pixels_per_unit(self.distance, window_size);
        Some(world.extend(0.0))
    }
}
