/*
 * Flock - Module Definitions
 *
 * The simulation core (boid, physics, flock, simulator, params, frame) has no
 * knowledge of the window; the viewer modules (app, input, renderer, ui) host
 * it inside a nannou window.
 */

// Re-export key components for easier access
pub use boid::{Boid, BoidTransform};
pub use camera::Camera;
pub use debug::DebugInfo;
pub use error::ConfigError;
pub use flock::Flock;
pub use frame::{Bounds, FrameContext, Viewport};
pub use params::{FlockParams, Preset, StationaryPolicy};
pub use physics::SteeringForces;
pub use simulator::{Advance, Simulator};

// Simulation core
pub mod boid;
pub mod error;
pub mod flock;
pub mod frame;
pub mod params;
pub mod physics;
pub mod simulator;

// Viewer
pub mod app;
pub mod camera;
pub mod debug;
pub mod input;
pub mod renderer;
pub mod ui;

// Boid marker dimensions in world units
pub const BOID_LENGTH: f32 = 0.4;
pub const BOID_RADIUS: f32 = 0.15;
