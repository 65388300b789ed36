/*
 * Application Module
 *
 * This module defines the nannou model for the flock viewer and its update
 * callback. The viewer is the host the simulation runs inside: every frame it
 * derives the visible extent of the world from the window, turns the pointer
 * into an attractor, decides whether the animation counts as visible and
 * hands all of that to the Simulator.
 */

use std::sync::OnceLock;

use nannou::prelude::*;
use nannou_egui::Egui;

use crate::camera::Camera;
use crate::debug::DebugInfo;
use crate::flock::Flock;
use crate::input;
use crate::params::{FlockParams, Preset};
use crate::renderer;
use crate::simulator::Simulator;
use crate::ui;

const FALLBACK_WINDOW_SIZE: (f32, f32) = (1280.0, 800.0);

fn fallback_window_size() -> glam::Vec2 {
    glam::Vec2::new(FALLBACK_WINDOW_SIZE.0, FALLBACK_WINDOW_SIZE.1)
}

// Settings resolved on the command line before the nannou app starts
#[derive(Debug, Clone, Default)]
pub struct LaunchOptions {
    pub params: FlockParams,
    pub preset: Preset,
    pub seed: u64,
}

static LAUNCH: OnceLock<LaunchOptions> = OnceLock::new();

pub fn run(options: LaunchOptions) {
    if LAUNCH.set(options).is_err() {
        tracing::warn!("viewer already launched, ignoring new launch options");
    }
    nannou::app(model).update(update).run();
}

// Main model for the application
pub struct Model {
    pub simulator: Simulator,
    pub params: FlockParams,
    pub preset: Preset,
    pub seed: u64,
    pub egui: Egui,
    pub camera: Camera,
    pub debug_info: DebugInfo,
    pub show_debug: bool,
    pub pause_simulation: bool,
    pub focused: bool,
    // Window-space pointer, None while outside the window
    pub pointer: Option<glam::Vec2>,
}

impl Model {
    // Spawn a new flock with the current parameters and the next seed
    pub fn reset_flock(&mut self, window_size: glam::Vec2) {
        self.seed = self.seed.wrapping_add(1);
        let viewport = self.camera.viewport_or(window_size, fallback_window_size());
        let flock = Flock::with_seed(self.params.clone(), viewport, self.seed);
        self.simulator.replace_flock(flock);
    }

    // Pointer mapped onto the z = 0 plane, unless it is outside the window or over the panel
    pub fn attractor(&self, window_size: glam::Vec2) -> Option<glam::Vec3> {
        let pointer = self.pointer?;
        if self.egui.ctx().is_pointer_over_area() {
            return None;
        }
        self.camera.screen_to_world(pointer, window_size)
    }
}

pub fn window_size(app: &App) -> glam::Vec2 {
    let wh = app.window_rect().wh();
    glam::Vec2::new(wh.x, wh.y)
}

// Initialize the model
pub fn model(app: &App) -> Model {
    let options = LAUNCH.get().cloned().unwrap_or_default();

    // Size the window at 80% of the primary monitor
    let (window_width, window_height) = match app.primary_monitor() {
        Some(monitor) => {
            let size = monitor.size();
            (size.width as f32 * 0.8, size.height as f32 * 0.8)
        }
        None => {
            tracing::warn!("no primary monitor reported, using fallback window size");
            FALLBACK_WINDOW_SIZE
        }
    };

    let window_id = app
        .new_window()
        .title("Flock")
        .size(window_width as u32, window_height as u32)
        .view(renderer::view)
        .mouse_moved(input::mouse_moved)
        .mouse_exited(input::mouse_exited)
        .focused(input::focused)
        .unfocused(input::unfocused)
        .key_pressed(input::key_pressed)
        .raw_event(input::raw_window_event)
        .build()
        .expect("failed to build the viewer window");

    let window = app.window(window_id).expect("viewer window vanished after creation");
    let egui = Egui::from_window(&window);

    let camera = Camera::default();
    let viewport = camera.viewport_or(glam::Vec2::new(window_width, window_height), fallback_window_size());

    tracing::info!(
        boids = options.params.boid_count,
        seed = options.seed,
        preset = options.preset.label(),
        "starting flock viewer"
    );
    let flock = Flock::with_seed(options.params.clone(), viewport, options.seed);

    Model {
        simulator: Simulator::new(flock),
        params: options.params,
        preset: options.preset,
        seed: options.seed,
        egui,
        camera,
        debug_info: DebugInfo::default(),
        show_debug: false,
        pause_simulation: false,
        focused: true,
        pointer: None,
    }
}

// Update the model
pub fn update(app: &App, model: &mut Model, update: Update) {
    model.debug_info.fps = app.fps();
    model.debug_info.frame_time = update.since_last;
    model.egui.set_elapsed_time(update.since_start);

    let window_size = window_size(app);

    let actions = ui::update_ui(
        &mut model.egui,
        &mut model.params,
        &mut model.preset,
        &mut model.show_debug,
        &mut model.pause_simulation,
        &model.debug_info,
        model.simulator.flock().len(),
    );
    if actions.reset {
        model.reset_flock(window_size);
    } else if actions.params_changed {
        model.simulator.flock_mut().set_params(model.params.clone());
    }

    // Read fresh every frame so resizes move the containment box
    let viewport = model.camera.viewport(window_size);
    let attractor = model.attractor(window_size);
    let visible = model.focused && !model.pause_simulation && viewport.is_some();

    let dt = update.since_last.as_secs_f32();
    let advance = model.simulator.advance(dt, viewport, attractor, visible);

    model.debug_info.record(advance, model.simulator.flock());
    model.debug_info.attractor_active = attractor.is_some();
}
