/*
 * Input Module
 *
 * This module handles window events for the flock viewer.
 *
 * Features:
 * - Pointer tracking for the attractor (cleared when the pointer leaves)
 * - Window focus as the visibility signal
 * - Keyboard shortcuts: Space pauses, D toggles debug, R respawns the flock
 * - Forwarding raw events to egui
 */

use nannou::prelude::*;

use crate::app::{window_size, Model};

// Mouse moved event handler
pub fn mouse_moved(_app: &App, model: &mut Model, pos: Point2) {
    model.pointer = Some(glam::Vec2::new(pos.x, pos.y));
}

// Mouse left the window: no attractor until it comes back
pub fn mouse_exited(_app: &App, model: &mut Model) {
    model.pointer = None;
}

pub fn focused(_app: &App, model: &mut Model) {
    tracing::debug!("window focused");
    model.focused = true;
}

pub fn unfocused(_app: &App, model: &mut Model) {
    tracing::debug!("window lost focus");
    model.focused = false;
}

pub fn key_pressed(app: &App, model: &mut Model, key: Key) {
    if model.egui.ctx().wants_keyboard_input() {
        return;
    }
    match key {
        Key::Space => model.pause_simulation = !model.pause_simulation,
        Key::D => model.show_debug = !model.show_debug,
        Key::R => model.reset_flock(window_size(app)),
        _ => {}
    }
}

// Handle raw window events for egui
pub fn raw_window_event(_app: &App, model: &mut Model, event: &nannou::winit::event::WindowEvent) {
    model.egui.handle_raw_event(event);
}
