/*
 * UI Module
 *
 * This module contains the control panel (nannou_egui) for tuning the flock
 * while it runs, and the text block of the debug overlay.
 */

use nannou_egui::{egui, Egui};

use crate::debug::DebugInfo;
use crate::params::{FlockParams, Preset, StationaryPolicy};

// What the panel asked for this frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UiActions {
    pub reset: bool,
    pub params_changed: bool,
}

pub fn update_ui(
    egui: &mut Egui,
    params: &mut FlockParams,
    preset: &mut Preset,
    show_debug: &mut bool,
    pause_simulation: &mut bool,
    debug_info: &DebugInfo,
    live_boids: usize,
) -> UiActions {
    let before = params.clone();
    let previous_preset = *preset;
    let mut reset = false;

    let ctx = egui.begin_frame();

    egui::Window::new("Flock Controls")
        .default_pos([10.0, 10.0])
        .show(&ctx, |ui| {
            egui::ComboBox::from_label("Preset")
                .selected_text(preset.label())
                .show_ui(ui, |ui| {
                    for option in Preset::ALL {
                        ui.selectable_value(preset, option, option.label());
                    }
                });

            ui.collapsing("Population", |ui| {
                ui.add(
                    egui::Slider::new(&mut params.boid_count, FlockParams::get_boid_count_range())
                        .text("Boids (applied on reset)"),
                );
                if ui.button("Reset Flock").clicked() {
                    reset = true;
                }
            });

            ui.collapsing("Speed", |ui| {
                ui.add(egui::Slider::new(&mut params.max_speed, FlockParams::get_speed_range()).text("Max Speed"));
                ui.add(
                    egui::Slider::new(&mut params.attracted_max_speed, FlockParams::get_speed_range())
                        .text("Attracted Max Speed"),
                );
            });

            ui.collapsing("Flocking Behavior", |ui| {
                ui.add(egui::Slider::new(&mut params.separation_radius, FlockParams::get_radius_range()).text("Separation Radius"));
                ui.add(egui::Slider::new(&mut params.alignment_radius, FlockParams::get_radius_range()).text("Alignment Radius"));
                ui.add(egui::Slider::new(&mut params.cohesion_radius, FlockParams::get_radius_range()).text("Cohesion Radius"));
                ui.add(egui::Slider::new(&mut params.separation_force, FlockParams::get_force_range()).text("Separation Force"));
                ui.add(egui::Slider::new(&mut params.alignment_force, FlockParams::get_force_range()).text("Alignment Force"));
                ui.add(egui::Slider::new(&mut params.cohesion_force, FlockParams::get_force_range()).text("Cohesion Force"));
            });

            ui.collapsing("Attraction & Bounds", |ui| {
                ui.add(egui::Slider::new(&mut params.attraction_force, FlockParams::get_force_range()).text("Attraction Force"));
                ui.add(
                    egui::Slider::new(&mut params.attraction_min_distance, FlockParams::get_distance_range())
                        .text("Attraction Min Distance"),
                );
                ui.add(
                    egui::Slider::new(&mut params.attraction_max_distance, FlockParams::get_distance_range())
                        .text("Attraction Max Distance"),
                );
                ui.add(egui::Slider::new(&mut params.boundary_force, FlockParams::get_force_range()).text("Boundary Force"));
                ui.add(egui::Slider::new(&mut params.boundary_z, FlockParams::get_depth_range()).text("Boundary Depth"));
            });

            ui.collapsing("Motion", |ui| {
                ui.add(
                    egui::Slider::new(&mut params.rotation_smoothing, FlockParams::get_smoothing_range())
                        .text("Rotation Smoothing"),
                );
                ui.horizontal(|ui| {
                    ui.label("Stationary boids:");
                    ui.radio_value(&mut params.stationary, StationaryPolicy::Steer, "Steer");
                    ui.radio_value(&mut params.stationary, StationaryPolicy::Skip, "Skip");
                });
            });

            ui.separator();
            ui.label(format!("FPS: {:.1}", debug_info.fps));
            ui.label(format!("Frame time: {:.2} ms", debug_info.frame_time.as_secs_f64() * 1000.0));
            ui.label(format!("Boids: {}", live_boids));

            ui.checkbox(show_debug, "Show Debug Info");
            ui.checkbox(pause_simulation, "Pause Simulation");
        });

    if *preset != previous_preset {
        *params = FlockParams {
            boid_count: params.boid_count,
            ..preset.params()
        };
    }

    // Sliders can cross each other; keep the attraction ramp well formed
    if params.attraction_max_distance <= params.attraction_min_distance {
        params.attraction_max_distance = params.attraction_min_distance + 0.1;
    }

    UiActions {
        reset,
        params_changed: *params != before,
    }
}

// Draw debug information on the screen
pub fn draw_debug_info(draw: &nannou::Draw, debug_info: &DebugInfo, window_rect: nannou::geom::Rect, boids_len: usize) {
    // Background panel in the top-right corner, clear of the controls
    let margin = 20.0;
    let line_height = 20.0;
    let panel_width = 240.0;

    let debug_texts = [
        format!("FPS: {:.1}", debug_info.fps),
        format!("Frame time: {:.2} ms", debug_info.frame_time.as_secs_f64() * 1000.0),
        format!("Boids: {}", boids_len),
        format!("Steps: {}", debug_info.steps),
        format!("Paused frames: {}", debug_info.paused_frames),
        format!("Dropped resume frames: {}", debug_info.dropped_resume_frames),
        format!("Mean speed: {:.4}", debug_info.mean_speed),
        format!("Max speed: {:.4}", debug_info.max_speed),
        format!("Attractor: {}", if debug_info.attractor_active { "on" } else { "off" }),
    ];

    let panel_height = line_height * debug_texts.len() as f32 + margin;
    let panel_x = window_rect.right() - panel_width / 2.0;
    let panel_y = window_rect.top() - panel_height / 2.0;

    draw.rect()
        .x_y(panel_x, panel_y)
        .w_h(panel_width, panel_height)
        .color(nannou::color::rgba(0.0, 0.0, 0.0, 0.7));

    let text_x = panel_x;
    let text_y = window_rect.top() - margin;

    for (i, text) in debug_texts.iter().enumerate() {
        let y = text_y - (i as f32 * line_height);
        draw.text(text)
            .x_y(text_x, y)
            .w(panel_width - margin)
            .left_justify()
            .color(nannou::color::WHITE)
            .font_size(14);
    }
}
