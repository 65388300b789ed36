/*
 * Renderer Module
 *
 * This module draws the flock viewer. Each boid is drawn as the silhouette of
 * a cone pointing along its orientation: two crossed triangles from the tip to
 * the rim of the base, projected through the perspective camera. Boids are
 * drawn far to near so closer ones overlap.
 *
 * The debug overlay adds the containment box, the rule radii and force
 * arrows of the first boid, and the metrics panel.
 */

use glam::{Quat, Vec3};
use nannou::prelude::*;

use crate::app::{window_size, Model};
use crate::boid::BoidTransform;
use crate::camera::Camera;
use crate::{ui, BOID_LENGTH, BOID_RADIUS};

// Scale applied to force vectors in the debug overlay so they are visible
const FORCE_ARROW_SCALE: f32 = 20.0;

fn to_point(v: glam::Vec2) -> Point2 {
    pt2(v.x, v.y)
}

// Render the model
pub fn view(app: &App, model: &Model, frame: Frame) {
    let draw = app.draw();
    draw.background().color(BLACK);

    let window_size = window_size(app);
    let flock = model.simulator.flock();

    // Far to near
    let mut transforms: Vec<BoidTransform> = flock.transforms().collect();
    transforms.sort_by(|a, b| a.position.z.total_cmp(&b.position.z));

    for transform in &transforms {
        draw_boid(&draw, &model.camera, window_size, transform);
    }

    if model.show_debug {
        draw_bounds(&draw, model, window_size);
        draw_first_boid_forces(&draw, model, window_size);
        ui::draw_debug_info(&draw, &model.debug_info, app.window_rect(), flock.len());
    }

    if let Err(err) = draw.to_frame(app, &frame) {
        tracing::error!(?err, "failed to draw flock frame");
    }
    if let Err(err) = model.egui.draw_to_frame(&frame) {
        tracing::error!(?err, "failed to draw control panel");
    }
}

// Project the cone's tip and four rim points; skip boids behind the camera
fn cone_outline(camera: &Camera, window_size: glam::Vec2, position: Vec3, orientation: Quat) -> Option<[Point2; 5]> {
    let half_length = BOID_LENGTH / 2.0;
    let tip = position + orientation * Vec3::new(0.0, 0.0, half_length);
    let base = position - orientation * Vec3::new(0.0, 0.0, half_length);
    let side_x = orientation * Vec3::new(BOID_RADIUS, 0.0, 0.0);
    let side_y = orientation * Vec3::new(0.0, BOID_RADIUS, 0.0);

    let project = |p: Vec3| camera.project(p, window_size).map(to_point);
    Some([
        project(tip)?,
        project(base + side_x)?,
        project(base - side_x)?,
        project(base + side_y)?,
        project(base - side_y)?,
    ])
}

fn draw_boid(draw: &Draw, camera: &Camera, window_size: glam::Vec2, transform: &BoidTransform) {
    let Some([tip, right, left, up, down]) =
        cone_outline(camera, window_size, transform.position, transform.orientation)
    else {
        return;
    };

    // Boids nearer the camera glow a little brighter
    let depth_tint = ((transform.position.z + 10.0) / 20.0).clamp(0.3, 1.0);
    draw.tri()
        .points(tip, right, left)
        .color(rgba(0.133, 0.827, 0.933, depth_tint));
    draw.tri()
        .points(tip, up, down)
        .color(rgba(0.09, 0.6, 0.7, depth_tint));
}

// Red edges of the containment box
fn draw_bounds(draw: &Draw, model: &Model, window_size: glam::Vec2) {
    let Some(viewport) = model.camera.viewport(window_size) else {
        return;
    };
    let half = Vec3::new(
        viewport.half_width(),
        viewport.half_height(),
        model.simulator.flock().params().boundary_z,
    );

    let corner = |sx: f32, sy: f32, sz: f32| half * Vec3::new(sx, sy, sz);
    let signs = [-1.0, 1.0];
    let mut edges = Vec::with_capacity(12);
    for &a in &signs {
        for &b in &signs {
            edges.push((corner(-1.0, a, b), corner(1.0, a, b)));
            edges.push((corner(a, -1.0, b), corner(a, 1.0, b)));
            edges.push((corner(a, b, -1.0), corner(a, b, 1.0)));
        }
    }

    for (start, end) in edges {
        let (Some(start), Some(end)) = (
            model.camera.project(start, window_size),
            model.camera.project(end, window_size),
        ) else {
            continue;
        };
        draw.line()
            .start(to_point(start))
            .end(to_point(end))
            .weight(1.0)
            .color(rgba(1.0, 0.0, 0.0, 0.6));
    }
}

// Rule radii and steering arrows for the first boid
fn draw_first_boid_forces(draw: &Draw, model: &Model, window_size: glam::Vec2) {
    let flock = model.simulator.flock();
    let (Some(boid), Some(forces)) = (flock.boids().first(), flock.forces().first()) else {
        return;
    };
    let Some(origin) = model.camera.project(boid.position, window_size) else {
        return;
    };
    let params = flock.params();
    let scale = model.camera.scale_at(boid.position, window_size);

    for (radius, color) in [
        (params.separation_radius, RED),
        (params.alignment_radius, GREEN),
        (params.cohesion_radius, BLUE),
    ] {
        draw.ellipse()
            .xy(to_point(origin))
            .radius(radius * scale)
            .no_fill()
            .stroke(color)
            .stroke_weight(1.0);
    }

    for (force, color) in [
        (forces.separation, RED),
        (forces.alignment, GREEN),
        (forces.cohesion, BLUE),
        (forces.attraction, YELLOW),
        (forces.boundary, MAGENTA),
    ] {
        if force == Vec3::ZERO {
            continue;
        }
        let tip = boid.position + force * FORCE_ARROW_SCALE;
        if let Some(end) = model.camera.project(tip, window_size) {
            draw.arrow()
                .start(to_point(origin))
                .end(to_point(end))
                .weight(2.0)
                .color(color);
        }
    }
}
