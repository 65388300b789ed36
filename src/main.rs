/*
 * Flock
 *
 * A 3D flock of boids following three local rules:
 * 1. Separation: Avoid crowding neighbors
 * 2. Alignment: Steer towards the average heading of neighbors
 * 3. Cohesion: Steer towards the average position of neighbors
 * plus a pull towards the pointer and a push back inside the visible box.
 *
 * Without arguments it opens the viewer window. `--headless <FRAMES>` steps
 * the flock without a window and logs a summary.
 */

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use glam::{Vec2, Vec3};
use tracing_subscriber::EnvFilter;

use flock::app::{self, LaunchOptions};
use flock::{Camera, Flock, FlockParams, Preset, Simulator};

const HEADLESS_DT: f32 = 1.0 / 60.0;
const HEADLESS_WINDOW: (f32, f32) = (1280.0, 800.0);

#[derive(Parser)]
#[command(name = "flock", version, about = "3D boid flocking simulation")]
struct Cli {
    /// TOML file with flock parameters
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Parameter preset to start from
    #[arg(short, long, value_enum, conflicts_with = "config")]
    preset: Option<Preset>,

    /// RNG seed for the initial flock (random when omitted)
    #[arg(short, long)]
    seed: Option<u64>,

    /// Override the number of boids
    #[arg(short, long)]
    boids: Option<usize>,

    /// Step this many frames without a window and log a summary
    #[arg(long, value_name = "FRAMES")]
    headless: Option<u64>,

    /// Fixed attractor for headless runs, as x,y,z
    #[arg(long, value_parser = parse_vec3, requires = "headless")]
    attractor: Option<Vec3>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn parse_vec3(value: &str) -> Result<Vec3, String> {
    let parts = value
        .split(',')
        .map(|part| part.trim().parse::<f32>().map_err(|err| format!("{part:?}: {err}")))
        .collect::<Result<Vec<_>, _>>()?;
    match parts.as_slice() {
        [x, y, z] => Ok(Vec3::new(*x, *y, *z)),
        _ => Err(format!("expected three comma separated numbers, got {}", parts.len())),
    }
}

fn resolve_params(cli: &Cli) -> anyhow::Result<(FlockParams, Preset)> {
    let preset = cli.preset.unwrap_or_default();
    let mut params = match &cli.config {
        Some(path) => FlockParams::load(path).with_context(|| format!("loading {}", path.display()))?,
        None => preset.params(),
    };
    if let Some(boids) = cli.boids {
        params.boid_count = boids;
    }
    params.validate().context("invalid flock parameters")?;
    Ok((params, preset))
}

fn run_headless(params: FlockParams, seed: u64, frames: u64, attractor: Option<Vec3>) -> anyhow::Result<()> {
    let camera = Camera::default();
    let viewport = camera
        .viewport(Vec2::new(HEADLESS_WINDOW.0, HEADLESS_WINDOW.1))
        .context("headless window has no area")?;

    let mut simulator = Simulator::new(Flock::with_seed(params, viewport, seed));
    for _ in 0..frames {
        simulator.advance(HEADLESS_DT, Some(viewport), attractor, true);
    }

    let flock = simulator.flock();
    let mut mean_speed = 0.0;
    let mut worst_cap_ratio = 0.0f32;
    for (boid, forces) in flock.boids().iter().zip(flock.forces()) {
        mean_speed += boid.speed();
        if forces.speed_cap > 0.0 {
            worst_cap_ratio = worst_cap_ratio.max(boid.speed() / forces.speed_cap);
        }
    }
    mean_speed /= flock.len().max(1) as f32;
    let centroid = flock.centroid();

    tracing::info!(
        steps = flock.steps(),
        boids = flock.len(),
        seed,
        mean_speed,
        worst_cap_ratio,
        centroid = ?centroid,
        "headless run finished"
    );
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)))
        .init();

    let (params, preset) = resolve_params(&cli)?;
    let seed = cli.seed.unwrap_or_else(rand::random);
    tracing::debug!(seed, boids = params.boid_count, "resolved flock parameters");

    match cli.headless {
        Some(frames) => run_headless(params, seed, frames, cli.attractor),
        None => {
            app::run(LaunchOptions { params, preset, seed });
            Ok(())
        }
    }
}
