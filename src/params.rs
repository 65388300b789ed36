/*
 * Simulation Parameters Module
 *
 * This module defines the FlockParams struct that contains every tunable
 * constant of the simulation: rule radii and forces, speed caps, attraction
 * ramp, containment, orientation smoothing and the initial random draw.
 * The different tunings the flock has been run with are kept as presets,
 * and any preset can be overridden field by field from a TOML file.
 */

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// What the step function does with a boid whose velocity is exactly zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum StationaryPolicy {
    /// Steer it like any other boid; only the orientation update waits for motion.
    #[default]
    Steer,
    /// Freeze it for the frame: no forces, no integration, no turning.
    Skip,
}

/// Named starting points for the parameter set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Preset {
    /// Time-scaled motion, gentle forces, smoothed turning.
    #[default]
    Smooth,
    /// Stronger rule forces, lower speed cap, instant turning.
    Classic,
}

impl Preset {
    pub const ALL: [Preset; 2] = [Preset::Smooth, Preset::Classic];

    pub fn label(self) -> &'static str {
        match self {
            Preset::Smooth => "Smooth",
            Preset::Classic => "Classic",
        }
    }

    pub fn params(self) -> FlockParams {
        match self {
            Preset::Smooth => FlockParams::default(),
            Preset::Classic => FlockParams {
                max_speed: 0.03,
                attracted_max_speed: 0.1,
                separation_force: 0.07,
                alignment_force: 0.05,
                cohesion_force: 0.03,
                attraction_force: 0.08,
                attraction_min_distance: 3.0,
                rotation_smoothing: 1.0,
                position_scale: 60.0,
                ..FlockParams::default()
            },
        }
    }
}

// Parameters for the simulation that can be adjusted via config file or UI
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FlockParams {
    pub boid_count: usize,

    // Speed caps
    pub max_speed: f32,
    pub attracted_max_speed: f32,

    // Flocking rules
    pub separation_radius: f32,
    pub alignment_radius: f32,
    pub cohesion_radius: f32,
    pub separation_force: f32,
    pub alignment_force: f32,
    pub cohesion_force: f32,

    // Containment
    pub boundary_force: f32,
    pub boundary_z: f32,

    // Attraction ramp
    pub attraction_force: f32,
    pub attraction_min_distance: f32,
    pub attraction_max_distance: f32,

    // Integration and orientation
    pub position_scale: f32,
    pub rotation_smoothing: f32,
    pub orientation_epsilon: f32,
    pub stationary: StationaryPolicy,

    // Initial random draw
    pub initial_speed: f32,
    pub spawn_depth: f32,
}

impl Default for FlockParams {
    fn default() -> Self {
        Self {
            boid_count: 100,
            max_speed: 0.05,
            attracted_max_speed: 0.15,
            separation_radius: 1.0,
            alignment_radius: 2.0,
            cohesion_radius: 1.5,
            separation_force: 0.035,
            alignment_force: 0.025,
            cohesion_force: 0.015,
            boundary_force: 0.1,
            boundary_z: 5.0,
            attraction_force: 0.1,
            attraction_min_distance: 1.0,
            attraction_max_distance: 15.0,
            position_scale: 100.0,
            rotation_smoothing: 0.1,
            orientation_epsilon: 0.001,
            stationary: StationaryPolicy::Steer,
            initial_speed: 0.1,
            spawn_depth: 5.0,
        }
    }
}

impl FlockParams {
    /// Parse a TOML document. An optional `preset` key picks the base values,
    /// every other key overrides the matching field.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let mut table: toml::Table = source.parse()?;

        let preset = match table.remove("preset") {
            Some(value) => value.try_into::<Preset>()?,
            None => Preset::default(),
        };

        let mut merged = match toml::Value::try_from(preset.params()) {
            Ok(toml::Value::Table(base)) => base,
            Ok(_) | Err(_) => {
                return Err(ConfigError::invalid("preset", "preset values are not a table"));
            }
        };
        merged.extend(table);

        let params: FlockParams = toml::Value::Table(merged).try_into()?;
        params.validate()?;
        Ok(params)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let source = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let params = Self::from_toml_str(&source)?;
        tracing::debug!(?path, boids = params.boid_count, "loaded flock config");
        Ok(params)
    }

    /// Reject values the step function cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.boid_count == 0 {
            return Err(ConfigError::invalid("boid_count", "must be at least 1"));
        }

        let non_negative = [
            ("max_speed", self.max_speed),
            ("attracted_max_speed", self.attracted_max_speed),
            ("separation_radius", self.separation_radius),
            ("alignment_radius", self.alignment_radius),
            ("cohesion_radius", self.cohesion_radius),
            ("separation_force", self.separation_force),
            ("alignment_force", self.alignment_force),
            ("cohesion_force", self.cohesion_force),
            ("boundary_force", self.boundary_force),
            ("boundary_z", self.boundary_z),
            ("attraction_force", self.attraction_force),
            ("attraction_min_distance", self.attraction_min_distance),
            ("attraction_max_distance", self.attraction_max_distance),
            ("position_scale", self.position_scale),
            ("orientation_epsilon", self.orientation_epsilon),
            ("initial_speed", self.initial_speed),
            ("spawn_depth", self.spawn_depth),
        ];
        for (field, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::invalid(
                    field,
                    format!("expected a finite non-negative number, got {value}"),
                ));
            }
        }

        if self.attraction_max_distance <= self.attraction_min_distance {
            return Err(ConfigError::invalid(
                "attraction_max_distance",
                format!(
                    "must be greater than attraction_min_distance ({})",
                    self.attraction_min_distance
                ),
            ));
        }

        if !(self.rotation_smoothing > 0.0 && self.rotation_smoothing <= 1.0) {
            return Err(ConfigError::invalid(
                "rotation_smoothing",
                format!("must be in (0, 1], got {}", self.rotation_smoothing),
            ));
        }

        Ok(())
    }

    // Largest rule radius, used by the debug overlay
    pub fn max_rule_radius(&self) -> f32 {
        self.separation_radius
            .max(self.alignment_radius)
            .max(self.cohesion_radius)
    }

    // Get parameter ranges for UI sliders
    pub fn get_boid_count_range() -> std::ops::RangeInclusive<usize> {
        1..=1000
    }

    pub fn get_speed_range() -> std::ops::RangeInclusive<f32> {
        0.005..=0.5
    }

    pub fn get_force_range() -> std::ops::RangeInclusive<f32> {
        0.0..=0.3
    }

    pub fn get_radius_range() -> std::ops::RangeInclusive<f32> {
        0.1..=5.0
    }

    pub fn get_distance_range() -> std::ops::RangeInclusive<f32> {
        0.0..=30.0
    }

    pub fn get_depth_range() -> std::ops::RangeInclusive<f32> {
        0.5..=15.0
    }

    pub fn get_smoothing_range() -> std::ops::RangeInclusive<f32> {
        0.01..=1.0
    }
}
