//! Simulation configuration and presets
//!
//! Configuration is static: it is read once when a [`Simulation`] is built
//! and never mutated while it runs. Stored as JSON.
//!
//! [`Simulation`]: crate::sim::Simulation

use std::f32::consts::PI;
use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::{ConfigError, LoadError};

/// Named starting configurations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Preset {
    /// Four hexagons, alternating spin, gap on edge 0, soft screen walls
    #[default]
    Hexagons,
    /// Four pentagons with staggered gaps, escaped balls culled
    Pentagons,
}

impl Preset {
    pub fn as_str(&self) -> &'static str {
        match self {
            Preset::Hexagons => "hexagons",
            Preset::Pentagons => "pentagons",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "hexagons" | "hexagon" | "hex" => Some(Preset::Hexagons),
            "pentagons" | "pentagon" | "pent" => Some(Preset::Pentagons),
            _ => None,
        }
    }
}

/// How newly spawned balls pick their color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ColorMode {
    /// Random bright color, each channel in [40, 255]
    #[default]
    Random,
    /// Walk through [`PALETTE`] in spawn order
    Cycle,
}

/// Palette used by [`ColorMode::Cycle`]
pub const PALETTE: [[u8; 3]; 6] = [
    [255, 99, 71],
    [255, 215, 0],
    [50, 205, 50],
    [30, 144, 255],
    [186, 85, 211],
    [255, 140, 0],
];

/// Axis-aligned soft wall region (fallback only, not the primary container)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min: Vec2,
    pub max: Vec2,
}

impl Bounds {
    /// Square field of `size` with `margin` kept clear on every side
    pub fn square(size: f32, margin: f32) -> Self {
        Self {
            min: Vec2::splat(margin),
            max: Vec2::splat(size - margin),
        }
    }

    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }
}

/// One rotating open polygon
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PolygonConfig {
    /// Circumradius (center to vertex)
    pub radius: f32,
    /// Radians per second, positive is counter-clockwise in math orientation
    pub angular_velocity: f32,
    /// Index of the edge (between vertex k and k+1) that is left open
    pub missing_edge: usize,
    /// 5 for a pentagon, 6 for a hexagon
    pub vertex_count: usize,
    /// Phase at t = 0 (radians)
    #[serde(default)]
    pub initial_angle: f32,
}

impl PolygonConfig {
    pub fn hexagon(radius: f32, angular_velocity: f32) -> Self {
        Self {
            radius,
            angular_velocity,
            missing_edge: 0,
            vertex_count: 6,
            initial_angle: 0.0,
        }
    }

    pub fn pentagon(radius: f32, angular_velocity: f32) -> Self {
        Self {
            vertex_count: 5,
            ..Self::hexagon(radius, angular_velocity)
        }
    }

    pub fn with_missing_edge(mut self, missing_edge: usize) -> Self {
        self.missing_edge = missing_edge;
        self
    }

    pub fn with_initial_angle(mut self, initial_angle: f32) -> Self {
        self.initial_angle = initial_angle;
        self
    }

    /// Check the construction contract for the polygon at `index`
    pub fn validate(&self, index: usize) -> Result<(), ConfigError> {
        if self.vertex_count < 3 {
            return Err(ConfigError::TooFewVertices {
                polygon: index,
                vertex_count: self.vertex_count,
            });
        }
        if self.missing_edge >= self.vertex_count {
            return Err(ConfigError::MissingEdgeOutOfRange {
                polygon: index,
                missing_edge: self.missing_edge,
                vertex_count: self.vertex_count,
            });
        }
        if !(self.radius.is_finite() && self.radius > 0.0) {
            return Err(ConfigError::InvalidPolygonRadius {
                polygon: index,
                radius: self.radius,
            });
        }
        if !(self.angular_velocity.is_finite() && self.initial_angle.is_finite()) {
            return Err(ConfigError::NonFiniteRotation { polygon: index });
        }
        Ok(())
    }
}

/// Complete static configuration of a simulation run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Shared rotation center of every polygon
    pub center: Vec2,
    /// Polygons, innermost first
    pub polygons: Vec<PolygonConfig>,

    // === Physics ===
    /// Downward acceleration (+y is down)
    pub gravity: f32,
    /// Coefficient of restitution for every contact
    pub restitution: f32,
    /// Extra push-out distance after positional correction
    pub position_slop: f32,
    /// Physics sub-steps per frame
    pub substeps: u32,

    // === Balls ===
    pub ball_radius: f32,
    pub ball_mass: f32,
    /// Upper bound on the randomized spawn speed (0 spawns at rest)
    pub spawn_speed: f32,
    /// Spawn origin, defaults to `center`
    pub spawn_point: Option<Vec2>,
    pub color_mode: ColorMode,

    // === Playfield ===
    /// Soft fallback walls
    pub bounds: Option<Bounds>,
    /// Balls farther than this from `center` are removed
    pub cull_radius: Option<f32>,

    /// RNG seed for spawns without their own seed
    pub seed: u64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self::hexagons()
    }
}

impl SimConfig {
    /// Create a configuration from a named preset
    pub fn from_preset(preset: Preset) -> Self {
        match preset {
            Preset::Hexagons => Self::hexagons(),
            Preset::Pentagons => Self::pentagons(),
        }
    }

    /// Four hexagons spinning alternately, balls dropped from rest
    pub fn hexagons() -> Self {
        let radii = [90.0, 170.0, 250.0, 330.0];
        let omegas = [-0.8, 0.6, -0.5, 0.4];
        let phases = [0.0, PI / 12.0, PI / 6.0, PI / 4.0];

        let polygons = radii
            .iter()
            .zip(omegas)
            .zip(phases)
            .map(|((&r, w), phase)| PolygonConfig::hexagon(r, w).with_initial_angle(phase))
            .collect();

        Self {
            center: Vec2::splat(FIELD_SIZE / 2.0),
            polygons,
            gravity: GRAVITY,
            restitution: RESTITUTION,
            position_slop: POSITION_SLOP,
            substeps: DEFAULT_SUBSTEPS,
            ball_radius: BALL_RADIUS,
            ball_mass: BALL_MASS,
            spawn_speed: 0.0,
            spawn_point: None,
            color_mode: ColorMode::Random,
            bounds: Some(Bounds::square(FIELD_SIZE, FIELD_MARGIN)),
            cull_radius: None,
            seed: 0,
        }
    }

    /// Four pentagons with staggered gaps; balls get a random kick and
    /// are culled once they escape the outermost pentagon's neighborhood
    pub fn pentagons() -> Self {
        let radii = [100.0, 160.0, 220.0, 280.0];
        let omegas = [1.2, -0.9, 0.6, -0.48];

        let polygons = radii
            .iter()
            .zip(omegas)
            .enumerate()
            .map(|(i, (&r, w))| PolygonConfig::pentagon(r, w).with_missing_edge(i))
            .collect();

        Self {
            polygons,
            spawn_speed: 180.0,
            color_mode: ColorMode::Cycle,
            bounds: None,
            cull_radius: Some(FIELD_SIZE * 0.75),
            ..Self::hexagons()
        }
    }

    /// Where new balls appear
    pub fn spawn_origin(&self) -> Vec2 {
        self.spawn_point.unwrap_or(self.center)
    }

    /// Check the whole configuration, failing on the first violation
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.polygons.is_empty() {
            return Err(ConfigError::NoPolygons);
        }
        for (i, polygon) in self.polygons.iter().enumerate() {
            polygon.validate(i)?;
        }
        if !(self.ball_radius.is_finite() && self.ball_radius > 0.0) {
            return Err(ConfigError::InvalidBallRadius(self.ball_radius));
        }
        if !(self.ball_mass.is_finite() && self.ball_mass > 0.0) {
            return Err(ConfigError::InvalidBallMass(self.ball_mass));
        }
        if !(0.0..=1.0).contains(&self.restitution) {
            return Err(ConfigError::InvalidRestitution(self.restitution));
        }
        if self.substeps == 0 {
            return Err(ConfigError::ZeroSubsteps);
        }
        if !self.gravity.is_finite() {
            return Err(ConfigError::InvalidParameter {
                name: "gravity",
                value: self.gravity,
            });
        }
        non_negative("position_slop", self.position_slop)?;
        non_negative("spawn_speed", self.spawn_speed)?;
        if let Some(cull_radius) = self.cull_radius {
            non_negative("cull_radius", cull_radius)?;
        }
        if let Some(bounds) = self.bounds {
            if !(bounds.min.x < bounds.max.x && bounds.min.y < bounds.max.y) {
                return Err(ConfigError::InvalidBounds);
            }
        }
        Ok(())
    }

    /// Parse and validate a JSON configuration
    pub fn from_json_str(json: &str) -> Result<Self, LoadError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json_string(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Load a JSON configuration file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let json = std::fs::read_to_string(path.as_ref())?;
        let config = Self::from_json_str(&json)?;
        log::info!(
            "Loaded config from {} ({} polygons)",
            path.as_ref().display(),
            config.polygons.len()
        );
        Ok(config)
    }
}

fn non_negative(name: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidParameter { name, value })
    }
}
