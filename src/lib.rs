//! Polyspin - balls bouncing inside concentric rotating open polygons
//!
//! Core modules:
//! - `sim`: Fixed-step simulation (geometry, collisions, integration)
//! - `renderer`: Stateless tessellation of render snapshots
//! - `config`: Static simulation configuration and presets
//! - `error`: Configuration and loading errors

pub mod config;
pub mod error;
pub mod renderer;
pub mod sim;

pub use config::{Bounds, ColorMode, PolygonConfig, SimConfig};
pub use error::{ConfigError, LoadError};

use glam::Vec2;

/// Simulation defaults
pub mod consts {
    /// Frame deltas above this are clamped (window drag, debugger pause)
    pub const MAX_FRAME_DT: f32 = 0.1;
    /// Physics sub-steps per rendered frame
    pub const DEFAULT_SUBSTEPS: u32 = 3;
    /// Nominal frame rate of the headless driver
    pub const FRAME_RATE: f32 = 120.0;

    /// Downward acceleration (pixels/s², +y is down)
    pub const GRAVITY: f32 = 800.0;
    /// Perfectly elastic
    pub const RESTITUTION: f32 = 1.0;
    /// Extra push-out after positional correction
    pub const POSITION_SLOP: f32 = 0.2;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 10.0;
    pub const BALL_MASS: f32 = 1.0;

    /// Playfield defaults (900x900 window, polygons centered)
    pub const FIELD_SIZE: f32 = 900.0;
    pub const FIELD_MARGIN: f32 = 20.0;
}

/// Normalized angle to [-π, π)
#[inline]
pub fn normalize_angle(mut angle: f32) -> f32 {
    use std::f32::consts::{PI, TAU};
    if !angle.is_finite() {
        return angle;
    }
    angle = angle.rem_euclid(TAU);
    if angle >= PI {
        angle -= TAU;
    }
    angle
}

/// Convert polar (r, theta) to cartesian (x, y)
#[inline]
pub fn polar_to_cartesian(r: f32, theta: f32) -> Vec2 {
    Vec2::new(r * theta.cos(), r * theta.sin())
}
