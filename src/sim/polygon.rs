//! Rotating open polygon
//!
//! A regular N-gon spinning rigidly about a fixed center. One edge is
//! never instantiated; that absence is the gap balls escape through, and it
//! rotates with the body. Vertices and edges are derived from the phase on
//! demand rather than stored.

use std::f32::consts::TAU;

use glam::Vec2;

use super::geometry::{Segment, angular_to_linear};
use crate::config::PolygonConfig;
use crate::error::ConfigError;
use crate::{normalize_angle, polar_to_cartesian};

#[derive(Debug, Clone)]
pub struct RotatingPolygon {
    center: Vec2,
    /// Circumradius
    radius: f32,
    vertex_count: usize,
    /// Signed, radians per second
    angular_velocity: f32,
    /// Accumulated phase (unbounded)
    angle: f32,
    missing_edge: usize,
}

impl RotatingPolygon {
    /// Build the polygon described by `config`; `index` only labels errors
    pub fn new(config: &PolygonConfig, center: Vec2, index: usize) -> Result<Self, ConfigError> {
        config.validate(index)?;
        Ok(Self {
            center,
            radius: config.radius,
            vertex_count: config.vertex_count,
            angular_velocity: config.angular_velocity,
            angle: config.initial_angle,
            missing_edge: config.missing_edge,
        })
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.center
    }

    #[inline]
    pub fn radius(&self) -> f32 {
        self.radius
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertex_count
    }

    #[inline]
    pub fn angular_velocity(&self) -> f32 {
        self.angular_velocity
    }

    #[inline]
    pub fn missing_edge(&self) -> usize {
        self.missing_edge
    }

    /// Raw accumulated phase
    #[inline]
    pub fn angle(&self) -> f32 {
        self.angle
    }

    /// Phase wrapped to [-π, π), for display
    pub fn display_angle(&self) -> f32 {
        normalize_angle(self.angle)
    }

    /// Distance from center to each edge midpoint
    pub fn apothem(&self) -> f32 {
        self.radius * (std::f32::consts::PI / self.vertex_count as f32).cos()
    }

    /// Advance the phase
    pub fn update(&mut self, dt: f32) {
        self.angle += self.angular_velocity * dt;
    }

    /// Angle of vertex `k` at the current phase
    #[inline]
    fn vertex_angle(&self, k: usize) -> f32 {
        self.angle + TAU * k as f32 / self.vertex_count as f32
    }

    /// World-space vertices at the current phase
    pub fn vertices(&self) -> Vec<Vec2> {
        (0..self.vertex_count)
            .map(|k| self.center + polar_to_cartesian(self.radius, self.vertex_angle(k)))
            .collect()
    }

    /// The N-1 present edges, in ascending edge index
    pub fn edges(&self) -> Vec<Segment> {
        let vertices = self.vertices();
        let n = self.vertex_count;
        (0..n)
            .filter(|&k| k != self.missing_edge)
            .map(|k| Segment::new(vertices[k], vertices[(k + 1) % n], k))
            .collect()
    }

    /// Instantaneous velocity of a point rigidly attached to this body
    #[inline]
    pub fn point_velocity(&self, p: Vec2) -> Vec2 {
        angular_to_linear(self.angular_velocity, p - self.center)
    }

    /// Unit vector from the center through the middle of the gap
    pub fn gap_direction(&self) -> Vec2 {
        let mid = self.vertex_angle(self.missing_edge) + TAU / (2.0 * self.vertex_count as f32);
        polar_to_cartesian(1.0, mid)
    }
}
