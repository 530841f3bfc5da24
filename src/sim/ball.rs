//! Ball entity: a point-mass disc without spin

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// A ball entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    pub id: u32,
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub mass: f32,
    /// Presentation only, never read by the physics
    pub color: [u8; 3],
}

impl Ball {
    pub fn new(id: u32, pos: Vec2, vel: Vec2, radius: f32, mass: f32) -> Self {
        Self {
            id,
            pos,
            vel,
            radius,
            mass,
            color: [255, 255, 255],
        }
    }

    pub fn with_color(mut self, color: [u8; 3]) -> Self {
        self.color = color;
        self
    }

    #[inline]
    pub fn inv_mass(&self) -> f32 {
        1.0 / self.mass
    }

    #[inline]
    pub fn momentum(&self) -> Vec2 {
        self.vel * self.mass
    }

    #[inline]
    pub fn kinetic_energy(&self) -> f32 {
        0.5 * self.mass * self.vel.length_squared()
    }

    /// Gravity then position (semi-implicit Euler)
    #[inline]
    pub fn integrate(&mut self, gravity: f32, dt: f32) {
        self.vel.y += gravity * dt;
        self.pos += self.vel * dt;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integrate_uses_updated_velocity() {
        let mut ball = Ball::new(1, Vec2::ZERO, Vec2::new(10.0, 0.0), 5.0, 1.0);
        ball.integrate(100.0, 0.1);
        assert_eq!(ball.vel, Vec2::new(10.0, 10.0));
        // Position advanced with the post-gravity velocity
        assert!((ball.pos - Vec2::new(1.0, 1.0)).length() < 1e-6);
    }

    #[test]
    fn test_energy_and_momentum() {
        let ball = Ball::new(1, Vec2::ZERO, Vec2::new(3.0, 4.0), 5.0, 2.0);
        assert!((ball.kinetic_energy() - 25.0).abs() < 1e-5);
        assert_eq!(ball.momentum(), Vec2::new(6.0, 8.0));
        assert!((ball.inv_mass() - 0.5).abs() < 1e-6);
    }
}
