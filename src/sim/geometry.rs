//! 2D geometry helpers on top of `glam::Vec2`

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Squared lengths below this are treated as zero
pub const DEGENERATE_EPSILON: f32 = 1e-12;

/// A straight wall segment between two world-space points
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub a: Vec2,
    pub b: Vec2,
    /// Edge index within the owning polygon (k for the edge v_k -> v_k+1)
    pub edge_index: usize,
}

impl Segment {
    pub fn new(a: Vec2, b: Vec2, edge_index: usize) -> Self {
        Self { a, b, edge_index }
    }

    #[inline]
    pub fn direction(&self) -> Vec2 {
        self.b - self.a
    }

    #[inline]
    pub fn midpoint(&self) -> Vec2 {
        (self.a + self.b) * 0.5
    }

    /// Zero-length edges never take part in collisions
    #[inline]
    pub fn is_degenerate(&self) -> bool {
        self.direction().length_squared() < DEGENERATE_EPSILON
    }

    /// Closest point on this segment to `p`
    #[inline]
    pub fn closest_point(&self, p: Vec2) -> Vec2 {
        closest_point_on_segment(self.a, self.b, p)
    }

    /// Unit perpendicular pointing away from `interior`
    ///
    /// Falls back to `Vec2::ZERO` for a degenerate segment.
    pub fn normal_away_from(&self, interior: Vec2) -> Vec2 {
        let perp = self.direction().perp().normalize_or_zero();
        if perp.dot(self.midpoint() - interior) < 0.0 {
            -perp
        } else {
            perp
        }
    }
}

/// Project `p` onto segment AB, clamped to the endpoints
///
/// A zero-length segment returns `a`.
pub fn closest_point_on_segment(a: Vec2, b: Vec2, p: Vec2) -> Vec2 {
    let ab = b - a;
    let len_sq = ab.length_squared();
    if len_sq < DEGENERATE_EPSILON {
        return a;
    }
    let t = ((p - a).dot(ab) / len_sq).clamp(0.0, 1.0);
    a + ab * t
}

/// Distance from `p` to segment AB
#[inline]
pub fn distance_to_segment(a: Vec2, b: Vec2, p: Vec2) -> f32 {
    p.distance(closest_point_on_segment(a, b, p))
}

/// Velocity of a point `r` away from the pivot on a body spinning at `omega`
#[inline]
pub fn angular_to_linear(omega: f32, r: Vec2) -> Vec2 {
    Vec2::new(-omega * r.y, omega * r.x)
}
