//! Collision detection for balls against balls and polygon edges
//!
//! Detection only: these functions report a [`Contact`] and never mutate.
//! Degenerate geometry (zero-length edges, coincident centers) is reported
//! as no contact.

use glam::Vec2;

use super::ball::Ball;
use super::geometry::{DEGENERATE_EPSILON, Segment};
use super::polygon::RotatingPolygon;

/// A detected overlap, valid only for the current step
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contact {
    /// Closest point on the wall, or the midpoint between two ball surfaces
    pub point: Vec2,
    /// Unit normal. Walls: from wall toward ball. Ball pairs: from first to second.
    pub normal: Vec2,
    /// Overlap depth (>= 0)
    pub penetration: f32,
    /// Velocity of the wall material at `point` (zero for ball pairs)
    pub wall_velocity: Vec2,
}

/// Check a ball against one wall segment
///
/// Touching (distance exactly equal to the radius) counts as contact. When
/// the ball center lies on the segment the normal falls back to the
/// segment perpendicular pointing away from `interior`.
pub fn ball_segment_contact(ball: &Ball, segment: &Segment, interior: Vec2) -> Option<Contact> {
    if segment.is_degenerate() {
        return None;
    }

    let closest = segment.closest_point(ball.pos);
    let offset = ball.pos - closest;
    let dist_sq = offset.length_squared();
    if dist_sq > ball.radius * ball.radius {
        return None;
    }

    let (normal, dist) = if dist_sq > DEGENERATE_EPSILON {
        let dist = dist_sq.sqrt();
        (offset / dist, dist)
    } else {
        (segment.normal_away_from(interior), 0.0)
    };

    Some(Contact {
        point: closest,
        normal,
        penetration: ball.radius - dist,
        wall_velocity: Vec2::ZERO,
    })
}

/// Check a ball against a rotating polygon
///
/// Returns the contact with the first penetrated edge in edge order, with
/// the wall velocity filled in from the polygon's rotation.
pub fn ball_polygon_contact(ball: &Ball, polygon: &RotatingPolygon) -> Option<Contact> {
    first_edge_contact(ball, polygon, &polygon.edges())
}

/// Same as [`ball_polygon_contact`] with the polygon's current edges
/// already computed
pub fn first_edge_contact(
    ball: &Ball,
    polygon: &RotatingPolygon,
    edges: &[Segment],
) -> Option<Contact> {
    edges.iter().find_map(|edge| {
        ball_segment_contact(ball, edge, polygon.center()).map(|contact| Contact {
            wall_velocity: polygon.point_velocity(contact.point),
            ..contact
        })
    })
}

/// Check two balls for overlap
///
/// Coincident centers have no defined normal and are reported as no
/// contact; the pair is picked up again once other forces separate them.
pub fn ball_ball_contact(a: &Ball, b: &Ball) -> Option<Contact> {
    let delta = b.pos - a.pos;
    let dist_sq = delta.length_squared();
    let r_sum = a.radius + b.radius;

    if dist_sq >= r_sum * r_sum || dist_sq < DEGENERATE_EPSILON {
        return None;
    }

    let dist = dist_sq.sqrt();
    let normal = delta / dist;
    Some(Contact {
        point: a.pos + normal * (a.radius - (r_sum - dist) * 0.5),
        normal,
        penetration: r_sum - dist,
        wall_velocity: Vec2::ZERO,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PolygonConfig;

    fn ball_at(pos: Vec2, radius: f32) -> Ball {
        Ball::new(1, pos, Vec2::ZERO, radius, 1.0)
    }

    #[test]
    fn test_ball_segment_hit() {
        let seg = Segment::new(Vec2::new(-50.0, 0.0), Vec2::new(50.0, 0.0), 0);
        let ball = ball_at(Vec2::new(10.0, 6.0), 8.0);

        let contact = ball_segment_contact(&ball, &seg, Vec2::new(0.0, 100.0)).unwrap();
        assert!((contact.point - Vec2::new(10.0, 0.0)).length() < 1e-5);
        assert!((contact.normal - Vec2::new(0.0, 1.0)).length() < 1e-6);
        assert!((contact.penetration - 2.0).abs() < 1e-5);
    }

    #[test]
    fn test_ball_segment_touching_counts() {
        let seg = Segment::new(Vec2::new(-50.0, 0.0), Vec2::new(50.0, 0.0), 0);
        let ball = ball_at(Vec2::new(0.0, 8.0), 8.0);
        let contact = ball_segment_contact(&ball, &seg, Vec2::ZERO).unwrap();
        assert!(contact.penetration.abs() < 1e-6);
    }

    #[test]
    fn test_ball_segment_miss_and_endpoint() {
        let seg = Segment::new(Vec2::new(-50.0, 0.0), Vec2::new(50.0, 0.0), 0);
        assert!(ball_segment_contact(&ball_at(Vec2::new(0.0, 9.0), 8.0), &seg, Vec2::ZERO).is_none());

        // Past the endpoint: normal points from the endpoint to the ball
        let ball = ball_at(Vec2::new(55.0, 3.0), 8.0);
        let contact = ball_segment_contact(&ball, &seg, Vec2::ZERO).unwrap();
        assert_eq!(contact.point, seg.b);
        assert!((contact.normal - Vec2::new(5.0, 3.0).normalize()).length() < 1e-6);
    }

    #[test]
    fn test_ball_center_on_segment_uses_perpendicular() {
        let seg = Segment::new(Vec2::new(-50.0, 20.0), Vec2::new(50.0, 20.0), 0);
        let ball = ball_at(Vec2::new(0.0, 20.0), 8.0);

        let contact = ball_segment_contact(&ball, &seg, Vec2::ZERO).unwrap();
        // Interior is below the wall, so the fallback points up (+y)
        assert!((contact.normal - Vec2::new(0.0, 1.0)).length() < 1e-6);
        assert!((contact.penetration - 8.0).abs() < 1e-6);
    }

    #[test]
    fn test_degenerate_segment_never_collides() {
        let p = Vec2::new(5.0, 5.0);
        let seg = Segment::new(p, p, 0);
        assert!(ball_segment_contact(&ball_at(p, 10.0), &seg, Vec2::ZERO).is_none());
    }

    #[test]
    fn test_ball_polygon_contact_reports_wall_velocity() {
        let config = PolygonConfig::hexagon(100.0, 2.0);
        let polygon = RotatingPolygon::new(&config, Vec2::ZERO, 0).unwrap();
        // Just inside the middle of edge 3 (between 180 and 240 degrees)
        let edge = polygon.edges()[2];
        assert_eq!(edge.edge_index, 3);
        let inward = -edge.normal_away_from(Vec2::ZERO);
        let ball = ball_at(edge.midpoint() + inward * 5.0, 8.0);

        let contact = ball_polygon_contact(&ball, &polygon).unwrap();
        assert!((contact.point - edge.midpoint()).length() < 1e-3);
        assert!((contact.wall_velocity - polygon.point_velocity(contact.point)).length() < 1e-4);
        assert!((contact.normal - inward).length() < 1e-4);
    }

    #[test]
    fn test_ball_ball_overlap() {
        let a = ball_at(Vec2::new(0.0, 0.0), 10.0);
        let b = ball_at(Vec2::new(15.0, 0.0), 10.0);
        let contact = ball_ball_contact(&a, &b).unwrap();
        assert_eq!(contact.normal, Vec2::X);
        assert!((contact.penetration - 5.0).abs() < 1e-6);
        assert!((contact.point - Vec2::new(7.5, 0.0)).length() < 1e-6);
    }

    #[test]
    fn test_ball_ball_touching_is_not_contact() {
        let a = ball_at(Vec2::new(0.0, 0.0), 10.0);
        let b = ball_at(Vec2::new(20.0, 0.0), 10.0);
        assert!(ball_ball_contact(&a, &b).is_none());
    }

    #[test]
    fn test_coincident_centers_skipped() {
        let a = ball_at(Vec2::new(3.0, 3.0), 10.0);
        let b = ball_at(Vec2::new(3.0, 3.0), 10.0);
        assert!(ball_ball_contact(&a, &b).is_none());
    }
}
