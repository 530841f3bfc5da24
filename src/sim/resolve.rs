//! Collision response
//!
//! Impulse-based velocity response followed by positional correction.
//! Walls are treated as infinitely massive but may be moving: the
//! reflection happens in the wall's rest frame, so a spinning wall hands
//! its surface velocity to the ball.

use glam::Vec2;

use super::ball::Ball;
use super::collision::Contact;
use super::geometry::DEGENERATE_EPSILON;

/// Respond to a ball/wall contact
///
/// Velocity is reflected only while the ball approaches the wall in the
/// wall's frame, which keeps a resting contact from pumping energy in.
/// Penetration is always corrected, pushing the ball out along the normal
/// by the overlap plus `slop`.
///
/// Returns `true` if an impulse was applied.
pub fn resolve_ball_wall(ball: &mut Ball, contact: &Contact, restitution: f32, slop: f32) -> bool {
    if contact.normal.length_squared() < DEGENERATE_EPSILON {
        return false;
    }
    let n = contact.normal;

    let v_rel = ball.vel - contact.wall_velocity;
    let vn = v_rel.dot(n);
    let impulse = vn < 0.0;
    if impulse {
        ball.vel -= (1.0 + restitution) * vn * n;
    }

    ball.pos += (contact.penetration + slop) * n;
    impulse
}

/// Respond to an overlapping ball pair
///
/// `contact.normal` points from `a` to `b`. The pair is separated along the
/// normal in inverse-mass proportion so they end up exactly touching, then
/// an impulse is exchanged if they are still closing. Total momentum is
/// conserved; with `restitution = 1` so is kinetic energy.
///
/// Returns `true` if an impulse was applied.
pub fn resolve_ball_ball(a: &mut Ball, b: &mut Ball, contact: &Contact, restitution: f32) -> bool {
    let n = contact.normal;
    let inv_a = a.inv_mass();
    let inv_b = b.inv_mass();
    let inv_sum = inv_a + inv_b;

    let correction = n * (contact.penetration / inv_sum);
    a.pos -= correction * inv_a;
    b.pos += correction * inv_b;

    let v_rel = b.vel - a.vel;
    let vn = v_rel.dot(n);
    if vn >= 0.0 {
        return false;
    }

    let j = -(1.0 + restitution) * vn / inv_sum;
    a.vel -= n * (j * inv_a);
    b.vel += n * (j * inv_b);
    true
}

/// Keep a ball inside an axis-aligned region
///
/// Soft fallback only: a ball past an edge is clamped back and its velocity
/// component on that axis turned inward.
pub fn clamp_to_bounds(ball: &mut Ball, min: Vec2, max: Vec2) -> bool {
    let mut clamped = false;
    if ball.pos.x < min.x {
        ball.pos.x = min.x;
        ball.vel.x = ball.vel.x.abs();
        clamped = true;
    } else if ball.pos.x > max.x {
        ball.pos.x = max.x;
        ball.vel.x = -ball.vel.x.abs();
        clamped = true;
    }
    if ball.pos.y < min.y {
        ball.pos.y = min.y;
        ball.vel.y = ball.vel.y.abs();
        clamped = true;
    } else if ball.pos.y > max.y {
        ball.pos.y = max.y;
        ball.vel.y = -ball.vel.y.abs();
        clamped = true;
    }
    clamped
}
