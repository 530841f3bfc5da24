//! Stateless rendering
//!
//! Turns a [`Snapshot`] into a flat triangle list. No GPU state lives here:
//! the caller uploads `as_bytes(&vertices)` with whatever backend it owns.

pub mod shapes;
pub mod vertex;

pub use vertex::{Vertex, as_bytes, colors, rgb8};

use crate::sim::Snapshot;

/// Drawing parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderStyle {
    pub wall_color: [f32; 4],
    pub wall_width: f32,
    /// Triangles per ball
    pub circle_segments: u32,
    /// Radius of the dot drawn at each polygon center (0 disables)
    pub center_marker_radius: f32,
}

impl Default for RenderStyle {
    fn default() -> Self {
        Self {
            wall_color: colors::WALL,
            wall_width: 3.0,
            circle_segments: 24,
            center_marker_radius: 3.0,
        }
    }
}

/// Tessellate walls, then balls, then center markers
pub fn tessellate(snapshot: &Snapshot, style: &RenderStyle) -> Vec<Vertex> {
    let mut vertices = Vec::new();

    for polygon in &snapshot.polygons {
        for edge in &polygon.edges {
            vertices.extend(shapes::thick_line(
                edge.a,
                edge.b,
                style.wall_width,
                style.wall_color,
            ));
        }
    }

    for ball in &snapshot.balls {
        vertices.extend(shapes::circle(
            ball.pos,
            ball.radius,
            rgb8(ball.color),
            style.circle_segments,
        ));
    }

    if style.center_marker_radius > 0.0 {
        // Polygons share one center; draw it once
        if let Some(polygon) = snapshot.polygons.first() {
            vertices.extend(shapes::circle(
                polygon.center,
                style.center_marker_radius,
                colors::CENTER_MARKER,
                style.circle_segments,
            ));
        }
    }

    vertices
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SimConfig;
    use crate::sim::{Simulation, SpawnRequest, step};

    #[test]
    fn test_tessellate_counts() {
        let mut sim = Simulation::new(SimConfig::hexagons()).unwrap();
        sim.request_spawn(SpawnRequest::default());
        sim.request_spawn(SpawnRequest::default());
        step(&mut sim, 0.001);

        let style = RenderStyle::default();
        let vertices = tessellate(&sim.snapshot(), &style);
        let segments = style.circle_segments as usize;
        // 4 hexagons x 5 edges x 6, 2 balls, 1 center marker
        assert_eq!(vertices.len(), 4 * 5 * 6 + 2 * segments * 3 + segments * 3);
    }

    #[test]
    fn test_tessellate_without_marker() {
        let sim = Simulation::new(SimConfig::pentagons()).unwrap();
        let style = RenderStyle {
            center_marker_radius: 0.0,
            ..Default::default()
        };
        assert_eq!(tessellate(&sim.snapshot(), &style).len(), 4 * 4 * 6);
    }
}
