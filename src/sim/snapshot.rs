//! Read-only view of the world for renderers
//!
//! A snapshot copies out exactly what drawing needs and nothing the
//! physics depends on, so a renderer can never mutate simulation state.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::geometry::Segment;
use super::state::Simulation;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolygonView {
    pub center: Vec2,
    /// Phase wrapped to [-π, π)
    pub angle: f32,
    /// Present edges in ascending edge index
    pub edges: Vec<Segment>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BallView {
    pub id: u32,
    pub pos: Vec2,
    pub radius: f32,
    pub color: [u8; 3],
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Simulated seconds
    pub time: f64,
    pub polygons: Vec<PolygonView>,
    pub balls: Vec<BallView>,
}

impl Snapshot {
    pub fn capture(state: &Simulation) -> Self {
        let polygons = state
            .polygons()
            .iter()
            .map(|p| PolygonView {
                center: p.center(),
                angle: p.display_angle(),
                edges: p.edges(),
            })
            .collect();

        let balls = state
            .balls()
            .iter()
            .map(|b| BallView {
                id: b.id,
                pos: b.pos,
                radius: b.radius,
                color: b.color,
            })
            .collect();

        Self {
            time: state.time(),
            polygons,
            balls,
        }
    }

    /// Total number of wall segments across all polygons
    pub fn edge_count(&self) -> usize {
        self.polygons.iter().map(|p| p.edges.len()).sum()
    }
}

impl Simulation {
    pub fn snapshot(&self) -> Snapshot {
        Snapshot::capture(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SimConfig;
    use crate::sim::state::SpawnRequest;

    #[test]
    fn test_snapshot_mirrors_state() {
        let mut sim = Simulation::new(SimConfig::hexagons()).unwrap();
        sim.request_spawn(SpawnRequest::default());
        crate::sim::tick::step(&mut sim, 0.01);

        let snapshot = sim.snapshot();
        assert_eq!(snapshot.polygons.len(), 4);
        assert_eq!(snapshot.edge_count(), 4 * 5);
        assert_eq!(snapshot.balls.len(), 1);
        assert_eq!(snapshot.balls[0].pos, sim.balls()[0].pos);
        assert_eq!(snapshot.balls[0].color, sim.balls()[0].color);
        assert!((snapshot.time - 0.01).abs() < 1e-6);
    }

    #[test]
    fn test_snapshot_serializes() {
        let sim = Simulation::new(SimConfig::pentagons()).unwrap();
        let json = serde_json::to_string(&sim.snapshot()).unwrap();
        let back: Snapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(back.edge_count(), 4 * 4);
    }
}
