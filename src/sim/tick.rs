//! Fixed timestep simulation tick
//!
//! `tick` consumes one frame of input and splits the frame delta into
//! `substeps` equal physics steps. Each `step` runs in a fixed order:
//! spawns, rotation, gravity and motion, ball pairs, walls, soft bounds,
//! culling.

use super::collision::{ball_ball_contact, first_edge_contact};
use super::geometry::Segment;
use super::resolve::{clamp_to_bounds, resolve_ball_ball, resolve_ball_wall};
use super::state::{Simulation, SpawnRequest};
use crate::consts::MAX_FRAME_DT;

/// Input gathered for a single frame
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Spawn triggers polled this frame
    pub spawns: Vec<SpawnRequest>,
    /// External quit signal
    pub stop: bool,
}

impl TickInput {
    /// One unseeded spawn
    pub fn spawn() -> Self {
        Self {
            spawns: vec![SpawnRequest::default()],
            ..Default::default()
        }
    }
}

/// What happened during one physics step
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StepReport {
    pub spawned: usize,
    /// Ball pairs that overlapped
    pub ball_contacts: usize,
    /// Ball/polygon contacts (at most one per ball per polygon)
    pub wall_contacts: usize,
    /// Balls pushed back by the soft bounds
    pub bounds_clamps: usize,
    pub culled: usize,
}

impl StepReport {
    pub fn absorb(&mut self, other: StepReport) {
        self.spawned += other.spawned;
        self.ball_contacts += other.ball_contacts;
        self.wall_contacts += other.wall_contacts;
        self.bounds_clamps += other.bounds_clamps;
        self.culled += other.culled;
    }
}

/// Aggregate of every step in a frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameReport {
    pub steps: u32,
    pub totals: StepReport,
}

/// Advance the simulation by one rendered frame
pub fn tick(state: &mut Simulation, input: &TickInput, frame_dt: f32) -> FrameReport {
    for &request in &input.spawns {
        state.request_spawn(request);
    }
    if input.stop {
        state.stop();
    }

    let mut report = FrameReport::default();
    if !state.is_running() || !(frame_dt > 0.0) {
        return report;
    }

    let substeps = state.config().substeps;
    let dt = frame_dt.min(MAX_FRAME_DT) / substeps as f32;
    for _ in 0..substeps {
        report.totals.absorb(step(state, dt));
        report.steps += 1;
    }
    report
}

/// Advance the simulation by one fixed physics step
pub fn step(state: &mut Simulation, dt: f32) -> StepReport {
    let mut report = StepReport::default();
    if !state.is_running() {
        return report;
    }

    let config = state.config();
    let gravity = config.gravity;
    let restitution = config.restitution;
    let slop = config.position_slop;
    let bounds = config.bounds;
    let cull_radius = config.cull_radius;
    let center = config.center;

    report.spawned = state.materialize_spawns();

    for polygon in &mut state.polygons {
        polygon.update(dt);
    }

    for ball in &mut state.balls {
        ball.integrate(gravity, dt);
    }

    // Ball pairs, each unordered pair once in id order
    for i in 0..state.balls.len() {
        let (head, tail) = state.balls.split_at_mut(i + 1);
        let a = &mut head[i];
        for b in tail.iter_mut() {
            if let Some(contact) = ball_ball_contact(a, b) {
                resolve_ball_ball(a, b, &contact, restitution);
                report.ball_contacts += 1;
            }
        }
    }

    // Walls: first penetrated edge per polygon
    let edge_sets: Vec<Vec<Segment>> = state.polygons.iter().map(|p| p.edges()).collect();
    for ball in &mut state.balls {
        for (polygon, edges) in state.polygons.iter().zip(&edge_sets) {
            if let Some(contact) = first_edge_contact(ball, polygon, edges) {
                resolve_ball_wall(ball, &contact, restitution, slop);
                report.wall_contacts += 1;
            }
        }
    }

    if let Some(bounds) = bounds {
        for ball in &mut state.balls {
            if clamp_to_bounds(ball, bounds.min, bounds.max) {
                report.bounds_clamps += 1;
            }
        }
    }

    // Removal waits until every contact of this step is resolved
    if let Some(cull_radius) = cull_radius {
        let before = state.balls.len();
        state.balls.retain(|ball| {
            let keep = ball.pos.distance(center) <= cull_radius;
            if !keep {
                log::debug!("Culled ball {} at ({:.1}, {:.1})", ball.id, ball.pos.x, ball.pos.y);
            }
            keep
        });
        report.culled = before - state.balls.len();
    }

    state.advance_clock(dt);
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{PolygonConfig, SimConfig};
    use crate::sim::state::SimPhase;
    use glam::Vec2;

    const FRAME_DT: f32 = 1.0 / 120.0;

    /// One static hexagon, no gravity, no soft walls
    fn open_field(radius: f32) -> SimConfig {
        SimConfig {
            center: Vec2::ZERO,
            polygons: vec![PolygonConfig::hexagon(radius, 0.0)],
            gravity: 0.0,
            bounds: None,
            cull_radius: None,
            ..SimConfig::hexagons()
        }
    }

    #[test]
    fn test_tick_runs_substeps() {
        let mut sim = Simulation::new(SimConfig::hexagons()).unwrap();
        let report = tick(&mut sim, &TickInput::default(), FRAME_DT);
        assert_eq!(report.steps, 3);
        assert_eq!(sim.step_count(), 3);
        assert!((sim.time() - FRAME_DT as f64).abs() < 1e-6);
    }

    #[test]
    fn test_tick_clamps_long_frames() {
        let mut sim = Simulation::new(SimConfig::hexagons()).unwrap();
        tick(&mut sim, &TickInput::default(), 5.0);
        assert!((sim.time() - MAX_FRAME_DT as f64).abs() < 1e-6);
    }

    #[test]
    fn test_non_positive_frame_is_noop() {
        let mut sim = Simulation::new(SimConfig::hexagons()).unwrap();
        assert_eq!(tick(&mut sim, &TickInput::default(), 0.0).steps, 0);
        assert_eq!(tick(&mut sim, &TickInput::default(), f32::NAN).steps, 0);
        assert_eq!(sim.step_count(), 0);
    }

    #[test]
    fn test_spawn_materializes_in_first_substep() {
        let mut sim = Simulation::new(SimConfig::hexagons()).unwrap();
        let report = tick(&mut sim, &TickInput::spawn(), FRAME_DT);
        assert_eq!(report.totals.spawned, 1);
        assert_eq!(sim.balls().len(), 1);
        // Gravity already acted on the new ball during this frame
        assert!(sim.balls()[0].vel.y > 0.0);
    }

    #[test]
    fn test_stop_is_terminal() {
        let mut sim = Simulation::new(SimConfig::hexagons()).unwrap();
        tick(&mut sim, &TickInput::spawn(), FRAME_DT);
        let before = sim.balls()[0].clone();

        let input = TickInput {
            spawns: vec![SpawnRequest::default()],
            stop: true,
        };
        let report = tick(&mut sim, &input, FRAME_DT);
        assert_eq!(report.steps, 0);
        assert_eq!(sim.phase(), SimPhase::Stopped);

        tick(&mut sim, &TickInput::spawn(), FRAME_DT);
        assert_eq!(sim.balls().len(), 1);
        assert_eq!(sim.balls()[0], before);
    }

    #[test]
    fn test_polygons_rotate_each_step() {
        let mut sim = Simulation::new(SimConfig::hexagons()).unwrap();
        let start: Vec<f32> = sim.polygons().iter().map(|p| p.angle()).collect();
        step(&mut sim, 0.5);
        for (polygon, a0) in sim.polygons().iter().zip(start) {
            assert!((polygon.angle() - (a0 + polygon.angular_velocity() * 0.5)).abs() < 1e-5);
        }
    }

    #[test]
    fn test_ball_pair_collides_inside_step() {
        let mut sim = Simulation::new(open_field(300.0)).unwrap();
        let a = sim.add_ball(Vec2::new(-15.0, 0.0), Vec2::new(100.0, 0.0));
        let b = sim.add_ball(Vec2::new(15.0, 0.0), Vec2::new(-100.0, 0.0));

        let mut contacts = 0;
        for _ in 0..30 {
            contacts += step(&mut sim, 1.0 / 360.0).ball_contacts;
        }
        assert!(contacts >= 1);
        let a = sim.ball(a).unwrap();
        let b = sim.ball(b).unwrap();
        assert!(a.vel.x < 0.0 && b.vel.x > 0.0);
        assert!((sim.total_momentum()).length() < 1e-3);
    }

    #[test]
    fn test_ball_bounces_off_static_wall() {
        let mut sim = Simulation::new(open_field(100.0)).unwrap();
        // Vertex 0 sits on +x; edge 3 spans 180..240 degrees, its midpoint at 210
        let dir = Vec2::new((210.0f32).to_radians().cos(), (210.0f32).to_radians().sin());
        let id = sim.add_ball(Vec2::ZERO, dir * 200.0);

        let mut walls = 0;
        for _ in 0..200 {
            walls += step(&mut sim, 1.0 / 360.0).wall_contacts;
        }
        assert!(walls >= 1);
        let ball = sim.ball(id).unwrap();
        // Still inside and moving with the same speed (elastic)
        assert!(ball.pos.length() < 100.0);
        assert!((ball.vel.length() - 200.0).abs() < 1e-2);
    }

    #[test]
    fn test_culling_removes_escaped_balls() {
        let mut config = open_field(100.0);
        config.cull_radius = Some(150.0);
        let mut sim = Simulation::new(config).unwrap();
        let outside = sim.add_ball(Vec2::new(200.0, 0.0), Vec2::ZERO);
        let inside = sim.add_ball(Vec2::new(0.0, 0.0), Vec2::ZERO);

        let report = step(&mut sim, 1.0 / 360.0);
        assert_eq!(report.culled, 1);
        assert!(sim.ball(outside).is_none());
        assert!(sim.ball(inside).is_some());
    }

    #[test]
    fn test_soft_bounds_contain_balls() {
        let mut sim = Simulation::new(SimConfig::hexagons()).unwrap();
        let bounds = sim.config().bounds.unwrap();
        let id = sim.add_ball(Vec2::new(bounds.max.x - 1.0, 30.0), Vec2::new(500.0, 0.0));

        let report = step(&mut sim, 0.01);
        assert_eq!(report.bounds_clamps, 1);
        let ball = sim.ball(id).unwrap();
        assert!(bounds.contains(ball.pos));
        assert!(ball.vel.x < 0.0);
    }

    #[test]
    fn test_determinism() {
        let mut sim1 = Simulation::new(SimConfig::pentagons()).unwrap();
        let mut sim2 = Simulation::new(SimConfig::pentagons()).unwrap();

        for frame in 0..240 {
            let input = if frame % 20 == 0 {
                TickInput::spawn()
            } else {
                TickInput::default()
            };
            tick(&mut sim1, &input, FRAME_DT);
            tick(&mut sim2, &input, FRAME_DT);
        }

        assert!(!sim1.balls().is_empty());
        assert_eq!(sim1.balls(), sim2.balls());
    }
}
