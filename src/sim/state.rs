//! Simulation context: polygons, balls, spawn queue and RNG
//!
//! One `Simulation` owns every piece of mutable physics state. Outside code
//! only queues requests; the ball collection changes inside [`step`] or
//! between steps, never while collisions are being resolved.
//!
//! [`step`]: super::tick::step

use std::collections::VecDeque;
use std::f32::consts::TAU;

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::ball::Ball;
use super::polygon::RotatingPolygon;
use crate::config::{ColorMode, PALETTE, SimConfig};
use crate::error::ConfigError;

/// Lifecycle of a simulation run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SimPhase {
    /// Stepping normally
    Running,
    /// Stopped by the external quit signal; steps are no-ops
    Stopped,
}

/// Request to drop one ball at the spawn origin
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SpawnRequest {
    /// Reproducible velocity and color for this ball alone
    pub seed: Option<u64>,
}

impl SpawnRequest {
    pub fn seeded(seed: u64) -> Self {
        Self { seed: Some(seed) }
    }
}

/// Complete simulation state
#[derive(Debug, Clone)]
pub struct Simulation {
    config: SimConfig,
    pub(crate) polygons: Vec<RotatingPolygon>,
    /// Active balls (ascending id)
    pub(crate) balls: Vec<Ball>,
    pending_spawns: VecDeque<SpawnRequest>,
    phase: SimPhase,
    rng: Pcg32,
    /// Simulated seconds
    time: f64,
    step_count: u64,
    spawn_count: u64,
    next_id: u32,
}

impl Simulation {
    /// Build a simulation, failing fast on an invalid configuration
    pub fn new(config: SimConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let polygons = config
            .polygons
            .iter()
            .enumerate()
            .map(|(i, p)| RotatingPolygon::new(p, config.center, i))
            .collect::<Result<Vec<_>, _>>()?;

        warn_on_suspicious_layout(&config, &polygons);
        log::info!(
            "Simulation created: {} polygons, gravity={}, restitution={}, substeps={}",
            polygons.len(),
            config.gravity,
            config.restitution,
            config.substeps
        );

        Ok(Self {
            rng: Pcg32::seed_from_u64(config.seed),
            config,
            polygons,
            balls: Vec::new(),
            pending_spawns: VecDeque::new(),
            phase: SimPhase::Running,
            time: 0.0,
            step_count: 0,
            spawn_count: 0,
            next_id: 1,
        })
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn polygons(&self) -> &[RotatingPolygon] {
        &self.polygons
    }

    pub fn balls(&self) -> &[Ball] {
        &self.balls
    }

    pub fn ball(&self, id: u32) -> Option<&Ball> {
        self.balls.iter().find(|b| b.id == id)
    }

    pub fn phase(&self) -> SimPhase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        self.phase == SimPhase::Running
    }

    pub fn time(&self) -> f64 {
        self.time
    }

    pub fn step_count(&self) -> u64 {
        self.step_count
    }

    pub fn pending_spawns(&self) -> usize {
        self.pending_spawns.len()
    }

    /// Enter the terminal `Stopped` phase
    pub fn stop(&mut self) {
        if self.phase == SimPhase::Running {
            log::info!(
                "Simulation stopped at t={:.3}s after {} steps with {} balls",
                self.time,
                self.step_count,
                self.balls.len()
            );
        }
        self.phase = SimPhase::Stopped;
        self.pending_spawns.clear();
    }

    /// Queue a spawn; it materializes at the start of the next step
    pub fn request_spawn(&mut self, request: SpawnRequest) {
        if self.is_running() {
            self.pending_spawns.push_back(request);
        }
    }

    /// Place a ball directly, bypassing the spawn queue
    ///
    /// Uses the configured radius and mass. Must only be called between
    /// steps.
    pub fn add_ball(&mut self, pos: Vec2, vel: Vec2) -> u32 {
        let id = self.next_entity_id();
        let ball = Ball::new(id, pos, vel, self.config.ball_radius, self.config.ball_mass)
            .with_color(PALETTE[0]);
        self.balls.push(ball);
        id
    }

    /// Sum of kinetic energy over all balls
    pub fn total_kinetic_energy(&self) -> f32 {
        self.balls.iter().map(Ball::kinetic_energy).sum()
    }

    /// Sum of momentum over all balls
    pub fn total_momentum(&self) -> Vec2 {
        self.balls.iter().map(Ball::momentum).sum()
    }

    fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub(crate) fn advance_clock(&mut self, dt: f32) {
        self.time += dt as f64;
        self.step_count += 1;
    }

    /// Turn every queued request into a ball; returns how many were made
    pub(crate) fn materialize_spawns(&mut self) -> usize {
        let mut spawned = 0;
        while let Some(request) = self.pending_spawns.pop_front() {
            self.spawn_ball(request);
            spawned += 1;
        }
        spawned
    }

    fn spawn_ball(&mut self, request: SpawnRequest) -> u32 {
        let id = self.next_entity_id();
        let cycle_index = self.spawn_count as usize;
        self.spawn_count += 1;

        let speed_limit = self.config.spawn_speed;
        let color_mode = self.config.color_mode;
        let (vel, color) = match request.seed {
            Some(seed) => {
                let mut rng = Pcg32::seed_from_u64(seed);
                spawn_kick(&mut rng, speed_limit, color_mode, cycle_index)
            }
            None => spawn_kick(&mut self.rng, speed_limit, color_mode, cycle_index),
        };

        let pos = self.config.spawn_origin();
        let ball = Ball::new(id, pos, vel, self.config.ball_radius, self.config.ball_mass)
            .with_color(color);
        log::debug!(
            "Spawned ball {} at ({:.1}, {:.1}) vel=({:.1}, {:.1})",
            id,
            pos.x,
            pos.y,
            vel.x,
            vel.y
        );
        self.balls.push(ball);
        id
    }
}

/// Random initial velocity and color for a new ball
fn spawn_kick<R: Rng>(
    rng: &mut R,
    speed_limit: f32,
    color_mode: ColorMode,
    cycle_index: usize,
) -> (Vec2, [u8; 3]) {
    let vel = if speed_limit > 0.0 {
        let angle = rng.random_range(0.0..TAU);
        let speed = rng.random_range(0.0..=speed_limit);
        Vec2::new(angle.cos(), angle.sin()) * speed
    } else {
        Vec2::ZERO
    };

    let color = match color_mode {
        ColorMode::Random => [
            rng.random_range(40..=255),
            rng.random_range(40..=255),
            rng.random_range(40..=255),
        ],
        ColorMode::Cycle => PALETTE[cycle_index % PALETTE.len()],
    };

    (vel, color)
}

/// Valid-but-odd layouts worth a log line
fn warn_on_suspicious_layout(config: &SimConfig, polygons: &[RotatingPolygon]) {
    for (i, a) in config.polygons.iter().enumerate() {
        for b in &config.polygons[i + 1..] {
            if (a.radius - b.radius).abs() < config.ball_radius {
                log::warn!(
                    "Polygon radii {} and {} are closer than one ball radius",
                    a.radius,
                    b.radius
                );
            }
        }
    }

    let origin = config.spawn_origin();
    let inside_any = polygons
        .iter()
        .any(|p| origin.distance(p.center()) + config.ball_radius < p.apothem());
    if !inside_any {
        log::warn!(
            "Spawn point ({}, {}) does not fit a ball inside any polygon",
            origin.x,
            origin.y
        );
    }
}
