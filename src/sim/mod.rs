//! Fixed-step simulation module
//!
//! All physics lives here. This module must stay pure:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (ascending ball id, ascending edge index)
//! - No rendering or platform dependencies

pub mod ball;
pub mod collision;
pub mod geometry;
pub mod polygon;
pub mod resolve;
pub mod snapshot;
pub mod state;
pub mod tick;

pub use ball::Ball;
pub use collision::{
    Contact, ball_ball_contact, ball_polygon_contact, ball_segment_contact, first_edge_contact,
};
pub use geometry::{Segment, closest_point_on_segment, distance_to_segment};
pub use polygon::RotatingPolygon;
pub use resolve::{clamp_to_bounds, resolve_ball_ball, resolve_ball_wall};
pub use snapshot::{BallView, PolygonView, Snapshot};
pub use state::{SimPhase, Simulation, SpawnRequest};
pub use tick::{FrameReport, StepReport, TickInput, step, tick};
