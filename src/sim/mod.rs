//! Ball flight simulation
//!
//! All gameplay physics lives here. The module is pure:
//! - State is an explicit `SimState`, stepped by `tick`
//! - Random jitter comes from a seeded RNG only
//! - No rendering or platform dependencies

pub mod collision;
pub mod geometry;
pub mod kinematics;
pub mod shot;
pub mod state;
pub mod tick;
pub mod trajectory;

#[cfg(test)]
mod proptest_sim;

pub use collision::{Contact, check_miss, in_rim_band, in_scoring_zone, resolve};
pub use geometry::Aabb;
pub use shot::{launch_speeds, launch_velocity, nearest_hoop, shoot};
pub use state::{
    Ball, FlightPhase, GameEvent, Hoop, HoopSide, ResetReason, Scoreboard, ShotPower, ShotStats,
    SimState, Team,
};
pub use tick::{TickInput, tick};
pub use trajectory::{CaptureZone, Trajectory, TrajectoryPreview, predict};
