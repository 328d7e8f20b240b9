//! Hoop Shot - basketball shooting simulation
//!
//! Core modules:
//! - `sim`: Simulation core (ball flight, collisions, scoring, preview)
//! - `platform`: Host driver and scene/HUD collaborator seams
//! - `ui`: HUD collaborator trait and event dispatch
//! - `tuning`: Data-driven physics constants
//! - `settings`: Player preferences

pub mod error;
pub mod platform;
pub mod settings;
pub mod sim;
pub mod tuning;
pub mod ui;

pub use error::ConfigError;
pub use settings::Settings;
pub use tuning::Tuning;

use glam::{Vec2, Vec3};

/// Fixed court and hoop geometry (meters)
pub mod consts {
    /// Fixed simulation timestep (120 Hz)
    pub const SIM_DT: f32 = 1.0 / 120.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Largest frame delta the host feeds into the accumulator
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Gravity along Y (m/s²)
    pub const GRAVITY: f32 = -9.8;

    /// Court dimensions (30 x 15 floor)
    pub const COURT_HALF_LENGTH: f32 = 15.0;
    pub const COURT_HALF_WIDTH: f32 = 7.5;

    /// Hoop rig
    pub const HOOP_HEIGHT: f32 = 3.048;
    pub const RIM_RADIUS: f32 = 0.45;
    pub const ARM_LENGTH: f32 = 1.0;
    pub const BOARD_THICKNESS: f32 = 0.05;
    pub const BOARD_HEIGHT: f32 = 1.05;
    pub const BOARD_WIDTH: f32 = 1.8;
    /// Backboard center is lowered this much from `HOOP_HEIGHT + BOARD_HEIGHT / 2`
    pub const BOARD_DROP: f32 = 0.4;

    /// Ball
    pub const BALL_RADIUS: f32 = 0.3;
    /// Resting gap between ball and floor at spawn
    pub const BALL_FLOOR_OFFSET: f32 = 0.1;

    /// Launch angle from horizontal (degrees)
    pub const LAUNCH_ANGLE_DEG: f32 = 70.0;
    /// Horizontal launch speed at 0% power (m/s)
    pub const LAUNCH_BASE_SPEED: f32 = 2.0;
    /// Extra horizontal launch speed at 100% power (m/s)
    pub const LAUNCH_POWER_SPEED: f32 = 2.7;

    /// Shot power bounds and default (percent)
    pub const POWER_MIN: u8 = 0;
    pub const POWER_MAX: u8 = 100;
    pub const POWER_DEFAULT: u8 = 50;
    pub const POWER_STEP: u8 = 5;

    /// Points per made shot
    pub const POINTS_PER_BASKET: u32 = 2;
}

/// Horizontal (XZ-plane) projection of a vector
#[inline]
pub fn horizontal(v: Vec3) -> Vec2 {
    Vec2::new(v.x, v.z)
}

/// Distance between two points ignoring height
#[inline]
pub fn horizontal_distance(a: Vec3, b: Vec3) -> f32 {
    horizontal(a - b).length()
}

/// Canonical spawn/reset position at center court
#[inline]
pub fn ball_spawn_position() -> Vec3 {
    Vec3::new(0.0, consts::BALL_RADIUS + consts::BALL_FLOOR_OFFSET, 0.0)
}
