//! Data-driven physics tuning
//!
//! Every threshold and damping factor the collision resolver, shot
//! controller and preview use lives here so it can be tweaked from JSON
//! without a rebuild. Defaults reproduce the stock feel of the court.
//!
//! The "near the rim" (miss) and "inside the rim" (score) zones are kept as
//! separate fields on purpose; they overlap but are not the same zone.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::ConfigError;

/// Physics constants for one session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Gravity along Y (m/s², negative is down)
    pub gravity: f32,

    // === Backboard ===
    /// Restitution on the axis facing the board
    pub backboard_restitution: f32,
    /// Damping applied to the two tangential axes
    pub backboard_tangent_damping: f32,
    /// Separation push along the hit normal (m)
    pub backboard_push: f32,

    // === Rim (bounce) ===
    /// Max |dy| to rim center for a rim contact
    pub rim_hit_height: f32,
    /// Inner edge of the rim tube annulus; also the open interior radius
    pub rim_inner_radius: f32,
    /// Outer edge of the rim tube annulus
    pub rim_outer_radius: f32,
    /// Speed kept after a rim carom
    pub rim_restitution: f32,
    /// Max horizontal jitter added on a rim carom (m/s)
    pub rim_jitter: f32,
    /// Separation push along the rim normal (m)
    pub rim_push: f32,

    // === Scoring ===
    /// Max |dy| to rim center for the scoring check
    pub score_height_tolerance: f32,
    /// Ball must fall faster than this to score (m/s)
    pub score_min_descent_speed: f32,

    // === Miss ===
    /// Height under which a descending unscored shot counts as missed
    pub miss_height: f32,

    // === Floor ===
    /// |vy| above which the ball takes a full bounce
    pub floor_bounce_speed: f32,
    pub floor_bounce_restitution: f32,
    pub floor_bounce_friction: f32,
    /// Max horizontal jitter on a full bounce (m/s)
    pub floor_jitter: f32,
    /// |vy| above which the ball takes a small bounce; below it the ball rests
    pub floor_settle_speed: f32,
    pub floor_settle_restitution: f32,
    pub floor_settle_friction: f32,

    // === Bounds ===
    /// Max |x| before the ball counts as out of play
    pub bounds_x: f32,
    /// Max |z| before the ball counts as out of play
    pub bounds_z: f32,

    // === Movement / preview ===
    /// Dribble speed while idle (m/s)
    pub move_speed: f32,
    /// Max Euler steps sampled by the preview
    pub preview_max_steps: usize,
    /// Preview step (s); matches the live step so the arc lines up
    pub preview_dt: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            gravity: GRAVITY,

            backboard_restitution: 0.7,
            backboard_tangent_damping: 0.9,
            backboard_push: 0.05,

            rim_hit_height: 0.15,
            rim_inner_radius: 0.35,
            rim_outer_radius: 0.6,
            rim_restitution: 0.6,
            rim_jitter: 0.3,
            rim_push: 0.05,

            score_height_tolerance: 0.3,
            score_min_descent_speed: 0.5,

            miss_height: 1.0,

            floor_bounce_speed: 3.0,
            floor_bounce_restitution: 0.65,
            floor_bounce_friction: 0.85,
            floor_jitter: 0.1,
            floor_settle_speed: 1.0,
            floor_settle_restitution: 0.4,
            floor_settle_friction: 0.9,

            bounds_x: COURT_HALF_LENGTH + 1.0,
            bounds_z: COURT_HALF_WIDTH + 1.5,

            move_speed: 5.0,
            preview_max_steps: 400,
            preview_dt: SIM_DT,
        }
    }
}

impl Tuning {
    /// Parse tuning from JSON; missing fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        Ok(tuning.validated())
    }

    /// Load tuning from a JSON file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let tuning = Self::from_json(&json)?;
        log::info!("Loaded tuning from {}", path.display());
        Ok(tuning)
    }

    /// Replace values that would break the integrator or zone checks
    pub fn validated(mut self) -> Self {
        let defaults = Self::default();

        if self.preview_dt.is_nan() || self.preview_dt <= 0.0 {
            log::warn!("preview_dt must be positive, got {}", self.preview_dt);
            self.preview_dt = defaults.preview_dt;
        }
        if self.preview_max_steps == 0 {
            log::warn!("preview_max_steps must be non-zero");
            self.preview_max_steps = defaults.preview_max_steps;
        }
        if self.rim_inner_radius >= self.rim_outer_radius {
            log::warn!(
                "rim annulus is empty ({} >= {}), using defaults",
                self.rim_inner_radius,
                self.rim_outer_radius
            );
            self.rim_inner_radius = defaults.rim_inner_radius;
            self.rim_outer_radius = defaults.rim_outer_radius;
        }
        if self.floor_settle_speed > self.floor_bounce_speed {
            log::warn!("floor_settle_speed above floor_bounce_speed, swapping");
            std::mem::swap(&mut self.floor_settle_speed, &mut self.floor_bounce_speed);
        }
        self
    }
}
