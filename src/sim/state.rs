//! Simulation state and core types
//!
//! Everything the frame loop mutates lives in [`SimState`]; nothing is global.

use glam::{Quat, Vec3};
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::geometry::Aabb;
use super::trajectory::TrajectoryPreview;
use crate::ball_spawn_position;
use crate::consts::*;
use crate::tuning::Tuning;

/// Ball flight phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FlightPhase {
    /// On the floor, movable, preview allowed
    #[default]
    Idle,
    /// Shot taken, gravity and collisions active
    InFlight,
}

/// Why the ball went back to center
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResetReason {
    /// Reset command from the player
    Command,
    /// Ball stopped bouncing
    Rest,
    /// Ball left the court
    OutOfBounds,
}

/// The basketball
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ball {
    pub pos: Vec3,
    pub vel: Vec3,
    /// Visual spin only, never fed back into the physics
    pub angular_vel: Vec3,
    /// Visual orientation
    pub rotation: Quat,
    pub radius: f32,
    pub phase: FlightPhase,
    /// Set once per flight when the ball drops through a rim
    pub scored: bool,
    /// A shot was taken this flight
    pub shot_attempted: bool,
    /// Miss feedback already raised this flight
    pub miss_shown: bool,
}

impl Default for Ball {
    fn default() -> Self {
        Self {
            pos: ball_spawn_position(),
            vel: Vec3::ZERO,
            angular_vel: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            radius: BALL_RADIUS,
            phase: FlightPhase::Idle,
            scored: false,
            shot_attempted: false,
            miss_shown: false,
        }
    }
}

impl Ball {
    #[inline]
    pub fn in_flight(&self) -> bool {
        self.phase == FlightPhase::InFlight
    }

    /// Back to center court at rest, clearing all per-flight flags
    pub fn reset(&mut self) {
        self.pos = ball_spawn_position();
        self.vel = Vec3::ZERO;
        self.angular_vel = Vec3::ZERO;
        self.phase = FlightPhase::Idle;
        self.scored = false;
        self.shot_attempted = false;
        self.miss_shown = false;
    }
}

/// Which end of the court a hoop sits at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HoopSide {
    Left,
    Right,
}

impl HoopSide {
    /// -1 for left, +1 for right
    #[inline]
    pub fn sign(self) -> f32 {
        match self {
            HoopSide::Left => -1.0,
            HoopSide::Right => 1.0,
        }
    }

    /// Team credited for a basket through this hoop
    pub fn scoring_team(self) -> Team {
        match self {
            HoopSide::Left => Team::Away,
            HoopSide::Right => Team::Home,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Team {
    Home,
    Away,
}

/// A hoop rig: rim and backboard, fixed after construction
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Hoop {
    pub side: HoopSide,
    /// Rim center in world space
    pub rim: Vec3,
    pub backboard: Aabb,
}

impl Hoop {
    pub fn new(side: HoopSide) -> Self {
        let s = side.sign();
        let rim = Vec3::new(
            s * (COURT_HALF_LENGTH - ARM_LENGTH - RIM_RADIUS + BOARD_THICKNESS),
            HOOP_HEIGHT,
            0.0,
        );
        let board_center = Vec3::new(
            s * (COURT_HALF_LENGTH - ARM_LENGTH + BOARD_THICKNESS),
            HOOP_HEIGHT + BOARD_HEIGHT / 2.0 - BOARD_DROP,
            0.0,
        );
        let backboard = Aabb::from_center_size(
            board_center,
            Vec3::new(BOARD_THICKNESS, BOARD_HEIGHT, BOARD_WIDTH),
        );
        Self {
            side,
            rim,
            backboard,
        }
    }

    /// Both rigs, left first
    pub fn pair() -> [Hoop; 2] {
        [Hoop::new(HoopSide::Left), Hoop::new(HoopSide::Right)]
    }
}

/// Shot power percentage, always within [0, 100]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShotPower(u8);

impl Default for ShotPower {
    fn default() -> Self {
        Self(POWER_DEFAULT)
    }
}

impl ShotPower {
    /// Clamp any integer into range
    pub fn new(percent: i32) -> Self {
        Self(percent.clamp(POWER_MIN as i32, POWER_MAX as i32) as u8)
    }

    #[inline]
    pub fn percent(self) -> u8 {
        self.0
    }

    /// Power as a 0-1 fraction
    #[inline]
    pub fn fraction(self) -> f32 {
        self.0 as f32 / POWER_MAX as f32
    }

    /// Adjust by a signed delta, clamped
    pub fn adjusted(self, delta: i32) -> Self {
        Self::new((self.0 as i32).saturating_add(delta))
    }
}

/// Home/away score
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scoreboard {
    pub home: u32,
    pub away: u32,
}

impl Scoreboard {
    pub fn award(&mut self, team: Team, points: u32) {
        match team {
            Team::Home => self.home += points,
            Team::Away => self.away += points,
        }
    }
}

/// Session shooting statistics
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShotStats {
    pub attempts: u32,
    pub made: u32,
}

impl ShotStats {
    /// Made / attempts as a percentage, 0 with no attempts
    pub fn percentage(&self) -> f32 {
        if self.attempts == 0 {
            0.0
        } else {
            self.made as f32 / self.attempts as f32 * 100.0
        }
    }
}

/// Something the host should react to (HUD, scene, sound)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    ShotTaken { target: HoopSide, velocity: Vec3 },
    BackboardHit { side: HoopSide },
    RimHit { side: HoopSide },
    Scored { side: HoopSide, team: Team },
    Missed,
    FloorBounce { speed: f32 },
    BallReset { reason: ResetReason },
    PowerChanged { percent: u8 },
    StatsCleared,
    PreviewToggled { enabled: bool },
    /// Preview visuals must be disposed
    PreviewCleared,
    CameraToggled { orbit: bool },
}

/// RNG state wrapper for serialization
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RngState {
    pub seed: u64,
}

impl RngState {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    pub fn to_rng(&self) -> Pcg32 {
        Pcg32::seed_from_u64(self.seed)
    }
}

fn unseeded_rng() -> Pcg32 {
    Pcg32::seed_from_u64(0)
}

/// Complete simulation state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimState {
    pub rng_state: RngState,
    /// Jitter source for caroms and bounces
    #[serde(skip, default = "unseeded_rng")]
    pub rng: Pcg32,
    pub tuning: Tuning,
    pub ball: Ball,
    /// Left and right rigs; an empty list disables shooting and preview
    pub hoops: Vec<Hoop>,
    pub power: ShotPower,
    pub score: Scoreboard,
    pub stats: ShotStats,
    /// Trajectory preview mode
    pub preview_enabled: bool,
    /// Current preview (idle only)
    #[serde(skip)]
    pub preview: Option<TrajectoryPreview>,
    /// Orbit camera enabled (host reads this)
    pub orbit_camera: bool,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Events since the host last drained them
    #[serde(skip)]
    pub events: Vec<GameEvent>,
}

impl SimState {
    pub fn new(seed: u64) -> Self {
        Self::with_tuning(seed, Tuning::default())
    }

    pub fn with_tuning(seed: u64, tuning: Tuning) -> Self {
        let rng_state = RngState::new(seed);
        Self {
            rng: rng_state.to_rng(),
            rng_state,
            tuning,
            ball: Ball::default(),
            hoops: Hoop::pair().to_vec(),
            power: ShotPower::default(),
            score: Scoreboard::default(),
            stats: ShotStats::default(),
            preview_enabled: false,
            preview: None,
            orbit_camera: true,
            time_ticks: 0,
            events: Vec::new(),
        }
    }

    #[inline]
    pub fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Take all pending events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Drop the preview, telling the scene to dispose it if one existed
    pub fn clear_preview(&mut self) {
        if self.preview.take().is_some() {
            self.emit(GameEvent::PreviewCleared);
        }
    }

    /// Put the ball back at center and end any flight
    pub fn reset_ball(&mut self, reason: ResetReason) {
        if reason != ResetReason::Command {
            log::info!("Ball reset ({:?})", reason);
        }
        self.ball.reset();
        self.emit(GameEvent::BallReset { reason });
    }

    /// Reset command: ball to center and power back to default
    pub fn reset(&mut self) {
        log::info!("Reset");
        self.reset_ball(ResetReason::Command);
        self.clear_preview();
        self.power = ShotPower::default();
        self.emit(GameEvent::PowerChanged {
            percent: self.power.percent(),
        });
    }

    /// Clear scores and shot statistics
    pub fn clear_scores(&mut self) {
        log::info!("Scores cleared");
        self.score = Scoreboard::default();
        self.stats = ShotStats::default();
        self.emit(GameEvent::StatsCleared);
    }
}
