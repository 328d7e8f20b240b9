//! Per-frame simulation step
//!
//! Commands are applied first, then the ball advances according to its
//! phase: gravity and collisions while flying, dribbling and preview while
//! idle. Rendering is the host's job after the step.

use glam::Vec3;

use super::collision::{check_miss, resolve};
use super::kinematics::{integrate, rolling_angular_velocity, spin};
use super::shot::shoot;
use super::state::{FlightPhase, GameEvent, SimState};
use super::trajectory::TrajectoryPreview;
use crate::consts::*;

/// Input for a single tick
///
/// Movement flags are held state; everything else is a one-shot command the
/// host clears after the tick that consumed it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickInput {
    /// Toward the far sideline (-z)
    pub move_up: bool,
    /// Toward the near sideline (+z)
    pub move_down: bool,
    /// Toward the left hoop (-x)
    pub move_left: bool,
    /// Toward the right hoop (+x)
    pub move_right: bool,
    /// Power change in percentage points
    pub power_delta: i32,
    pub shoot: bool,
    pub reset: bool,
    pub clear_scores: bool,
    pub toggle_preview: bool,
    pub toggle_camera: bool,
}

impl TickInput {
    /// Unit movement direction on the court plane (zero when idle or cancelled)
    pub fn movement(&self) -> Vec3 {
        let mut dir = Vec3::ZERO;
        if self.move_up {
            dir.z -= 1.0;
        }
        if self.move_down {
            dir.z += 1.0;
        }
        if self.move_left {
            dir.x -= 1.0;
        }
        if self.move_right {
            dir.x += 1.0;
        }
        dir.normalize_or_zero()
    }

    /// Drop one-shot commands, keep held movement
    pub fn clear_commands(&mut self) {
        self.power_delta = 0;
        self.shoot = false;
        self.reset = false;
        self.clear_scores = false;
        self.toggle_preview = false;
        self.toggle_camera = false;
    }
}

/// Advance the simulation by `dt` seconds
pub fn tick(state: &mut SimState, input: &TickInput, dt: f32) {
    apply_commands(state, input);

    state.time_ticks += 1;

    match state.ball.phase {
        FlightPhase::InFlight => step_flight(state, dt),
        FlightPhase::Idle => step_idle(state, input, dt),
    }
}

fn apply_commands(state: &mut SimState, input: &TickInput) {
    if input.reset {
        state.reset();
    }

    if input.clear_scores {
        state.clear_scores();
    }

    if input.power_delta != 0 {
        let power = state.power.adjusted(input.power_delta);
        if power != state.power {
            state.power = power;
            log::debug!("Power {}%", power.percent());
            state.emit(GameEvent::PowerChanged {
                percent: power.percent(),
            });
        }
    }

    if input.toggle_preview {
        state.preview_enabled = !state.preview_enabled;
        log::info!(
            "Trajectory preview {}",
            if state.preview_enabled { "on" } else { "off" }
        );
        if !state.preview_enabled {
            state.clear_preview();
        }
        state.emit(GameEvent::PreviewToggled {
            enabled: state.preview_enabled,
        });
    }

    if input.toggle_camera {
        state.orbit_camera = !state.orbit_camera;
        state.emit(GameEvent::CameraToggled {
            orbit: state.orbit_camera,
        });
    }

    if input.shoot {
        shoot(state);
    }
}

fn step_flight(state: &mut SimState, dt: f32) {
    let gravity = state.tuning.gravity;
    let ball = &mut state.ball;
    integrate(&mut ball.pos, &mut ball.vel, gravity, dt);

    check_miss(state);
    resolve(state);

    // Cosmetic spin; a reset this tick leaves the ball still
    let ball = &mut state.ball;
    if ball.in_flight() {
        ball.angular_vel = rolling_angular_velocity(ball.vel, ball.radius);
        ball.rotation = spin(ball.rotation, ball.angular_vel, dt);
    }
}

fn step_idle(state: &mut SimState, input: &TickInput, dt: f32) {
    let dir = input.movement();
    let speed = state.tuning.move_speed;
    let ball = &mut state.ball;

    if dir == Vec3::ZERO {
        ball.angular_vel = Vec3::ZERO;
    } else {
        let max_x = COURT_HALF_LENGTH - ball.radius;
        let max_z = COURT_HALF_WIDTH - ball.radius;
        ball.pos += dir * speed * dt;
        ball.pos.x = ball.pos.x.clamp(-max_x, max_x);
        ball.pos.z = ball.pos.z.clamp(-max_z, max_z);

        ball.angular_vel = rolling_angular_velocity(dir * speed, ball.radius);
        ball.rotation = spin(ball.rotation, ball.angular_vel, dt);
    }

    if state.preview_enabled {
        state.preview = TrajectoryPreview::compute(
            state.ball.pos,
            &state.hoops,
            state.power,
            &state.tuning,
        );
    }
}
