//! Collision detection and response for the ball in flight
//!
//! Checks run in a fixed order each tick: backboards, rims (a basket returns
//! early), floor, court bounds. At most one contact is resolved per tick.
//! A board never blocks a live shot dropping through its own rim: the rim
//! opening reaches past the board face, so that pass scores first.
//!
//! The responses are deliberately arcade-style: damped reflections plus a
//! little random horizontal jitter so caroms don't look canned.

use glam::Vec3;
use rand::Rng;
use rand_pcg::Pcg32;

use super::geometry::BoxContact;
use super::kinematics::reflect;
use super::state::{Ball, GameEvent, HoopSide, ResetReason, SimState};
use crate::consts::POINTS_PER_BASKET;
use crate::horizontal_distance;
use crate::tuning::Tuning;

/// Contact resolved this tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Contact {
    Backboard(HoopSide),
    Rim(HoopSide),
    Score(HoopSide),
    /// Floor bounce with the impact speed
    Floor(f32),
    /// Ball stopped and went back to center
    Rest,
    OutOfBounds,
}

/// Uniform jitter in [-amount, amount]
fn jitter(rng: &mut Pcg32, amount: f32) -> f32 {
    if amount > 0.0 {
        rng.random_range(-amount..=amount)
    } else {
        0.0
    }
}

/// Ball touches the rim tube (annulus around the opening, near rim height)
#[inline]
pub fn in_rim_band(pos: Vec3, rim: Vec3, tuning: &Tuning) -> bool {
    let dist = horizontal_distance(pos, rim);
    (pos.y - rim.y).abs() < tuning.rim_hit_height
        && dist > tuning.rim_inner_radius
        && dist < tuning.rim_outer_radius
}

/// Ball is dropping through the open interior of the rim
#[inline]
pub fn in_scoring_zone(pos: Vec3, vel: Vec3, rim: Vec3, tuning: &Tuning) -> bool {
    (pos.y - rim.y).abs() < tuning.score_height_tolerance
        && horizontal_distance(pos, rim) < tuning.rim_inner_radius
        && vel.y < -tuning.score_min_descent_speed
}

/// Attempted, not yet scored, and dropping through `rim`
fn scoring_pass(ball: &Ball, rim: Vec3, tuning: &Tuning) -> bool {
    ball.shot_attempted && !ball.scored && in_scoring_zone(ball.pos, ball.vel, rim, tuning)
}

/// Bounce off a backboard face
///
/// The velocity on the hit axis flips (if still heading into the board) and
/// loses energy; the other two axes are damped. The ball always gets pushed
/// clear along the normal so it can't stick.
pub fn resolve_backboard(ball: &mut Ball, contact: &BoxContact, tuning: &Tuning) {
    let axis = contact.axis;
    let approaching = ball.vel.dot(contact.normal) < 0.0;

    let along = ball.vel[axis];
    ball.vel *= tuning.backboard_tangent_damping;
    ball.vel[axis] = if approaching {
        -along * tuning.backboard_restitution
    } else {
        along
    };
    ball.pos += contact.normal * tuning.backboard_push;
}

/// Carom off the rim tube
///
/// Returns `false` without touching the ball when the ball sits exactly on
/// the rim center line and no normal exists.
pub fn resolve_rim(ball: &mut Ball, rim: Vec3, tuning: &Tuning, rng: &mut Pcg32) -> bool {
    let Some(normal) = (ball.pos - rim).try_normalize() else {
        return false;
    };

    if ball.vel.dot(normal) < 0.0 {
        ball.vel = reflect(ball.vel, normal);
    }
    ball.vel *= tuning.rim_restitution;
    ball.vel.x += jitter(rng, tuning.rim_jitter);
    ball.vel.z += jitter(rng, tuning.rim_jitter);
    ball.pos += normal * tuning.rim_push;
    true
}

/// Raise the miss signal once per flight
///
/// A shot is a miss when it drops low while descending without having scored.
pub fn check_miss(state: &mut SimState) -> bool {
    let ball = &state.ball;
    let missed = ball.in_flight()
        && ball.shot_attempted
        && !ball.scored
        && !ball.miss_shown
        && ball.vel.y < 0.0
        && ball.pos.y < state.tuning.miss_height;

    if missed {
        signal_miss(state);
    }
    missed
}

fn signal_miss(state: &mut SimState) {
    state.ball.miss_shown = true;
    log::info!("Missed shot");
    state.emit(GameEvent::Missed);
}

/// Resolve this tick's contact, if any
pub fn resolve(state: &mut SimState) -> Option<Contact> {
    // Backboards
    for i in 0..state.hoops.len() {
        let hoop = &state.hoops[i];
        let side = hoop.side;
        if scoring_pass(&state.ball, hoop.rim, &state.tuning) {
            continue;
        }
        let hit = hoop
            .backboard
            .sphere_contact(state.ball.pos, state.ball.radius);
        if let Some(contact) = hit {
            resolve_backboard(&mut state.ball, &contact, &state.tuning);
            log::debug!("Backboard hit ({:?}), vel now {:?}", side, state.ball.vel);
            state.emit(GameEvent::BackboardHit { side });
            return Some(Contact::Backboard(side));
        }
    }

    // Rims: tube first, then the open interior
    for i in 0..state.hoops.len() {
        let side = state.hoops[i].side;
        let rim = state.hoops[i].rim;

        if in_rim_band(state.ball.pos, rim, &state.tuning) {
            if resolve_rim(&mut state.ball, rim, &state.tuning, &mut state.rng) {
                log::debug!("Rim hit ({:?}), vel now {:?}", side, state.ball.vel);
                state.emit(GameEvent::RimHit { side });
                return Some(Contact::Rim(side));
            }
            continue;
        }

        if scoring_pass(&state.ball, rim, &state.tuning) {
            let team = side.scoring_team();
            state.ball.scored = true;
            state.stats.made += 1;
            state.score.award(team, POINTS_PER_BASKET);
            log::info!(
                "Basket at {:?} hoop for {:?} (home {} - away {})",
                side,
                team,
                state.score.home,
                state.score.away
            );
            state.emit(GameEvent::Scored { side, team });
            return Some(Contact::Score(side));
        }
    }

    // Floor
    let radius = state.ball.radius;
    if state.ball.pos.y <= radius {
        return Some(resolve_floor(state));
    }

    // Court bounds
    let pos = state.ball.pos;
    if pos.x.abs() > state.tuning.bounds_x || pos.z.abs() > state.tuning.bounds_z {
        if state.ball.shot_attempted && !state.ball.scored && !state.ball.miss_shown {
            signal_miss(state);
        }
        state.reset_ball(ResetReason::OutOfBounds);
        return Some(Contact::OutOfBounds);
    }

    None
}

fn resolve_floor(state: &mut SimState) -> Contact {
    state.ball.pos.y = state.ball.radius;
    let impact = state.ball.vel.y.abs();

    let tuning = &state.tuning;
    let response = if impact > tuning.floor_bounce_speed {
        Some((
            tuning.floor_bounce_restitution,
            tuning.floor_bounce_friction,
            tuning.floor_jitter,
        ))
    } else if impact > tuning.floor_settle_speed {
        Some((
            tuning.floor_settle_restitution,
            tuning.floor_settle_friction,
            0.0,
        ))
    } else {
        None
    };

    let Some((restitution, friction, jitter_amount)) = response else {
        state.reset_ball(ResetReason::Rest);
        return Contact::Rest;
    };

    let ball = &mut state.ball;
    ball.vel.y = impact * restitution;
    ball.vel.x = ball.vel.x * friction + jitter(&mut state.rng, jitter_amount);
    ball.vel.z = ball.vel.z * friction + jitter(&mut state.rng, jitter_amount);

    log::debug!("Floor bounce at {:.2} m/s", impact);
    state.emit(GameEvent::FloorBounce { speed: impact });
    Contact::Floor(impact)
}
