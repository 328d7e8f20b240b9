//! Shot controller: power to launch velocity, target selection, flight start

use glam::Vec3;

use super::state::{FlightPhase, GameEvent, Hoop, ShotPower, SimState};
use crate::consts::*;

/// Horizontal and vertical launch speed for a power level
///
/// Horizontal speed is linear in power; the vertical component follows
/// from the fixed launch angle.
pub fn launch_speeds(power: ShotPower) -> (f32, f32) {
    let horizontal = LAUNCH_BASE_SPEED + power.fraction() * LAUNCH_POWER_SPEED;
    let vertical = LAUNCH_ANGLE_DEG.to_radians().tan() * horizontal;
    (horizontal, vertical)
}

/// Nearest hoop to `pos` by 3D distance to the rim
///
/// Exact ties go to the left hoop so center court is not decided by
/// float comparison order.
pub fn nearest_hoop(hoops: &[Hoop], pos: Vec3) -> Option<&Hoop> {
    let mut best: Option<(&Hoop, f32)> = None;
    for hoop in hoops {
        let dist = hoop.rim.distance(pos);
        best = match best {
            None => Some((hoop, dist)),
            Some((current, best_dist)) => {
                let closer = dist < best_dist;
                let wins_tie = dist == best_dist && hoop.side.sign() < current.side.sign();
                if closer || wins_tie {
                    Some((hoop, dist))
                } else {
                    Some((current, best_dist))
                }
            }
        };
    }
    best.map(|(hoop, _)| hoop)
}

/// Launch velocity from `from` toward `hoop`'s rim at `power`
pub fn launch_velocity(from: Vec3, hoop: &Hoop, power: ShotPower) -> Vec3 {
    let (horizontal, vertical) = launch_speeds(power);

    let to_rim = Vec3::new(hoop.rim.x - from.x, 0.0, hoop.rim.z - from.z);
    // Ball straight under the rim: aim at the board side
    let dir = to_rim
        .try_normalize()
        .unwrap_or(Vec3::new(hoop.side.sign(), 0.0, 0.0));

    dir * horizontal + Vec3::Y * vertical
}

/// Take a shot at the nearer hoop
///
/// Returns the launch velocity, or `None` when the ball is already flying or
/// there is no hoop to aim at.
pub fn shoot(state: &mut SimState) -> Option<Vec3> {
    if state.ball.in_flight() {
        log::debug!("Shot ignored: ball already in flight");
        return None;
    }

    let hoop = nearest_hoop(&state.hoops, state.ball.pos)?;
    let target = hoop.side;
    let velocity = launch_velocity(state.ball.pos, hoop, state.power);

    let ball = &mut state.ball;
    ball.vel = velocity;
    ball.phase = FlightPhase::InFlight;
    ball.shot_attempted = true;
    ball.scored = false;
    ball.miss_shown = false;

    state.stats.attempts += 1;
    state.clear_preview();

    log::info!(
        "Shot #{} at {:?} hoop, power {}%, velocity {:?}",
        state.stats.attempts,
        target,
        state.power.percent(),
        velocity
    );
    state.emit(GameEvent::ShotTaken { target, velocity });

    Some(velocity)
}
