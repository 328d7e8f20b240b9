//! Trajectory predictor and shot preview
//!
//! The predictor samples the same Euler step the live flight uses, so the
//! preview arc is where the ball will actually go until it reaches the rim.
//! Bounces are not modelled: sampling stops at the net capture zone or just
//! above the floor.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::kinematics::integrate;
use super::shot::{launch_velocity, nearest_hoop};
use super::state::{Hoop, HoopSide, ShotPower};
use crate::consts::BALL_RADIUS;
use crate::horizontal_distance;
use crate::tuning::Tuning;

/// Net capture region under a rim
///
/// Reads the same `Tuning` fields as the scoring check, so the preview only
/// shows a capture where a real shot would count.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CaptureZone {
    pub rim: Vec3,
    pub radius: f32,
    /// How far below the rim plane a sample still counts
    pub height_tolerance: f32,
    pub min_descent_speed: f32,
}

impl CaptureZone {
    pub fn new(rim: Vec3, tuning: &Tuning) -> Self {
        Self {
            rim,
            radius: tuning.rim_inner_radius,
            height_tolerance: tuning.score_height_tolerance,
            min_descent_speed: tuning.score_min_descent_speed,
        }
    }

    /// Ball is dropping into the net
    #[inline]
    pub fn contains(&self, pos: Vec3, vel: Vec3) -> bool {
        let dy = pos.y - self.rim.y;
        vel.y < -self.min_descent_speed
            && dy <= 0.0
            && dy > -self.height_tolerance
            && horizontal_distance(pos, self.rim) < self.radius
    }
}

/// Lazily sampled flight path
///
/// Yields the origin, then one position per step. Finite and single-use;
/// build a new one to sample again.
#[derive(Debug)]
pub struct Trajectory {
    pos: Vec3,
    vel: Vec3,
    gravity: f32,
    dt: f32,
    steps_left: usize,
    capture: Option<CaptureZone>,
    started: bool,
    done: bool,
}

/// Sample a flight path from `origin` with `velocity`
pub fn predict(
    origin: Vec3,
    velocity: Vec3,
    gravity: f32,
    max_steps: usize,
    dt: f32,
) -> Trajectory {
    Trajectory {
        pos: origin,
        vel: velocity,
        gravity,
        dt,
        steps_left: max_steps,
        capture: None,
        started: false,
        done: false,
    }
}

impl Trajectory {
    /// Stop once the ball drops into the net
    pub fn with_capture(mut self, zone: CaptureZone) -> Self {
        self.capture = Some(zone);
        self
    }

    fn should_stop(&self) -> bool {
        if self.pos.y < BALL_RADIUS {
            return true;
        }
        self.capture
            .is_some_and(|zone| zone.contains(self.pos, self.vel))
    }
}

impl Iterator for Trajectory {
    type Item = Vec3;

    fn next(&mut self) -> Option<Vec3> {
        if self.done {
            return None;
        }
        if !self.started {
            self.started = true;
            return Some(self.pos);
        }
        if self.steps_left == 0 {
            self.done = true;
            return None;
        }

        self.steps_left -= 1;
        integrate(&mut self.pos, &mut self.vel, self.gravity, self.dt);
        if self.steps_left == 0 || self.should_stop() {
            self.done = true;
        }
        Some(self.pos)
    }
}

impl std::iter::FusedIterator for Trajectory {}

/// Preview arc plus the helper arrow drawn at its end
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrajectoryPreview {
    pub points: Vec<Vec3>,
    pub arrow_tip: Vec3,
    /// Unit direction of travel at the tip
    pub arrow_dir: Vec3,
    pub target: Option<HoopSide>,
}

impl TrajectoryPreview {
    /// Preview for a shot from `ball_pos` at `power`
    ///
    /// Returns `None` when there is no hoop to aim at.
    pub fn compute(
        ball_pos: Vec3,
        hoops: &[Hoop],
        power: ShotPower,
        tuning: &Tuning,
    ) -> Option<Self> {
        let hoop = nearest_hoop(hoops, ball_pos)?;
        let velocity = launch_velocity(ball_pos, hoop, power);

        let points: Vec<Vec3> = predict(
            ball_pos,
            velocity,
            tuning.gravity,
            tuning.preview_max_steps,
            tuning.preview_dt,
        )
        .with_capture(CaptureZone::new(hoop.rim, tuning))
        .collect();

        let arrow_tip = points.last().copied().unwrap_or(ball_pos);
        let arrow_dir = match points.as_slice() {
            [.., a, b] => (*b - *a).try_normalize(),
            _ => None,
        }
        .or_else(|| velocity.try_normalize())
        .unwrap_or(Vec3::Y);

        Some(Self {
            points,
            arrow_tip,
            arrow_dir,
            target: Some(hoop.side),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;

    #[test]
    fn test_first_sample_is_origin() {
        let origin = Vec3::new(1.0, 2.0, 3.0);
        let mut path = predict(origin, Vec3::X, GRAVITY, 10, SIM_DT);
        assert_eq!(path.next(), Some(origin));
    }

    #[test]
    fn test_respects_max_steps() {
        let path: Vec<Vec3> =
            predict(Vec3::new(0.0, 50.0, 0.0), Vec3::ZERO, GRAVITY, 5, SIM_DT).collect();
        assert_eq!(path.len(), 6);
    }

    #[test]
    fn test_stops_near_ground() {
        let path: Vec<Vec3> =
            predict(Vec3::new(0.0, 2.0, 0.0), Vec3::new(1.0, 3.0, 0.0), GRAVITY, 10_000, SIM_DT)
                .collect();
        assert!(path.len() < 10_000);
        let last = *path.last().unwrap();
        assert!(last.y < BALL_RADIUS);
        // Every earlier sample is still above the threshold
        assert!(path[..path.len() - 1].iter().all(|p| p.y >= BALL_RADIUS));
    }

    #[test]
    fn test_is_fused() {
        let mut path = predict(Vec3::new(0.0, 0.31, 0.0), Vec3::ZERO, GRAVITY, 100, 0.1);
        while path.next().is_some() {}
        assert_eq!(path.next(), None);
        assert_eq!(path.next(), None);
    }

    fn right_zone() -> CaptureZone {
        CaptureZone::new(Vec3::new(13.6, HOOP_HEIGHT, 0.0), &Tuning::default())
    }

    #[test]
    fn test_capture_zone_predicate() {
        let zone = right_zone();
        let down = Vec3::new(0.0, -2.0, 0.0);
        assert!(zone.contains(Vec3::new(13.4, HOOP_HEIGHT, 0.0), down));
        assert!(zone.contains(Vec3::new(13.4, HOOP_HEIGHT - 0.25, 0.0), down));
        // Rising through the rim plane doesn't count
        assert!(!zone.contains(Vec3::new(13.4, HOOP_HEIGHT, 0.0), -down));
        // Drifting down slower than a real make
        assert!(!zone.contains(Vec3::new(13.4, HOOP_HEIGHT, 0.0), Vec3::new(0.0, -0.2, 0.0)));
        // Above the rim doesn't count yet
        assert!(!zone.contains(Vec3::new(13.4, HOOP_HEIGHT + 0.1, 0.0), down));
        // Too far under the rim to be in the net
        assert!(!zone.contains(Vec3::new(13.4, HOOP_HEIGHT - 0.5, 0.0), down));
        assert!(!zone.contains(Vec3::new(13.4, 0.35, 0.0), down));
        // Outside the opening
        assert!(!zone.contains(Vec3::new(13.1, HOOP_HEIGHT, 0.0), down));
    }

    #[test]
    fn test_stops_at_capture() {
        // Drop straight down the middle of the rim
        let zone = right_zone();
        let path: Vec<Vec3> = predict(zone.rim + Vec3::Y * 2.0, Vec3::ZERO, GRAVITY, 10_000, SIM_DT)
            .with_capture(zone)
            .collect();
        let last = *path.last().unwrap();
        assert!(last.y <= zone.rim.y);
        assert!(last.y > zone.rim.y - 0.2);
    }

    #[test]
    fn test_short_arc_under_rim_is_not_captured() {
        // Lob that peaks well below the rim and falls straight under it
        let zone = right_zone();
        let path: Vec<Vec3> = predict(
            Vec3::new(13.5, 2.0, 0.0),
            Vec3::new(0.0, 1.0, 0.0),
            GRAVITY,
            10_000,
            SIM_DT,
        )
        .with_capture(zone)
        .collect();
        let last = *path.last().unwrap();
        assert!(last.y < BALL_RADIUS);
    }

    #[test]
    fn test_preview_tip_is_floor_or_net() {
        let hoops = Hoop::pair();
        let tuning = Tuning::default();
        let rim = hoops[1].rim;
        for i in 0..60 {
            for z in [-0.6, 0.0, 0.6] {
                for power in [30, 50, 70] {
                    let from = Vec3::new(7.0 + i as f32 * 0.05, 0.4, z);
                    let preview =
                        TrajectoryPreview::compute(from, &hoops, ShotPower::new(power), &tuning)
                            .unwrap();
                    let tip = preview.arrow_tip;
                    assert!(
                        tip.y < BALL_RADIUS || tip.y > rim.y - tuning.score_height_tolerance,
                        "preview from {from} at {power}% ended at {tip}"
                    );
                }
            }
        }
    }

    #[test]
    fn test_preview_is_deterministic() {
        let hoops = Hoop::pair();
        let tuning = Tuning::default();
        let from = Vec3::new(9.0, 0.4, 1.5);
        let a = TrajectoryPreview::compute(from, &hoops, ShotPower::new(65), &tuning).unwrap();
        let b = TrajectoryPreview::compute(from, &hoops, ShotPower::new(65), &tuning).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.target, Some(HoopSide::Right));
        assert_eq!(a.points[0], from);
        assert_eq!(a.arrow_tip, *a.points.last().unwrap());
        assert!((a.arrow_dir.length() - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_preview_without_hoops() {
        let tuning = Tuning::default();
        let preview = TrajectoryPreview::compute(Vec3::ZERO, &[], ShotPower::default(), &tuning);
        assert!(preview.is_none());
    }
}
