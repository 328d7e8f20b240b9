//! Projectile kinematics shared by the live flight and the preview
//!
//! Semi-implicit Euler: velocity picks up gravity first, then position moves
//! by the updated velocity. The preview must use exactly this step or the arc
//! drawn on screen drifts away from the real flight.

use glam::{Quat, Vec3};

/// Advance one Euler step under gravity along Y
#[inline]
pub fn integrate(pos: &mut Vec3, vel: &mut Vec3, gravity: f32, dt: f32) {
    vel.y += gravity * dt;
    *pos += *vel * dt;
}

/// Reflect a velocity about a unit surface normal: v' = v - 2(v·n)n
#[inline]
pub fn reflect(velocity: Vec3, normal: Vec3) -> Vec3 {
    velocity - 2.0 * velocity.dot(normal) * normal
}

/// Angular velocity of a ball rolling without slip along `velocity`
///
/// Only horizontal motion contributes; a purely vertical drop doesn't spin.
#[inline]
pub fn rolling_angular_velocity(velocity: Vec3, radius: f32) -> Vec3 {
    if radius <= 0.0 {
        return Vec3::ZERO;
    }
    Vec3::Y.cross(Vec3::new(velocity.x, 0.0, velocity.z)) / radius
}

/// Rotate `orientation` by `angular_velocity` over `dt`
///
/// Skips the update for a (near) zero rotation so we never build a rotation
/// from a zero-length axis.
pub fn spin(orientation: Quat, angular_velocity: Vec3, dt: f32) -> Quat {
    let scaled = angular_velocity * dt;
    if scaled.length_squared() < 1e-12 {
        return orientation;
    }
    (Quat::from_scaled_axis(scaled) * orientation).normalize()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integrate_applies_gravity_before_position() {
        let mut pos = Vec3::new(0.0, 1.0, 0.0);
        let mut vel = Vec3::new(1.0, 0.0, 0.0);
        integrate(&mut pos, &mut vel, -10.0, 0.1);
        assert!((vel.y - (-1.0)).abs() < 1e-6);
        assert!((pos.y - 0.9).abs() < 1e-6);
        assert!((pos.x - 0.1).abs() < 1e-6);
    }

    #[test]
    fn test_reflect() {
        let v = reflect(Vec3::new(3.0, -2.0, 0.0), Vec3::Y);
        assert_eq!(v, Vec3::new(3.0, 2.0, 0.0));
    }

    #[test]
    fn test_rolling_axis() {
        // Rolling toward +x spins about -z
        let w = rolling_angular_velocity(Vec3::new(0.6, 5.0, 0.0), 0.3);
        assert!((w - Vec3::new(0.0, 0.0, -2.0)).length() < 1e-5);
        assert_eq!(rolling_angular_velocity(Vec3::new(0.0, -3.0, 0.0), 0.3), Vec3::ZERO);
    }

    #[test]
    fn test_spin_zero_is_identity() {
        let q = Quat::from_rotation_y(0.5);
        assert_eq!(spin(q, Vec3::ZERO, 0.1), q);
    }
}
