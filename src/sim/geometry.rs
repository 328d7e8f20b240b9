//! Axis-aligned box geometry for the backboard panels

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

/// Contact between a sphere and a box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoxContact {
    /// Axis of least penetration (0 = x, 1 = y, 2 = z)
    pub axis: usize,
    /// Unit normal pointing from the box toward the sphere
    pub normal: Vec3,
    /// Overlap depth along `axis`
    pub penetration: f32,
}

impl Aabb {
    /// Box from center and full size
    pub fn from_center_size(center: Vec3, size: Vec3) -> Self {
        let half = size * 0.5;
        Self {
            min: center - half,
            max: center + half,
        }
    }

    #[inline]
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    #[inline]
    pub fn half_extents(&self) -> Vec3 {
        (self.max - self.min) * 0.5
    }

    /// Box grown by `r` on every side (sphere center vs expanded box)
    pub fn expanded(&self, r: f32) -> Self {
        Self {
            min: self.min - Vec3::splat(r),
            max: self.max + Vec3::splat(r),
        }
    }

    pub fn contains(&self, p: Vec3) -> bool {
        p.cmpge(self.min).all() && p.cmple(self.max).all()
    }

    /// Sphere vs box overlap, treating the sphere as its bounding cube
    ///
    /// Returns the axis with the smallest overlap and the normal on that
    /// axis pointing away from the box center.
    pub fn sphere_contact(&self, center: Vec3, radius: f32) -> Option<BoxContact> {
        let grown = self.expanded(radius);
        if !grown.contains(center) {
            return None;
        }

        let offset = center - self.center();
        let overlap = grown.half_extents() - offset.abs();

        let mut axis = 0;
        for i in 1..3 {
            if overlap[i] < overlap[axis] {
                axis = i;
            }
        }

        // Center exactly on the box center plane: push toward +axis
        let sign = if offset[axis] < 0.0 { -1.0 } else { 1.0 };
        let mut normal = Vec3::ZERO;
        normal[axis] = sign;

        Some(BoxContact {
            axis,
            normal,
            penetration: overlap[axis],
        })
    }
}
