//! Axis-aligned bounding boxes
//!
//! Every collider in the game (bus, traffic, cows, pickup zones, the finish
//! box) is reduced to one of these each frame. Boxes are rebuilt from the
//! current transform every time; nothing is cached.

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// An axis-aligned box in world space
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self {
            min: min.min(max),
            max: min.max(max),
        }
    }

    pub fn from_center_half_extents(center: Vec3, half: Vec3) -> Self {
        let half = half.abs();
        Self {
            min: center - half,
            max: center + half,
        }
    }

    /// Box around a footprint resting on the ground at `base`, rotated by
    /// `yaw` about +Y. The result encloses the rotated footprint.
    pub fn from_yawed_footprint(base: Vec3, half: Vec3, yaw: f32) -> Self {
        let (sin, cos) = yaw.sin_cos();
        let (sin, cos) = (sin.abs(), cos.abs());
        let rotated = Vec3::new(
            cos * half.x + sin * half.z,
            half.y,
            sin * half.x + cos * half.z,
        );
        Self::from_center_half_extents(base + Vec3::Y * half.y, rotated)
    }

    /// Overlap on all three axes. Touching faces count as overlap.
    #[inline]
    pub fn intersects(&self, other: &Aabb) -> bool {
        self.min.x <= other.max.x
            && self.max.x >= other.min.x
            && self.min.y <= other.max.y
            && self.max.y >= other.min.y
            && self.min.z <= other.max.z
            && self.max.z >= other.min.z
    }

    /// Grow the box by `amount` on every side of every axis
    pub fn expanded(&self, amount: Vec3) -> Self {
        Self::new(self.min - amount, self.max + amount)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    fn half_extents(b: &Aabb) -> Vec3 {
        (b.max - b.min) * 0.5
    }

    #[test]
    fn test_touching_counts_as_hit() {
        let a = Aabb::new(Vec3::ZERO, Vec3::ONE);
        let b = Aabb::new(Vec3::new(1.0, 0.0, 0.0), Vec3::new(2.0, 1.0, 1.0));
        assert!(a.intersects(&b));
        assert!(b.intersects(&a));

        let c = Aabb::new(Vec3::new(1.001, 0.0, 0.0), Vec3::new(2.001, 1.0, 1.0));
        assert!(!a.intersects(&c));
    }

    #[test]
    fn test_needs_overlap_on_every_axis() {
        let a = Aabb::new(Vec3::ZERO, Vec3::ONE);
        // Overlaps in x and z, sits above in y
        let b = Aabb::new(Vec3::new(0.5, 2.0, 0.5), Vec3::new(1.5, 3.0, 1.5));
        assert!(!a.intersects(&b));
    }

    #[test]
    fn test_yawed_footprint_swaps_axes_at_right_angle() {
        let half = Vec3::new(1.0, 0.5, 4.0);
        let straight = Aabb::from_yawed_footprint(Vec3::ZERO, half, 0.0);
        assert!((half_extents(&straight) - half).length() < 1e-5);
        assert!((straight.min.y).abs() < 1e-6);

        let turned = Aabb::from_yawed_footprint(Vec3::ZERO, half, FRAC_PI_2);
        let h = half_extents(&turned);
        assert!((h.x - 4.0).abs() < 1e-4);
        assert!((h.z - 1.0).abs() < 1e-4);
    }

    #[test]
    fn test_expanded_and_sorted() {
        let a = Aabb::from_center_half_extents(Vec3::ZERO, Vec3::splat(0.5));
        let grown = a.expanded(Vec3::splat(3.0));
        assert_eq!(grown.min, Vec3::splat(-3.5));
        assert_eq!(grown.max, Vec3::splat(3.5));
        // new() sorts its corners
        let flipped = Aabb::new(Vec3::ONE, Vec3::ZERO);
        assert_eq!(flipped.min, Vec3::ZERO);
    }
}
