//! Student pickup zones

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::aabb::Aabb;
use crate::consts::PICKUP_INFLATE;

/// Student standing footprint (x, y, z half extents)
pub const STUDENT_HALF_EXTENTS: Vec3 = Vec3::new(0.3, 0.75, 0.3);

/// A student waiting at a stop, paired with the zone the bus must stop in.
///
/// `active` doubles as the student's visibility. It only ever goes from
/// true to false; records are never removed so indices stay stable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PickupZone {
    pub id: u32,
    /// Student ground position
    pub position: Vec3,
    /// Student footprint grown by `PICKUP_INFLATE`, fixed for the session
    pub zone: Aabb,
    pub active: bool,
}

impl PickupZone {
    pub fn new(id: u32, position: Vec3) -> Self {
        let footprint = Aabb::from_center_half_extents(
            position + Vec3::Y * STUDENT_HALF_EXTENTS.y,
            STUDENT_HALF_EXTENTS,
        );
        Self {
            id,
            position,
            zone: footprint.expanded(Vec3::splat(PICKUP_INFLATE)),
            active: true,
        }
    }

    /// True if the bus box is inside a still-active zone
    #[inline]
    pub fn reachable_by(&self, bus: &Aabb) -> bool {
        self.active && self.zone.intersects(bus)
    }

    /// Disable the zone. Returns false if it was already collected.
    pub fn collect(&mut self) -> bool {
        std::mem::replace(&mut self.active, false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zone_is_inflated_footprint() {
        let pickup = PickupZone::new(1, Vec3::new(13.0, 0.0, -80.0));
        let half = (pickup.zone.max - pickup.zone.min) * 0.5;
        assert!((half.x - 3.3).abs() < 1e-5);
        assert!((half.y - 3.75).abs() < 1e-5);
        assert!((pickup.zone.min.y + 3.0).abs() < 1e-5);
    }

    #[test]
    fn test_collect_is_one_shot() {
        let mut pickup = PickupZone::new(1, Vec3::ZERO);
        let bus = Aabb::from_center_half_extents(Vec3::new(2.0, 1.0, 0.0), Vec3::ONE);
        assert!(pickup.reachable_by(&bus));
        assert!(pickup.collect());
        assert!(!pickup.collect());
        assert!(!pickup.reachable_by(&bus));
    }
}
