//! Road zones and position clamping
//!
//! Zones are rectangles on the ground plane. Whichever zone the bus is in
//! decides the box its position is clamped to. Where zones overlap the
//! higher precedence kind wins: compound, then sub-road, then highway.

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

/// Region kinds, lowest precedence first (the derived `Ord` is the precedence)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ZoneKind {
    MainHighway,
    SubRoad,
    SchoolCompound,
}

impl ZoneKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ZoneKind::MainHighway => "highway",
            ZoneKind::SubRoad => "sub-road",
            ZoneKind::SchoolCompound => "school compound",
        }
    }
}

/// Ground rectangle. `Vec2::x` is world x, `Vec2::y` is world z.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Zone {
    pub kind: ZoneKind,
    pub min: Vec2,
    pub max: Vec2,
}

impl Zone {
    pub fn new(kind: ZoneKind, min: Vec2, max: Vec2) -> Self {
        Self {
            kind,
            min: min.min(max),
            max: min.max(max),
        }
    }

    /// Inclusive containment of a world position (y ignored)
    #[inline]
    pub fn contains(&self, pos: Vec3) -> bool {
        let p = ground(pos);
        p.cmpge(self.min).all() && p.cmple(self.max).all()
    }

    /// Per-axis clamp of x and z into the rectangle; y passes through
    #[inline]
    pub fn clamp(&self, pos: Vec3) -> Vec3 {
        let p = ground(pos).clamp(self.min, self.max);
        Vec3::new(p.x, pos.y, p.y)
    }
}

#[inline]
fn ground(pos: Vec3) -> Vec2 {
    Vec2::new(pos.x, pos.z)
}

/// All zones of a map
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ZoneLayout {
    pub zones: Vec<Zone>,
}

impl ZoneLayout {
    pub fn new(zones: Vec<Zone>) -> Self {
        Self { zones }
    }

    /// Highest-precedence zone containing `pos`
    pub fn classify(&self, pos: Vec3) -> Option<&Zone> {
        self.zones
            .iter()
            .filter(|z| z.contains(pos))
            .max_by_key(|z| z.kind)
    }

    /// Zone governing a move from `prev` to `next`.
    ///
    /// The destination decides when it lies in any zone. A destination
    /// outside every zone is held to the zone the move started from. If
    /// neither point is in a zone there is nothing to clamp to.
    pub fn governing(&self, prev: Vec3, next: Vec3) -> Option<&Zone> {
        self.classify(next).or_else(|| self.classify(prev))
    }

    /// Clamp a move's destination into its governing zone
    pub fn clamp_move(&self, prev: Vec3, next: Vec3) -> (Vec3, Option<ZoneKind>) {
        match self.governing(prev, next) {
            Some(zone) => (zone.clamp(next), Some(zone.kind)),
            None => (next, None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn layout() -> ZoneLayout {
        ZoneLayout::new(vec![
            Zone::new(ZoneKind::MainHighway, Vec2::new(-12.0, -510.0), Vec2::new(12.0, 10.0)),
            Zone::new(ZoneKind::SubRoad, Vec2::new(8.0, 0.0), Vec2::new(25.0, 180.0)),
            Zone::new(ZoneKind::SchoolCompound, Vec2::new(0.0, 170.0), Vec2::new(40.0, 200.0)),
        ])
    }

    #[test]
    fn test_precedence_in_overlaps() {
        let layout = layout();
        // Highway and sub-road overlap
        let kind = layout.classify(Vec3::new(10.0, 0.0, 5.0)).map(|z| z.kind);
        assert_eq!(kind, Some(ZoneKind::SubRoad));
        // Sub-road and compound overlap
        let kind = layout.classify(Vec3::new(20.0, 0.0, 175.0)).map(|z| z.kind);
        assert_eq!(kind, Some(ZoneKind::SchoolCompound));
        // Highway only
        let kind = layout.classify(Vec3::new(-5.0, 0.0, -200.0)).map(|z| z.kind);
        assert_eq!(kind, Some(ZoneKind::MainHighway));
        assert!(layout.classify(Vec3::new(100.0, 0.0, 0.0)).is_none());
    }

    #[test]
    fn test_leaving_road_is_pushed_back() {
        let layout = layout();
        let prev = Vec3::new(11.5, 0.0, -200.0);
        let next = Vec3::new(12.8, 0.0, -201.0);
        let (pos, kind) = layout.clamp_move(prev, next);
        assert_eq!(kind, Some(ZoneKind::MainHighway));
        assert_eq!(pos.x, 12.0);
        assert_eq!(pos.z, -201.0);
    }

    #[test]
    fn test_outside_every_zone_is_left_alone() {
        let layout = layout();
        let prev = Vec3::new(100.0, 0.0, 0.0);
        let next = Vec3::new(101.0, 0.0, 0.0);
        assert_eq!(layout.clamp_move(prev, next), (next, None));
    }

    #[test]
    fn test_clamp_keeps_height() {
        let zone = Zone::new(ZoneKind::SubRoad, Vec2::new(8.0, 0.0), Vec2::new(25.0, 180.0));
        let pos = zone.clamp(Vec3::new(30.0, 1.5, -4.0));
        assert_eq!(pos, Vec3::new(25.0, 1.5, 0.0));
    }

    proptest! {
        #[test]
        fn prop_clamped_position_stays_in_governing_zone(
            px in -60.0f32..60.0, pz in -600.0f32..260.0,
            dx in -5.0f32..5.0, dz in -5.0f32..5.0,
        ) {
            let layout = layout();
            let prev = Vec3::new(px, 0.0, pz);
            let next = prev + Vec3::new(dx, 0.0, dz);
            let (pos, kind) = layout.clamp_move(prev, next);
            if let Some(zone) = layout.governing(prev, next) {
                prop_assert_eq!(Some(zone.kind), kind);
                prop_assert!(zone.contains(pos));
            } else {
                prop_assert_eq!(pos, next);
            }
        }
    }
}
