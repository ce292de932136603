//! Collision queries between the bus and everything else
//!
//! Brute force over a few dozen boxes per frame. Each query returns indices
//! into the slice it was given so the caller can mutate afterwards.

use super::aabb::Aabb;
use super::obstacle::Obstacle;
use super::pickup::PickupZone;

/// Indices of obstacles whose box overlaps the bus this frame
pub fn obstacle_contacts(bus: &Aabb, obstacles: &[Obstacle]) -> Vec<usize> {
    obstacles
        .iter()
        .enumerate()
        .filter(|(_, o)| o.bounding_box().intersects(bus))
        .map(|(i, _)| i)
        .collect()
}

/// Indices of still-active pickup zones the bus is inside.
///
/// Returns nothing unless the bus is slower than `speed_threshold`:
/// students only board a stopped bus.
pub fn pickup_contacts(
    bus: &Aabb,
    bus_speed: f32,
    speed_threshold: f32,
    pickups: &[PickupZone],
) -> Vec<usize> {
    if bus_speed.abs() >= speed_threshold {
        return Vec::new();
    }
    pickups
        .iter()
        .enumerate()
        .filter(|(_, p)| p.reachable_by(bus))
        .map(|(i, _)| i)
        .collect()
}

/// Bus overlaps the finish box
#[inline]
pub fn reached_finish(bus: &Aabb, finish: &Aabb) -> bool {
    bus.intersects(finish)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::obstacle::ObstacleKind;
    use crate::sim::vehicle::Vehicle;
    use glam::Vec3;

    #[test]
    fn test_obstacle_contacts() {
        let bus = Vehicle::new(Vec3::new(6.0, 0.0, -100.0), 0.0).bounding_box();
        let obstacles = vec![
            Obstacle::vehicle(1, ObstacleKind::Car, Vec3::new(6.0, 0.0, -106.0), 10.0, 1.0),
            Obstacle::vehicle(2, ObstacleKind::Car, Vec3::new(-6.0, 0.0, -100.0), 10.0, -1.0),
            Obstacle::cow(3, Vec3::new(7.0, 0.0, -95.0)),
        ];
        assert_eq!(obstacle_contacts(&bus, &obstacles), vec![0, 2]);
    }

    #[test]
    fn test_pickup_needs_slow_bus() {
        let bus = Vehicle::new(Vec3::new(12.0, 0.0, -80.0), 0.0).bounding_box();
        let mut pickups = vec![
            PickupZone::new(1, Vec3::new(13.0, 0.0, -80.0)),
            PickupZone::new(2, Vec3::new(13.0, 0.0, -150.0)),
        ];
        assert_eq!(pickup_contacts(&bus, 0.5, 1.0, &pickups), vec![0]);
        assert!(pickup_contacts(&bus, 1.0, 1.0, &pickups).is_empty());
        assert!(pickup_contacts(&bus, -3.0, 1.0, &pickups).is_empty());

        pickups[0].collect();
        assert!(pickup_contacts(&bus, 0.0, 1.0, &pickups).is_empty());
    }

    #[test]
    fn test_reached_finish() {
        let finish = Aabb::new(Vec3::new(15.0, -1.0, 180.0), Vec3::new(40.0, 10.0, 200.0));
        let home = Vehicle::new(Vec3::new(20.0, 0.0, 185.0), 0.0).bounding_box();
        let away = Vehicle::new(Vec3::new(20.0, 0.0, 100.0), 0.0).bounding_box();
        assert!(reached_finish(&home, &finish));
        assert!(!reached_finish(&away, &finish));
    }
}
