//! The player's bus and its kinematics
//!
//! Motion is integrated from frame time, never per-frame increments, so
//! the bus handles the same at 30 or 144 fps.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::aabb::Aabb;
use super::input::InputState;
use super::zone::{ZoneKind, ZoneLayout};
use crate::consts::*;
use crate::settings::{ControlModel, DrivingTuning};
use crate::{forward_from_yaw, normalize_angle};

/// The bus
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vehicle {
    /// Ground position (y = 0 on the road)
    pub position: Vec3,
    /// Rotation about +Y (0 faces -Z)
    pub yaw: f32,
    /// Signed speed along the facing direction (negative = reversing)
    pub speed: f32,
    /// Footprint half extents before rotation
    pub half_extents: Vec3,
    /// Zone the last integration clamped against
    #[serde(skip)]
    pub zone: Option<ZoneKind>,
}

impl Default for Vehicle {
    fn default() -> Self {
        Self::at_spawn()
    }
}

impl Vehicle {
    pub fn new(position: Vec3, yaw: f32) -> Self {
        Self {
            position,
            yaw,
            speed: 0.0,
            half_extents: Vec3::from_array(BUS_HALF_EXTENTS),
            zone: None,
        }
    }

    /// Bus parked at the school spawn point
    pub fn at_spawn() -> Self {
        Self::new(Vec3::from_array(BUS_SPAWN), BUS_SPAWN_YAW)
    }

    /// Put the bus back at `position`/`yaw`, stopped
    pub fn reset_to(&mut self, position: Vec3, yaw: f32) {
        self.position = position;
        self.yaw = yaw;
        self.speed = 0.0;
        self.zone = None;
    }

    #[inline]
    pub fn forward(&self) -> Vec3 {
        forward_from_yaw(self.yaw)
    }

    /// World bounding box for this frame
    pub fn bounding_box(&self) -> Aabb {
        Aabb::from_yawed_footprint(self.position, self.half_extents, self.yaw)
    }

    /// Advance one frame, then clamp against the zone layout
    pub fn integrate(
        &mut self,
        input: &InputState,
        dt: f32,
        model: ControlModel,
        tuning: &DrivingTuning,
        zones: &ZoneLayout,
    ) {
        let prev = self.position;

        match model {
            ControlModel::Accelerated => self.integrate_accelerated(input, dt, tuning),
            ControlModel::Direct => self.integrate_direct(input, dt, tuning),
        }

        let (clamped, zone) = zones.clamp_move(prev, self.position);
        self.position = clamped;
        self.zone = zone;
    }

    fn integrate_accelerated(&mut self, input: &InputState, dt: f32, tuning: &DrivingTuning) {
        let throttle = input.throttle();
        if throttle != 0.0 {
            self.speed += throttle * tuning.acceleration * dt;
        } else {
            self.speed *= tuning.decay_for(dt);
        }
        let (min_speed, max_speed) = tuning.speed_limits();
        self.speed = self.speed.clamp(min_speed, max_speed);

        // Steering bites only while rolling; reversing flips it
        if self.speed.abs() > tuning.min_turn_speed {
            let steer = input.steer();
            if steer != 0.0 {
                self.yaw = normalize_angle(
                    self.yaw + steer * tuning.turn_rate * dt * self.speed.signum(),
                );
            }
        }

        self.position += self.forward() * self.speed * dt;
    }

    fn integrate_direct(&mut self, input: &InputState, dt: f32, tuning: &DrivingTuning) {
        let steer = input.steer();
        if steer != 0.0 {
            self.yaw = normalize_angle(self.yaw + steer * tuning.turn_rate * dt);
        }

        self.speed = input.throttle() * tuning.direct_speed;
        self.position += self.forward() * self.speed * dt;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ACCEL: ControlModel = ControlModel::Accelerated;
    const DIRECT: ControlModel = ControlModel::Direct;

    fn held(forward: bool, back: bool, left: bool, right: bool) -> InputState {
        InputState {
            forward,
            back,
            left,
            right,
        }
    }

    /// One frame with default tuning and no zones to clamp against
    fn step(bus: &mut Vehicle, input: &InputState, dt: f32, model: ControlModel) {
        let tuning = DrivingTuning::default();
        bus.integrate(input, dt, model, &tuning, &ZoneLayout::default());
    }

    #[test]
    fn test_throttle_builds_speed_and_caps() {
        let tuning = DrivingTuning::default();
        let mut bus = Vehicle::new(Vec3::ZERO, 0.0);
        let gas = held(true, false, false, false);

        step(&mut bus, &gas, 0.5, ACCEL);
        assert!((bus.speed - 5.0).abs() < 1e-5);
        // yaw 0 drives toward -Z
        assert!(bus.position.z < 0.0);

        for _ in 0..100 {
            step(&mut bus, &gas, 0.1, ACCEL);
        }
        assert_eq!(bus.speed, tuning.max_speed);
    }

    #[test]
    fn test_reverse_is_capped_lower() {
        let tuning = DrivingTuning::default();
        let mut bus = Vehicle::new(Vec3::ZERO, 0.0);
        let reverse = held(false, true, false, false);
        for _ in 0..100 {
            step(&mut bus, &reverse, 0.1, ACCEL);
        }
        assert_eq!(bus.speed, -tuning.max_speed * tuning.reverse_factor);
        assert!(bus.position.z > 0.0);
    }

    #[test]
    fn test_coasting_decays_toward_zero() {
        let mut bus = Vehicle::new(Vec3::ZERO, 0.0);
        bus.speed = 10.0;
        step(&mut bus, &InputState::default(), 1.0 / 60.0, ACCEL);
        assert!((bus.speed - 9.8).abs() < 1e-4);

        for _ in 0..600 {
            step(&mut bus, &InputState::default(), 1.0 / 60.0, ACCEL);
        }
        assert!(bus.speed.abs() < 0.1);
    }

    #[test]
    fn test_no_steering_when_stopped() {
        let mut bus = Vehicle::new(Vec3::ZERO, 0.0);
        step(&mut bus, &held(false, false, true, false), 0.1, ACCEL);
        assert_eq!(bus.yaw, 0.0);
    }

    #[test]
    fn test_reversing_inverts_steering() {
        let left = held(false, false, true, false);

        let mut ahead = Vehicle::new(Vec3::ZERO, 0.0);
        ahead.speed = 5.0;
        step(&mut ahead, &left, 0.1, ACCEL);
        assert!(ahead.yaw > 0.0);

        let mut backing = Vehicle::new(Vec3::ZERO, 0.0);
        backing.speed = -5.0;
        step(&mut backing, &left, 0.1, ACCEL);
        assert!(backing.yaw < 0.0);
    }

    #[test]
    fn test_extreme_turn_rate_keeps_yaw_bounded() {
        use std::f32::consts::PI;

        // Bypasses settings validation on purpose
        let tuning = DrivingTuning {
            turn_rate: 1.0e12,
            ..Default::default()
        };
        let left = held(false, false, true, false);
        let mut bus = Vehicle::new(Vec3::ZERO, 0.0);
        bus.speed = 5.0;
        for _ in 0..10 {
            bus.integrate(&left, 1.0 / 60.0, ACCEL, &tuning, &ZoneLayout::default());
            assert!((-PI..=PI).contains(&bus.yaw));
        }
    }

    #[test]
    fn test_direct_model_stops_on_release() {
        let tuning = DrivingTuning::default();
        let mut bus = Vehicle::new(Vec3::ZERO, 0.0);
        step(&mut bus, &held(true, false, false, false), 0.5, DIRECT);
        assert!((bus.position.z + 7.5).abs() < 1e-4);
        assert_eq!(bus.speed, tuning.direct_speed);

        step(&mut bus, &InputState::default(), 0.5, DIRECT);
        assert_eq!(bus.speed, 0.0);
        assert!((bus.position.z + 7.5).abs() < 1e-4);

        // Direct model turns in place
        step(&mut bus, &held(false, false, false, true), 0.5, DIRECT);
        assert!(bus.yaw < 0.0);
    }

    #[test]
    fn test_clamped_against_highway_edge() {
        use super::super::zone::Zone;
        use glam::Vec2;

        let zones = ZoneLayout::new(vec![Zone::new(
            ZoneKind::MainHighway,
            Vec2::new(-12.0, -510.0),
            Vec2::new(12.0, 10.0),
        )]);
        let tuning = DrivingTuning::default();
        // Facing +X (yaw -π/2) right at the edge
        let yaw = -std::f32::consts::FRAC_PI_2;
        let mut bus = Vehicle::new(Vec3::new(11.9, 0.0, -100.0), yaw);
        bus.speed = 10.0;
        for _ in 0..10 {
            bus.integrate(&InputState::default(), 0.1, ACCEL, &tuning, &zones);
            assert!(bus.position.x <= 12.0);
        }
        assert_eq!(bus.zone, Some(ZoneKind::MainHighway));
    }

    #[test]
    fn test_bounding_box_rests_on_ground() {
        let bus = Vehicle::at_spawn();
        let bb = bus.bounding_box();
        assert!(bb.min.y.abs() < 1e-6);
        assert!(((bb.min.x + bb.max.x) * 0.5 - BUS_SPAWN[0]).abs() < 1e-4);
    }
}
