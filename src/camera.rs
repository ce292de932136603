//! Chase camera
//!
//! Follows the bus from behind and above while driving, and slowly orbits
//! the parked bus on the menu. Reads the bus transform, never writes it.

use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

use crate::sim::{MissionPhase, Vehicle};

/// Camera offset behind the bus in bus space (yaw 0 faces -Z)
pub const CHASE_OFFSET: Vec3 = Vec3::new(0.0, 7.0, 12.0);
/// Fraction of the remaining distance closed per 60 Hz frame
pub const CHASE_LERP: f32 = 0.1;
/// Frame rate `CHASE_LERP` is expressed against
const LERP_REFERENCE_HZ: f32 = 60.0;

/// Menu orbit centre (x, z), radius, height and angular speed
const ORBIT_CENTER: (f32, f32) = (10.0, 195.0);
const ORBIT_RADIUS: f32 = 5.0;
const ORBIT_HEIGHT: f32 = 5.0;
const ORBIT_SPEED: f32 = 0.2;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChaseCamera {
    pub position: Vec3,
    /// Look-at point
    pub target: Vec3,
}

impl ChaseCamera {
    /// Camera already settled behind `vehicle`
    pub fn behind(vehicle: &Vehicle) -> Self {
        Self {
            position: desired_position(vehicle),
            target: vehicle.position,
        }
    }

    /// Ease toward the chase point behind `vehicle`
    pub fn follow(&mut self, vehicle: &Vehicle, dt: f32) {
        let t = 1.0 - (1.0 - CHASE_LERP).powf(dt.max(0.0) * LERP_REFERENCE_HZ);
        self.position = self.position.lerp(desired_position(vehicle), t);
        self.target = vehicle.position;
    }

    /// Slow circle around the school, looking at the bus
    pub fn orbit(&mut self, vehicle: &Vehicle, time: f32) {
        let angle = time * ORBIT_SPEED;
        self.position = Vec3::new(
            ORBIT_CENTER.0 + angle.sin() * ORBIT_RADIUS,
            ORBIT_HEIGHT,
            ORBIT_CENTER.1 + angle.cos() * ORBIT_RADIUS,
        );
        self.target = vehicle.position;
    }

    /// Orbit on the menu, chase otherwise
    pub fn update(&mut self, phase: MissionPhase, vehicle: &Vehicle, dt: f32, time: f32) {
        match phase {
            MissionPhase::Menu => self.orbit(vehicle, time),
            MissionPhase::Playing | MissionPhase::Finished => self.follow(vehicle, dt),
        }
    }
}

fn desired_position(vehicle: &Vehicle) -> Vec3 {
    vehicle.position + Quat::from_rotation_y(vehicle.yaw) * CHASE_OFFSET
}
