//! Highway Hero - drive the school bus, pick up every student, get back to school
//!
//! Core modules:
//! - `sim`: Frame-driven simulation (kinematics, collisions, mission state)
//! - `camera`: Chase camera framing (reads the bus transform, never writes)
//! - `settings`: Driving tuning and game options
//! - `error`: Error types for rejected commands and bad settings

pub mod camera;
pub mod error;
pub mod settings;
pub mod sim;

pub use error::{SettingsError, TransitionError};
pub use settings::{ControlModel, DrivingTuning, FinishMode, Settings};

use glam::Vec3;

/// Game configuration constants
pub mod consts {
    /// Largest frame delta fed to the simulation (seconds)
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Score awarded per student picked up
    pub const PICKUP_REWARD: u32 = 10;
    /// Score removed per collision (score floors at 0)
    pub const COLLISION_PENALTY: u32 = 5;

    /// Event log capacity (oldest entries dropped past this)
    pub const LOG_CAPACITY: usize = 20;

    /// Coach fires once the infraction counter exceeds this
    pub const COACH_INFRACTION_THRESHOLD: u32 = 2;
    /// Seconds a coach tip stays on screen
    pub const COACH_TIP_DURATION: f32 = 5.0;

    /// Obstacle lane travel bounds along z (wrap, not bounce)
    pub const OBSTACLE_Z_MIN: f32 = -510.0;
    pub const OBSTACLE_Z_MAX: f32 = 20.0;
    /// Distance an obstacle is pushed back along its lane after a hit
    pub const OBSTACLE_NUDGE: f32 = 20.0;

    /// Pickup boxes are the student footprint grown by this on every axis
    pub const PICKUP_INFLATE: f32 = 3.0;

    /// Bus footprint half extents (x = width, y = height, z = length)
    pub const BUS_HALF_EXTENTS: [f32; 3] = [1.45, 1.7, 5.25];
    /// Bus spawn point inside the school compound
    pub const BUS_SPAWN: [f32; 3] = [20.0, 0.0, 180.0];
    /// Bus spawn yaw (radians, 0 faces down the sub-road toward the highway)
    pub const BUS_SPAWN_YAW: f32 = 0.0;
}

/// Normalized angle to [-π, π)
#[inline]
pub fn normalize_angle(angle: f32) -> f32 {
    use std::f32::consts::{PI, TAU};
    (angle + PI).rem_euclid(TAU) - PI
}

/// Forward unit vector for a yaw about +Y (yaw 0 faces -Z)
#[inline]
pub fn forward_from_yaw(yaw: f32) -> Vec3 {
    Vec3::new(-yaw.sin(), 0.0, -yaw.cos())
}

/// Format session seconds as `mm:ss`
pub fn format_clock(secs: f32) -> String {
    let total = secs.max(0.0) as u32;
    format!("{:02}:{:02}", total / 60, total % 60)
}
