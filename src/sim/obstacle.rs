//! Traffic and livestock
//!
//! Vehicles drive their lane along z and wrap from one end of the road to
//! the other. Cows stand still. Both get shoved back along z after the bus
//! hits them so one contact scores one infraction.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::aabb::Aabb;
use crate::consts::*;

/// Obstacle behaviour tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ObstacleKind {
    Car,
    Motorbike,
    Truck,
    Bicycle,
    Cow,
}

impl ObstacleKind {
    /// Vehicles that drive around the lane loop
    pub const VEHICLES: [ObstacleKind; 4] = [
        ObstacleKind::Car,
        ObstacleKind::Motorbike,
        ObstacleKind::Truck,
        ObstacleKind::Bicycle,
    ];

    /// True for anything that drives
    pub fn is_vehicle(&self) -> bool {
        !matches!(self, ObstacleKind::Cow)
    }

    /// Name used in the event log
    pub fn name(&self) -> &'static str {
        match self {
            ObstacleKind::Car => "car",
            ObstacleKind::Motorbike => "motorbike",
            ObstacleKind::Truck => "truck",
            ObstacleKind::Bicycle => "bicycle",
            ObstacleKind::Cow => "cow",
        }
    }

    /// Footprint half extents (x = width, y = height, z = length)
    pub fn half_extents(&self) -> Vec3 {
        match self {
            ObstacleKind::Car => Vec3::new(0.9, 0.8, 2.0),
            ObstacleKind::Motorbike => Vec3::new(0.25, 0.5, 1.05),
            ObstacleKind::Truck => Vec3::new(1.25, 1.4, 4.3),
            ObstacleKind::Bicycle => Vec3::new(0.3, 0.5, 1.05),
            ObstacleKind::Cow => Vec3::new(0.6, 0.75, 1.55),
        }
    }
}

/// An obstacle on or beside the road
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: u32,
    pub kind: ObstacleKind,
    /// Ground position
    pub position: Vec3,
    /// Lane speed (units/s), ignored for cows
    pub speed: f32,
    /// +1 or -1 along z, ignored for cows
    pub direction: f32,
}

impl Obstacle {
    pub fn vehicle(
        id: u32,
        kind: ObstacleKind,
        position: Vec3,
        speed: f32,
        direction: f32,
    ) -> Self {
        Self {
            id,
            kind,
            position,
            speed,
            direction: if direction < 0.0 { -1.0 } else { 1.0 },
        }
    }

    pub fn cow(id: u32, position: Vec3) -> Self {
        Self {
            id,
            kind: ObstacleKind::Cow,
            position,
            speed: 0.0,
            direction: 1.0,
        }
    }

    /// Drive along the lane; past the bound ahead, teleport to the bound
    /// behind. Cows do not move.
    pub fn advance(&mut self, dt: f32) {
        if !self.kind.is_vehicle() {
            return;
        }

        self.position.z += self.speed * self.direction * dt;
        self.wrap();
    }

    /// Only the bound in the direction of travel wraps. A vehicle nudged
    /// past the bound behind it drives back into range on its own.
    fn wrap(&mut self) {
        if self.direction > 0.0 && self.position.z > OBSTACLE_Z_MAX {
            self.position.z = OBSTACLE_Z_MIN;
        } else if self.direction < 0.0 && self.position.z < OBSTACLE_Z_MIN {
            self.position.z = OBSTACLE_Z_MAX;
        }
    }

    /// World bounding box for this frame. Lane yaw is 0 or π, which leaves
    /// the box unchanged, so the footprint is used as-is.
    pub fn bounding_box(&self) -> Aabb {
        let half = self.kind.half_extents();
        Aabb::from_center_half_extents(self.position + Vec3::Y * half.y, half)
    }

    /// Push the obstacle back along z, away from where it was heading.
    /// Cows are pushed toward +z.
    pub fn nudge_away(&mut self) {
        let sign = if self.kind.is_vehicle() {
            -self.direction
        } else {
            1.0
        };
        self.position.z += OBSTACLE_NUDGE * sign;
    }
}
