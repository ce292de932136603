//! World contents handed to a session
//!
//! The scene builder (meshes, materials, scenery) lives elsewhere. What the
//! simulation needs from it is just this: the road zones, the finish box,
//! the spawn transform, the obstacles and where the students stand.

use glam::{Vec2, Vec3};
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::aabb::Aabb;
use super::obstacle::{Obstacle, ObstacleKind};
use super::zone::{Zone, ZoneKind, ZoneLayout};
use crate::consts::*;

/// Bus stop positions along the highway (z)
pub const BUS_STOPS: [f32; 5] = [-80.0, -150.0, -250.0, -350.0, -450.0];
/// Students waiting at each stop
pub const STUDENTS_PER_STOP: usize = 2;
/// Moving vehicles in a generated world
pub const TRAFFIC_COUNT: usize = 20;
/// Cows in a generated world
pub const COW_COUNT: usize = 5;

/// Static road geometry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorldLayout {
    pub zones: ZoneLayout,
    /// Drop-off box at the school; reaching it with everyone aboard wins
    pub finish: Aabb,
    pub spawn_position: Vec3,
    pub spawn_yaw: f32,
}

impl Default for WorldLayout {
    fn default() -> Self {
        Self {
            zones: ZoneLayout::new(vec![
                Zone::new(
                    ZoneKind::MainHighway,
                    Vec2::new(-12.0, -510.0),
                    Vec2::new(12.0, 10.0),
                ),
                Zone::new(ZoneKind::SubRoad, Vec2::new(8.0, 0.0), Vec2::new(25.0, 180.0)),
                Zone::new(
                    ZoneKind::SchoolCompound,
                    Vec2::new(0.0, 170.0),
                    Vec2::new(40.0, 200.0),
                ),
            ]),
            finish: Aabb::new(Vec3::new(15.0, -1.0, 180.0), Vec3::new(40.0, 10.0, 200.0)),
            spawn_position: Vec3::from_array(BUS_SPAWN),
            spawn_yaw: BUS_SPAWN_YAW,
        }
    }
}

/// Everything a session starts from
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct World {
    pub layout: WorldLayout,
    pub obstacles: Vec<Obstacle>,
    /// Ground positions of students waiting for the bus
    pub students: Vec<Vec3>,
}

impl World {
    /// Layout only, no traffic and no students
    pub fn empty() -> Self {
        Self::default()
    }
}

/// Build the standard map with seeded traffic, cows and students
pub fn generate_world(seed: u64) -> World {
    let mut rng = Pcg32::seed_from_u64(seed);
    let mut world = World::empty();

    for &stop_z in &BUS_STOPS {
        for _ in 0..STUDENTS_PER_STOP {
            let x = 13.0 + rng.random::<f32>();
            let z = stop_z + (rng.random::<f32>() - 0.5) * 5.0;
            world.students.push(Vec3::new(x, 0.0, z));
        }
    }

    let mut next_id = 1;
    for _ in 0..TRAFFIC_COUNT {
        let kind = ObstacleKind::VEHICLES[rng.random_range(0..ObstacleKind::VEHICLES.len())];
        // Left lane heads out along -z, right lane comes back along +z
        let left_lane = rng.random_bool(0.5);
        let (x, direction) = if left_lane { (-6.0, -1.0) } else { (6.0, 1.0) };
        let z = -rng.random::<f32>() * 500.0;
        let speed = 10.0 + rng.random::<f32>() * 20.0;
        world.obstacles.push(Obstacle::vehicle(
            next_id,
            kind,
            Vec3::new(x, 0.0, z),
            speed,
            direction,
        ));
        next_id += 1;
    }

    for i in 0..COW_COUNT {
        let x = (rng.random::<f32>() - 0.5) * 20.0;
        let z = -100.0 - i as f32 * 80.0 - rng.random::<f32>() * 60.0;
        world.obstacles.push(Obstacle::cow(next_id, Vec3::new(x, 0.0, z)));
        next_id += 1;
    }

    log::debug!(
        "Generated world (seed {}): {} students, {} obstacles",
        seed,
        world.students.len(),
        world.obstacles.len()
    );

    world
}
