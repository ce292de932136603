//! Frame-driven simulation module
//!
//! All gameplay logic lives here:
//! - Variable Δt, capped per frame
//! - Seeded RNG only (world generation and coach tips)
//! - Stable iteration order (obstacles and pickups are never reordered)
//! - No rendering or platform dependencies

pub mod aabb;
pub mod coach;
pub mod collision;
pub mod events;
pub mod input;
pub mod obstacle;
pub mod pickup;
pub mod state;
pub mod tick;
pub mod vehicle;
pub mod world;
pub mod zone;

pub use aabb::Aabb;
pub use coach::{COACH_TIPS, Coach};
pub use collision::{obstacle_contacts, pickup_contacts, reached_finish};
pub use events::{EventLog, LogEntry};
pub use input::{Direction, InputState};
pub use obstacle::{Obstacle, ObstacleKind};
pub use pickup::PickupZone;
pub use state::{Command, GameEvent, GameState, Hud, MissionPhase};
pub use tick::tick;
pub use vehicle::Vehicle;
pub use world::{World, WorldLayout, generate_world};
pub use zone::{Zone, ZoneKind, ZoneLayout};
