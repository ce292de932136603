//! Mission state and the per-session record
//!
//! A session is everything that must start from zero when the player
//! presses Start: bus transform, traffic, students, score, log, coach and
//! the session clock. `start` rebuilds all of it from a fresh `World`.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::coach::Coach;
use super::events::EventLog;
use super::obstacle::Obstacle;
use super::pickup::PickupZone;
use super::vehicle::Vehicle;
use super::world::{World, WorldLayout};
use crate::error::TransitionError;
use crate::settings::Settings;

/// Log line written when a session begins
pub const MSG_STARTED: &str = "Game started. Pick up all students and return to school.";
/// Status once the last student is aboard
pub const MSG_ALL_COLLECTED: &str = "All students collected! Return to school.";
/// Status when the bus is back at school with everyone
pub const MSG_ACCOMPLISHED: &str = "Mission Accomplished!";
/// Free-roam variant of the above
pub const MSG_ACCOMPLISHED_ROAM: &str = "Mission Accomplished! You can continue driving.";

/// Where the mission is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum MissionPhase {
    /// Title screen; traffic runs, nothing scores
    #[default]
    Menu,
    /// Driving
    Playing,
    /// Everyone delivered; waits for restart
    Finished,
}

impl MissionPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            MissionPhase::Menu => "in menu",
            MissionPhase::Playing => "playing",
            MissionPhase::Finished => "finished",
        }
    }
}

/// Player commands that change phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    Start,
    Restart,
}

impl Command {
    pub fn as_str(&self) -> &'static str {
        match self {
            Command::Start => "start",
            Command::Restart => "restart",
        }
    }
}

/// Something that happened this frame, for toasts and sounds
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    /// Bus hit an obstacle
    Infraction { obstacle_id: u32, name: &'static str },
    /// Coach put up a tip
    CoachTip(&'static str),
    /// A student boarded
    StudentPickedUp { pickup_id: u32 },
    /// The last student boarded
    AllCollected,
    /// Bus returned to school with everyone aboard
    MissionAccomplished,
}

/// Read-only view for the dashboard
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Hud {
    pub phase: MissionPhase,
    pub score: u32,
    pub collected: u32,
    pub total: u32,
    /// Road area the bus is on, if any
    pub zone: Option<&'static str>,
    pub coach_message: String,
    /// Newest first
    pub log: Vec<String>,
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    pub phase: MissionPhase,
    pub settings: Settings,
    pub layout: WorldLayout,
    /// Player bus
    pub vehicle: Vehicle,
    /// Traffic and cows (stable order, never removed)
    pub obstacles: Vec<Obstacle>,
    /// Student pickup zones (stable order, never removed)
    pub pickups: Vec<PickupZone>,
    pub score: u32,
    pub collected: u32,
    pub log: EventLog,
    pub coach: Coach,
    /// Session clock in seconds (advances only while playing)
    pub elapsed: f32,
    /// Free-roam completion latch
    pub mission_complete: bool,
    /// Sessions started so far
    pub sessions: u32,
    /// Tip picker
    pub(crate) rng: Pcg32,
}

impl GameState {
    /// Menu state showing `world`
    pub fn new(settings: Settings, world: World, seed: u64) -> Self {
        let mut state = Self {
            phase: MissionPhase::Menu,
            settings,
            layout: WorldLayout::default(),
            vehicle: Vehicle::at_spawn(),
            obstacles: Vec::new(),
            pickups: Vec::new(),
            score: 0,
            collected: 0,
            log: EventLog::new(),
            coach: Coach::new(),
            elapsed: 0.0,
            mission_complete: false,
            sessions: 0,
            rng: Pcg32::seed_from_u64(seed),
        };
        state.load_world(world);
        state
    }

    /// Replace the world and zero every per-session value
    fn load_world(&mut self, world: World) {
        self.layout = world.layout;
        self.vehicle
            .reset_to(self.layout.spawn_position, self.layout.spawn_yaw);
        self.obstacles = world.obstacles;
        self.pickups = world
            .students
            .into_iter()
            .zip(1..)
            .map(|(pos, id)| PickupZone::new(id, pos))
            .collect();
        self.score = 0;
        self.collected = 0;
        self.log.clear();
        self.coach.reset();
        self.elapsed = 0.0;
        self.mission_complete = false;
    }

    /// Menu -> Playing on a fresh world
    pub fn start(&mut self, world: World, seed: u64) -> Result<(), TransitionError> {
        self.check(MissionPhase::Menu, Command::Start)?;

        self.load_world(world);
        self.rng = Pcg32::seed_from_u64(seed);
        self.sessions += 1;
        self.phase = MissionPhase::Playing;
        self.log.push(self.elapsed, MSG_STARTED);

        log::info!(
            "Session {} started: {} students, {} obstacles",
            self.sessions,
            self.total_students(),
            self.obstacles.len()
        );
        Ok(())
    }

    /// Finished -> Menu. Final score and log stay visible until the next start.
    pub fn restart(&mut self) -> Result<(), TransitionError> {
        self.check(MissionPhase::Finished, Command::Restart)?;

        self.phase = MissionPhase::Menu;
        self.coach.cancel_expiry();
        log::info!("Back to menu (last score {})", self.score);
        Ok(())
    }

    fn check(&self, expected: MissionPhase, command: Command) -> Result<(), TransitionError> {
        if self.phase == expected {
            return Ok(());
        }
        let err = TransitionError {
            from: self.phase,
            command,
        };
        log::warn!("Rejected command: {}", err);
        Err(err)
    }

    pub fn total_students(&self) -> u32 {
        self.pickups.len() as u32
    }

    /// True once every pickup zone is spent
    pub fn all_collected(&self) -> bool {
        self.pickups.iter().all(|p| !p.active)
    }

    pub fn hud(&self) -> Hud {
        Hud {
            phase: self.phase,
            score: self.score,
            collected: self.collected,
            total: self.total_students(),
            zone: self.vehicle.zone.map(|z| z.as_str()),
            coach_message: self.coach.message().to_string(),
            log: self.log.lines(),
        }
    }
}
