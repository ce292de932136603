//! Per-frame simulation step
//!
//! One call per rendered frame, always in the same order:
//! input -> bus kinematics -> boxes -> traffic and collisions -> pickups
//! -> finish check -> coach expiry. Rendering reads the state afterwards.

use super::collision::{obstacle_contacts, pickup_contacts, reached_finish};
use super::input::InputState;
use super::state::{
    GameEvent, GameState, MSG_ACCOMPLISHED, MSG_ACCOMPLISHED_ROAM, MSG_ALL_COLLECTED,
    MissionPhase,
};
use crate::consts::*;
use crate::settings::FinishMode;

/// Advance the game by one frame of `dt` seconds
pub fn tick(state: &mut GameState, input: &InputState, dt: f32) -> Vec<GameEvent> {
    let dt = dt.clamp(0.0, MAX_FRAME_DT);
    let mut events = Vec::new();
    let playing = state.phase == MissionPhase::Playing;

    if playing {
        state.elapsed += dt;
        let model = state.settings.control_model;
        let tuning = state.settings.tuning;
        state
            .vehicle
            .integrate(input, dt, model, &tuning, &state.layout.zones);
    }

    let bus_box = state.vehicle.bounding_box();

    // Traffic runs in every phase so the menu has something to look at
    for obstacle in &mut state.obstacles {
        obstacle.advance(dt);
    }

    if !playing {
        return events;
    }

    for i in obstacle_contacts(&bus_box, &state.obstacles) {
        let obstacle = &mut state.obstacles[i];
        obstacle.nudge_away();
        let (obstacle_id, name) = (obstacle.id, obstacle.kind.name());

        state.score = state.score.saturating_sub(COLLISION_PENALTY);
        state.log.push(state.elapsed, format!("Collision: {name}"));
        log::debug!("Hit {} #{} (score {})", name, obstacle_id, state.score);
        events.push(GameEvent::Infraction { obstacle_id, name });

        if let Some(tip) = state.coach.record_infraction(state.elapsed, &mut state.rng) {
            events.push(GameEvent::CoachTip(tip));
        }
    }

    let threshold = state.settings.tuning.pickup_speed_threshold;
    for i in pickup_contacts(&bus_box, state.vehicle.speed, threshold, &state.pickups) {
        let pickup = &mut state.pickups[i];
        if !pickup.collect() {
            continue;
        }
        let pickup_id = pickup.id;

        state.score += PICKUP_REWARD;
        state.collected += 1;
        state.log.push(state.elapsed, "Picked up student.");
        log::debug!(
            "Picked up student #{} ({}/{})",
            pickup_id,
            state.collected,
            state.total_students()
        );
        events.push(GameEvent::StudentPickedUp { pickup_id });

        if state.collected == state.total_students() {
            state.log.push(state.elapsed, MSG_ALL_COLLECTED);
            state.coach.show_status(MSG_ALL_COLLECTED);
            events.push(GameEvent::AllCollected);
        }
    }

    if state.all_collected() && reached_finish(&bus_box, &state.layout.finish) {
        match state.settings.finish_mode {
            FinishMode::Terminal => {
                state.phase = MissionPhase::Finished;
                state.log.push(state.elapsed, MSG_ACCOMPLISHED);
                state.coach.show_status(MSG_ACCOMPLISHED);
                state.vehicle.speed = 0.0;
                log::info!(
                    "Mission accomplished in {:.1}s, score {}",
                    state.elapsed,
                    state.score
                );
                events.push(GameEvent::MissionAccomplished);
            }
            FinishMode::FreeRoam if !state.mission_complete => {
                state.mission_complete = true;
                state.log.push(state.elapsed, MSG_ACCOMPLISHED_ROAM);
                state.coach.show_status(MSG_ACCOMPLISHED_ROAM);
                log::info!("Mission accomplished, free roam (score {})", state.score);
                events.push(GameEvent::MissionAccomplished);
            }
            FinishMode::FreeRoam => {}
        }
    }

    state.coach.update(state.elapsed);

    events
}
