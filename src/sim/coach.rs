//! Driver coach
//!
//! Counts infractions and, on every third, shows a random driving tip for a
//! few seconds. The pending clear is a single expiry timestamp checked each
//! frame; showing anything new overwrites it.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::consts::{COACH_INFRACTION_THRESHOLD, COACH_TIP_DURATION};

/// Tips the coach picks from
pub const COACH_TIPS: [&str; 5] = [
    "Keep a safe distance from other vehicles.",
    "Watch out for animals on the road.",
    "Smooth driving is safe driving.",
    "Remember to check your surroundings before turning.",
    "Stick to the speed limit for a safer journey.",
];

/// Coach message slot plus its infraction counter
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Coach {
    /// Infractions since the last tip
    pub infractions: u32,
    message: String,
    /// Session time at which `message` clears (None = stays)
    expires_at: Option<f32>,
}

impl Coach {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current message, empty when nothing is shown
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Count an infraction. Past the threshold a tip is picked, shown until
    /// `now + COACH_TIP_DURATION`, and the counter restarts.
    pub fn record_infraction<R: Rng>(&mut self, now: f32, rng: &mut R) -> Option<&'static str> {
        self.infractions += 1;
        if self.infractions <= COACH_INFRACTION_THRESHOLD {
            return None;
        }

        let tip = COACH_TIPS[rng.random_range(0..COACH_TIPS.len())];
        self.infractions = 0;
        self.message = tip.to_string();
        self.expires_at = Some(now + COACH_TIP_DURATION);
        Some(tip)
    }

    /// Show a status line that stays until replaced
    pub fn show_status(&mut self, message: impl Into<String>) {
        self.message = message.into();
        self.expires_at = None;
    }

    /// Clear the message once its expiry has passed
    pub fn update(&mut self, now: f32) {
        if self.expires_at.is_some_and(|t| now >= t) {
            self.message.clear();
            self.expires_at = None;
        }
    }

    /// Drop any pending clear without touching the message
    pub fn cancel_expiry(&mut self) {
        self.expires_at = None;
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_third_infraction_shows_tip() {
        let mut rng = Pcg32::seed_from_u64(1);
        let mut coach = Coach::new();
        assert!(coach.record_infraction(0.0, &mut rng).is_none());
        assert!(coach.record_infraction(0.5, &mut rng).is_none());
        assert_eq!(coach.message(), "");

        let tip = coach.record_infraction(1.0, &mut rng).unwrap();
        assert!(COACH_TIPS.contains(&tip));
        assert_eq!(coach.message(), tip);
        assert_eq!(coach.infractions, 0);
        assert_eq!(coach.expires_at, Some(1.0 + COACH_TIP_DURATION));
    }

    #[test]
    fn test_tip_clears_after_duration() {
        let mut rng = Pcg32::seed_from_u64(2);
        let mut coach = Coach::new();
        for _ in 0..3 {
            coach.record_infraction(10.0, &mut rng);
        }
        coach.update(14.9);
        assert!(!coach.message().is_empty());
        coach.update(15.0);
        assert!(coach.message().is_empty());
        assert_eq!(coach.expires_at, None);
    }

    #[test]
    fn test_new_tip_replaces_pending_clear() {
        let mut rng = Pcg32::seed_from_u64(3);
        let mut coach = Coach::new();
        for _ in 0..3 {
            coach.record_infraction(0.0, &mut rng);
        }
        for _ in 0..3 {
            coach.record_infraction(4.0, &mut rng);
        }
        // The first tip's clear at 5.0 no longer applies
        coach.update(6.0);
        assert!(!coach.message().is_empty());
        coach.update(9.0);
        assert!(coach.message().is_empty());
    }

    #[test]
    fn test_status_does_not_expire() {
        let mut rng = Pcg32::seed_from_u64(4);
        let mut coach = Coach::new();
        for _ in 0..3 {
            coach.record_infraction(0.0, &mut rng);
        }
        coach.show_status("All students collected! Return to school.");
        coach.update(100.0);
        assert_eq!(coach.message(), "All students collected! Return to school.");
    }

    #[test]
    fn test_every_tip_is_reachable() {
        let mut rng = Pcg32::seed_from_u64(5);
        let mut coach = Coach::new();
        let mut seen = std::collections::HashSet::new();
        for _ in 0..300 {
            if let Some(tip) = coach.record_infraction(0.0, &mut rng) {
                seen.insert(tip);
            }
        }
        assert_eq!(seen.len(), COACH_TIPS.len());
    }
}
