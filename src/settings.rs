//! Game settings and driving tuning
//!
//! Persisted in LocalStorage on the web; defaults everywhere else.

use serde::{Deserialize, Serialize};

use crate::error::SettingsError;

/// How arrow keys drive the bus
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ControlModel {
    /// Throttle builds signed speed, coasting decays it
    #[default]
    Accelerated,
    /// Held key moves at a fixed speed, release stops instantly
    Direct,
}

impl ControlModel {
    pub fn as_str(&self) -> &'static str {
        match self {
            ControlModel::Accelerated => "Accelerated",
            ControlModel::Direct => "Direct",
        }
    }
}

/// What happens once every student is back at school
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum FinishMode {
    /// Mission moves to Finished and waits for restart
    #[default]
    Terminal,
    /// Mission stays Playing; the completion message is shown once
    FreeRoam,
}

/// Fastest yaw rate settings may ask for (radians/s)
pub const MAX_TURN_RATE: f32 = 10.0;

/// Vehicle handling numbers. All rates are per second.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DrivingTuning {
    /// Speed gained per second of throttle (units/s²)
    pub acceleration: f32,
    /// Forward top speed (units/s)
    pub max_speed: f32,
    /// Reverse top speed as a fraction of `max_speed`
    pub reverse_factor: f32,
    /// Coasting multiplier applied per reference frame
    pub decay: f32,
    /// Frame rate `decay` was tuned at
    pub decay_reference_hz: f32,
    /// Yaw rate while steering (radians/s)
    pub turn_rate: f32,
    /// Below this speed the wheel does nothing (accelerated model)
    pub min_turn_speed: f32,
    /// Fixed speed for the direct model (units/s)
    pub direct_speed: f32,
    /// Pickups only register below this speed
    pub pickup_speed_threshold: f32,
}

impl Default for DrivingTuning {
    fn default() -> Self {
        Self {
            acceleration: 10.0,
            max_speed: 20.0,
            reverse_factor: 0.5,
            decay: 0.98,
            decay_reference_hz: 60.0,
            turn_rate: 1.2,
            min_turn_speed: 0.1,
            direct_speed: 15.0,
            pickup_speed_threshold: 1.0,
        }
    }
}

impl DrivingTuning {
    /// Coasting multiplier for an arbitrary frame length
    #[inline]
    pub fn decay_for(&self, dt: f32) -> f32 {
        self.decay.powf(dt * self.decay_reference_hz)
    }

    /// Signed speed limits `(reverse, forward)`
    #[inline]
    pub fn speed_limits(&self) -> (f32, f32) {
        (-self.max_speed * self.reverse_factor, self.max_speed)
    }

    fn validate(&self) -> Result<(), SettingsError> {
        let fields = [
            self.acceleration,
            self.max_speed,
            self.reverse_factor,
            self.decay,
            self.decay_reference_hz,
            self.turn_rate,
            self.min_turn_speed,
            self.direct_speed,
            self.pickup_speed_threshold,
        ];
        if fields.iter().any(|v| !v.is_finite()) {
            return Err(SettingsError::Invalid("tuning values must be finite"));
        }
        if self.max_speed <= 0.0 {
            return Err(SettingsError::Invalid("max_speed must be positive"));
        }
        if self.acceleration <= 0.0 {
            return Err(SettingsError::Invalid("acceleration must be positive"));
        }
        if !(0.0..=1.0).contains(&self.reverse_factor) {
            return Err(SettingsError::Invalid("reverse_factor must be within 0..=1"));
        }
        if !(self.decay > 0.0 && self.decay < 1.0) {
            return Err(SettingsError::Invalid("decay must be within 0..1"));
        }
        if self.decay_reference_hz <= 0.0 {
            return Err(SettingsError::Invalid("decay_reference_hz must be positive"));
        }
        if !(self.turn_rate > 0.0 && self.turn_rate <= MAX_TURN_RATE) {
            return Err(SettingsError::Invalid("turn_rate must be within 0..=10 rad/s"));
        }
        if self.min_turn_speed < 0.0 {
            return Err(SettingsError::Invalid("min_turn_speed must not be negative"));
        }
        if self.direct_speed <= 0.0 {
            return Err(SettingsError::Invalid("direct_speed must be positive"));
        }
        if self.pickup_speed_threshold < 0.0 {
            return Err(SettingsError::Invalid("pickup_speed_threshold must not be negative"));
        }
        Ok(())
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Settings {
    pub control_model: ControlModel,
    pub finish_mode: FinishMode,
    pub tuning: DrivingTuning,
    /// Fixed world seed (None = pick one per session)
    pub seed: Option<u64>,
}

impl Settings {
    /// LocalStorage key (used only in wasm32)
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "highway_hero_settings";

    /// Parse and validate settings JSON. Missing fields take defaults.
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.tuning.validate()?;
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match Self::from_json(&json) {
                    Ok(settings) => {
                        log::info!("Loaded settings from LocalStorage");
                        return settings;
                    }
                    Err(e) => log::warn!("Ignoring stored settings: {}", e),
                }
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = self.to_json() {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("Settings saved");
            }
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}
